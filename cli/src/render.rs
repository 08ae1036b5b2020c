use tabled::settings::Style;
use tabled::{Table, Tabled};
use tasklist_core::{Task, TaskList};

#[derive(Tabled)]
struct ListRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Done")]
    done: String,
}

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = " ")]
    status: &'static str,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Notes")]
    notes: String,
}

pub fn lists_table(lists: &[TaskList], selected: Option<usize>) -> String {
    if lists.is_empty() {
        return "No lists yet.".to_string();
    }

    let rows = lists.iter().enumerate().map(|(i, list)| {
        let marker = if selected == Some(i) { "* " } else { "" };
        ListRow {
            position: i,
            name: format!("{}{}", marker, list.name()),
            done: format!("{}/{}", list.completed_count(), list.len()),
        }
    });

    let mut table = Table::new(rows);
    table.with(Style::modern());
    table.to_string()
}

/// Positions are those of the given (possibly filtered) view.
pub fn tasks_table(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No tasks.".to_string();
    }

    let rows = tasks.iter().enumerate().map(|(i, task)| TaskRow {
        position: i,
        status: if task.is_completed { "✔" } else { "☐" },
        title: task.title.clone(),
        due: task
            .due_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string()),
        notes: task.notes.clone().unwrap_or_else(|| "-".to_string()),
    });

    let mut table = Table::new(rows);
    table.with(Style::modern());
    table.to_string()
}
