use std::io::{BufRead, Write};

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use clap::error::ErrorKind;
use clap::Parser;
use log::{debug, info};
use tasklist_core::{
    parse_args, parse_human_date, split_command_line, ListId, TaskEdit, TaskId, TaskService,
};

use crate::command::{FilterState, SessionCommand, SessionLine};
use crate::render;

const TASK_KEYS: &[&str] = &["due", "notes"];
const CLEAR_VALUE: &str = "none";

#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A command session over one in-memory store. The store lives as long as
/// the session does. Results go to `out`, interactive failures to `err`.
pub struct Session<W: Write, E: Write> {
    service: TaskService,
    current: Option<ListId>,
    show_incomplete_only: bool,
    out: W,
    err: E,
}

impl<W: Write, E: Write> Session<W, E> {
    pub fn new(service: TaskService, show_incomplete_only: bool, out: W, err: E) -> Self {
        Self {
            service,
            current: None,
            show_incomplete_only,
            out,
            err,
        }
    }

    pub fn service(&self) -> &TaskService {
        &self.service
    }

    pub fn into_output(self) -> (W, E) {
        (self.out, self.err)
    }

    /// Reads commands until EOF or `quit`. Failing commands are reported and
    /// the session carries on.
    pub fn run_interactive<R: BufRead>(&mut self, reader: R, prompt: bool) -> Result<()> {
        info!("session started");
        let mut lines = reader.lines();
        loop {
            if prompt {
                write!(self.out, "> ")?;
                self.out.flush()?;
            }
            let Some(line) = lines.next() else { break };
            match self.execute(&line?) {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(e) => writeln!(self.err, "error: {:#}", e)?,
            }
        }
        info!("session ended");
        Ok(())
    }

    /// Runs a script, stopping at the first failing line.
    pub fn run_script<R: BufRead>(&mut self, reader: R) -> Result<()> {
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let flow = self
                .execute(&line)
                .with_context(|| format!("line {}: {}", index + 1, line.trim()))?;
            if flow == Flow::Quit {
                break;
            }
        }
        Ok(())
    }

    pub fn execute(&mut self, line: &str) -> Result<Flow> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(Flow::Continue);
        }
        debug!("command: {}", line);

        let words = split_command_line(line)?;
        let parsed = match SessionLine::try_parse_from(&words) {
            Ok(parsed) => parsed,
            Err(err) => match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                    write!(self.out, "{}", err.render())?;
                    return Ok(Flow::Continue);
                }
                _ => {
                    let rendered = err.render().to_string();
                    let message = rendered.trim().trim_start_matches("error: ");
                    return Err(anyhow!("{}", message));
                }
            },
        };

        self.dispatch(parsed.command)
    }

    fn dispatch(&mut self, command: SessionCommand) -> Result<Flow> {
        match command {
            SessionCommand::Lists => {
                let selected = self.current.and_then(|id| self.service.store().position_of(id));
                writeln!(self.out, "{}", render::lists_table(self.service.lists(), selected))?;
            }
            SessionCommand::NewList { name } => {
                let name = name.join(" ");
                let id = self.service.create_list(&name)?;
                if self.current.is_none() {
                    self.current = Some(id);
                }
                writeln!(
                    self.out,
                    "Created list '{}' at position {}",
                    name,
                    self.service.lists().len() - 1
                )?;
            }
            SessionCommand::Rename { position, name } => {
                let id = self.list_id_at(position)?;
                self.service.rename_list(id, &name.join(" "))?;
            }
            SessionCommand::RmLists { positions } => {
                let removed = self.service.delete_lists(&positions)?;
                if self.current.is_some_and(|id| removed.contains(&id)) {
                    self.current = None;
                }
                writeln!(self.out, "Removed {} list(s)", removed.len())?;
            }
            SessionCommand::MvLists { positions, to } => {
                self.service.reorder_lists(&positions, to)?;
            }
            SessionCommand::Use { position } => {
                let id = self.list_id_at(position)?;
                self.current = Some(id);
                writeln!(self.out, "Using '{}'", self.service.list(id)?.name())?;
            }
            SessionCommand::Add { args } => {
                let list_id = self.current_list()?;
                let parsed = parse_args(&args, TASK_KEYS)?;
                let due = parsed.metadata.get("due").map(|d| parse_due(d)).transpose()?;
                let notes = parsed.metadata.get("notes").map(|n| parse_notes(n));

                let edit = TaskEdit::new(parsed.text.as_str())
                    .due_date(due.flatten())
                    .notes(notes.flatten());
                self.service.create_task_with(list_id, edit)?;
                writeln!(self.out, "Task added: {}", parsed.text)?;
            }
            SessionCommand::Show {
                incomplete,
                all,
                json,
            } => {
                let list_id = self.current_list()?;
                let tasks = self.service.list_tasks(list_id, self.view_filter(incomplete, all))?;
                if json {
                    writeln!(self.out, "{}", serde_json::to_string_pretty(&tasks)?)?;
                } else {
                    writeln!(self.out, "{}", self.service.list(list_id)?.name())?;
                    writeln!(self.out, "{}", render::tasks_table(&tasks))?;
                }
            }
            SessionCommand::Filter { state } => {
                self.show_incomplete_only = state == FilterState::On;
            }
            SessionCommand::Rm { positions } => {
                let list_id = self.current_list()?;
                let removed = self.service.delete_tasks(list_id, &positions)?;
                writeln!(self.out, "Removed {} task(s)", removed.len())?;
            }
            SessionCommand::Mv { positions, to } => {
                let list_id = self.current_list()?;
                self.service.reorder_tasks(list_id, &positions, to)?;
            }
            SessionCommand::Toggle { position } => {
                let list_id = self.current_list()?;
                let task_id = self.task_id_in_view(list_id, position)?;
                let done = self.service.toggle_task(list_id, task_id)?;
                writeln!(self.out, "{}", if done { "Completed" } else { "Reopened" })?;
            }
            SessionCommand::ToggleAll => {
                let list_id = self.current_list()?;
                let done = self.service.toggle_all_in_list(list_id)?;
                let state = if done { "completed" } else { "open" };
                writeln!(self.out, "All tasks {}", state)?;
            }
            SessionCommand::Edit { position, args } => {
                let list_id = self.current_list()?;
                let task_id = self.task_id_in_view(list_id, position)?;
                let task = self
                    .service
                    .list(list_id)?
                    .task(task_id)
                    .ok_or_else(|| anyhow!("Task vanished: {}", task_id))?;

                let parsed = parse_args(&args, TASK_KEYS)?;
                let mut edit = TaskEdit::from_task(task);
                if !parsed.text.is_empty() {
                    edit.title = parsed.text;
                }
                if let Some(d) = parsed.metadata.get("due") {
                    edit.due_date = parse_due(d)?;
                }
                if let Some(n) = parsed.metadata.get("notes") {
                    edit.notes = parse_notes(n);
                }
                self.service.edit_task(list_id, task_id, edit)?;
            }
            SessionCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn view_filter(&self, incomplete: bool, all: bool) -> bool {
        if incomplete {
            true
        } else if all {
            false
        } else {
            self.show_incomplete_only
        }
    }

    fn current_list(&self) -> Result<ListId> {
        let id = self
            .current
            .ok_or_else(|| anyhow!("No list selected (try: new-list <name> or use <position>)"))?;
        self.service.list(id)?;
        Ok(id)
    }

    fn list_id_at(&self, position: usize) -> Result<ListId> {
        self.service
            .lists()
            .get(position)
            .map(|l| l.id())
            .ok_or_else(|| anyhow!("No list at position {}", position))
    }

    /// Positions for single-task commands follow what `show` displays.
    fn task_id_in_view(&self, list_id: ListId, position: usize) -> Result<TaskId> {
        self.service
            .list_tasks(list_id, self.show_incomplete_only)?
            .get(position)
            .map(|t| t.id())
            .ok_or_else(|| anyhow!("No task at position {} in the current view", position))
    }
}

fn parse_due(value: &str) -> Result<Option<NaiveDate>> {
    if value.eq_ignore_ascii_case(CLEAR_VALUE) {
        return Ok(None);
    }
    parse_human_date(value)
        .map(Some)
        .with_context(|| format!("Invalid due date '{}'", value))
}

fn parse_notes(value: &str) -> Option<String> {
    if value.is_empty() || value.eq_ignore_ascii_case(CLEAR_VALUE) {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tasklist_core::{ServiceOptions, StoreEvent, TaskStore};

    type TestSession = Session<Vec<u8>, Vec<u8>>;

    fn session() -> TestSession {
        Session::new(TaskService::new(TaskStore::new()), false, Vec::new(), Vec::new())
    }

    fn run(session: &mut TestSession, lines: &[&str]) {
        for line in lines {
            session.execute(line).unwrap();
        }
    }

    fn titles(session: &TestSession) -> Vec<String> {
        let list = &session.service().lists()[0];
        list.tasks().iter().map(|t| t.title.clone()).collect()
    }

    #[test]
    fn test_first_list_is_selected() {
        let mut s = session();
        run(&mut s, &["new-list Groceries", "add Buy milk", "add \"Eggs, free range\""]);
        assert_eq!(titles(&s), vec!["Buy milk", "Eggs, free range"]);
    }

    #[test]
    fn test_add_with_metadata() {
        let mut s = session();
        run(&mut s, &["new-list Home", r#"add Pay rent due:2025-02-01 n:"by transfer""#]);
        let task = &s.service().lists()[0].tasks()[0];
        assert_eq!(task.title, "Pay rent");
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2025, 2, 1));
        assert_eq!(task.notes.as_deref(), Some("by transfer"));
    }

    #[test]
    fn test_add_with_metadata_is_one_event() {
        let mut s = session();
        run(&mut s, &["new-list Home"]);
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        s.service.subscribe(move |e: &StoreEvent| sink.borrow_mut().push(e.clone()));

        run(&mut s, &["add Pay rent due:2025-02-01 notes:online"]);
        let events = events.borrow();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], StoreEvent::TaskCreated { .. }));
    }

    #[test]
    fn test_edit_keeps_unmentioned_fields_and_clears_none() {
        let mut s = session();
        run(
            &mut s,
            &[
                "new-list Home",
                "add Draft due:2025-02-01 notes:first",
                "edit 0 Final notes:none",
            ],
        );
        let task = &s.service().lists()[0].tasks()[0];
        assert_eq!(task.title, "Final");
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2025, 2, 1));
        assert_eq!(task.notes, None);

        run(&mut s, &["edit 0 due:none"]);
        let task = &s.service().lists()[0].tasks()[0];
        assert_eq!(task.title, "Final");
        assert_eq!(task.due_date, None);
    }

    #[test]
    fn test_toggle_uses_filtered_view_positions() {
        let mut s = session();
        run(
            &mut s,
            &["new-list L", "add A", "add B", "add C", "toggle 0", "filter on", "toggle 1"],
        );
        // With A done, view position 1 is C.
        let done: Vec<bool> = s.service().lists()[0]
            .tasks()
            .iter()
            .map(|t| t.is_completed)
            .collect();
        assert_eq!(done, vec![true, false, true]);
    }

    #[test]
    fn test_rm_and_mv_use_full_positions() {
        let mut s = session();
        run(&mut s, &["new-list L", "add A", "add B", "add C", "add D"]);
        run(&mut s, &["rm 0 2", "mv 1 --to 0"]);
        assert_eq!(titles(&s), vec!["D", "B"]);
    }

    #[test]
    fn test_removing_current_list_clears_selection() {
        let mut s = session();
        run(&mut s, &["new-list A", "new-list B", "rm-lists 0"]);
        let err = s.execute("add Orphan").unwrap_err();
        assert!(err.to_string().contains("No list selected"));

        run(&mut s, &["use 0", "add Adopted"]);
        assert_eq!(s.service().lists()[0].name(), "B");
        assert_eq!(titles(&s), vec!["Adopted"]);
    }

    #[test]
    fn test_errors_do_not_mutate() {
        let mut s = session();
        run(&mut s, &["new-list L", "add A"]);
        assert!(s.execute("add due:tomorrow").is_err());
        assert!(s.execute("edit 3 X").is_err());
        assert!(s.execute("add B due:someday").is_err());
        assert!(s.execute("bogus").is_err());
        assert_eq!(titles(&s), vec!["A"]);
    }

    #[test]
    fn test_strict_mode_surfaces_bad_positions() {
        let options = ServiceOptions {
            strict_offsets: true,
            ..ServiceOptions::default()
        };
        let service = TaskService::with_options(TaskStore::new(), options);
        let mut s = Session::new(service, false, Vec::new(), Vec::new());
        run(&mut s, &["new-list L", "add A"]);
        let err = s.execute("rm 0 4").unwrap_err();
        assert!(err.to_string().contains("out of range"));
        assert_eq!(titles(&s), vec!["A"]);
    }

    #[test]
    fn test_script_stops_at_failing_line() {
        let mut s = session();
        let script = "new-list L\n# comment\n\nadd A\ntoggle 9\nadd never\n";
        let err = s.run_script(script.as_bytes()).unwrap_err();
        assert!(format!("{:#}", err).starts_with("line 5"));
        assert_eq!(titles(&s), vec!["A"]);
    }

    #[test]
    fn test_interactive_reports_and_continues() {
        let mut s = session();
        let input = "new-list L\ntoggle 0\nadd A\nquit\nadd B\n";
        s.run_interactive(input.as_bytes(), false).unwrap();
        assert_eq!(titles(&s), vec!["A"]);
        let (out, err) = s.into_output();
        let (out, err) = (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap());
        assert!(err.contains("error: No task at position 0"));
        assert!(!out.contains("error:"));
        assert!(out.contains("Task added: A"));
    }

    #[test]
    fn test_show_outputs() {
        let mut s = session();
        run(&mut s, &["new-list Groceries", "add Milk", "toggle-all", "add Bread", "show --incomplete", "show --json"]);
        let (out, _) = s.into_output();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("All tasks completed"));
        assert!(out.contains("Bread"));
        assert!(out.contains("\"is_completed\": true"));
    }
}
