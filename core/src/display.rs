use chrono::NaiveDate;

/// Presents an optional due date through a control that always needs a
/// value. `None` is shown as the sentinel, and picking the sentinel maps
/// back to `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueDateAdapter {
    sentinel: NaiveDate,
}

impl DueDateAdapter {
    pub fn new(sentinel: NaiveDate) -> Self {
        Self { sentinel }
    }

    pub fn sentinel(&self) -> NaiveDate {
        self.sentinel
    }

    pub fn to_display(&self, value: Option<NaiveDate>) -> NaiveDate {
        value.unwrap_or(self.sentinel)
    }

    pub fn from_display(&self, shown: NaiveDate) -> Option<NaiveDate> {
        if shown == self.sentinel {
            None
        } else {
            Some(shown)
        }
    }
}
