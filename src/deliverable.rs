use crate::calendar::{DayOptions, WorkCalendar};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Duration assigned to a deliverable created without an explicit one.
pub const DEFAULT_DURATION_DAYS: i64 = 7;

/// Progress state of a deliverable (and, rolled up, of a card).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum TaskStatus {
    #[default]
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "Planning & Research")]
    PlanningResearch,
    #[serde(rename = "Implementing")]
    Implementing,
    #[serde(rename = "On Hold")]
    OnHold,
    #[serde(rename = "Completed")]
    Completed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 5] = [
        TaskStatus::NotStarted,
        TaskStatus::PlanningResearch,
        TaskStatus::Implementing,
        TaskStatus::OnHold,
        TaskStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::NotStarted => "Not Started",
            TaskStatus::PlanningResearch => "Planning & Research",
            TaskStatus::Implementing => "Implementing",
            TaskStatus::OnHold => "On Hold",
            TaskStatus::Completed => "Completed",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "Not Started" => Some(TaskStatus::NotStarted),
            "Planning & Research" => Some(TaskStatus::PlanningResearch),
            "Implementing" => Some(TaskStatus::Implementing),
            "On Hold" => Some(TaskStatus::OnHold),
            "Completed" => Some(TaskStatus::Completed),
            _ => None,
        }
    }
}

/// A scheduled sub-task of a roadmap card.
///
/// `duration_days` is exclusive-anchor: the deliverable occupies the
/// `duration_days` working days strictly after `start_date`, under its own
/// [`DayOptions`]. The anchor itself is not required to be a working day
/// (date pickers accept any date).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deliverable {
    /// Absent for records not yet committed by the persistence layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub status: TaskStatus,
    pub start_date: NaiveDate,
    pub duration_days: i64,
    #[serde(flatten)]
    pub options: DayOptions,
}

impl Deliverable {
    pub fn new(start_date: NaiveDate) -> Self {
        Self {
            id: None,
            text: String::new(),
            status: TaskStatus::default(),
            start_date,
            duration_days: DEFAULT_DURATION_DAYS,
            options: DayOptions::default(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_duration(mut self, duration_days: i64) -> Self {
        self.duration_days = duration_days;
        self
    }

    pub fn with_options(mut self, options: DayOptions) -> Self {
        self.options = options;
        self
    }

    /// Exclusive end: the first calendar date not occupied by this
    /// deliverable, computed under its own options.
    pub fn exclusive_end(&self, calendar: &WorkCalendar) -> NaiveDate {
        calendar.add_working_days(self.start_date, self.duration_days, &self.options)
    }

    /// Inclusive end for display only: the last occupied working day.
    /// Never stored; the stored value is always the exclusive-anchor count.
    pub fn display_end(&self, calendar: &WorkCalendar) -> NaiveDate {
        calendar.add_working_days(self.start_date, self.duration_days - 1, &self.options)
    }
}

/// Advisory overlap check for a candidate range against existing
/// deliverables. Each side's exclusive end is derived under its own options,
/// then the half-open ranges `[start, end)` are compared.
///
/// `exclude_id` skips the record being edited. The verdict does not depend
/// on the order of `deliverables`, and nothing is mutated; callers decide
/// whether a detected overlap blocks the write or is explicitly allowed.
pub fn is_range_occupied(
    calendar: &WorkCalendar,
    deliverables: &[Deliverable],
    candidate_start: NaiveDate,
    candidate_duration: i64,
    candidate_options: &DayOptions,
    exclude_id: Option<&str>,
) -> bool {
    let candidate_end =
        calendar.add_working_days(candidate_start, candidate_duration, candidate_options);

    for existing in deliverables {
        if let (Some(skip), Some(id)) = (exclude_id, existing.id.as_deref()) {
            if skip == id {
                continue;
            }
        }
        let existing_end = existing.exclusive_end(calendar);
        if candidate_start < existing_end && candidate_end > existing.start_date {
            return true;
        }
    }

    false
}
