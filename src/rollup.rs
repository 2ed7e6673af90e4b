use crate::calendar::{DayOptions, WorkCalendar};
use crate::card::RoadmapCard;
use crate::deliverable::{Deliverable, TaskStatus};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Summary span over a group of deliverables (or over other spans).
///
/// `end` is exclusive. `duration_days` is the plain calendar-day difference
/// between `start` and `end`, a display figure rather than a working-day
/// count, since the members may each use different exclusion options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub duration_days: i64,
}

impl GroupSpan {
    fn from_bounds(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            duration_days: (end - start).num_days(),
        }
    }
}

/// Roll up a card's deliverables: earliest start, latest exclusive end
/// (each computed under its own options), calendar-day span between them.
/// Empty input has no span.
pub fn card_span(calendar: &WorkCalendar, deliverables: &[Deliverable]) -> Option<GroupSpan> {
    let first = deliverables.first()?;
    let mut start = first.start_date;
    let mut end = first.exclusive_end(calendar);
    for deliverable in &deliverables[1..] {
        start = start.min(deliverable.start_date);
        end = end.max(deliverable.exclusive_end(calendar));
    }
    Some(GroupSpan::from_bounds(start, end))
}

/// Combine already-computed spans with the same min/max/difference rule.
/// The project-level rollup is this function applied to per-card spans.
pub fn combine_spans<I>(spans: I) -> Option<GroupSpan>
where
    I: IntoIterator<Item = GroupSpan>,
{
    let mut iter = spans.into_iter();
    let first = iter.next()?;
    let mut start = first.start;
    let mut end = first.end;
    for span in iter {
        start = start.min(span.start);
        end = end.max(span.end);
    }
    Some(GroupSpan::from_bounds(start, end))
}

/// Span of the whole roadmap: per-card spans combined. Cards without
/// deliverables contribute nothing.
pub fn project_span(calendar: &WorkCalendar, cards: &[RoadmapCard]) -> Option<GroupSpan> {
    combine_spans(
        cards
            .iter()
            .filter_map(|card| card_span(calendar, &card.deliverables)),
    )
}

/// Latest exclusive end date across all cards, for the project header.
pub fn project_end_date(calendar: &WorkCalendar, cards: &[RoadmapCard]) -> Option<NaiveDate> {
    project_span(calendar, cards).map(|span| span.end)
}

/// Default start date for a new deliverable: the first working day (under
/// default options) on or after the latest exclusive end of the existing
/// deliverables, or `today` when there are none.
///
/// The exclusive end is already the first date no deliverable occupies, so
/// it is returned as-is when it happens to be a working day. Nothing is
/// reserved; an overlap check still applies before the caller commits.
pub fn next_available_after(
    calendar: &WorkCalendar,
    deliverables: &[Deliverable],
    today: NaiveDate,
) -> NaiveDate {
    let latest_end = deliverables
        .iter()
        .map(|deliverable| deliverable.exclusive_end(calendar))
        .max();
    match latest_end {
        Some(end) => calendar.next_working_day_on_or_after(end, &DayOptions::default()),
        None => today,
    }
}

/// [`next_available_after`] anchored to the current local date.
pub fn next_available_date(calendar: &WorkCalendar, deliverables: &[Deliverable]) -> NaiveDate {
    next_available_after(calendar, deliverables, Local::now().date_naive())
}

/// Count deliverables per status. Every status is present in the result,
/// zeroed when unused, so progress displays can iterate all five.
pub fn status_counts(deliverables: &[Deliverable]) -> BTreeMap<TaskStatus, usize> {
    let mut counts: BTreeMap<TaskStatus, usize> = TaskStatus::ALL
        .into_iter()
        .map(|status| (status, 0))
        .collect();
    for deliverable in deliverables {
        *counts.entry(deliverable.status).or_insert(0) += 1;
    }
    counts
}
