pub mod calendar;
pub mod card;
pub mod deliverable;
pub mod persistence;
pub mod rollup;
pub mod validation;

pub use calendar::{
    DateParseError, DayOptions, HolidayTable, WorkCalendar, format_date, parse_date,
};
pub use card::RoadmapCard;
pub use deliverable::{DEFAULT_DURATION_DAYS, Deliverable, TaskStatus, is_range_occupied};
pub use persistence::{
    PersistenceError, PersistenceResult, load_deliverables_from_csv, load_roadmap_from_csv,
    load_roadmap_from_json, save_deliverables_to_csv, save_roadmap_to_csv, save_roadmap_to_json,
    validate_deliverables, validate_roadmap,
};
pub use rollup::{
    GroupSpan, card_span, combine_spans, next_available_after, next_available_date,
    project_end_date, project_span, status_counts,
};
pub use validation::{
    ValidationError, validate_card_collection, validate_deliverable,
    validate_deliverable_collection,
};
