use chrono::NaiveDate;
use roadmap_scheduler::{
    Deliverable, RoadmapCard, ValidationError, validate_card_collection, validate_deliverable,
    validate_deliverable_collection,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn rejects_non_positive_durations() {
    let zero = Deliverable::new(d(2025, 1, 13)).with_id("d1").with_duration(0);
    let err: ValidationError = validate_deliverable(&zero).unwrap_err();
    assert!(err.to_string().contains("minimum is 1 working day"));

    let negative = Deliverable::new(d(2025, 1, 13)).with_duration(-3);
    assert!(validate_deliverable(&negative).is_err());
}

#[test]
fn accepts_the_default_record() {
    let deliverable = Deliverable::new(d(2025, 1, 13));
    assert!(validate_deliverable(&deliverable).is_ok());
}

#[test]
fn rejects_blank_ids() {
    let blank = Deliverable::new(d(2025, 1, 13)).with_id("  ");
    let err = validate_deliverable(&blank).unwrap_err();
    assert!(err.to_string().contains("non-empty"));
}

#[test]
fn rejects_duplicate_deliverable_ids() {
    let deliverables = vec![
        Deliverable::new(d(2025, 1, 13)).with_id("d1"),
        Deliverable::new(d(2025, 1, 20)).with_id("d1"),
    ];
    let err = validate_deliverable_collection(&deliverables).unwrap_err();
    assert!(err.to_string().contains("duplicate deliverable id d1"));
}

#[test]
fn unsaved_records_do_not_collide() {
    // Any number of not-yet-committed records may coexist.
    let deliverables = vec![
        Deliverable::new(d(2025, 1, 13)),
        Deliverable::new(d(2025, 1, 20)),
    ];
    assert!(validate_deliverable_collection(&deliverables).is_ok());
}

#[test]
fn rejects_duplicate_card_ids() {
    let cards = vec![
        RoadmapCard::new("c1", "First"),
        RoadmapCard::new("c1", "Second"),
    ];
    let err = validate_card_collection(&cards).unwrap_err();
    assert!(err.to_string().contains("duplicate card id c1"));
}

#[test]
fn rejects_cards_without_an_id() {
    let cards = vec![RoadmapCard::new("  ", "Unnamed")];
    let err = validate_card_collection(&cards).unwrap_err();
    assert!(err.to_string().contains("non-empty id"));
}

#[test]
fn card_validation_covers_nested_deliverables() {
    let mut card = RoadmapCard::new("c1", "First");
    card.deliverables = vec![
        Deliverable::new(d(2025, 1, 13)).with_id("d1").with_duration(0),
    ];
    assert!(validate_card_collection(&[card]).is_err());
}
