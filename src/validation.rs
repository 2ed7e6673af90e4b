use crate::card::RoadmapCard;
use crate::deliverable::Deliverable;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone)]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationError {}

fn label(deliverable: &Deliverable) -> &str {
    deliverable.id.as_deref().unwrap_or("<new>")
}

pub fn validate_deliverable(deliverable: &Deliverable) -> Result<(), ValidationError> {
    if deliverable.duration_days < 1 {
        return Err(ValidationError::new(format!(
            "deliverable {} has duration {} (minimum is 1 working day)",
            label(deliverable),
            deliverable.duration_days
        )));
    }
    if let Some(id) = deliverable.id.as_deref() {
        if id.trim().is_empty() {
            return Err(ValidationError::new(
                "deliverable id must be non-empty when present",
            ));
        }
    }
    Ok(())
}

pub fn validate_deliverable_collection(
    deliverables: &[Deliverable],
) -> Result<(), ValidationError> {
    let mut seen_ids = HashSet::with_capacity(deliverables.len());
    for deliverable in deliverables {
        if let Some(id) = deliverable.id.as_deref() {
            if !seen_ids.insert(id) {
                return Err(ValidationError::new(format!(
                    "duplicate deliverable id {id}"
                )));
            }
        }
        validate_deliverable(deliverable)?;
    }
    Ok(())
}

pub fn validate_card_collection(cards: &[RoadmapCard]) -> Result<(), ValidationError> {
    let mut seen_ids = HashSet::with_capacity(cards.len());
    for card in cards {
        if card.id.trim().is_empty() {
            return Err(ValidationError::new(format!(
                "card '{}' requires a non-empty id",
                card.title
            )));
        }
        if !seen_ids.insert(card.id.as_str()) {
            return Err(ValidationError::new(format!(
                "duplicate card id {}",
                card.id
            )));
        }
        validate_deliverable_collection(&card.deliverables)?;
    }
    Ok(())
}
