use crate::calendar::DateParseError;
use crate::card::RoadmapCard;
use crate::deliverable::Deliverable;
use crate::validation;
use serde_json::Error as SerdeJsonError;
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum PersistenceError {
    Serialization(SerdeJsonError),
    Io(io::Error),
    Csv(csv::Error),
    InvalidDate(DateParseError),
    InvalidData(String),
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Serialization(err) => write!(f, "serialization error: {err}"),
            PersistenceError::Io(err) => write!(f, "io error: {err}"),
            PersistenceError::Csv(err) => write!(f, "csv error: {err}"),
            PersistenceError::InvalidDate(err) => write!(f, "{err}"),
            PersistenceError::InvalidData(msg) => write!(f, "invalid data: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<SerdeJsonError> for PersistenceError {
    fn from(value: SerdeJsonError) -> Self {
        Self::Serialization(value)
    }
}

impl From<io::Error> for PersistenceError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for PersistenceError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<DateParseError> for PersistenceError {
    fn from(value: DateParseError) -> Self {
        Self::InvalidDate(value)
    }
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

pub fn validate_deliverables(deliverables: &[Deliverable]) -> PersistenceResult<()> {
    validation::validate_deliverable_collection(deliverables)
        .map_err(|err| PersistenceError::InvalidData(err.to_string()))
}

pub fn validate_roadmap(cards: &[RoadmapCard]) -> PersistenceResult<()> {
    validation::validate_card_collection(cards)
        .map_err(|err| PersistenceError::InvalidData(err.to_string()))
}

pub mod file;

pub use file::{
    load_deliverables_from_csv, load_roadmap_from_csv, load_roadmap_from_json,
    save_deliverables_to_csv, save_roadmap_to_csv, save_roadmap_to_json,
};
