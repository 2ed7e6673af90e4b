use super::{PersistenceError, PersistenceResult};
use crate::calendar::{DayOptions, HolidayTable, WorkCalendar, format_date, parse_date};
use crate::card::RoadmapCard;
use crate::deliverable::{Deliverable, TaskStatus};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RoadmapSnapshot<'a> {
    holidays: &'a HolidayTable,
    cards: &'a [RoadmapCard],
}

/// Read-side snapshot: dates stay strings until [`parse_date`] accepts
/// them, so a bad date surfaces as an invalid-date error on every loader.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RoadmapSnapshotRecord {
    /// Absent in older snapshots; the built-in table applies then.
    #[serde(default)]
    holidays: Option<HolidayTable>,
    cards: Vec<CardRecord>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CardRecord {
    id: String,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    status: TaskStatus,
    #[serde(default)]
    icon_name: Option<String>,
    #[serde(default)]
    deliverables: Vec<DeliverableRecord>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeliverableRecord {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    text: String,
    #[serde(default)]
    status: TaskStatus,
    start_date: String,
    duration_days: i64,
    #[serde(flatten)]
    options: DayOptions,
}

impl DeliverableRecord {
    fn into_deliverable(self) -> PersistenceResult<Deliverable> {
        Ok(Deliverable {
            id: self.id,
            text: self.text,
            status: self.status,
            start_date: parse_date(&self.start_date)?,
            duration_days: self.duration_days,
            options: self.options,
        })
    }
}

impl CardRecord {
    fn into_card(self) -> PersistenceResult<RoadmapCard> {
        let mut deliverables = Vec::with_capacity(self.deliverables.len());
        for record in self.deliverables {
            deliverables.push(record.into_deliverable()?);
        }
        Ok(RoadmapCard {
            id: self.id,
            title: self.title,
            description: self.description,
            status: self.status,
            icon_name: self.icon_name,
            deliverables,
        })
    }
}

pub fn save_roadmap_to_json<P: AsRef<Path>>(
    calendar: &WorkCalendar,
    cards: &[RoadmapCard],
    path: P,
) -> PersistenceResult<()> {
    super::validate_roadmap(cards)?;
    let snapshot = RoadmapSnapshot {
        holidays: calendar.holidays(),
        cards,
    };
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &snapshot)?;
    Ok(())
}

pub fn load_roadmap_from_json<P: AsRef<Path>>(
    path: P,
) -> PersistenceResult<(WorkCalendar, Vec<RoadmapCard>)> {
    let file = File::open(path)?;
    let snapshot: RoadmapSnapshotRecord = serde_json::from_reader(file)?;
    let mut cards = Vec::with_capacity(snapshot.cards.len());
    for record in snapshot.cards {
        cards.push(record.into_card()?);
    }
    super::validate_roadmap(&cards)?;
    let calendar = snapshot
        .holidays
        .map(WorkCalendar::new)
        .unwrap_or_default();
    Ok((calendar, cards))
}

/// One CSV row. Deliverable rows carry their owning `card_id`; card rows
/// carry the card itself in `card_json` and no deliverable fields;
/// a single calendar row carries `calendar_json`.
#[derive(Default, Serialize, Deserialize)]
struct DeliverableCsvRecord {
    #[serde(default)]
    card_id: String,
    id: String,
    text: String,
    status: String,
    start_date: String,
    duration_days: i64,
    exclude_holidays: bool,
    exclude_saturdays: bool,
    #[serde(default)]
    card_json: String,
    #[serde(default)]
    calendar_json: String,
}

impl DeliverableCsvRecord {
    fn from_deliverable(card_id: &str, deliverable: &Deliverable) -> Self {
        Self {
            card_id: card_id.to_string(),
            id: deliverable.id.clone().unwrap_or_default(),
            text: deliverable.text.clone(),
            status: deliverable.status.as_str().to_string(),
            start_date: format_date(deliverable.start_date),
            duration_days: deliverable.duration_days,
            exclude_holidays: deliverable.options.exclude_holidays,
            exclude_saturdays: deliverable.options.exclude_saturdays,
            card_json: String::new(),
            calendar_json: String::new(),
        }
    }

    fn card_row(card: &RoadmapCard) -> PersistenceResult<Self> {
        let header = RoadmapCard {
            deliverables: Vec::new(),
            ..card.clone()
        };
        let mut record = Self::default();
        record.card_id = card.id.clone();
        record.card_json = serde_json::to_string(&header)?;
        Ok(record)
    }

    fn calendar_row(calendar: &WorkCalendar) -> PersistenceResult<Self> {
        let mut record = Self::default();
        record.calendar_json = serde_json::to_string(calendar.holidays())?;
        Ok(record)
    }

    fn is_card_row(&self) -> bool {
        !self.card_json.trim().is_empty()
    }

    fn is_calendar_row(&self) -> bool {
        !self.calendar_json.trim().is_empty()
    }

    fn into_deliverable(self) -> PersistenceResult<Deliverable> {
        if self.is_card_row() || self.is_calendar_row() {
            return Err(PersistenceError::InvalidData(
                "structural row cannot be converted to a deliverable".into(),
            ));
        }
        let status = TaskStatus::from_str(self.status.trim()).ok_or_else(|| {
            PersistenceError::InvalidData(format!("invalid status '{}'", self.status))
        })?;
        let id = if self.id.trim().is_empty() {
            None
        } else {
            Some(self.id)
        };
        Ok(Deliverable {
            id,
            text: self.text,
            status,
            start_date: parse_date(&self.start_date)?,
            duration_days: self.duration_days,
            options: DayOptions {
                exclude_holidays: self.exclude_holidays,
                exclude_saturdays: self.exclude_saturdays,
            },
        })
    }
}

/// Flat export of a single card's deliverable list, without card rows.
pub fn save_deliverables_to_csv<P: AsRef<Path>>(
    deliverables: &[Deliverable],
    path: P,
) -> PersistenceResult<()> {
    super::validate_deliverables(deliverables)?;
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    for deliverable in deliverables {
        writer.serialize(DeliverableCsvRecord::from_deliverable("", deliverable))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn load_deliverables_from_csv<P: AsRef<Path>>(path: P) -> PersistenceResult<Vec<Deliverable>> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut deliverables = Vec::new();
    for record in reader.deserialize::<DeliverableCsvRecord>() {
        deliverables.push(record?.into_deliverable()?);
    }
    super::validate_deliverables(&deliverables)?;
    Ok(deliverables)
}

/// Full roadmap export: a calendar row, then for each card its card row
/// followed by that card's deliverable rows, keyed by `card_id`.
pub fn save_roadmap_to_csv<P: AsRef<Path>>(
    calendar: &WorkCalendar,
    cards: &[RoadmapCard],
    path: P,
) -> PersistenceResult<()> {
    super::validate_roadmap(cards)?;
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    writer.serialize(DeliverableCsvRecord::calendar_row(calendar)?)?;
    for card in cards {
        writer.serialize(DeliverableCsvRecord::card_row(card)?)?;
        for deliverable in &card.deliverables {
            writer.serialize(DeliverableCsvRecord::from_deliverable(&card.id, deliverable))?;
        }
    }
    writer.flush()?;
    Ok(())
}

pub fn load_roadmap_from_csv<P: AsRef<Path>>(
    path: P,
) -> PersistenceResult<(WorkCalendar, Vec<RoadmapCard>)> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut calendar: Option<WorkCalendar> = None;
    let mut cards: Vec<RoadmapCard> = Vec::new();
    for record in reader.deserialize::<DeliverableCsvRecord>() {
        let record = record?;
        if record.is_calendar_row() {
            if calendar.is_some() {
                return Err(PersistenceError::InvalidData(
                    "CSV file contained multiple calendar rows".into(),
                ));
            }
            let table: HolidayTable =
                serde_json::from_str(&record.calendar_json).map_err(|err| {
                    PersistenceError::InvalidData(format!("invalid calendar json: {err}"))
                })?;
            calendar = Some(WorkCalendar::new(table));
            continue;
        }
        if record.is_card_row() {
            let card: RoadmapCard = serde_json::from_str(&record.card_json).map_err(|err| {
                PersistenceError::InvalidData(format!("invalid card json: {err}"))
            })?;
            cards.push(card);
            continue;
        }
        let card_id = record.card_id.clone();
        let deliverable = record.into_deliverable()?;
        let owner = cards
            .iter_mut()
            .find(|card| card.id == card_id)
            .ok_or_else(|| {
                PersistenceError::InvalidData(format!(
                    "deliverable row references unknown card id '{card_id}'"
                ))
            })?;
        owner.deliverables.push(deliverable);
    }

    super::validate_roadmap(&cards)?;
    Ok((calendar.unwrap_or_default(), cards))
}
