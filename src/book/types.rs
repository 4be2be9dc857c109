use chrono::{NaiveDate, NaiveTime};

/// A bookable room, keyed by its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classroom {
    pub room_id: String,
    pub building: String,
    pub capacity: u32,
    pub equipment: Vec<String>,
}

impl Classroom {
    pub fn new(
        room_id: impl Into<String>,
        building: impl Into<String>,
        capacity: u32,
        equipment: Vec<String>,
    ) -> Self {
        Self {
            room_id: room_id.into(),
            building: building.into(),
            capacity,
            equipment,
        }
    }
}

/// One booking of a room by a person, for a time interval on a single date.
///
/// Equality is structural over all six fields; duplicate detection and
/// index-based removal both rely on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    pub room_id: String,
    pub person: String,
    pub purpose: String,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl Reservation {
    pub fn new(
        room_id: impl Into<String>,
        person: impl Into<String>,
        purpose: impl Into<String>,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Self {
        Self {
            room_id: room_id.into(),
            person: person.into(),
            purpose: purpose.into(),
            date,
            start,
            end,
        }
    }
}
