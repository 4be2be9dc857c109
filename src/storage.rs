use std::fs;
use std::path::Path;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::book::{Classroom, Reservation, ReservationBook};
use crate::error::StorageError;

/// On-disk form of a classroom entry.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassroomRecord {
    pub room_id: String,
    pub building: String,
    pub capacity: u32,
    pub equipment: Vec<String>,
}

/// On-disk form of a reservation entry. The date is `YYYY-MM-DD` and the
/// times are `HH:MM`, independent of how chrono renders them by default.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReservationRecord {
    pub room_id: String,
    pub person: String,
    pub purpose: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
}

/// Root of the persisted document. Missing lists read as empty.
#[derive(Debug, Serialize, Deserialize)]
pub struct BookDocument {
    #[serde(default)]
    pub classrooms: Vec<ClassroomRecord>,
    #[serde(default)]
    pub reservations: Vec<ReservationRecord>,
}

impl From<&Classroom> for ClassroomRecord {
    fn from(classroom: &Classroom) -> Self {
        Self {
            room_id: classroom.room_id.clone(),
            building: classroom.building.clone(),
            capacity: classroom.capacity,
            equipment: classroom.equipment.clone(),
        }
    }
}

impl From<ClassroomRecord> for Classroom {
    fn from(record: ClassroomRecord) -> Self {
        Self {
            room_id: record.room_id,
            building: record.building,
            capacity: record.capacity,
            equipment: record.equipment,
        }
    }
}

impl From<&Reservation> for ReservationRecord {
    fn from(reservation: &Reservation) -> Self {
        Self {
            room_id: reservation.room_id.clone(),
            person: reservation.person.clone(),
            purpose: reservation.purpose.clone(),
            date: reservation.date.format("%Y-%m-%d").to_string(),
            start_time: reservation.start.format("%H:%M").to_string(),
            end_time: reservation.end.format("%H:%M").to_string(),
        }
    }
}

impl TryFrom<ReservationRecord> for Reservation {
    type Error = chrono::ParseError;

    fn try_from(record: ReservationRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            date: NaiveDate::parse_from_str(&record.date, "%Y-%m-%d")?,
            start: NaiveTime::parse_from_str(&record.start_time, "%H:%M")?,
            end: NaiveTime::parse_from_str(&record.end_time, "%H:%M")?,
            room_id: record.room_id,
            person: record.person,
            purpose: record.purpose,
        })
    }
}

/// Snapshots the book as a document with both lists in their canonical
/// listing order.
pub fn to_document(book: &ReservationBook) -> BookDocument {
    BookDocument {
        classrooms: book
            .list_classrooms()
            .into_iter()
            .map(ClassroomRecord::from)
            .collect(),
        reservations: book
            .list_reservations(None, None)
            .into_iter()
            .map(ReservationRecord::from)
            .collect(),
    }
}

/// Rebuilds a book from a document. Classrooms are restored directly since
/// the document is the trusted snapshot of a valid book, but reservations
/// replay through `add_reservation` so interval and conflict invariants are
/// re-checked. A violating document errors out before any book is returned.
pub fn from_document(document: BookDocument) -> Result<ReservationBook, StorageError> {
    let mut book = ReservationBook::new();
    for record in document.classrooms {
        book.restore_classroom(Classroom::from(record));
    }
    for record in document.reservations {
        let reservation = Reservation::try_from(record)?;
        book.add_reservation(reservation)?;
    }
    Ok(book)
}

/// Writes the book to `path` as two-space-indented UTF-8 JSON.
pub fn save_to_file(book: &ReservationBook, path: impl AsRef<Path>) -> Result<(), StorageError> {
    let json = serde_json::to_string_pretty(&to_document(book))?;
    fs::write(path, json).map_err(StorageError::WriteFailed)
}

/// Reads and rebuilds a book from `path`, reporting a distinct error for a
/// missing file, unreadable content, malformed JSON, a non-object root,
/// malformed record fields, and invariant violations hit during replay.
pub fn load_from_file(path: impl AsRef<Path>) -> Result<ReservationBook, StorageError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(StorageError::FileNotFound(path.display().to_string()));
    }
    let raw = fs::read_to_string(path).map_err(StorageError::ReadFailed)?;

    let value: Value = serde_json::from_str(&raw)?;
    if !value.is_object() {
        return Err(StorageError::RootNotAnObject);
    }
    let document: BookDocument = serde_json::from_value(value)?;
    from_document(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BookError, ConflictError};
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "classroom_reservations_{}_{}.json",
            std::process::id(),
            name
        ))
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    fn time(hours: u32, minutes: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hours, minutes, 0).unwrap()
    }

    fn sample_book() -> ReservationBook {
        let mut book = ReservationBook::new();
        book.add_classroom(Classroom::new(
            "B101",
            "Main",
            30,
            vec!["Projector".to_string(), "whiteboard".to_string()],
        ))
        .unwrap();
        book.add_classroom(Classroom::new("A202", "Annex", 12, vec![]))
            .unwrap();
        book.add_reservation(Reservation::new(
            "B101",
            "Ana",
            "lecture",
            date(1),
            time(9, 0),
            time(10, 0),
        ))
        .unwrap();
        book.add_reservation(Reservation::new(
            "A202",
            "Bo",
            "seminar",
            date(1),
            time(9, 30),
            time(11, 0),
        ))
        .unwrap();
        book.add_reservation(Reservation::new(
            "B101",
            "Cy",
            "exam",
            date(2),
            time(8, 15),
            time(9, 45),
        ))
        .unwrap();
        book
    }

    #[test]
    fn round_trip_preserves_both_listings() {
        let path = temp_path("round_trip");
        let original = sample_book();

        save_to_file(&original, &path).unwrap();
        let loaded = load_from_file(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(original.list_classrooms(), loaded.list_classrooms());
        assert_eq!(
            original.list_reservations(None, None),
            loaded.list_reservations(None, None)
        );
    }

    #[test]
    fn document_uses_plain_date_and_time_strings() {
        let json = serde_json::to_string_pretty(&to_document(&sample_book())).unwrap();
        assert!(json.contains("\"date\": \"2025-03-01\""));
        assert!(json.contains("\"start_time\": \"09:00\""));
        assert!(json.contains("\"end_time\": \"10:00\""));
    }

    #[test]
    fn missing_file_is_its_own_error() {
        let result = load_from_file(temp_path("does_not_exist"));
        assert!(matches!(result, Err(StorageError::FileNotFound(_))));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let path = temp_path("malformed");
        fs::write(&path, "{not json").unwrap();
        let result = load_from_file(&path);
        let _ = fs::remove_file(&path);
        assert!(matches!(result, Err(StorageError::InvalidJson(_))));
    }

    #[test]
    fn non_object_root_is_rejected() {
        let path = temp_path("array_root");
        fs::write(&path, "[1, 2, 3]").unwrap();
        let result = load_from_file(&path);
        let _ = fs::remove_file(&path);
        assert!(matches!(result, Err(StorageError::RootNotAnObject)));
    }

    #[test]
    fn empty_object_loads_as_empty_book() {
        let path = temp_path("empty_object");
        fs::write(&path, "{}").unwrap();
        let book = load_from_file(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert!(book.list_classrooms().is_empty());
        assert!(book.list_reservations(None, None).is_empty());
    }

    #[test]
    fn bad_time_text_in_a_record_is_rejected() {
        let path = temp_path("bad_time");
        fs::write(
            &path,
            r#"{
  "classrooms": [
    {"room_id": "B101", "building": "Main", "capacity": 30, "equipment": []}
  ],
  "reservations": [
    {"room_id": "B101", "person": "Ana", "purpose": "lecture",
     "date": "2025-03-01", "start_time": "late", "end_time": "10:00"}
  ]
}"#,
        )
        .unwrap();
        let result = load_from_file(&path);
        let _ = fs::remove_file(&path);
        assert!(matches!(result, Err(StorageError::MalformedRecord(_))));
    }

    #[test]
    fn conflicting_document_fails_replay_and_yields_no_book() {
        let path = temp_path("conflicting");
        fs::write(
            &path,
            r#"{
  "classrooms": [
    {"room_id": "B101", "building": "Main", "capacity": 30, "equipment": []}
  ],
  "reservations": [
    {"room_id": "B101", "person": "Ana", "purpose": "lecture",
     "date": "2025-03-01", "start_time": "09:00", "end_time": "10:30"},
    {"room_id": "B101", "person": "Bo", "purpose": "seminar",
     "date": "2025-03-01", "start_time": "10:00", "end_time": "11:00"}
  ]
}"#,
        )
        .unwrap();
        let result = load_from_file(&path);
        let _ = fs::remove_file(&path);
        assert!(matches!(
            result,
            Err(StorageError::Book(BookError::Conflict(
                ConflictError::RoomOverlap { .. }
            )))
        ));
    }
}
