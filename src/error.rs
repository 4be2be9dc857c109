use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

/// Failures raised while turning raw menu input into typed values.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{0} must be non-empty.")]
    EmptyField(String),
    #[error("{0} must be a positive integer.")]
    NotAnInteger(String),
    #[error("{0} must be > 0.")]
    NotPositive(String),
    #[error("Date must be in format YYYY-MM-DD.")]
    DateFormat,
    #[error("Invalid date.")]
    InvalidDate,
    #[error("Time must be in format HH:MM.")]
    TimeFormat,
    #[error("Invalid time.")]
    InvalidTime,
}

/// A reservation clashing with an existing ledger entry. Each variant
/// carries the context needed to name the rival booking in the message.
#[derive(Debug, Error)]
pub enum ConflictError {
    #[error("Duplicate reservation: identical reservation already exists.")]
    DuplicateReservation,
    #[error(
        "Conflict: room '{room_id}' is already reserved on {date} for exactly {}-{}.",
        .start.format("%H:%M"),
        .end.format("%H:%M")
    )]
    SlotTaken {
        room_id: String,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    },
    #[error(
        "Conflict: room '{room_id}' is already reserved on {date} {}-{} by {person} ({purpose}).",
        .start.format("%H:%M"),
        .end.format("%H:%M")
    )]
    RoomOverlap {
        room_id: String,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
        person: String,
        purpose: String,
    },
    #[error(
        "Conflict: '{person}' already has a reservation on {date} {}-{} in room '{room_id}' ({purpose}).",
        .start.format("%H:%M"),
        .end.format("%H:%M")
    )]
    PersonDoubleBooked {
        person: String,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
        room_id: String,
        purpose: String,
    },
}

/// Errors surfaced by the reservation book itself.
#[derive(Debug, Error)]
pub enum BookError {
    #[error("Classroom '{0}' already exists.")]
    DuplicateClassroom(String),
    #[error("Classroom '{0}' does not exist.")]
    ClassroomNotFound(String),
    #[error("Start time must be earlier than end time.")]
    InvalidInterval,
    #[error("Reservation index out of range.")]
    IndexOutOfRange,
    #[error("Reservation not found.")]
    ReservationNotFound,
    #[error(transparent)]
    Conflict(#[from] ConflictError),
}

/// Errors from saving or loading the persisted JSON document.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("File not found: {0}")]
    FileNotFound(String),
    #[error("Failed to save file: {0}")]
    WriteFailed(#[source] std::io::Error),
    #[error("Failed to read file: {0}")]
    ReadFailed(#[source] std::io::Error),
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("Invalid file format (root must be a JSON object).")]
    RootNotAnObject,
    #[error("Invalid date or time in file: {0}")]
    MalformedRecord(#[from] chrono::ParseError),
    #[error(transparent)]
    Book(#[from] BookError),
}

/// Umbrella error for the interactive menu loop.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Book(#[from] BookError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("input stream closed")]
    InputClosed,
}

impl AppError {
    /// True when the underlying failure is a reservation conflict, even one
    /// hit while replaying a loaded file. The menu loop tags these
    /// `[CONFLICT]` instead of `[ERROR]`.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            AppError::Book(BookError::Conflict(_))
                | AppError::Storage(StorageError::Book(BookError::Conflict(_)))
        )
    }
}
