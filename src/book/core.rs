use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};

use crate::error::{BookError, ConflictError};

use super::types::{Classroom, Reservation};

/// Half-open interval test: touching endpoints do not overlap.
fn intervals_overlap(
    first_start: NaiveTime,
    first_end: NaiveTime,
    second_start: NaiveTime,
    second_end: NaiveTime,
) -> bool {
    first_start < second_end && second_start < first_end
}

/// The registry of classrooms plus the ledger of reservations.
///
/// The ledger is kept in insertion order and every listing is filtered and
/// sorted on demand, so which existing entry a conflict message cites is
/// reproducible run to run.
#[derive(Debug, Default)]
pub struct ReservationBook {
    classrooms_by_id: HashMap<String, Classroom>,
    reservations: Vec<Reservation>,
}

impl ReservationBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a classroom under its identifier. There is no update or
    /// removal; a taken identifier is rejected outright.
    pub fn add_classroom(&mut self, classroom: Classroom) -> Result<(), BookError> {
        if self.classrooms_by_id.contains_key(&classroom.room_id) {
            return Err(BookError::DuplicateClassroom(classroom.room_id));
        }
        self.classrooms_by_id
            .insert(classroom.room_id.clone(), classroom);
        Ok(())
    }

    /// Reinserts a classroom from an already-persisted document, trusting
    /// the source and skipping the duplicate check.
    pub(crate) fn restore_classroom(&mut self, classroom: Classroom) {
        self.classrooms_by_id
            .insert(classroom.room_id.clone(), classroom);
    }

    /// All classrooms sorted by (building, room identifier).
    pub fn list_classrooms(&self) -> Vec<&Classroom> {
        let mut classrooms: Vec<&Classroom> = self.classrooms_by_id.values().collect();
        classrooms.sort_by(|a, b| (&a.building, &a.room_id).cmp(&(&b.building, &b.room_id)));
        classrooms
    }

    /// Validates and appends a reservation to the ledger.
    ///
    /// Text fields are trimmed first, then the checks run in a fixed order:
    /// the room must exist, the interval must be forward, and no existing
    /// entry may conflict under the rules in `check_conflicts`.
    pub fn add_reservation(&mut self, mut reservation: Reservation) -> Result<(), BookError> {
        reservation.room_id = reservation.room_id.trim().to_string();
        reservation.person = reservation.person.trim().to_string();
        reservation.purpose = reservation.purpose.trim().to_string();

        if !self.classrooms_by_id.contains_key(&reservation.room_id) {
            return Err(BookError::ClassroomNotFound(reservation.room_id));
        }
        if reservation.start >= reservation.end {
            return Err(BookError::InvalidInterval);
        }
        self.check_conflicts(&reservation)?;
        self.reservations.push(reservation);
        Ok(())
    }

    /// Scans the ledger in insertion order. For each existing entry the
    /// rules apply in priority order and the first hit wins: exact
    /// duplicate, then same room/date with the identical interval, then
    /// same room/date with an overlapping interval, then the same person
    /// overlapping on the same date in any room.
    fn check_conflicts(&self, new: &Reservation) -> Result<(), ConflictError> {
        for existing in &self.reservations {
            if existing == new {
                return Err(ConflictError::DuplicateReservation);
            }

            let same_room = existing.room_id == new.room_id;
            let same_date = existing.date == new.date;

            if same_room && same_date {
                if existing.start == new.start && existing.end == new.end {
                    return Err(ConflictError::SlotTaken {
                        room_id: new.room_id.clone(),
                        date: new.date,
                        start: new.start,
                        end: new.end,
                    });
                }
                if intervals_overlap(existing.start, existing.end, new.start, new.end) {
                    return Err(ConflictError::RoomOverlap {
                        room_id: new.room_id.clone(),
                        date: new.date,
                        start: existing.start,
                        end: existing.end,
                        person: existing.person.clone(),
                        purpose: existing.purpose.clone(),
                    });
                }
            }

            if existing.person == new.person
                && same_date
                && intervals_overlap(existing.start, existing.end, new.start, new.end)
            {
                return Err(ConflictError::PersonDoubleBooked {
                    person: new.person.clone(),
                    date: new.date,
                    start: existing.start,
                    end: existing.end,
                    room_id: existing.room_id.clone(),
                    purpose: existing.purpose.clone(),
                });
            }
        }
        Ok(())
    }

    /// Reservations matching the optional room and date filters, sorted by
    /// (date, room identifier, start time). The sort is stable; order of
    /// entries equal under that key is otherwise unspecified.
    pub fn list_reservations(
        &self,
        room_id: Option<&str>,
        date: Option<NaiveDate>,
    ) -> Vec<&Reservation> {
        let mut filtered: Vec<&Reservation> = self
            .reservations
            .iter()
            .filter(|r| room_id.map_or(true, |id| r.room_id == id))
            .filter(|r| date.map_or(true, |d| r.date == d))
            .collect();
        filtered.sort_by(|a, b| {
            (a.date, &a.room_id, a.start).cmp(&(b.date, &b.room_id, b.start))
        });
        filtered
    }

    /// Removes the reservation at a 1-based position in the filtered,
    /// sorted view that `list_reservations` produces for the same filters,
    /// and returns it.
    ///
    /// The viewed record is resolved back to the ledger by structural
    /// equality and the first match in insertion order is taken out.
    pub fn remove_reservation(
        &mut self,
        index: usize,
        room_id: Option<&str>,
        date: Option<NaiveDate>,
    ) -> Result<Reservation, BookError> {
        let visible = self.list_reservations(room_id, date);
        if index < 1 || index > visible.len() {
            return Err(BookError::IndexOutOfRange);
        }
        let target = visible[index - 1].clone();

        let position = self
            .reservations
            .iter()
            .position(|reservation| *reservation == target)
            .ok_or(BookError::ReservationNotFound)?;
        Ok(self.reservations.remove(position))
    }

    pub fn remove_all_reservations(&mut self) {
        self.reservations.clear();
    }

    pub fn clear_all(&mut self) {
        self.classrooms_by_id.clear();
        self.reservations.clear();
    }
}
