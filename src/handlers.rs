use std::io::{self, Write};

use chrono::NaiveDate;

use crate::book::{Classroom, Reservation, ReservationBook};
use crate::display;
use crate::error::{AppError, StorageError};
use crate::storage;
use crate::validator;

/// Owns the single in-process book instance. Every handler receives the
/// context explicitly instead of reaching for shared state.
pub struct AppContext {
    pub book: ReservationBook,
}

impl AppContext {
    pub fn new() -> Self {
        Self {
            book: ReservationBook::new(),
        }
    }
}

/// Prompts on stdout and reads one trimmed line from stdin. A closed input
/// stream surfaces as `InputClosed` so the menu loop can shut down.
pub fn read_input(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Err(AppError::InputClosed);
    }
    Ok(line.trim().to_string())
}

pub fn create_new_book(context: &mut AppContext) -> Result<(), AppError> {
    context.book.clear_all();
    println!("Created a new empty reservation book.");
    Ok(())
}

pub fn save_book_to_file(context: &mut AppContext) -> Result<(), AppError> {
    let filename = validator::require_non_empty_text(
        &read_input("Filename to save (e.g. data.json): ")?,
        "Filename",
    )?;
    storage::save_to_file(&context.book, &filename)?;
    println!("Saved to {filename}");
    Ok(())
}

pub fn load_book_from_file(context: &mut AppContext) -> Result<(), AppError> {
    let filename =
        validator::require_non_empty_text(&read_input("Filename to load: ")?, "Filename")?;
    context.book = storage::load_from_file(&filename)?;
    println!("Loaded from {filename}");
    Ok(())
}

pub fn add_classroom(context: &mut AppContext) -> Result<(), AppError> {
    let room_id = validator::require_non_empty_text(
        &read_input("Room identifier (e.g. B101): ")?,
        "Room ID",
    )?;
    let building =
        validator::require_non_empty_text(&read_input("Building name: ")?, "Building")?;
    let capacity =
        validator::parse_positive_integer(&read_input("Capacity (int > 0): ")?, "Capacity")?;
    let equipment =
        validator::parse_equipment_list(&read_input("Equipment (comma-separated, can be empty): ")?);

    context
        .book
        .add_classroom(Classroom::new(room_id, building, capacity, equipment))?;
    println!("Classroom added.");
    Ok(())
}

pub fn add_reservation(context: &mut AppContext) -> Result<(), AppError> {
    let room_id =
        validator::require_non_empty_text(&read_input("Room identifier: ")?, "Room ID")?;
    let person = validator::require_non_empty_text(&read_input("Person name: ")?, "Person")?;
    let purpose = validator::require_non_empty_text(&read_input("Purpose: ")?, "Purpose")?;
    let date = validator::parse_iso_date(&read_input("Date (YYYY-MM-DD): ")?)?;
    let start = validator::parse_hhmm_time(&read_input("Start time (HH:MM): ")?)?;
    let end = validator::parse_hhmm_time(&read_input("End time (HH:MM): ")?)?;

    context
        .book
        .add_reservation(Reservation::new(room_id, person, purpose, date, start, end))?;
    println!("Reservation added.");
    Ok(())
}

pub fn show_classrooms(context: &AppContext) -> Result<(), AppError> {
    let classrooms = context.book.list_classrooms();
    if classrooms.is_empty() {
        println!("No classrooms.");
        return Ok(());
    }
    for classroom in classrooms {
        println!("{}", display::format_classroom_line(classroom));
    }
    Ok(())
}

pub fn show_reservations(context: &AppContext) -> Result<(), AppError> {
    println!("Filter: 1) none  2) by room  3) by date");
    let filter_choice = read_input("Choose filter: ")?;
    let (room_id, date): (Option<String>, Option<NaiveDate>) = match filter_choice.as_str() {
        "1" => (None, None),
        "2" => (
            Some(validator::require_non_empty_text(
                &read_input("Room identifier: ")?,
                "Room ID",
            )?),
            None,
        ),
        "3" => (
            None,
            Some(validator::parse_iso_date(&read_input("Date (YYYY-MM-DD): ")?)?),
        ),
        _ => {
            println!("Unknown filter; showing all.");
            (None, None)
        }
    };

    let reservations = context.book.list_reservations(room_id.as_deref(), date);
    if reservations.is_empty() {
        println!("No reservations.");
        return Ok(());
    }
    display::print_reservation_list(&reservations);
    Ok(())
}

pub fn remove_reservation(context: &mut AppContext) -> Result<(), AppError> {
    println!("You can remove from a filtered list.");
    println!("Filter: 1) none  2) by room  3) by date");
    let filter_choice = read_input("Choose filter: ")?;
    let (room_id, date): (Option<String>, Option<NaiveDate>) = match filter_choice.as_str() {
        "2" => (
            Some(validator::require_non_empty_text(
                &read_input("Room identifier: ")?,
                "Room ID",
            )?),
            None,
        ),
        "3" => (
            None,
            Some(validator::parse_iso_date(&read_input("Date (YYYY-MM-DD): ")?)?),
        ),
        _ => (None, None),
    };

    let visible = context.book.list_reservations(room_id.as_deref(), date);
    if visible.is_empty() {
        println!("No reservations.");
        return Ok(());
    }
    display::print_reservation_list(&visible);

    let index = validator::parse_positive_integer(
        &read_input("Enter reservation number to remove: ")?,
        "Index",
    )?;
    let removed = context
        .book
        .remove_reservation(index as usize, room_id.as_deref(), date)?;
    println!(
        "Removed: {} {}-{} room={}",
        removed.date.format("%Y-%m-%d"),
        removed.start.format("%H:%M"),
        removed.end.format("%H:%M"),
        removed.room_id,
    );
    Ok(())
}

pub fn remove_all_reservations(context: &mut AppContext) -> Result<(), AppError> {
    context.book.remove_all_reservations();
    println!("All reservations removed.");
    Ok(())
}

pub fn delete_reservation_book(context: &mut AppContext) -> Result<(), AppError> {
    context.book.clear_all();
    println!("Reservation book deleted (classrooms + reservations).");
    Ok(())
}

pub fn export_reservations(context: &AppContext) -> Result<(), AppError> {
    let filename = validator::require_non_empty_text(
        &read_input("Filename to export (e.g. listing.txt): ")?,
        "Filename",
    )?;
    let reservations = context.book.list_reservations(None, None);
    display::write_reservations_to_file(&reservations, &filename)
        .map_err(StorageError::WriteFailed)?;
    println!("Exported {} reservation(s) to {filename}", reservations.len());
    Ok(())
}
