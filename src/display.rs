use std::fs::File;
use std::io::{self, Write};

use crate::book::{Classroom, Reservation};

/// Formats a classroom as a listing line, with `-` standing in for an
/// empty equipment list.
pub fn format_classroom_line(classroom: &Classroom) -> String {
    let equipment = if classroom.equipment.is_empty() {
        "-".to_string()
    } else {
        classroom.equipment.join(", ")
    };
    format!(
        "- {} | {} | cap={} | eq={}",
        classroom.room_id, classroom.building, classroom.capacity, equipment
    )
}

/// Formats a reservation with its 1-based position in the current view.
/// The same numbering is what removal indexes into.
pub fn format_reservation_line(number: usize, reservation: &Reservation) -> String {
    format!(
        "{} ) {} {}-{} | room={} | {} | {}",
        number,
        reservation.date.format("%Y-%m-%d"),
        reservation.start.format("%H:%M"),
        reservation.end.format("%H:%M"),
        reservation.room_id,
        reservation.person,
        reservation.purpose,
    )
}

/// Prints a numbered reservation view to stdout.
pub fn print_reservation_list(reservations: &[&Reservation]) {
    for (number, reservation) in reservations.iter().enumerate() {
        println!("{}", format_reservation_line(number + 1, reservation));
    }
}

/// Writes the numbered reservation view to a plain text file, one line per
/// entry, in the same format the menu prints.
pub fn write_reservations_to_file(
    reservations: &[&Reservation],
    filename: &str,
) -> Result<(), io::Error> {
    let mut file = File::create(filename)?;
    writeln!(file, "** Reservations **")?;
    if reservations.is_empty() {
        writeln!(file, "(none)")?;
    }
    for (number, reservation) in reservations.iter().enumerate() {
        writeln!(file, "{}", format_reservation_line(number + 1, reservation))?;
    }
    Ok(())
}
