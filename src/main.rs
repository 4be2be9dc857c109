mod book;
mod display;
mod error;
mod handlers;
mod storage;
mod validator;

use error::AppError;
use handlers::{read_input, AppContext};

const MENU_TEXT: &str = "
=== Classroom Reservation System ===
1) Create new reservation book (clear current)
2) Save reservation book to file
3) Load reservation book from file
4) Insert new classroom
5) Insert new reservation
6) Display all classrooms
7) Display reservations (all / filter by room / filter by date)
8) Remove a reservation (optionally filtered list)
9) Remove ALL reservations
10) Delete reservation book completely (classrooms + reservations)
11) Export reservations to a text file
0) Exit";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut context = AppContext::new();

    // An optional argument names a saved book to load before the menu starts.
    let args: Vec<String> = std::env::args().collect();
    if let Some(path) = args.get(1) {
        context.book = storage::load_from_file(path)?;
        println!("Loaded reservation book from {path}");
    }

    loop {
        println!("{MENU_TEXT}");
        let choice = match read_input("Choose an option: ") {
            Ok(choice) => choice,
            Err(AppError::InputClosed) => break,
            Err(error) => return Err(error.into()),
        };

        if choice == "0" {
            println!("Bye!");
            break;
        }

        let outcome = match choice.as_str() {
            "1" => handlers::create_new_book(&mut context),
            "2" => handlers::save_book_to_file(&mut context),
            "3" => handlers::load_book_from_file(&mut context),
            "4" => handlers::add_classroom(&mut context),
            "5" => handlers::add_reservation(&mut context),
            "6" => handlers::show_classrooms(&context),
            "7" => handlers::show_reservations(&context),
            "8" => handlers::remove_reservation(&mut context),
            "9" => handlers::remove_all_reservations(&mut context),
            "10" => handlers::delete_reservation_book(&mut context),
            "11" => handlers::export_reservations(&context),
            _ => {
                println!("Unknown option.");
                continue;
            }
        };

        match outcome {
            Ok(()) => {}
            // A stream that closes mid-prompt ends the session like option 0.
            Err(AppError::InputClosed) => break,
            Err(error) if error.is_conflict() => println!("[CONFLICT] {error}"),
            Err(error) => println!("[ERROR] {error}"),
        }
    }

    Ok(())
}
