//! Rental Property API entry point
//!
//! Parses CLI arguments and runs the selected command. Errors are printed
//! to stderr and the process exits non-zero.

use rental_api::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
