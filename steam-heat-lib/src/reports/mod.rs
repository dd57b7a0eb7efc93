//! Output sinks for the ranked catalog
//!
//! Each generator consumes the final, sorted slice of [`RankedRecord`](crate::ranking::RankedRecord)s:
//! - **CSV**: the catalog table, one row per game, written with the `csv` crate
//! - **JSON**: every record field, including normalized components
//! - **Console**: an aligned preview of the top of the catalog

mod console;
mod csv;
mod json;

pub use console::generate as generate_console;
pub use csv::generate as generate_csv;
pub use json::generate as generate_json;
