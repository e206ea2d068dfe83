pub mod records;

pub use records::{BreachRecord, RecordsRepo};
