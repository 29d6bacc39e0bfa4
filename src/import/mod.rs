//! Statement import

pub mod csv;

pub use csv::{read_statement, CsvBatch};
