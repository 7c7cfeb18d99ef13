//! Persistence adapters

mod file_reader;

pub use file_reader::{LocalSourceReader, load, parse_file, parse_files};
