pub mod error;
pub mod parsers;
pub mod reader;
