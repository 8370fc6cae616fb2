// Import module - congressional disclosure CSV parser

pub mod disclosure_csv;

pub use disclosure_csv::{smart_split, RawDisclosure};
