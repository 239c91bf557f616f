pub mod dex_parser;

pub use dex_parser::*;
