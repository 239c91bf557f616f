pub mod sqlite_meters;

pub use sqlite_meters::*;
