pub mod colors;
pub mod delimited;
pub mod formatting;
pub mod path;
pub mod table;

pub use formatting::fmt_hours;
