pub mod allocation;
pub mod hours;
pub mod table;
