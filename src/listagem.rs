pub mod page;
pub mod schedule;
