pub mod inference;
pub mod job;
