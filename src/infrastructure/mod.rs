pub mod db;
pub mod inference;
pub mod observability;
