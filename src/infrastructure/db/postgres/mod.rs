mod database;
pub mod job_store_postgres;
mod schema;

pub use database::{ConnectOptions, PostgresDatabase};
