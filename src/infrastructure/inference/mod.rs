pub mod client;
pub mod http_transport;
pub mod transport;

pub use client::{InferenceClient, InferenceError};
