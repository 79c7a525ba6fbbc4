use std::sync::Arc;

use crate::infrastructure::db::repositories::Repositories;
use crate::infrastructure::inference::InferenceClient;

/// Shared application resources used by use cases.
///
/// Built once at startup and handed to every request; the store handle inside
/// `repos` is the single connection pool shared by all of them.
pub struct AppContext {
    pub repos: Repositories,
    pub inference: Arc<InferenceClient>,
}

impl AppContext {
    /// Build a new application context with shared repositories and services.
    pub fn new(repos: Repositories, inference: Arc<InferenceClient>) -> Self {
        Self { repos, inference }
    }
}
