pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod reference;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use crate::config::Config;
use crate::database::{record_store::RecordStore, supabase::SupabaseStore};
use crate::services::submission_service::SubmissionService;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub submission_service: SubmissionService,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn RecordStore>) -> Self {
        let submission_service = SubmissionService::new(store, config.storage_bucket.clone());

        Self {
            config: Arc::new(config),
            submission_service,
        }
    }

    /// Wires the Supabase-backed store described by `config`.
    pub fn from_config(config: Config) -> error::Result<Self> {
        let store = SupabaseStore::from_config(&config)?;
        Ok(Self::new(config, Arc::new(store)))
    }
}
