// Application state module
// Shared, read-only state handed to every connection

use super::types::Config;
use crate::page::FragmentFetcher;

/// Application state
pub struct AppState {
    pub config: Config,
    /// Outbound client for the project title fragment
    pub fetcher: FragmentFetcher,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            fetcher: FragmentFetcher::new(&config.page),
        }
    }
}
