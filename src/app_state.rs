use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::{assets::StaticAssets, vision::DashScopeClient};

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub vision: Arc<DashScopeClient>,
    pub assets: Arc<StaticAssets>,
}

impl AppState {
    pub fn new(config: AppConfig, vision: DashScopeClient, assets: StaticAssets) -> Self {
        Self {
            config: Arc::new(config),
            vision: Arc::new(vision),
            assets: Arc::new(assets),
        }
    }

    /// Build every service from configuration.
    pub fn from_config(config: AppConfig) -> Self {
        let vision = DashScopeClient::from_config(&config);
        let assets = StaticAssets::new(&config.static_dir);
        Self::new(config, vision, assets)
    }
}
