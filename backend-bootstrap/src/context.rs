use std::sync::Arc;

use anyhow::Result;

use backend_application::{AppState, Metrics};
use backend_domain::MeterRepository;
use backend_infrastructure::{AppConfig, SqliteMeterRepository};

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub async fn new() -> Result<Self> {
        let config = AppConfig::load().await?;
        let runtime_config = config.to_runtime_config();
        let db_config = config.to_db_config();

        let repo = Arc::new(SqliteMeterRepository::connect(&db_config).await?);
        repo.ensure_schema().await?;

        let state = AppState {
            config: runtime_config,
            meter_repo: repo,
            metrics: Arc::new(Metrics::default()),
        };

        Ok(Self { state })
    }
}
