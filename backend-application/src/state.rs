use std::sync::Arc;

use backend_domain::ports::MeterRepository;
use backend_domain::RuntimeConfig;

use crate::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub meter_repo: Arc<dyn MeterRepository>,
    pub metrics: Arc<Metrics>,
}
