use neo_core::config::DashboardConfig;
use neo_core::pipeline::Pipeline;
use std::sync::Arc;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> neo_core::Result<Self> {
        let pipeline = Pipeline::from_config(&config)?;
        Ok(Self {
            pipeline: Arc::new(pipeline),
        })
    }
}
