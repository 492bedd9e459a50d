use std::sync::Arc;

use crate::shared::config::Config;
use crate::shared::erp::ErpBackend;

/// Общее состояние обработчиков
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub erp: Arc<dyn ErpBackend>,
}

impl AppState {
    pub fn new(config: Config, erp: Arc<dyn ErpBackend>) -> Self {
        Self {
            config: Arc::new(config),
            erp,
        }
    }

    pub fn erp(&self) -> &dyn ErpBackend {
        self.erp.as_ref()
    }

    /// Предел строк одного запроса списка
    pub fn list_limit(&self) -> u32 {
        self.config.dashboard.list_limit
    }
}
