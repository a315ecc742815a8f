use std::sync::Arc;

use service::cake::{repository::CakeRepository, CakeService};

/// Shared handler state: one service over whichever repository was configured.
#[derive(Clone)]
pub struct ServerState {
    pub cakes: Arc<CakeService<dyn CakeRepository>>,
}

impl ServerState {
    pub fn new(repo: Arc<dyn CakeRepository>) -> Self {
        Self { cakes: Arc::new(CakeService::new(repo)) }
    }
}
