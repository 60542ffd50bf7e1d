use arret::repository::Repository;
use axum::http::StatusCode;
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct AppState {
    /// None until a feed has been loaded successfully.
    pub repository: RwLock<Option<Arc<Repository>>>,
}

impl AppState {
    pub fn new(repository: Option<Repository>) -> Self {
        Self {
            repository: RwLock::new(repository.map(Arc::new)),
        }
    }

    /// The current snapshot, handlers keep using it even if a reload swaps it out.
    pub async fn snapshot(&self) -> Result<Arc<Repository>, StatusCode> {
        self.repository
            .read()
            .await
            .clone()
            .ok_or(StatusCode::SERVICE_UNAVAILABLE)
    }

    pub async fn replace(&self, repository: Repository) {
        let _ = self.repository.write().await.replace(Arc::new(repository));
    }
}
