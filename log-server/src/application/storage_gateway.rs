// log-server/src/application/storage_gateway.rs
//
// Access point for the active storage backend.
// Handlers look the backend up once per request; the backend can be
// replaced between requests without restarting the server.

use std::sync::{Arc, RwLock};

use crate::ports::LogStorage;

#[derive(Clone)]
pub struct StorageGateway {
    active: Arc<RwLock<Arc<dyn LogStorage>>>,
}

impl StorageGateway {
    pub fn new(storage: Arc<dyn LogStorage>) -> Self {
        Self {
            active: Arc::new(RwLock::new(storage)),
        }
    }

    /// Current storage backend
    pub fn active(&self) -> Arc<dyn LogStorage> {
        // A poisoned lock still holds a valid handle
        match self.active.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Swap the backend; requests already holding the old handle finish with it
    pub fn replace(&self, storage: Arc<dyn LogStorage>) {
        let mut guard = match self.active.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = storage;
        tracing::info!("Storage backend replaced");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{ItemResult, RetentionConfig, LOGS_TTL_KEY};
    use crate::ports::MockLogStorage;

    fn storage_with_ttl(ttl: i64) -> Arc<dyn LogStorage> {
        let mut mock = MockLogStorage::new();
        mock.expect_get_config()
            .returning(move |_| Ok(ItemResult::new(RetentionConfig::logs_ttl(ttl))));
        Arc::new(mock)
    }

    #[tokio::test]
    async fn test_active_returns_current_backend() {
        let gateway = StorageGateway::new(storage_with_ttl(60));

        let config = gateway.active().get_config(LOGS_TTL_KEY).await.unwrap();
        assert_eq!(config.item.unwrap().ttl, 60);
    }

    #[tokio::test]
    async fn test_replace_affects_later_lookups_only() {
        let gateway = StorageGateway::new(storage_with_ttl(60));
        let held = gateway.active();

        gateway.replace(storage_with_ttl(120));

        let old = held.get_config(LOGS_TTL_KEY).await.unwrap();
        let new = gateway.active().get_config(LOGS_TTL_KEY).await.unwrap();
        assert_eq!(old.item.unwrap().ttl, 60);
        assert_eq!(new.item.unwrap().ttl, 120);
    }
}
