use std::sync::Arc;

use tokio::sync::Mutex;

use crate::simulate::SeasonSimulator;
use crate::storage::EntityStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<EntityStore>,
    pub simulator: Arc<SeasonSimulator>,
    /// Seed used when a request does not bring its own
    pub default_seed: Option<u64>,
    /// Serializes read-modify-write cycles on the record files
    pub write_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(store: EntityStore, simulator: SeasonSimulator, default_seed: Option<u64>) -> Self {
        Self {
            store: Arc::new(store),
            simulator: Arc::new(simulator),
            default_seed,
            write_lock: Arc::new(Mutex::new(())),
        }
    }
}
