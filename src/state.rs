use crate::install::InstallSession;
use crate::storage::Store;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub store: Arc<Mutex<Store>>,
    pub install: Arc<Mutex<InstallSession>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, store: Store) -> Self {
        Self {
            data_path,
            store: Arc::new(Mutex::new(store)),
            install: Arc::new(Mutex::new(InstallSession::default())),
        }
    }
}
