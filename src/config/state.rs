// Application state module

use crate::store::Store;

use super::Config;

/// Shared application state handed to every request handler.
///
/// Holds the loaded configuration and the store handle. The store keeps no
/// open connection; each data-access operation acquires and releases its own.
pub struct AppState {
    pub config: Config,
    pub store: Store,
}

impl AppState {
    pub const fn new(config: Config, store: Store) -> Self {
        Self { config, store }
    }
}
