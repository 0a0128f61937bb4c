//! Shared application state for all routes.

use crate::service::ProductRepository;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Storage client, constructed at startup and injected here.
    pub products: Arc<dyn ProductRepository>,
}

impl AppState {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }
}
