//! Server state

use std::sync::Arc;

use crate::sites::controller::SiteController;

/// Server state shared across handlers
pub struct ServerState {
    pub sites: Arc<SiteController>,
}

impl ServerState {
    pub fn new(sites: Arc<SiteController>) -> Self {
        Self { sites }
    }
}
