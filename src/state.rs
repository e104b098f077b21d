use std::sync::Arc;

use crate::application::services::RedirectService;
use crate::domain::link_rewriter::LinkRewriter;
use crate::domain::old_paths::OldPathDeriver;

/// Shared, read-only state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub redirect_service: Arc<RedirectService>,
    pub link_rewriter: Arc<LinkRewriter>,
}

impl AppState {
    pub fn new(redirect_service: Arc<RedirectService>, link_rewriter: Arc<LinkRewriter>) -> Self {
        Self {
            redirect_service,
            link_rewriter,
        }
    }

    pub fn deriver(&self) -> &OldPathDeriver {
        self.redirect_service.deriver()
    }
}
