//! services/site/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use crate::gatekeeper::Gatekeeper;
use healthbook_core::ports::{CredentialStore, SessionService};
use std::sync::Arc;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub gatekeeper: Arc<Gatekeeper>,
    pub credentials: Arc<dyn CredentialStore>,
    pub sessions: Arc<dyn SessionService>,
}
