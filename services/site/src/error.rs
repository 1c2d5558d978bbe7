//! services/site/src/error.rs
//!
//! Defines the primary error type for the site service.

use crate::config::ConfigError;
use crate::gatekeeper::GateError;
use healthbook_core::ports::PortError;

/// The primary error type for the `site` service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error that propagated up from one of the core service ports.
    #[error("Service Port Error: {0}")]
    Port(#[from] PortError),

    /// Represents an error building the request gatekeeper.
    #[error("Gatekeeper error: {0}")]
    Gatekeeper(#[from] GateError),

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
