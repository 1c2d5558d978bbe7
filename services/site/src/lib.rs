pub mod adapters;
pub mod config;
pub mod cookies;
pub mod error;
pub mod gatekeeper;
pub mod web;
