pub mod auth;
pub mod lead_service;
pub mod notifier;
pub mod stats;
