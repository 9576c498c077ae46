pub mod auth;
pub mod dashboard;
pub mod lead;
pub mod package;
