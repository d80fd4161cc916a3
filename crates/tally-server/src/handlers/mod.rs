//! HTTP request handlers organized by endpoint

pub mod analyze;
pub mod health;
pub mod insights;

// Re-export all handlers for use in router
pub use analyze::*;
pub use health::*;
pub use insights::*;
