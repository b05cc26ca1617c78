// Library exports for hosts and tests

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod navigation;
pub mod services;

// Re-export commonly used types
pub use error::{AppError, Result};
pub use navigation::{NavigationState, Navigator};
