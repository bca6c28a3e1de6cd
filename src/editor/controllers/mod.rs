//! # Controllers Module
//!
//! Contains all controller components that orchestrate the MVVM pattern.

pub mod app_controller;

// Re-export main types for convenience
pub use app_controller::{AppController, SessionStats};
