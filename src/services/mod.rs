//! Services - business logic and state management
//!
//! This module contains the core business logic services:
//! - `tracker` - Central event processor and person location state
//! - `notifier` - Change notification signal for the display layer

pub mod notifier;
pub mod tracker;

// Re-export commonly used types
pub use notifier::ChangeNotifier;
pub use tracker::{ClockSnapshot, PersonLocation, Tracker};
