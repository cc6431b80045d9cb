#![forbid(unsafe_code)]

//! Core domain model and business logic for Twin Fit.
//!
//! This crate provides:
//! - Domain types (profiles, food, exercise, weight, workouts)
//! - Profile-scoped persistence with daily rollover
//! - Calorie and macro targets
//! - The live session timer
//! - Training, booking and feed boards

pub mod types;
pub mod error;
pub mod clock;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod storage;
pub mod tracking;
pub mod record;
pub mod store;
pub mod nutrition;
pub mod forms;
pub mod progress;
pub mod live;
pub mod training;
pub mod booking;
pub mod feed;
pub mod session;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use tracking::TrackingState;
pub use store::ProfileStore;
pub use nutrition::calorie_goal;
pub use live::{LiveSession, Ticker, TimerState};
pub use session::{DailySummary, Session};
