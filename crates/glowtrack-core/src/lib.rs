//! # Glowtrack Core Library
//!
//! This library provides the core logic behind the Glowtrack skincare app:
//! the daily routine checklists, the completion streak, and the local
//! records kept next to them. The `glowtrack` CLI is a thin layer over it.
//!
//! ## Architecture
//!
//! - **Routine**: morning/evening checklists with per-step completion flags
//!   and a consecutive-day streak, re-derived on every save
//! - **Storage**: an injected asynchronous key-value store (SQLite or
//!   in-memory) and TOML-based configuration
//! - **Profile / Reports**: the onboarding answers and the history of skin
//!   analysis reports, stored in the same namespace
//!
//! ## Key Components
//!
//! - [`RoutineStore`]: load/save plus `toggle`, `add_step`, `delete_step`
//! - [`KeyValueStore`]: persistence primitive, implemented by [`Database`]
//!   and [`MemoryStore`]
//! - [`Config`]: Application configuration management

pub mod error;
pub mod profile;
pub mod reports;
pub mod routine;
pub mod storage;

pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use profile::{ProfileField, ProfileStore, SkinGoal, SkinType, UserData};
pub use reports::{ReportHistory, SkinReport, StoredReport};
pub use routine::{
    Clock, Completions, DailyRoutine, DayStatus, FixedClock, RoutineData, RoutinePolicy,
    RoutineStatus, RoutineStep, RoutineStore, SystemClock, TimeOfDay,
};
pub use storage::{Config, Database, KeyValueStore, MemoryStore, StorageKeys};
