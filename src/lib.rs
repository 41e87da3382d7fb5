//! ptop library - minimal terminal process viewer.
//!
//! This module exposes the core components for testing and embedding.
#![cfg_attr(test, allow(clippy::unwrap_used))]
//!
//! ## Architecture
//!
//! - **collector**: process snapshot capture from the OS process table
//! - **state**: sort keys and snapshot ordering
//! - **app**: navigation state machine and key dispatch
//! - **ui**: frame geometry, table rendering, detail popup
//! - **theme**: color scheme
//! - **error**: error taxonomy

pub mod app;
pub mod collector;
pub mod error;
pub mod state;
pub mod theme;
pub mod ui;

// Re-export key types for convenience
pub use app::App;
pub use collector::{ProcessRecord, StatFields};
pub use error::{PtopError, Result};
pub use state::{sort_snapshot, SortKey};
