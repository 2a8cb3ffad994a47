// Public fallible APIs in this crate share one concrete error contract (`SilenceBoardError`).
#![allow(
    clippy::missing_errors_doc,
    reason = "crate-wide fallible API uses one explicit error type; per-item boilerplate would duplicate contract"
)]

pub mod alertmanager;
pub mod block;
pub mod config;
pub mod error;
pub mod github;
pub(crate) mod http;
pub mod models;
pub mod render;
pub mod silences;
pub mod sync;
pub(crate) mod text;

pub use block::{SectionMarkers, merge_section};
pub use config::SyncConfig;
pub use error::{Operation, Result, SilenceBoardError};
pub use sync::SilenceBoard;
