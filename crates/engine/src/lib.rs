//! `maxhour-engine` — crew flight-hour compliance engine.
//!
//! Pure engine crate: receives pre-loaded report tables, returns enriched
//! tables, per-company summaries, and the final report rows. No file or UI
//! dependencies.

pub mod aggregate;
pub mod classify;
pub mod columns;
pub mod config;
pub mod csv;
pub mod engine;
pub mod error;
pub mod hours;
pub mod merge;
pub mod model;
pub mod process;
pub mod report;

pub use config::AnalyzerConfig;
pub use engine::run;
pub use error::AnalysisError;
pub use model::{AnalysisInput, AnalysisResult, Cell, DatasetKind, Table};
