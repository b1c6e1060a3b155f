//! # tabscrub - tabular data cleaning and profiling engine
//!
//! tabscrub is the core behind a CSV editor: it takes an in-memory table,
//! profiles its columns, and applies cleaning operations that each produce a
//! new table plus a human-readable summary, with a bounded undo history.
//!
//! ## Quick Start
//!
//! ```no_run
//! use tabscrub::engine::CleaningEngine;
//! use tabscrub::logic::{KeepStrategy, KeySelector, TargetLayout};
//!
//! # fn example() -> tabscrub::error::Result<()> {
//! let mut engine = CleaningEngine::default();
//! engine.load_csv("id,joined\n1,01/06/2023\n1,2023-01-05\n")?;
//!
//! let date_columns = engine.scan_date_columns();
//! let report = engine.normalize_dates(&date_columns, TargetLayout::Iso);
//! println!("{}", report.message);
//!
//! let scan = engine.scan_duplicates(KeySelector::Column("id".into()));
//! if scan.has_duplicates() {
//!     engine.resolve_duplicates(&scan, KeepStrategy::Last)?;
//! }
//! engine.undo();
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Modules
//!
//! - [`model`]: `Table`, `Row`, `Value` and `ColumnType`
//! - [`logic`]: type inference, date normalization, deduplication, row
//!   transforms, the view pipeline and validation rules
//! - [`history`]: bounded undo stack of pre-mutation snapshots
//! - [`engine`]: `CleaningEngine`, the stateful facade hosts talk to
//! - [`io`]: CSV ingest/export and the persistence blob
//! - [`debounce`]: host-driven search debouncing
//! - [`config`], [`error`], [`logging`]: ambient plumbing

#![warn(clippy::all, rust_2018_idioms)]

pub mod config;
pub mod debounce;
pub mod engine;
pub mod error;
pub mod history;
pub mod io;
pub mod logging;
pub mod logic;
pub mod model;

pub use engine::{CleaningEngine, DuplicateScan, OperationKind, OperationReport};
pub use error::{Result, ScrubError};
pub use model::{ColumnType, Row, RowId, Table, Value};
