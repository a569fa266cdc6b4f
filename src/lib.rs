//! An educational model of a linked hash map, built to be drawn.
//!
//! [`VisualMap`] keeps a fixed array of ten buckets routed by the digit sum
//! of each key, and threads the same entries through a doubly linked list in
//! insertion order. [`Visualizer`] drives it from user commands and reports
//! what each operation did, with a transient highlight cue for the
//! presentation layer; [`render`] draws it in a terminal.

pub mod command;
pub mod config;
pub mod error;
pub mod hashing;
pub mod highlight;
pub mod linked_map;
pub mod model;
pub mod operations;
pub mod render;
pub mod session;
#[cfg(feature = "shared_map")]
pub mod shared_map;

/// Keys are plain integers.
pub type Key = i64;

pub use command::Command;
pub use config::VisualizerConfig;
pub use error::{ConfigError, InputError};
pub use hashing::{bucket_index, hash_trace, BUCKET_COUNT};
pub use highlight::{Highlight, HighlightTracker, Tone};
pub use model::{Entry, EntryId, GetOutcome, MapSnapshot, PutOutcome, RemoveOutcome, VisualMap};
pub use operations::MapOperations;
pub use session::{Output, Report, Visualizer};
#[cfg(feature = "shared_map")]
pub use shared_map::SharedMap;
