//! Line injection primitives shared by the Blueprint scaffolding tools.
//!
//! The crate edits text files by anchor: it locates marker lines and splices
//! new lines before, after, between or in place of them, then persists the
//! result atomically.
//!
//! # Modules
//!
//! - [`anchor`] - Anchor matching and lookup
//! - [`document`] - Line model and atomic file writes
//! - [`error`] - I/O error types
//! - [`injector`] - The stateful [`Injector`] and its outcomes

pub mod anchor;
pub mod document;
pub mod error;
pub mod injector;

pub use anchor::{MatchMode, ParseSettingError, SearchDirection, find_anchor};
pub use document::Document;
pub use error::{InjectError, Result};
pub use injector::{Applied, Injector, NewContent, Outcome, SkipReason};
