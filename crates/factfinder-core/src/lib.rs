//! # factfinder-core - Core Domain Types
//!
//! Foundation crate for the FactFinder panel. Provides the domain types the
//! backend pushes and returns, the push channel names, payload decoding, error
//! handling and logging setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`ConnectionStatus`] - Closed set of link health labels
//! - [`ConnectionState`] - Status plus human-readable message for one link
//! - [`SnapshotRow`], [`Snapshot`] - Ordered key/value rows of a tracked stream
//! - [`Provider`] - A selectable fact provider
//!
//! ### Events (`events`)
//! - [`Channel`] - The four push channels the backend emits on
//! - [`PanelEvent`] - A decoded push payload tagged by channel
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use factfinder_core::prelude::*;
//! ```

pub mod error;
pub mod events;
pub mod logging;
pub mod types;

/// Prelude for common imports used throughout all FactFinder crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use error::{Error, Result, ResultExt};
pub use events::{Channel, PanelEvent};
pub use types::{ConnectionState, ConnectionStatus, Provider, Snapshot, SnapshotRow};
