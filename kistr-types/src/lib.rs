//! kistr-specific value types: errors, TR names, and configuration primitives.
#![warn(missing_docs)]

mod config;
mod error;
mod name;

pub use config::{BatchOptions, ClientConfig};
pub use error::TrError;
pub use name::TrName;
