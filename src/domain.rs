//! Domain models for the nested record structure.
//!
//! This module contains the owning list type the structure is built from,
//! validated identifiers, records, the structure itself and configuration.

/// Owning singly-linked list used at every level of the structure.
pub mod chain;
pub use chain::Chain;

mod config;
pub use config::Config;

/// Record identifiers and their formatting rules.
pub mod identifier;
pub use identifier::{Identifier, InvalidIdentifierError, is_valid_format};

mod listing;
pub use listing::Listing;

mod record;
pub use record::{Record, RecordSummary};

mod source;
pub use source::RecordSource;

/// Categories, groups and the structure that owns them.
pub mod structure;
pub use structure::{Category, Error, Group, Structure, Target};
