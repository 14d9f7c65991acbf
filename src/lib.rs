//! Nested record lists
//!
//! A structure of categories, each owning groups, each owning an ordered list
//! of records keyed by a unique identifier.

pub mod domain;
pub use domain::{
    Category, Config, Error, Group, Identifier, Record, RecordSource, Structure, Target,
};

/// Seeded generator that builds initial structures and new records.
pub mod generator;
pub use generator::Generator;
