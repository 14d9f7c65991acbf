//! The three-level nested list: categories own groups, groups own records.
//!
//! The [`Structure`] is the single owner of everything below it. Records are
//! added with [`Structure::insert`] and taken out with [`Structure::remove`];
//! categories and groups are never removed, and a group is only created when
//! an insertion targets a category that has no group yet.

use std::fmt;

use thiserror::Error;
use tracing::{debug, instrument, trace};

use crate::domain::{Chain, Identifier, Record, RecordSource};

/// How many generated identifiers to try before giving up on finding a free
/// one.
pub const MAX_GENERATION_ATTEMPTS: usize = 64;

/// Errors raised by structure mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The requested identifier breaks the format rules or is already used.
    #[error("Invalid or non-unique identifier '{0}'")]
    InvalidOrDuplicateIdentifier(String),

    /// The structure has no categories at all.
    #[error("Data structure is empty")]
    EmptyStructure,

    /// No record in the searched group carries the identifier.
    #[error("Record with identifier '{0}' does not exist")]
    IdentifierNotFound(String),

    /// The targeted category does not exist.
    #[error("No category at position {0}")]
    CategoryNotFound(usize),

    /// The targeted group does not exist (and cannot be created there).
    #[error("No group at position {group} in category {category}")]
    GroupNotFound {
        /// Position of the category that was searched.
        category: usize,
        /// Position of the missing group.
        group: usize,
    },

    /// The record source kept proposing identifiers that were already taken.
    #[error("Could not generate a unique identifier in {0} attempts")]
    IdentifiersExhausted(usize),
}

/// Selects the group an operation acts on, by zero-based position.
///
/// The default is the first group of the first category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Target {
    /// Position of the category in the structure.
    pub category: usize,
    /// Position of the group within that category.
    pub group: usize,
}

impl Target {
    /// The first group of the first category.
    pub const FIRST: Self = Self::new(0, 0);

    /// Creates a target from category and group positions.
    #[must_use]
    pub const fn new(category: usize, group: usize) -> Self {
        Self { category, group }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "category {}, group {}", self.category, self.group)
    }
}

/// Second-level container: a keyed list of records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    key: char,
    records: Chain<Record>,
}

impl Group {
    /// Creates an empty group.
    #[must_use]
    pub const fn new(key: char) -> Self {
        Self {
            key,
            records: Chain::new(),
        }
    }

    /// Creates a group holding `records` in the given order.
    pub fn with_records(key: char, records: impl IntoIterator<Item = Record>) -> Self {
        Self {
            key,
            records: records.into_iter().collect(),
        }
    }

    /// The letter this group was keyed on.
    #[must_use]
    pub const fn key(&self) -> char {
        self.key
    }

    /// The group's records, in link order.
    #[must_use]
    pub const fn records(&self) -> &Chain<Record> {
        &self.records
    }

    /// Returns `true` if a record with this exact identifier is in the group.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.records.iter().any(|record| record.id().as_str() == id)
    }
}

/// Top-level container: a keyed list of groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    key: char,
    groups: Chain<Group>,
}

impl Category {
    /// Creates a category with no groups.
    #[must_use]
    pub const fn new(key: char) -> Self {
        Self {
            key,
            groups: Chain::new(),
        }
    }

    /// Creates a category holding `groups` in the given order.
    pub fn with_groups(key: char, groups: impl IntoIterator<Item = Group>) -> Self {
        Self {
            key,
            groups: groups.into_iter().collect(),
        }
    }

    /// The letter this category was keyed on.
    #[must_use]
    pub const fn key(&self) -> char {
        self.key
    }

    /// The category's groups, in link order.
    #[must_use]
    pub const fn groups(&self) -> &Chain<Group> {
        &self.groups
    }
}

/// The whole nested list.
///
/// A structure with no categories corresponds to an absent root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Structure {
    categories: Chain<Category>,
}

impl Structure {
    /// Creates a structure with no categories.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            categories: Chain::new(),
        }
    }

    /// The top-level categories, in link order.
    #[must_use]
    pub const fn categories(&self) -> &Chain<Category> {
        &self.categories
    }

    /// Appends a category after the existing ones.
    pub fn push_category(&mut self, category: Category) {
        self.categories.push_back(category);
    }

    /// Returns `true` if there is no root category.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Every record, visiting categories, then groups, then records in link
    /// order.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.categories
            .iter()
            .flat_map(|category| category.groups.iter())
            .flat_map(|group| group.records.iter())
    }

    /// The number of records across the whole structure.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.categories
            .iter()
            .flat_map(|category| category.groups.iter())
            .map(|group| group.records.len())
            .sum()
    }

    /// Returns the group at `target`, if it exists.
    #[must_use]
    pub fn group(&self, target: Target) -> Option<&Group> {
        self.categories
            .get(target.category)?
            .groups
            .get(target.group)
    }

    /// Returns `true` if any record anywhere carries this exact identifier.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.records().any(|record| record.id().as_str() == id)
    }

    /// Checks that no record anywhere carries `candidate`.
    ///
    /// An absent candidate is trivially unique.
    #[must_use]
    pub fn is_unique(&self, candidate: Option<&str>) -> bool {
        candidate.is_none_or(|id| !self.contains(id))
    }

    /// Finds the group holding the record with identifier `id`.
    #[must_use]
    pub fn locate(&self, id: &str) -> Option<Target> {
        self.categories
            .iter()
            .enumerate()
            .find_map(|(category, entry)| {
                entry
                    .groups
                    .iter()
                    .position(|group| group.contains(id))
                    .map(|group| Target::new(category, group))
            })
    }

    /// Inserts a new record into the group at `target`, keeping that group in
    /// ascending identifier order.
    ///
    /// If `requested` is absent or empty, identifiers are drawn from `source`
    /// until a free one turns up. The record itself is only built once the
    /// identifier has been accepted, and it is spliced in front of the first
    /// record whose identifier is greater than or equal to it.
    ///
    /// When the category has no groups yet and the target is its first group,
    /// a new group is created holding only the new record.
    ///
    /// Returns the identifier of the inserted record.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidOrDuplicateIdentifier`] if `requested` breaks the
    ///   format rules or is already in use anywhere in the structure
    /// - [`Error::IdentifiersExhausted`] if no free identifier could be
    ///   generated
    /// - [`Error::EmptyStructure`], [`Error::CategoryNotFound`] or
    ///   [`Error::GroupNotFound`] if the target cannot be resolved
    ///
    /// The structure is left unchanged on error.
    #[instrument(level = "debug", skip(self, source))]
    pub fn insert<S>(
        &mut self,
        requested: Option<&str>,
        target: Target,
        source: &mut S,
    ) -> Result<Identifier, Error>
    where
        S: RecordSource + ?Sized,
    {
        let id = match requested.filter(|requested| !requested.is_empty()) {
            Some(requested) => self.admit(requested)?,
            None => self.fresh_identifier(source)?,
        };

        if self.is_empty() {
            return Err(Error::EmptyStructure);
        }
        let category = self
            .categories
            .get_mut(target.category)
            .ok_or(Error::CategoryNotFound(target.category))?;

        if category.groups.is_empty() && target.group == 0 {
            debug!(%target, "creating group on demand");
            category.groups.push_back(Group::new(id.initial()));
        }
        let group = category
            .groups
            .get_mut(target.group)
            .ok_or(Error::GroupNotFound {
                category: target.category,
                group: target.group,
            })?;

        let record = source.record(id.clone());
        let position = group
            .records
            .insert_sorted_by(record, |new, existing| new.id().cmp(existing.id()));
        debug!(%id, position, "inserted record");

        Ok(id)
    }

    /// Unlinks the record with identifier `id` from the group at `target` and
    /// hands it back. Dropping the returned record releases it.
    ///
    /// Only the targeted group is searched; matching is exact and
    /// case-sensitive.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyStructure`] if there is no root category
    /// - [`Error::CategoryNotFound`] or [`Error::GroupNotFound`] if the target
    ///   cannot be resolved
    /// - [`Error::IdentifierNotFound`] if the group has no such record
    #[instrument(level = "debug", skip(self))]
    pub fn remove(&mut self, id: &str, target: Target) -> Result<Record, Error> {
        if self.is_empty() {
            return Err(Error::EmptyStructure);
        }

        let group = self.group_mut(target)?;
        let record = group
            .records
            .remove_first(|record| record.id().as_str() == id)
            .ok_or_else(|| Error::IdentifierNotFound(id.to_string()))?;
        debug!(%id, remaining = group.records.len(), "removed record");

        Ok(record)
    }

    fn group_mut(&mut self, target: Target) -> Result<&mut Group, Error> {
        self.categories
            .get_mut(target.category)
            .ok_or(Error::CategoryNotFound(target.category))?
            .groups
            .get_mut(target.group)
            .ok_or(Error::GroupNotFound {
                category: target.category,
                group: target.group,
            })
    }

    /// Validates a caller-supplied identifier.
    fn admit(&self, requested: &str) -> Result<Identifier, Error> {
        let rejected = || Error::InvalidOrDuplicateIdentifier(requested.to_string());

        if !self.is_unique(Some(requested)) {
            return Err(rejected());
        }
        Identifier::try_from(requested).map_err(|_| rejected())
    }

    fn fresh_identifier<S>(&self, source: &mut S) -> Result<Identifier, Error>
    where
        S: RecordSource + ?Sized,
    {
        for _ in 0..MAX_GENERATION_ATTEMPTS {
            let candidate = source.next_identifier();
            if !self.contains(&candidate) {
                return Ok(candidate);
            }
            trace!(%candidate, "generated identifier already in use");
        }
        Err(Error::IdentifiersExhausted(MAX_GENERATION_ATTEMPTS))
    }
}

impl FromIterator<Category> for Structure {
    fn from_iter<I: IntoIterator<Item = Category>>(iter: I) -> Self {
        Self {
            categories: iter.into_iter().collect(),
        }
    }
}
