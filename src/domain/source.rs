use crate::domain::{Identifier, Record};

/// Supplies new records for insertion.
///
/// Insertion asks for candidate identifiers only when the caller did not
/// request one, and asks for the record itself only after the identifier
/// has passed validation.
pub trait RecordSource {
    /// Proposes an identifier for a record the caller did not name.
    ///
    /// Candidates may collide with identifiers already in use; the caller
    /// keeps asking until it finds a free one.
    fn next_identifier(&mut self) -> Identifier;

    /// Builds a fully populated record carrying `id`.
    fn record(&mut self, id: Identifier) -> Record;
}
