use crate::errors::PersistenceError;

/// Port over the two interchangeable persistence backends (remote versioned
/// store, local filesystem). Selected once at startup and held for the
/// process lifetime.
pub trait JournalStore {
    fn backend_name(&self) -> &'static str;

    /// Reads the canonical journal document. `Ok(None)` means the document
    /// does not exist yet and callers must start from an empty dataset.
    fn read_document(&self) -> Result<Option<String>, PersistenceError>;

    /// Whole-document overwrite. `message` is the human-readable change
    /// description recorded by backends that keep history.
    fn write_document(&self, contents: &str, message: &str) -> Result<(), PersistenceError>;

    /// Stores a write-once binary attachment and returns the reference
    /// string to embed in the owning trade record. Attachments are never
    /// updated or deleted; a collision is surfaced as an error, not
    /// silently overwritten.
    fn store_attachment(
        &self,
        path: &str,
        bytes: &[u8],
        message: &str,
    ) -> Result<String, PersistenceError>;
}
