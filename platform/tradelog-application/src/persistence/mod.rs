use crate::codec;
use std::time::Instant;
use tradelog_domain::errors::PersistenceError;
use tradelog_domain::repositories::journal::JournalStore;
use tradelog_domain::value_objects::dataset::Dataset;

/// Canonical location of the journal document, relative to the backend root.
pub const DATASET_PATH: &str = "data/journal.csv";
/// Attachments live next to the journal under the same root.
pub const ATTACHMENTS_DIR: &str = "data/screenshots";

const DATASET_COMMIT_MESSAGE: &str = "chore: update journal.csv";

/// Single entry point the presentation layer uses to load, persist and attach
/// to the journal, independent of which backend was selected at startup.
///
/// Records have no identifier beyond their position, so an edit-by-index must
/// follow a `load_dataset` within the same logical operation; an index from
/// an earlier load may name a different row.
pub struct JournalPersistence {
    store: Box<dyn JournalStore>,
}

impl JournalPersistence {
    pub fn new(store: Box<dyn JournalStore>) -> Self {
        Self { store }
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    /// Loads the current journal. An absent document is the empty journal
    /// with the fixed schema, not an error; malformed content is fatal.
    pub fn load_dataset(&self) -> Result<Dataset, PersistenceError> {
        let span = tracing::info_span!("persistence.load", backend = self.store.backend_name());
        let _enter = span.enter();
        let start = Instant::now();
        let result = match self.store.read_document() {
            Ok(Some(contents)) => codec::decode_dataset(&contents),
            Ok(None) => {
                tracing::debug!("journal document absent, starting empty");
                Ok(Dataset::empty())
            }
            Err(err) => Err(err),
        };
        record_call("load", self.store.backend_name(), start, result.is_ok());
        result
    }

    /// Whole-document overwrite of the journal. On the remote backend the
    /// version token is re-fetched at write time, so the effective policy is
    /// last-writer-wins against the latest revision, not the one this
    /// dataset was loaded from.
    pub fn save_dataset(&self, dataset: &Dataset) -> Result<(), PersistenceError> {
        let span = tracing::info_span!(
            "persistence.save",
            backend = self.store.backend_name(),
            records = dataset.len()
        );
        let _enter = span.enter();
        let start = Instant::now();
        let result = codec::encode_dataset(dataset)
            .and_then(|contents| self.store.write_document(&contents, DATASET_COMMIT_MESSAGE));
        record_call("save", self.store.backend_name(), start, result.is_ok());
        result
    }

    /// Stores a write-once attachment and returns the reference string to
    /// embed in the owning record. Independent of any dataset save; callers
    /// should store the attachment before saving the record that points at
    /// it, though nothing enforces that ordering.
    pub fn store_attachment(&self, path: &str, bytes: &[u8]) -> Result<String, PersistenceError> {
        let span = tracing::info_span!(
            "persistence.attach",
            backend = self.store.backend_name(),
            path,
            size = bytes.len()
        );
        let _enter = span.enter();
        let start = Instant::now();
        let message = format!("feat: add screenshot {path}");
        let result = self.store.store_attachment(path, bytes, &message);
        record_call("attach", self.store.backend_name(), start, result.is_ok());
        result
    }
}

/// Attachment path for a screenshot captured alongside a trade, mirroring the
/// journal's `{date}_{hhmm}_{filename}` convention.
pub fn attachment_path(date: &str, time: &str, filename: &str) -> String {
    let compact_time = time.replace(':', "");
    format!("{ATTACHMENTS_DIR}/{date}_{compact_time}_{filename}")
}

fn record_call(op: &'static str, backend: &'static str, start: Instant, ok: bool) {
    let result_label = if ok { "ok" } else { "err" };
    metrics::counter!(
        "tradelog.persistence.calls_total",
        "op" => op,
        "backend" => backend,
        "result" => result_label
    )
    .increment(1);
    metrics::histogram!(
        "tradelog.persistence.call_ms",
        "op" => op,
        "backend" => backend,
        "result" => result_label
    )
    .record(start.elapsed().as_millis() as f64);
}
