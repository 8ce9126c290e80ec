use std::fs;
use std::path::{Path, PathBuf};
use tradelog_domain::errors::PersistenceError;
use tradelog_domain::repositories::journal::JournalStore;

/// Local-filesystem fallback used when the remote store is not configured.
/// Same relative layout as the remote backend, rooted at `root`; no version
/// tokens, commit messages are ignored.
pub struct LocalJournalStore {
    root: PathBuf,
    dataset_path: String,
}

impl LocalJournalStore {
    pub fn new(root: PathBuf, dataset_path: String) -> Self {
        Self { root, dataset_path }
    }

    fn resolve(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }
}

impl JournalStore for LocalJournalStore {
    fn backend_name(&self) -> &'static str {
        "local"
    }

    fn read_document(&self) -> Result<Option<String>, PersistenceError> {
        let path = self.resolve(&self.dataset_path);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "journal file absent");
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .map_err(|err| PersistenceError::io(format!("failed to read journal {}", path.display()), err))
    }

    fn write_document(&self, contents: &str, _message: &str) -> Result<(), PersistenceError> {
        let path = self.resolve(&self.dataset_path);
        ensure_parent(&path)?;
        fs::write(&path, contents)
            .map_err(|err| PersistenceError::io(format!("failed to write journal {}", path.display()), err))
    }

    fn store_attachment(
        &self,
        path: &str,
        bytes: &[u8],
        _message: &str,
    ) -> Result<String, PersistenceError> {
        let target = self.resolve(path);
        ensure_parent(&target)?;
        fs::write(&target, bytes).map_err(|err| {
            PersistenceError::io(format!("failed to write attachment {}", target.display()), err)
        })?;
        Ok(path.to_string())
    }
}

fn ensure_parent(path: &Path) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| {
            PersistenceError::io(format!("failed to create dir {}", parent.display()), err)
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::LocalJournalStore;
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};
    use tradelog_domain::repositories::journal::JournalStore;

    fn unique_tmp_dir(name: &str) -> PathBuf {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        std::env::temp_dir().join(format!("tradelog_{name}_{}_{}", std::process::id(), now))
    }

    #[test]
    fn read_document_returns_none_when_absent() {
        let store = LocalJournalStore::new(unique_tmp_dir("absent"), "data/journal.csv".to_string());
        assert!(store.read_document().expect("read").is_none());
    }

    #[test]
    fn write_then_read_round_trips() {
        let root = unique_tmp_dir("roundtrip");
        let store = LocalJournalStore::new(root, "data/journal.csv".to_string());
        store
            .write_document("date,time\n", "chore: update journal.csv")
            .expect("write");
        let contents = store.read_document().expect("read").expect("present");
        assert_eq!(contents, "date,time\n");
    }

    #[test]
    fn store_attachment_creates_nested_dirs() {
        let root = unique_tmp_dir("attach");
        let store = LocalJournalStore::new(root.clone(), "data/journal.csv".to_string());
        let reference = store
            .store_attachment(
                "data/screenshots/2024-01-01_0930_shot.png",
                b"\x89PNG",
                "feat: add screenshot",
            )
            .expect("attachment");
        assert_eq!(reference, "data/screenshots/2024-01-01_0930_shot.png");
        let written = fs::read(root.join(reference)).expect("read back");
        assert_eq!(written, b"\x89PNG");
    }
}
