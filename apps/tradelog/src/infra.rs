use tradelog_application::config::{self, Config};
use tradelog_domain::repositories::journal::JournalStore;
use tradelog_infrastructure::local::LocalJournalStore;
use tradelog_infrastructure::remote::{ContentsClient, RemoteJournalStore};

/// Builds the one backend this process will use. Remote when the credential,
/// owner, repo and branch are all configured; local filesystem otherwise.
pub fn build_store(config: &Config) -> Result<Box<dyn JournalStore>, String> {
    let dataset_path = config::dataset_path(config);
    match config::remote_from_env(config) {
        Some(remote) => {
            tracing::info!(
                owner = %remote.owner,
                repo = %remote.repo,
                branch = %remote.branch,
                "remote journal store active"
            );
            let client = ContentsClient::new(remote.token, remote.owner, remote.repo, remote.branch)
                .map_err(|err| format!("failed to init remote store client: {err}"))?;
            Ok(Box::new(RemoteJournalStore::new(client, dataset_path)))
        }
        None => {
            let root = config::local_root(config);
            tracing::info!(
                root = %root.display(),
                "local journal store active (remote store not configured)"
            );
            Ok(Box::new(LocalJournalStore::new(root, dataset_path)))
        }
    }
}
