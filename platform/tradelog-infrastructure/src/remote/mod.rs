use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tradelog_domain::errors::{PersistenceError, TransportError};
use tradelog_domain::repositories::journal::JournalStore;

const DEFAULT_API_ROOT: &str = "https://api.github.com";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// A remote file plus the opaque version token required on the next write of
/// the same path.
#[derive(Debug, Clone)]
pub struct RemoteFile {
    pub content: String,
    pub version: String,
}

/// Metadata of the revision created by a successful write. The content sha is
/// the version token the next fetch of the path will return.
#[derive(Debug, Clone)]
pub struct CommitMetadata {
    pub content_sha: Option<String>,
    pub commit_sha: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentsResponse {
    content: String,
    sha: String,
}

#[derive(Debug, Deserialize)]
struct ShaOnly {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct PutResponse {
    content: Option<ShaOnly>,
    commit: Option<ShaOnly>,
}

#[derive(Debug, Serialize)]
struct PutPayload<'a> {
    message: &'a str,
    content: String,
    branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
}

/// Client for a GitHub-style contents API: authenticated whole-file reads and
/// writes against a fixed repository and branch, base64 on the wire in both
/// directions. Stateless between calls; version tokens are passed explicitly.
pub struct ContentsClient {
    api_root: String,
    owner: String,
    repo: String,
    branch: String,
    headers: HeaderMap,
    client: Client,
}

impl ContentsClient {
    pub fn new(
        token: String,
        owner: String,
        repo: String,
        branch: String,
    ) -> Result<Self, TransportError> {
        Self::with_api_root(DEFAULT_API_ROOT.to_string(), token, owner, repo, branch)
    }

    pub fn with_api_root(
        api_root: String,
        token: String,
        owner: String,
        repo: String,
        branch: String,
    ) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        let auth = HeaderValue::from_str(&format!("token {token}"))
            .map_err(|_| TransportError::Request("credential is not a valid header value".to_string()))?;
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));

        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|err| TransportError::Request(format!("failed to build http client: {err}")))?;

        Ok(Self {
            api_root: api_root.trim_end_matches('/').to_string(),
            owner,
            repo,
            branch,
            headers,
            client,
        })
    }

    fn contents_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_root,
            self.owner,
            self.repo,
            path.trim_start_matches('/')
        )
    }

    /// Fetches a file. `Ok(None)` is the not-found signal: the path does not
    /// exist yet on the branch and callers should start empty.
    pub fn fetch(&self, path: &str) -> Result<Option<RemoteFile>, TransportError> {
        let url = self.contents_url(path);
        let span = tracing::info_span!("infra.remote.fetch", path, branch = %self.branch);
        let _enter = span.enter();
        let start = Instant::now();

        metrics::counter!("tradelog.infra.remote.requests_total", "op" => "fetch").increment(1);
        let response = self
            .client
            .get(&url)
            .headers(self.headers.clone())
            .query(&[("ref", self.branch.as_str())])
            .send()
            .map_err(|err| {
                record_error("fetch", None);
                TransportError::Request(format!("remote GET failed: {err}"))
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            record_call("fetch", start, "absent");
            tracing::debug!(path, "remote file absent");
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            record_error("fetch", Some(status.as_u16()));
            tracing::warn!(path, status = status.as_u16(), "remote GET rejected");
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed = response.json::<ContentsResponse>().map_err(|err| {
            record_error("fetch", Some(status.as_u16()));
            TransportError::Decode(format!("failed to parse contents response: {err}"))
        })?;
        let content = decode_content(&parsed.content)?;
        record_call("fetch", start, "ok");
        Ok(Some(RemoteFile {
            content,
            version: parsed.sha,
        }))
    }

    /// Whole-document overwrite of a text file. The backend rejects the write
    /// when the path exists and `version` is absent or stale; that rejection
    /// surfaces as `TransportError::Status` with no retry or merge here.
    pub fn store(
        &self,
        path: &str,
        content: &str,
        message: &str,
        version: Option<&str>,
    ) -> Result<CommitMetadata, TransportError> {
        self.put(path, BASE64.encode(content.as_bytes()), message, version, "store")
    }

    /// Same contract as `store` for opaque binary payloads. Intended for
    /// write-once attachments, so callers normally pass no version.
    pub fn store_binary(
        &self,
        path: &str,
        bytes: &[u8],
        message: &str,
        version: Option<&str>,
    ) -> Result<CommitMetadata, TransportError> {
        self.put(path, BASE64.encode(bytes), message, version, "store_binary")
    }

    fn put(
        &self,
        path: &str,
        encoded: String,
        message: &str,
        version: Option<&str>,
        op: &'static str,
    ) -> Result<CommitMetadata, TransportError> {
        let url = self.contents_url(path);
        let span = tracing::info_span!(
            "infra.remote.put",
            path,
            branch = %self.branch,
            op,
            has_version = version.is_some()
        );
        let _enter = span.enter();
        let start = Instant::now();

        let payload = PutPayload {
            message,
            content: encoded,
            branch: &self.branch,
            sha: version,
        };

        metrics::counter!("tradelog.infra.remote.requests_total", "op" => op).increment(1);
        let response = self
            .client
            .put(&url)
            .headers(self.headers.clone())
            .json(&payload)
            .send()
            .map_err(|err| {
                record_error(op, None);
                TransportError::Request(format!("remote PUT failed: {err}"))
            })?;

        let status = response.status();
        if status != StatusCode::OK && status != StatusCode::CREATED {
            let body = response.text().unwrap_or_default();
            record_error(op, Some(status.as_u16()));
            tracing::warn!(path, status = status.as_u16(), "remote write rejected");
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed = response.json::<PutResponse>().map_err(|err| {
            record_error(op, Some(status.as_u16()));
            TransportError::Decode(format!("failed to parse commit response: {err}"))
        })?;
        record_call(op, start, "ok");
        Ok(CommitMetadata {
            content_sha: parsed.content.map(|c| c.sha),
            commit_sha: parsed.commit.map(|c| c.sha),
        })
    }
}

fn decode_content(raw: &str) -> Result<String, TransportError> {
    // The contents API wraps base64 bodies with embedded newlines.
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = BASE64
        .decode(compact.as_bytes())
        .map_err(|err| TransportError::Decode(format!("invalid base64 content: {err}")))?;
    String::from_utf8(bytes)
        .map_err(|err| TransportError::Decode(format!("remote content is not utf-8: {err}")))
}

fn record_call(op: &'static str, start: Instant, result: &'static str) {
    metrics::histogram!("tradelog.infra.remote.call_ms", "op" => op, "result" => result)
        .record(start.elapsed().as_millis() as f64);
}

fn record_error(op: &'static str, status: Option<u16>) {
    let status_label = status
        .map(|s| s.to_string())
        .unwrap_or_else(|| "none".to_string());
    metrics::counter!("tradelog.infra.remote.errors_total", "op" => op, "status" => status_label)
        .increment(1);
}

/// Remote backend for the journal: the canonical dataset document plus
/// write-once attachments, all under one repository and branch.
pub struct RemoteJournalStore {
    client: ContentsClient,
    dataset_path: String,
}

impl RemoteJournalStore {
    pub fn new(client: ContentsClient, dataset_path: String) -> Self {
        Self {
            client,
            dataset_path,
        }
    }
}

impl JournalStore for RemoteJournalStore {
    fn backend_name(&self) -> &'static str {
        "remote"
    }

    fn read_document(&self) -> Result<Option<String>, PersistenceError> {
        Ok(self.client.fetch(&self.dataset_path)?.map(|file| file.content))
    }

    /// Read-then-write: the version token is re-fetched here, immediately
    /// before the PUT, not carried over from the load the caller's edit was
    /// based on. An edit committed by another writer in between is therefore
    /// overwritten rather than conflicted with (last writer wins at the
    /// granularity of this fetch).
    fn write_document(&self, contents: &str, message: &str) -> Result<(), PersistenceError> {
        let version = self
            .client
            .fetch(&self.dataset_path)?
            .map(|file| file.version);
        self.client
            .store(&self.dataset_path, contents, message, version.as_deref())?;
        Ok(())
    }

    fn store_attachment(
        &self,
        path: &str,
        bytes: &[u8],
        message: &str,
    ) -> Result<String, PersistenceError> {
        self.client.store_binary(path, bytes, message, None)?;
        Ok(path.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_content, ContentsClient, PutPayload};

    fn client(api_root: &str) -> ContentsClient {
        ContentsClient::with_api_root(
            api_root.to_string(),
            "t0k3n".to_string(),
            "trader".to_string(),
            "journal".to_string(),
            "main".to_string(),
        )
        .expect("client")
    }

    #[test]
    fn contents_url_joins_repo_and_path() {
        let client = client("https://api.github.com");
        assert_eq!(
            client.contents_url("data/journal.csv"),
            "https://api.github.com/repos/trader/journal/contents/data/journal.csv"
        );
    }

    #[test]
    fn contents_url_normalizes_slashes() {
        let client = client("https://api.github.com/");
        assert_eq!(
            client.contents_url("/data/journal.csv"),
            "https://api.github.com/repos/trader/journal/contents/data/journal.csv"
        );
    }

    #[test]
    fn decode_content_strips_embedded_newlines() {
        // "hello world" split the way the contents API wraps long bodies.
        let wrapped = "aGVsbG8g\nd29ybGQ=\n";
        assert_eq!(decode_content(wrapped).unwrap(), "hello world");
    }

    #[test]
    fn decode_content_rejects_invalid_base64() {
        assert!(decode_content("not base64!!").is_err());
    }

    #[test]
    fn put_payload_omits_absent_version() {
        let payload = PutPayload {
            message: "chore: update journal.csv",
            content: "Zm9v".to_string(),
            branch: "main",
            sha: None,
        };
        let value = serde_json::to_value(&payload).expect("serialize");
        assert!(value.get("sha").is_none());
        assert_eq!(value["branch"], "main");
    }

    #[test]
    fn put_payload_carries_version_when_present() {
        let payload = PutPayload {
            message: "chore: update journal.csv",
            content: "Zm9v".to_string(),
            branch: "main",
            sha: Some("abc123"),
        };
        let value = serde_json::to_value(&payload).expect("serialize");
        assert_eq!(value["sha"], "abc123");
    }
}
