//! Reference document stores.
//!
//! The fixed record-type documents are plain PDFs addressed by relative name.
//! They can live in a local directory or behind a static HTTP server.

use async_trait::async_trait;
use seteuk_core::error::DocumentError;
use seteuk_core::storage::DocumentStore;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Serves documents from a directory on disk.
pub struct DirectoryDocumentStore {
    root: PathBuf,
}

impl DirectoryDocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `name` under the root, refusing anything that escapes it.
    fn resolve(&self, name: &str) -> Result<PathBuf, DocumentError> {
        let relative = Path::new(name);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(DocumentError::NotFound(name.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl DocumentStore for DirectoryDocumentStore {
    fn name(&self) -> &str {
        "directory"
    }

    async fn fetch(&self, name: &str) -> Result<Vec<u8>, DocumentError> {
        let path = self.resolve(name)?;
        debug!(path = %path.display(), "Reading reference document");
        tokio::fs::read(&path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => DocumentError::NotFound(name.to_string()),
            _ => DocumentError::Io(format!("{name}: {e}")),
        })
    }
}

/// Serves documents from a static HTTP location.
pub struct HttpDocumentStore {
    base_url: String,
    client: reqwest::Client,
}

impl HttpDocumentStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    fn url_for(&self, name: &str) -> Result<reqwest::Url, DocumentError> {
        reqwest::Url::parse(&self.base_url)
            .and_then(|base| base.join(name))
            .map_err(|e| DocumentError::Io(format!("invalid document url for {name}: {e}")))
    }
}

#[async_trait]
impl DocumentStore for HttpDocumentStore {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch(&self, name: &str) -> Result<Vec<u8>, DocumentError> {
        let url = self.url_for(name)?;
        debug!(url = %url, "Fetching reference document");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DocumentError::Io(format!("{name}: {e}")))?;

        let status = response.status().as_u16();
        if status == 404 {
            return Err(DocumentError::NotFound(name.to_string()));
        }
        if !response.status().is_success() {
            return Err(DocumentError::Http {
                name: name.to_string(),
                status,
            });
        }

        response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| DocumentError::Io(format!("{name}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn directory_store_reads_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("사례 1.pdf"), b"%PDF-1.4").unwrap();

        let store = DirectoryDocumentStore::new(dir.path());
        let bytes = store.fetch("사례 1.pdf").await.unwrap();
        assert_eq!(bytes, b"%PDF-1.4");
    }

    #[tokio::test]
    async fn directory_store_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirectoryDocumentStore::new(dir.path());
        let err = store.fetch("nope.pdf").await.unwrap_err();
        assert!(matches!(err, DocumentError::NotFound(_)));
    }

    #[tokio::test]
    async fn directory_store_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let store = DirectoryDocumentStore::new(dir.path());
        assert!(store.fetch("../etc/passwd").await.is_err());
        assert!(store.fetch("/etc/passwd").await.is_err());
    }

    #[tokio::test]
    async fn http_store_fetches_and_maps_404() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/docs/club.pdf"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF".to_vec()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/docs/missing.pdf"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let store = HttpDocumentStore::new(format!("{}/docs", server.uri()));
        assert_eq!(store.fetch("club.pdf").await.unwrap(), b"%PDF");
        assert!(matches!(
            store.fetch("missing.pdf").await.unwrap_err(),
            DocumentError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn http_store_maps_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let store = HttpDocumentStore::new(server.uri());
        assert!(matches!(
            store.fetch("any.pdf").await.unwrap_err(),
            DocumentError::Http { status: 500, .. }
        ));
    }
}
