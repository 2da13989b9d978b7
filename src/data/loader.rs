use crate::data::model::DataNode;
use crate::foundation::error::{BoxofficeError, BoxofficeResult};
use serde::de::DeserializeOwned;
use std::fmt;
use std::path::PathBuf;

/// Published movie revenue dataset.
pub const DEFAULT_DATA_URL: &str =
    "https://cdn.freecodecamp.org/testable-projects-fcc/data/tree_map/movie-data.json";

/// Where a dataset comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataSource {
    Url(String),
    File(PathBuf),
}

impl DataSource {
    /// `http://` and `https://` are fetched over the network; `file://` and bare paths are read
    /// from disk.
    pub fn parse(s: &str) -> Self {
        let lower = s.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(s.to_owned())
        } else if let Some(path) = s.strip_prefix("file://") {
            Self::File(PathBuf::from(path))
        } else {
            Self::File(PathBuf::from(s))
        }
    }
}

impl Default for DataSource {
    fn default() -> Self {
        Self::Url(DEFAULT_DATA_URL.to_owned())
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(u) => f.write_str(u),
            Self::File(p) => write!(f, "{}", p.display()),
        }
    }
}

/// Fetch the body of `source` as text.
///
/// One `GET`, no retry and no timeout beyond the transport defaults.
#[tracing::instrument(level = "debug", skip_all, fields(source = %source))]
pub fn fetch_text(source: &DataSource) -> BoxofficeResult<String> {
    match source {
        DataSource::Url(url) => fetch_url(url),
        DataSource::File(path) => std::fs::read_to_string(path).map_err(|e| {
            BoxofficeError::Io(std::io::Error::new(
                e.kind(),
                format!("read dataset '{}': {e}", path.display()),
            ))
        }),
    }
}

/// Fetch `source` and decode the body as JSON.
pub fn fetch_json<T: DeserializeOwned>(source: &DataSource) -> BoxofficeResult<T> {
    let text = fetch_text(source)?;
    serde_json::from_str(&text)
        .map_err(|e| BoxofficeError::parse(format!("decode JSON from '{source}': {e}")))
}

/// Fetch, decode and validate the input tree.
#[tracing::instrument(skip_all, fields(source = %source))]
pub fn load_dataset(source: &DataSource) -> BoxofficeResult<DataNode> {
    let root: DataNode = fetch_json(source)?;
    root.validate()?;
    tracing::debug!(leaves = root.leaf_count(), "dataset loaded");
    Ok(root)
}

fn fetch_url(url: &str) -> BoxofficeResult<String> {
    match ureq::get(url).call() {
        Ok(resp) => resp
            .into_string()
            .map_err(|e| BoxofficeError::network(format!("read body of '{url}': {e}"))),
        Err(ureq::Error::Status(status, resp)) => {
            let url = resp.get_url().to_owned();
            let status_text = resp.status_text().to_owned();
            let body = resp.into_string().unwrap_or_default();
            tracing::debug!(%url, status, "non-success response");
            Err(BoxofficeError::Http {
                url,
                status,
                status_text,
                body,
            })
        }
        Err(ureq::Error::Transport(t)) => {
            Err(BoxofficeError::network(format!("GET '{url}': {t}")))
        }
    }
}
