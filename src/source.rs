use std::path::PathBuf;

use crate::error::CatalogError;
use crate::model::{AppRecord, CatalogDocument};

pub const DEFAULT_SOURCE: &str = "./app_details.json";
const DOCUMENT_NAME: &str = "app_details.json";

/// Where the catalog document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    Url(String),
}

impl CatalogSource {
    /// `http(s)://` is a URL (a trailing `/` names a directory holding
    /// `app_details.json`); anything else is a local path.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            if raw.ends_with('/') {
                Self::Url(format!("{}{}", raw, DOCUMENT_NAME))
            } else {
                Self::Url(raw.to_string())
            }
        } else {
            Self::File(PathBuf::from(raw))
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::File(p) => p.display().to_string(),
            Self::Url(u) => u.clone(),
        }
    }

    /// Fetch and decode the catalog.
    pub async fn load(&self) -> Result<Vec<AppRecord>, CatalogError> {
        let body = match self {
            Self::File(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|source| CatalogError::Io {
                    path: path.display().to_string(),
                    source,
                })?,
            Self::Url(url) => {
                let response = reqwest::get(url).await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(CatalogError::Status {
                        status: status.as_u16(),
                        url: url.clone(),
                    });
                }
                response.text().await?
            }
        };
        parse_document(&body)
    }
}

pub fn parse_document(body: &str) -> Result<Vec<AppRecord>, CatalogError> {
    let doc: CatalogDocument = serde_json::from_str(body)?;
    Ok(doc.apps)
}
