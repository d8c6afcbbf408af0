use thiserror::Error;

/// Failure to load the catalog document.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} fetching {url}")]
    Status { status: u16, url: String },

    #[error("Catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl CatalogError {
    /// The single message shown in place of the catalog.
    pub fn user_message(&self) -> String {
        match self {
            CatalogError::Io { path, .. } => {
                format!("Failed to load app data: cannot read {}", path)
            }
            CatalogError::Http(_) | CatalogError::Status { .. } => {
                "Failed to load app data, please try again later.".to_string()
            }
            CatalogError::Parse(_) => "Failed to load app data: invalid catalog file.".to_string(),
        }
    }
}

/// A custom proxy prefix that cannot be committed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProxyError {
    #[error("Proxy URL must start with http:// or https:// (got {0:?})")]
    MissingScheme(String),

    #[error("Unknown proxy preset #{0}")]
    UnknownPreset(usize),
}

impl ProxyError {
    pub fn user_message(&self) -> String {
        match self {
            ProxyError::MissingScheme(_) => {
                "Please enter a valid URL starting with http:// or https://".to_string()
            }
            ProxyError::UnknownPreset(n) => format!("There is no proxy preset #{}", n),
        }
    }
}

/// Reading or writing the preference file.
#[derive(Error, Debug)]
pub enum PrefsError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Reading the optional TOML settings file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_user_message() {
        let err = CatalogError::Status {
            status: 404,
            url: "https://example.com/app_details.json".to_string(),
        };
        assert!(err.user_message().contains("Failed to load app data"));
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn test_parse_error_converts() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CatalogError = parse.into();
        assert!(matches!(err, CatalogError::Parse(_)));
        assert!(err.user_message().contains("invalid catalog"));
    }

    #[test]
    fn test_proxy_error_user_message() {
        let err = ProxyError::MissingScheme("ftp://bad".to_string());
        assert!(err.user_message().contains("http://"));
        assert!(err.to_string().contains("ftp://bad"));
    }
}
