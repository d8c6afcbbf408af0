use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;

/// One catalog entry from `app_details.json`.
///
/// Every field has a default so a single malformed record never fails the
/// whole document; such records simply render with empty text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppRecord {
    pub id: String,
    pub name: String,
    pub author: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub stars: Option<u64>,
    pub forks: Option<u64>,
    pub version: Option<String>,
    pub last_update: Option<String>,
    pub icon_url: Option<String>,
    pub download_url: Option<String>,
    pub repository: String,
    pub screenshots: Option<Vec<String>>,
}

impl AppRecord {
    pub fn stars(&self) -> u64 {
        self.stars.unwrap_or(0)
    }

    pub fn forks(&self) -> u64 {
        self.forks.unwrap_or(0)
    }

    /// Description with empty strings treated as absent.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }

    pub fn icon_url(&self) -> Option<&str> {
        self.icon_url.as_deref().filter(|u| !u.is_empty())
    }

    pub fn download_url(&self) -> Option<&str> {
        self.download_url.as_deref().filter(|u| !u.is_empty())
    }

    pub fn screenshots(&self) -> &[String] {
        self.screenshots.as_deref().unwrap_or(&[])
    }

    /// Parsed `lastUpdate`, or `None` when missing or unparseable.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.last_update.as_deref().and_then(parse_timestamp)
    }

    /// First character of the name, upper-cased, used when there is no icon.
    pub fn glyph(&self) -> String {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}

/// Top-level shape of the catalog document. A missing `apps` key is an
/// empty catalog.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub apps: Vec<AppRecord>,
}

/// Parse the date formats seen in catalog files. Naive values are UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
