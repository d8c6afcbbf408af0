//! Presentation data derived from the catalog. Nothing here touches the
//! terminal; `ui::*` draws these structures and nothing else.

use chrono::{DateTime, Utc};

use crate::catalog::CatalogStore;
use crate::categories::{self, UNCATEGORIZED};
use crate::i18n::{AgeUnit, Locale};
use crate::model::AppRecord;
use crate::proxy::ProxyResolver;

/// Fallback version shown when a record has none.
pub const DEFAULT_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconView {
    /// Proxy-resolved image URL.
    Image(String),
    /// Upper-cased first letter of the name.
    Glyph(String),
}

impl IconView {
    fn for_app(app: &AppRecord, proxy: &ProxyResolver) -> Self {
        match app.icon_url() {
            Some(url) => Self::Image(proxy.resolve(url)),
            None => Self::Glyph(app.glyph()),
        }
    }
}

/// One summary card in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub id: String,
    pub icon: IconView,
    pub name: String,
    pub author: String,
    pub description: String,
    pub stars: u64,
    pub updated: String,
}

/// What the list area shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListViewModel {
    Loading(String),
    Error(String),
    /// Exactly one "no matches" placeholder, no cards.
    Empty(String),
    Cards(Vec<CardView>),
}

impl ListViewModel {
    pub fn cards(&self) -> &[CardView] {
        match self {
            Self::Cards(cards) => cards,
            _ => &[],
        }
    }
}

/// Everything the detail screen shows for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailViewModel {
    pub id: String,
    pub icon: IconView,
    pub name: String,
    pub author: String,
    pub stars: u64,
    pub forks: u64,
    pub category: String,
    pub version: String,
    pub description: String,
    /// Proxy-resolved, present only when the record has a download URL.
    pub download: Option<String>,
    /// Always the raw repository URL.
    pub repository: String,
    /// Proxy-resolved; the gallery is shown only when non-empty.
    pub screenshots: Vec<String>,
    pub updated: String,
}

pub fn card_view(app: &AppRecord, proxy: &ProxyResolver, locale: Locale, now: DateTime<Utc>) -> CardView {
    CardView {
        id: app.id.clone(),
        icon: IconView::for_app(app, proxy),
        name: app.name.clone(),
        author: app.author.clone(),
        description: app
            .description()
            .unwrap_or(locale.no_description())
            .to_string(),
        stars: app.stars(),
        updated: format_relative(app.updated_at(), now, locale),
    }
}

/// Cards for the visible list, or the single empty placeholder.
pub fn list_view(store: &CatalogStore, proxy: &ProxyResolver, locale: Locale, now: DateTime<Utc>) -> ListViewModel {
    let cards: Vec<CardView> = store
        .visible()
        .map(|app| card_view(app, proxy, locale, now))
        .collect();
    if cards.is_empty() {
        ListViewModel::Empty(locale.no_matches().to_string())
    } else {
        ListViewModel::Cards(cards)
    }
}

pub fn detail_view(app: &AppRecord, proxy: &ProxyResolver, locale: Locale, now: DateTime<Utc>) -> DetailViewModel {
    DetailViewModel {
        id: app.id.clone(),
        icon: IconView::for_app(app, proxy),
        name: app.name.clone(),
        author: app.author.clone(),
        stars: app.stars(),
        forks: app.forks(),
        category: categories::display_name(app.category().unwrap_or(UNCATEGORIZED), locale),
        version: app
            .version
            .as_deref()
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_VERSION)
            .to_string(),
        description: app
            .description()
            .unwrap_or(locale.no_description())
            .to_string(),
        download: app.download_url().map(|u| proxy.resolve(u)),
        repository: app.repository.clone(),
        screenshots: app.screenshots().iter().map(|s| proxy.resolve(s)).collect(),
        updated: format_relative(app.updated_at(), now, locale),
    }
}

/// "N days/weeks/months/years ago" from the absolute distance to `now`,
/// with partial days rounded up.
pub fn format_relative(date: Option<DateTime<Utc>>, now: DateTime<Utc>, locale: Locale) -> String {
    let Some(date) = date else {
        return locale.unknown_date().to_string();
    };
    let secs = (now - date).num_seconds().abs();
    let days = (secs + 86_399) / 86_400;

    if days < 7 {
        locale.age(days, AgeUnit::Days)
    } else if days < 30 {
        locale.age(days / 7, AgeUnit::Weeks)
    } else if days < 365 {
        locale.age(days / 30, AgeUnit::Months)
    } else {
        locale.age(days / 365, AgeUnit::Years)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn sample_app() -> AppRecord {
        AppRecord {
            id: "shot".to_string(),
            name: "shotwell".to_string(),
            author: "gnome".to_string(),
            category: Some("media".to_string()),
            stars: Some(42),
            forks: Some(7),
            icon_url: Some("https://raw.githubusercontent.com/g/s/main/icon.png".to_string()),
            download_url: Some("https://github.com/g/s/releases/download/v1/s.apk".to_string()),
            repository: "https://github.com/g/s".to_string(),
            screenshots: Some(vec![
                "https://github.com/g/s/raw/main/1.png".to_string(),
                "https://cdn.example/2.png".to_string(),
            ]),
            last_update: Some("2025-05-30T12:00:00Z".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_format_relative_thresholds() {
        let n = now();
        let at = |days: i64| Some(n - Duration::days(days));
        assert_eq!(format_relative(at(0), n, Locale::En), "0 days ago");
        assert_eq!(format_relative(at(6), n, Locale::En), "6 days ago");
        assert_eq!(format_relative(at(7), n, Locale::En), "1 week ago");
        assert_eq!(format_relative(at(29), n, Locale::En), "4 weeks ago");
        assert_eq!(format_relative(at(30), n, Locale::En), "1 month ago");
        assert_eq!(format_relative(at(364), n, Locale::En), "12 months ago");
        assert_eq!(format_relative(at(365), n, Locale::En), "1 year ago");
        assert_eq!(format_relative(at(800), n, Locale::En), "2 years ago");
    }

    #[test]
    fn test_format_relative_rounds_partial_days_up() {
        let n = now();
        assert_eq!(format_relative(Some(n - Duration::hours(3)), n, Locale::En), "1 day ago");
    }

    #[test]
    fn test_format_relative_future_uses_absolute_distance() {
        let n = now();
        assert_eq!(format_relative(Some(n + Duration::days(3)), n, Locale::En), "3 days ago");
    }

    #[test]
    fn test_format_relative_missing() {
        assert_eq!(format_relative(None, now(), Locale::En), "unknown");
        assert_eq!(format_relative(None, now(), Locale::Zh), "未知");
    }

    #[test]
    fn test_card_view_fallbacks() {
        let app = AppRecord {
            id: "x".to_string(),
            name: "xterm".to_string(),
            ..Default::default()
        };
        let card = card_view(&app, &ProxyResolver::default(), Locale::En, now());
        assert_eq!(card.icon, IconView::Glyph("X".to_string()));
        assert_eq!(card.description, "No description");
        assert_eq!(card.stars, 0);
        assert_eq!(card.updated, "unknown");
    }

    #[test]
    fn test_card_view_resolves_icon() {
        let proxy = ProxyResolver::new(Some("https://p.example/".to_string()));
        let card = card_view(&sample_app(), &proxy, Locale::En, now());
        assert_eq!(
            card.icon,
            IconView::Image("https://p.example/https://raw.githubusercontent.com/g/s/main/icon.png".to_string())
        );
        assert_eq!(card.updated, "2 days ago");
    }

    #[test]
    fn test_list_view_empty_is_single_placeholder() {
        let mut store = CatalogStore::new();
        store.replace_apps(vec![sample_app()]);
        store.set_search_term("zzz");
        let view = list_view(&store, &ProxyResolver::default(), Locale::En, now());
        assert_eq!(view, ListViewModel::Empty("No matching apps".to_string()));
        assert!(view.cards().is_empty());
    }

    #[test]
    fn test_list_view_cards_follow_visible_order() {
        let mut store = CatalogStore::new();
        store.replace_apps(vec![
            AppRecord {
                id: "b".to_string(),
                name: "Beta".to_string(),
                ..Default::default()
            },
            AppRecord {
                id: "a".to_string(),
                name: "Alpha".to_string(),
                ..Default::default()
            },
        ]);
        let view = list_view(&store, &ProxyResolver::default(), Locale::En, now());
        let ids: Vec<&str> = view.cards().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_detail_view_proxies_assets_not_repository() {
        let proxy = ProxyResolver::new(Some("https://p.example/".to_string()));
        let detail = detail_view(&sample_app(), &proxy, Locale::En, now());
        assert_eq!(
            detail.download.as_deref(),
            Some("https://p.example/https://github.com/g/s/releases/download/v1/s.apk")
        );
        assert_eq!(detail.repository, "https://github.com/g/s");
        assert_eq!(
            detail.screenshots,
            vec![
                "https://p.example/https://github.com/g/s/raw/main/1.png".to_string(),
                "https://cdn.example/2.png".to_string(),
            ]
        );
        assert_eq!(detail.category, "Media");
        assert_eq!(detail.forks, 7);
    }

    #[test]
    fn test_detail_view_fallbacks() {
        let app = AppRecord {
            id: "bare".to_string(),
            name: "bare".to_string(),
            repository: "https://github.com/o/bare".to_string(),
            ..Default::default()
        };
        let detail = detail_view(&app, &ProxyResolver::default(), Locale::Zh, now());
        assert!(detail.download.is_none());
        assert!(detail.screenshots.is_empty());
        assert_eq!(detail.version, DEFAULT_VERSION);
        assert_eq!(detail.category, "未分类");
        assert_eq!(detail.description, "暂无描述");
    }
}
