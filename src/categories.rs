use crate::i18n::Locale;
use crate::model::AppRecord;

/// Category key meaning "no category filter".
pub const ALL: &str = "all";

/// Key used for display when a record has no category.
pub const UNCATEGORIZED: &str = "uncategorized";

/// `"all"` followed by every distinct non-empty category, in first-seen order.
pub fn derive_categories(apps: &[AppRecord]) -> Vec<String> {
    let mut keys = vec![ALL.to_string()];
    for app in apps {
        if let Some(cat) = app.category() {
            if !keys.iter().any(|k| k == cat) {
                keys.push(cat.to_string());
            }
        }
    }
    keys
}

/// Human-readable label for a category key. Unknown keys are echoed.
pub fn display_name(key: &str, locale: Locale) -> String {
    if key == ALL {
        return locale.all_label().to_string();
    }
    locale
        .category_label(key)
        .map(str::to_string)
        .unwrap_or_else(|| key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(cat: Option<&str>) -> AppRecord {
        AppRecord {
            category: cat.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_derive_categories_first_seen_order() {
        let apps = vec![
            app(Some("media")),
            app(None),
            app(Some("utility")),
            app(Some("media")),
            app(Some("")),
            app(Some("emulators")),
        ];
        assert_eq!(
            derive_categories(&apps),
            vec!["all", "media", "utility", "emulators"]
        );
    }

    #[test]
    fn test_derive_categories_empty_catalog() {
        assert_eq!(derive_categories(&[]), vec!["all"]);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("all", Locale::En), "All");
        assert_eq!(display_name("all", Locale::Zh), "全部");
        assert_eq!(display_name("network", Locale::En), "Network");
        assert_eq!(display_name("emulators", Locale::Zh), "emulators");
    }
}
