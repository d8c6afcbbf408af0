use serde::{Deserialize, Serialize};

/// UI language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Zh,
}

/// Relative-age unit produced by `view_model::format_relative`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeUnit {
    Days,
    Weeks,
    Months,
    Years,
}

impl Locale {
    pub fn all_label(self) -> &'static str {
        match self {
            Self::En => "All",
            Self::Zh => "全部",
        }
    }

    pub fn no_description(self) -> &'static str {
        match self {
            Self::En => "No description",
            Self::Zh => "暂无描述",
        }
    }

    pub fn no_matches(self) -> &'static str {
        match self {
            Self::En => "No matching apps",
            Self::Zh => "没有找到匹配的应用",
        }
    }

    pub fn loading(self) -> &'static str {
        match self {
            Self::En => "Loading apps...",
            Self::Zh => "正在加载...",
        }
    }

    pub fn unknown_date(self) -> &'static str {
        match self {
            Self::En => "unknown",
            Self::Zh => "未知",
        }
    }

    pub fn author_prefix(self) -> &'static str {
        match self {
            Self::En => "Author: ",
            Self::Zh => "作者: ",
        }
    }

    pub fn last_update_prefix(self) -> &'static str {
        match self {
            Self::En => "Last updated: ",
            Self::Zh => "最后更新: ",
        }
    }

    pub fn age(self, n: i64, unit: AgeUnit) -> String {
        match self {
            Self::En => {
                let word = match unit {
                    AgeUnit::Days => "day",
                    AgeUnit::Weeks => "week",
                    AgeUnit::Months => "month",
                    AgeUnit::Years => "year",
                };
                if n == 1 {
                    format!("1 {} ago", word)
                } else {
                    format!("{} {}s ago", n, word)
                }
            }
            Self::Zh => {
                let word = match unit {
                    AgeUnit::Days => "天",
                    AgeUnit::Weeks => "周",
                    AgeUnit::Months => "个月",
                    AgeUnit::Years => "年",
                };
                format!("{}{}前", n, word)
            }
        }
    }

    /// Label for a known category key, `None` for anything else.
    pub fn category_label(self, key: &str) -> Option<&'static str> {
        let label = match (self, key) {
            (Self::En, "uncategorized") => "Uncategorized",
            (Self::En, "utility") => "Utility",
            (Self::En, "media") => "Media",
            (Self::En, "network") => "Network",
            (Self::En, "development") => "Development",
            (Self::En, "system") => "System",
            (Self::En, "productivity") => "Productivity",
            (Self::En, "games") => "Games",
            (Self::Zh, "uncategorized") => "未分类",
            (Self::Zh, "utility") => "工具",
            (Self::Zh, "media") => "媒体",
            (Self::Zh, "network") => "网络",
            (Self::Zh, "development") => "开发",
            (Self::Zh, "system") => "系统",
            (Self::Zh, "productivity") => "生产力",
            (Self::Zh, "games") => "游戏",
            _ => return None,
        };
        Some(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_pluralizes_english() {
        assert_eq!(Locale::En.age(1, AgeUnit::Days), "1 day ago");
        assert_eq!(Locale::En.age(3, AgeUnit::Weeks), "3 weeks ago");
        assert_eq!(Locale::En.age(0, AgeUnit::Days), "0 days ago");
    }

    #[test]
    fn test_age_chinese() {
        assert_eq!(Locale::Zh.age(2, AgeUnit::Months), "2个月前");
        assert_eq!(Locale::Zh.age(5, AgeUnit::Years), "5年前");
    }

    #[test]
    fn test_category_label_unknown_is_none() {
        assert_eq!(Locale::En.category_label("games"), Some("Games"));
        assert_eq!(Locale::Zh.category_label("utility"), Some("工具"));
        assert!(Locale::En.category_label("emulators").is_none());
    }

    #[test]
    fn test_locale_deserializes_lowercase() {
        #[derive(Deserialize)]
        struct Wrap {
            locale: Locale,
        }
        let w: Wrap = toml::from_str("locale = \"zh\"").unwrap();
        assert_eq!(w.locale, Locale::Zh);
    }
}
