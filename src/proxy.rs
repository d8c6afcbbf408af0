use crate::error::{PrefsError, ProxyError};
use crate::prefs::{KEY_CUSTOM_PROXY, KEY_PROXY, PreferenceStore};

/// Known reverse-proxy prefixes offered in the settings overlay.
pub const PRESETS: &[&str] = &[
    "https://ghfast.top/",
    "https://gh-proxy.com/",
    "https://ghproxy.net/",
];

/// Stored value of `githubProxy` meaning "use the custom prefix".
const CUSTOM_SENTINEL: &str = "custom";

/// Hosts (and their subdomains) whose URLs are routed through the proxy.
const PROXIED_HOSTS: &[&str] = &["github.com", "githubusercontent.com"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyMode {
    None,
    Preset(String),
    Custom,
}

/// The user's proxy choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyPreference {
    pub mode: ProxyMode,
    pub custom: String,
}

impl Default for ProxyPreference {
    fn default() -> Self {
        Self {
            mode: ProxyMode::None,
            custom: String::new(),
        }
    }
}

impl ProxyPreference {
    pub fn load(store: &dyn PreferenceStore) -> Self {
        let custom = store.get(KEY_CUSTOM_PROXY).unwrap_or_default();
        let mode = match store.get(KEY_PROXY) {
            None => ProxyMode::None,
            Some(v) if v.is_empty() => ProxyMode::None,
            Some(v) if v == CUSTOM_SENTINEL => ProxyMode::Custom,
            Some(v) => ProxyMode::Preset(v),
        };
        Self { mode, custom }
    }

    /// Persist both keys. The custom value is left as stored unless in
    /// custom mode.
    pub fn save(&self, store: &mut dyn PreferenceStore) -> Result<(), PrefsError> {
        match &self.mode {
            ProxyMode::None => store.set(KEY_PROXY, ""),
            ProxyMode::Preset(p) => store.set(KEY_PROXY, p),
            ProxyMode::Custom => {
                store.set(KEY_PROXY, CUSTOM_SENTINEL)?;
                store.set(KEY_CUSTOM_PROXY, &self.custom)
            }
        }
    }

    pub fn select_none(&mut self) {
        self.mode = ProxyMode::None;
    }

    pub fn select_preset(&mut self, index: usize) -> Result<(), ProxyError> {
        let preset = PRESETS.get(index).ok_or(ProxyError::UnknownPreset(index))?;
        self.mode = ProxyMode::Preset(preset.to_string());
        Ok(())
    }

    /// Saved custom prefix, used to prefill the input field.
    pub fn begin_custom(&self) -> String {
        self.custom.clone()
    }

    /// Validate and normalize `input`, then switch to custom mode.
    /// On error nothing changes.
    pub fn commit_custom(&mut self, input: &str) -> Result<String, ProxyError> {
        let value = normalize_custom(input)?;
        self.mode = ProxyMode::Custom;
        self.custom = value.clone();
        Ok(value)
    }

    pub fn active_prefix(&self) -> Option<&str> {
        let prefix = match &self.mode {
            ProxyMode::None => return None,
            ProxyMode::Preset(p) => p.as_str(),
            ProxyMode::Custom => self.custom.as_str(),
        };
        Some(prefix).filter(|p| !p.is_empty())
    }

    /// Index into `PRESETS` for the selected preset, if any.
    pub fn preset_index(&self) -> Option<usize> {
        match &self.mode {
            ProxyMode::Preset(p) => PRESETS.iter().position(|x| x == p),
            _ => None,
        }
    }

    pub fn resolver(&self) -> ProxyResolver {
        ProxyResolver::new(self.active_prefix().map(str::to_string))
    }

    pub fn describe(&self) -> String {
        match &self.mode {
            ProxyMode::None => "none".to_string(),
            ProxyMode::Preset(p) => p.clone(),
            ProxyMode::Custom if self.custom.is_empty() => "custom (empty)".to_string(),
            ProxyMode::Custom => format!("custom {}", self.custom),
        }
    }
}

/// Trim, require an http(s) scheme, append a trailing slash. Empty input
/// is allowed and means "no prefix".
pub fn normalize_custom(input: &str) -> Result<String, ProxyError> {
    let mut value = input.trim().to_string();
    if value.is_empty() {
        return Ok(value);
    }
    if !value.starts_with("http://") && !value.starts_with("https://") {
        return Err(ProxyError::MissingScheme(value));
    }
    if !value.ends_with('/') {
        value.push('/');
    }
    Ok(value)
}

/// Rewrites GitHub asset URLs through a prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxyResolver {
    prefix: Option<String>,
}

impl ProxyResolver {
    pub fn new(prefix: Option<String>) -> Self {
        Self {
            prefix: prefix.filter(|p| !p.is_empty()),
        }
    }

    /// `prefix + url` for GitHub hosts, otherwise `url` unchanged.
    pub fn resolve(&self, url: &str) -> String {
        match &self.prefix {
            Some(prefix) if !url.is_empty() && is_proxied_host(url) => format!("{}{}", prefix, url),
            _ => url.to_string(),
        }
    }
}

fn is_proxied_host(url: &str) -> bool {
    let Ok(parsed) = reqwest::Url::parse(url) else {
        return false;
    };
    let Some(host) = parsed.host_str() else {
        return false;
    };
    PROXIED_HOSTS.iter().any(|h| {
        host == *h
            || host
                .strip_suffix(*h)
                .is_some_and(|rest| rest.ends_with('.'))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::MemoryStore;

    #[test]
    fn test_resolve_without_prefix_is_identity() {
        let resolver = ProxyResolver::default();
        for url in ["https://github.com/x/y", "https://example.com/x", "", "not a url"] {
            assert_eq!(resolver.resolve(url), url);
        }
    }

    #[test]
    fn test_resolve_with_preset_prefix() {
        let resolver = ProxyResolver::new(Some("https://proxy.example/".to_string()));
        assert_eq!(
            resolver.resolve("https://github.com/x/y"),
            "https://proxy.example/https://github.com/x/y"
        );
        assert_eq!(
            resolver.resolve("https://raw.githubusercontent.com/x/y/main/icon.png"),
            "https://proxy.example/https://raw.githubusercontent.com/x/y/main/icon.png"
        );
        assert_eq!(resolver.resolve("https://example.com/x"), "https://example.com/x");
        assert_eq!(resolver.resolve(""), "");
    }

    #[test]
    fn test_resolve_rejects_lookalike_hosts() {
        let resolver = ProxyResolver::new(Some("https://p/".to_string()));
        assert_eq!(resolver.resolve("https://notgithub.com/a"), "https://notgithub.com/a");
        assert_eq!(
            resolver.resolve("https://example.com/github.com/a"),
            "https://example.com/github.com/a"
        );
    }

    #[test]
    fn test_empty_prefix_disables_proxy() {
        let resolver = ProxyResolver::new(Some(String::new()));
        assert_eq!(resolver.resolve("https://github.com/x"), "https://github.com/x");
    }

    #[test]
    fn test_commit_custom_rejects_missing_scheme() {
        let mut pref = ProxyPreference::default();
        pref.commit_custom("https://old.example/").unwrap();
        let err = pref.commit_custom("ftp://bad").unwrap_err();
        assert_eq!(err, ProxyError::MissingScheme("ftp://bad".to_string()));
        assert_eq!(pref.custom, "https://old.example/");
        assert_eq!(pref.mode, ProxyMode::Custom);
    }

    #[test]
    fn test_commit_custom_normalizes_trailing_slash() {
        let mut pref = ProxyPreference::default();
        let value = pref.commit_custom("  https://p.example ").unwrap();
        assert_eq!(value, "https://p.example/");
        assert_eq!(pref.active_prefix(), Some("https://p.example/"));
    }

    #[test]
    fn test_begin_custom_prefills_without_switching() {
        let mut pref = ProxyPreference::default();
        pref.custom = "https://saved.example/".to_string();
        assert_eq!(pref.begin_custom(), "https://saved.example/");
        assert_eq!(pref.mode, ProxyMode::None);
    }

    #[test]
    fn test_empty_custom_means_no_prefix() {
        let mut pref = ProxyPreference::default();
        pref.commit_custom("").unwrap();
        assert_eq!(pref.mode, ProxyMode::Custom);
        assert!(pref.active_prefix().is_none());
    }

    #[test]
    fn test_select_preset_bounds() {
        let mut pref = ProxyPreference::default();
        pref.select_preset(1).unwrap();
        assert_eq!(pref.active_prefix(), Some(PRESETS[1]));
        assert_eq!(pref.preset_index(), Some(1));
        assert_eq!(pref.select_preset(99), Err(ProxyError::UnknownPreset(99)));
        assert_eq!(pref.preset_index(), Some(1));
    }

    #[test]
    fn test_save_and_load_custom() {
        let mut store = MemoryStore::default();
        let mut pref = ProxyPreference::default();
        pref.commit_custom("https://p.example").unwrap();
        pref.save(&mut store).unwrap();

        assert_eq!(store.get(KEY_PROXY).as_deref(), Some("custom"));
        let loaded = ProxyPreference::load(&store);
        assert_eq!(loaded, pref);
        assert_eq!(loaded.active_prefix(), Some("https://p.example/"));
    }

    #[test]
    fn test_save_preset_keeps_custom_value() {
        let mut store = MemoryStore::default();
        let mut pref = ProxyPreference::default();
        pref.commit_custom("https://mine.example/").unwrap();
        pref.save(&mut store).unwrap();
        pref.select_preset(0).unwrap();
        pref.save(&mut store).unwrap();

        let loaded = ProxyPreference::load(&store);
        assert_eq!(loaded.mode, ProxyMode::Preset(PRESETS[0].to_string()));
        assert_eq!(loaded.custom, "https://mine.example/");
    }

    #[test]
    fn test_load_empty_store_is_none() {
        let store = MemoryStore::default();
        let pref = ProxyPreference::load(&store);
        assert_eq!(pref.mode, ProxyMode::None);
        assert!(pref.resolver().resolve("https://github.com/a").starts_with("https://github.com"));
    }
}
