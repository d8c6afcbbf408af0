use std::time::{Duration, Instant};

use chrono::Utc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use crate::catalog::{CatalogStore, SortKey};
use crate::config::Settings;
use crate::i18n::Locale;
use crate::model::AppRecord;
use crate::prefs::PreferenceStore;
use crate::proxy::{PRESETS, ProxyMode, ProxyPreference, ProxyResolver};
use crate::source::CatalogSource;
use crate::view_model::{self, DetailViewModel, ListViewModel};

/// Length of the fade-in when switching views.
pub const FADE_DURATION: Duration = Duration::from_millis(200);

/// Which view is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    List,
    Detail,
}

/// Input mode for the search bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

/// State of the most recent catalog load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

/// Completion of a background catalog load.
#[derive(Debug)]
pub enum LoadMessage {
    Loaded(Vec<AppRecord>),
    Failed(String),
}

/// Row in the proxy settings overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyRow {
    None,
    Preset(usize),
    /// A stored preset prefix that is not in `PRESETS`.
    Saved,
    Custom,
}

impl ProxyRow {
    /// Rows offered for `pref`. `Saved` appears only when the stored
    /// preset is not one of the built-in ones.
    pub fn all(pref: &ProxyPreference) -> Vec<ProxyRow> {
        let mut rows = vec![ProxyRow::None];
        rows.extend((0..PRESETS.len()).map(ProxyRow::Preset));
        if matches!(pref.mode, ProxyMode::Preset(_)) && pref.preset_index().is_none() {
            rows.push(ProxyRow::Saved);
        }
        rows.push(ProxyRow::Custom);
        rows
    }

    /// Whether this row is the one currently in effect.
    pub fn is_active(self, pref: &ProxyPreference) -> bool {
        match (self, &pref.mode) {
            (ProxyRow::None, ProxyMode::None) => true,
            (ProxyRow::Preset(i), ProxyMode::Preset(_)) => pref.preset_index() == Some(i),
            (ProxyRow::Saved, ProxyMode::Preset(_)) => pref.preset_index().is_none(),
            (ProxyRow::Custom, ProxyMode::Custom) => true,
            _ => false,
        }
    }
}

/// The proxy settings overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyOverlay {
    pub selected: usize,
    /// `Some` while the custom prefix field has focus.
    pub custom_input: Option<String>,
}

/// Main application state.
pub struct App {
    pub should_quit: bool,
    pub view: View,
    pub show_help: bool,
    pub show_submit: bool,
    pub proxy_overlay: Option<ProxyOverlay>,
    /// Blocking message; any key dismisses it.
    pub alert: Option<String>,

    pub store: CatalogStore,
    pub load_state: LoadState,
    pub selected: usize,
    pub category_index: usize,
    pub search: String,
    pub input_mode: InputMode,

    pub detail_id: Option<String>,
    pub detail_scroll: u16,

    pub proxy: ProxyPreference,
    pub locale: Locale,
    pub status_msg: String,

    source: CatalogSource,
    prefs: Box<dyn PreferenceStore>,
    resolver: ProxyResolver,
    reveal_step: Duration,
    list_painted_at: Instant,
    fade_started_at: Option<Instant>,
    load_tx: UnboundedSender<LoadMessage>,
    load_rx: UnboundedReceiver<LoadMessage>,
}

impl App {
    pub fn new(settings: &Settings, prefs: Box<dyn PreferenceStore>) -> Self {
        let proxy = ProxyPreference::load(prefs.as_ref());
        let resolver = proxy.resolver();
        let (load_tx, load_rx) = unbounded_channel();
        Self {
            should_quit: false,
            view: View::List,
            show_help: false,
            show_submit: false,
            proxy_overlay: None,
            alert: None,

            store: CatalogStore::new(),
            load_state: LoadState::Loading,
            selected: 0,
            category_index: 0,
            search: String::new(),
            input_mode: InputMode::Normal,

            detail_id: None,
            detail_scroll: 0,

            proxy,
            locale: settings.locale,
            status_msg: String::new(),

            source: CatalogSource::parse(&settings.source),
            prefs,
            resolver,
            reveal_step: Duration::from_millis(settings.reveal_step_ms),
            list_painted_at: Instant::now(),
            fade_started_at: None,
            load_tx,
            load_rx,
        }
    }

    pub fn prefs(&self) -> &dyn PreferenceStore {
        self.prefs.as_ref()
    }

    pub fn resolver(&self) -> &ProxyResolver {
        &self.resolver
    }

    // ── Loading ──

    /// Start a background load. Earlier loads are not cancelled; whichever
    /// finishes last is what stays on screen.
    pub fn request_reload(&mut self) {
        self.load_state = LoadState::Loading;
        self.status_msg = format!("Loading {}...", self.source.describe());
        tracing::info!(source = %self.source.describe(), "loading catalog");

        let source = self.source.clone();
        let tx = self.load_tx.clone();
        tokio::spawn(async move {
            let msg = match source.load().await {
                Ok(apps) => LoadMessage::Loaded(apps),
                Err(e) => {
                    tracing::error!("failed to load catalog: {}", e);
                    LoadMessage::Failed(e.user_message())
                }
            };
            let _ = tx.send(msg);
        });
    }

    /// Apply any finished loads. Returns true if something changed.
    pub fn drain_loads(&mut self) -> bool {
        let mut changed = false;
        while let Ok(msg) = self.load_rx.try_recv() {
            self.apply_load(msg);
            changed = true;
        }
        changed
    }

    pub fn apply_load(&mut self, msg: LoadMessage) {
        match msg {
            LoadMessage::Loaded(apps) => {
                tracing::info!(count = apps.len(), "catalog loaded");
                self.store.replace_apps(apps);
                self.load_state = LoadState::Ready;
                self.status_msg = format!("{} apps loaded", self.store.all_apps().len());
            }
            LoadMessage::Failed(message) => {
                self.store.replace_apps(Vec::new());
                self.status_msg = message.clone();
                self.load_state = LoadState::Failed(message);
            }
        }
        self.category_index = self
            .store
            .categories()
            .iter()
            .position(|c| c == self.store.category())
            .unwrap_or(0);
        self.clamp_selection();
        self.list_painted_at = Instant::now();

        if self.view == View::Detail
            && self
                .detail_id
                .as_deref()
                .is_none_or(|id| self.store.find(id).is_none())
        {
            self.go_back();
        }
    }

    // ── Filters ──

    pub fn set_category(&mut self, key: &str) {
        self.store.set_category(key);
        if let Some(idx) = self.store.categories().iter().position(|c| c == key) {
            self.category_index = idx;
        }
        self.after_filter_change();
    }

    pub fn next_category(&mut self) {
        let cats = self.store.categories();
        if cats.is_empty() {
            return;
        }
        let idx = (self.category_index + 1) % cats.len();
        let key = cats[idx].clone();
        self.set_category(&key);
    }

    pub fn prev_category(&mut self) {
        let cats = self.store.categories();
        if cats.is_empty() {
            return;
        }
        let idx = (self.category_index + cats.len() - 1) % cats.len();
        let key = cats[idx].clone();
        self.set_category(&key);
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search.push(c);
        self.apply_search();
    }

    pub fn pop_search_char(&mut self) {
        self.search.pop();
        self.apply_search();
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
        self.apply_search();
    }

    fn apply_search(&mut self) {
        self.store.set_search_term(&self.search);
        self.after_filter_change();
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.store.set_sort(sort);
        self.after_filter_change();
    }

    pub fn cycle_sort(&mut self) {
        self.set_sort(self.store.sort().next());
    }

    fn after_filter_change(&mut self) {
        self.selected = 0;
        self.list_painted_at = Instant::now();
        self.status_msg = format!(
            "{} apps in \"{}\"",
            self.store.visible_len(),
            if self.search.trim().is_empty() {
                self.store.category()
            } else {
                self.search.trim()
            }
        );
    }

    // ── Selection ──

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.store.visible_len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.store.visible_len().saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.store.visible_len().saturating_sub(1));
    }

    pub fn selected_app(&self) -> Option<&AppRecord> {
        self.store.visible_at(self.selected)
    }

    // ── View transitions ──

    pub fn open_selected(&mut self) -> bool {
        match self.selected_app().map(|a| a.id.clone()) {
            Some(id) => self.open_detail(&id),
            None => false,
        }
    }

    /// Switch to the detail view. An unknown id leaves everything as it is.
    pub fn open_detail(&mut self, id: &str) -> bool {
        if self.store.find(id).is_none() {
            return false;
        }
        self.detail_id = Some(id.to_string());
        self.detail_scroll = 0;
        self.view = View::Detail;
        self.fade_started_at = Some(Instant::now());
        true
    }

    pub fn go_back(&mut self) {
        if self.view == View::List {
            return;
        }
        self.view = View::List;
        self.detail_id = None;
        self.fade_started_at = Some(Instant::now());
    }

    /// 0.0 just after a view switch, 1.0 once the fade has finished.
    pub fn fade_progress(&self, now: Instant) -> f32 {
        match self.fade_started_at {
            None => 1.0,
            Some(start) => {
                let elapsed = now.saturating_duration_since(start);
                (elapsed.as_secs_f32() / FADE_DURATION.as_secs_f32()).min(1.0)
            }
        }
    }

    /// Whether card `index` has finished its staggered entrance.
    pub fn card_revealed(&self, index: usize, now: Instant) -> bool {
        let due = self.reveal_step.saturating_mul(index as u32);
        now.saturating_duration_since(self.list_painted_at) >= due
    }

    pub fn scroll_down(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_sub(1);
    }

    // ── View-models ──

    pub fn list_view(&self) -> ListViewModel {
        match &self.load_state {
            LoadState::Loading => ListViewModel::Loading(self.locale.loading().to_string()),
            LoadState::Failed(message) => ListViewModel::Error(message.clone()),
            LoadState::Ready => view_model::list_view(&self.store, &self.resolver, self.locale, Utc::now()),
        }
    }

    pub fn detail_view(&self) -> Option<DetailViewModel> {
        let id = self.detail_id.as_deref()?;
        let app = self.store.find(id)?;
        Some(view_model::detail_view(app, &self.resolver, self.locale, Utc::now()))
    }

    // ── Proxy settings ──

    pub fn open_proxy_settings(&mut self) {
        let selected = ProxyRow::all(&self.proxy)
            .into_iter()
            .position(|row| row.is_active(&self.proxy))
            .unwrap_or(0);
        self.proxy_overlay = Some(ProxyOverlay {
            selected,
            custom_input: None,
        });
    }

    pub fn close_proxy_settings(&mut self) {
        self.proxy_overlay = None;
    }

    pub fn proxy_row_next(&mut self) {
        if let Some(overlay) = self.proxy_overlay.as_mut() {
            if overlay.selected + 1 < ProxyRow::all(&self.proxy).len() {
                overlay.selected += 1;
            }
        }
    }

    pub fn proxy_row_prev(&mut self) {
        if let Some(overlay) = self.proxy_overlay.as_mut() {
            overlay.selected = overlay.selected.saturating_sub(1);
        }
    }

    /// Act on the highlighted row. Choosing none or a preset commits and
    /// reloads at once; choosing custom focuses the input field.
    pub fn proxy_choose(&mut self) {
        let Some(overlay) = self.proxy_overlay.as_mut() else {
            return;
        };
        let row = ProxyRow::all(&self.proxy)
            .get(overlay.selected)
            .copied()
            .unwrap_or(ProxyRow::None);
        match row {
            ProxyRow::None => {
                self.proxy.select_none();
                self.proxy_overlay = None;
                self.proxy_changed();
            }
            ProxyRow::Preset(i) => match self.proxy.select_preset(i) {
                Ok(()) => {
                    self.proxy_overlay = None;
                    self.proxy_changed();
                }
                Err(e) => self.alert = Some(e.user_message()),
            },
            ProxyRow::Saved => {
                self.proxy_overlay = None;
            }
            ProxyRow::Custom => {
                overlay.custom_input = Some(self.proxy.begin_custom());
            }
        }
    }

    pub fn custom_input_push(&mut self, c: char) {
        if let Some(input) = self.proxy_overlay.as_mut().and_then(|o| o.custom_input.as_mut()) {
            input.push(c);
        }
    }

    pub fn custom_input_pop(&mut self) {
        if let Some(input) = self.proxy_overlay.as_mut().and_then(|o| o.custom_input.as_mut()) {
            input.pop();
        }
    }

    /// Leave the custom field without committing. The overlay stays open
    /// and the preference is untouched.
    pub fn cancel_custom_input(&mut self) {
        if let Some(overlay) = self.proxy_overlay.as_mut() {
            overlay.custom_input = None;
        }
    }

    /// The custom field lost focus or Enter was pressed. A rejected value
    /// raises the alert and keeps the field open with the text as typed.
    pub fn commit_custom_input(&mut self) {
        let Some(input) = self
            .proxy_overlay
            .as_ref()
            .and_then(|o| o.custom_input.clone())
        else {
            return;
        };
        match self.proxy.commit_custom(&input) {
            Ok(value) => {
                tracing::info!(prefix = %value, "custom proxy committed");
                self.proxy_overlay = None;
                self.proxy_changed();
            }
            Err(e) => {
                tracing::warn!("rejected custom proxy: {}", e);
                self.alert = Some(e.user_message());
            }
        }
    }

    fn proxy_changed(&mut self) {
        if let Err(e) = self.proxy.save(self.prefs.as_mut()) {
            tracing::warn!("failed to save proxy preference: {}", e);
            self.status_msg = format!("Could not save proxy setting: {}", e);
        }
        self.resolver = self.proxy.resolver();
        tracing::info!(proxy = %self.proxy.describe(), "proxy changed");
        self.request_reload();
    }
}
