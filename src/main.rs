mod app;
mod catalog;
mod categories;
mod config;
mod error;
mod i18n;
mod logging;
mod model;
mod prefs;
mod proxy;
mod source;
mod ui;
mod view_model;

use std::path::PathBuf;

use app::{App, InputMode, View};
use catalog::{CatalogStore, SortKey};
use clap::{Parser, Subcommand};
use config::{Overrides, Settings};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use error::ProxyError;
use i18n::Locale;
use proxy::{PRESETS, ProxyPreference};
use source::CatalogSource;

/// Terminal browser for a catalog of open-source apps
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Catalog file path or URL (default ./app_details.json)
    #[arg(short, long, global = true)]
    source: Option<String>,

    /// Interface language
    #[arg(short, long, value_enum, global = true)]
    locale: Option<Locale>,

    /// Config file (default: platform config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog interactively (default)
    Run,
    /// Print the filtered, sorted catalog and exit
    List {
        /// Category key, e.g. "media"
        #[arg(long, default_value = categories::ALL)]
        category: String,
        /// Case-insensitive match on name, description and author
        #[arg(long)]
        search: Option<String>,
        #[arg(long, value_enum, default_value_t = SortKey::Name)]
        sort: SortKey,
    },
    /// Show or change the GitHub proxy preference
    Proxy {
        #[command(subcommand)]
        action: ProxyAction,
    },
}

#[derive(Subcommand)]
enum ProxyAction {
    /// Print the current setting and the presets
    Show,
    /// Disable the proxy
    None,
    /// Use preset N (1-based, see `proxy show`)
    Preset { n: usize },
    /// Use a custom prefix; an empty value disables it
    Custom { url: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let log_guard = logging::init();

    let file = config::load_config(cli.config.as_deref());
    let settings = Settings::resolve(
        file,
        Overrides {
            source: cli.source,
            locale: cli.locale,
        },
    );
    tracing::debug!(?settings, "resolved settings");

    let outcome = match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_tui(&settings).await,
        Commands::List { category, search, sort } => {
            list_catalog(&settings, &category, search.as_deref(), sort).await
        }
        Commands::Proxy { action } => run_proxy_command(action),
    };

    if let Err(message) = outcome {
        eprintln!("{}", message);
        // exit() skips destructors; flush the log file first
        drop(log_guard);
        std::process::exit(1);
    }
    Ok(())
}

async fn run_tui(settings: &Settings) -> Result<(), String> {
    let mut app = App::new(settings, prefs::open_default());
    app.request_reload();

    let mut terminal = ratatui::init();
    let result = run_app(&mut terminal, &mut app).await;
    ratatui::restore();

    result.map_err(|e| {
        tracing::error!("terminal error: {}", e);
        format!("Error: {e}")
    })
}

async fn list_catalog(settings: &Settings, category: &str, search: Option<&str>, sort: SortKey) -> Result<(), String> {
    let apps = CatalogSource::parse(&settings.source).load().await.map_err(|e| {
        tracing::error!("list failed: {}", e);
        format!("{}\n  ({e})", e.user_message())
    })?;
    let mut store = CatalogStore::new();
    store.replace_apps(apps);
    store.set_category(category);
    store.set_search_term(search.unwrap_or(""));
    store.set_sort(sort);
    print_list(&store, settings.locale);
    Ok(())
}

fn print_list(store: &CatalogStore, locale: Locale) {
    let proxy = proxy::ProxyResolver::new(None);
    let now = chrono::Utc::now();
    let cards = match view_model::list_view(store, &proxy, locale, now) {
        view_model::ListViewModel::Cards(cards) => cards,
        view_model::ListViewModel::Empty(message) => {
            println!("{}", message);
            return;
        }
        _ => return,
    };
    for card in cards {
        println!(
            "{:<24} {:<20} ⭐ {:>6}  {}",
            ui::truncate_str(&card.name, 24),
            ui::truncate_str(&card.author, 20),
            card.stars,
            card.updated
        );
    }
}

fn run_proxy_command(action: ProxyAction) -> Result<(), String> {
    let mut store = prefs::open_default();
    let mut pref = ProxyPreference::load(store.as_ref());

    match action {
        ProxyAction::Show => {
            println!("current: {}", pref.describe());
            for (i, preset) in PRESETS.iter().enumerate() {
                let marker = if pref.preset_index() == Some(i) { "*" } else { " " };
                println!("{} {}. {}", marker, i + 1, preset);
            }
            return Ok(());
        }
        ProxyAction::None => pref.select_none(),
        ProxyAction::Preset { n } => {
            let unknown = || ProxyError::UnknownPreset(n).user_message();
            let index = n.checked_sub(1).ok_or_else(unknown)?;
            pref.select_preset(index).map_err(|_| unknown())?;
        }
        ProxyAction::Custom { url } => {
            pref.commit_custom(&url).map_err(|e| e.user_message())?;
        }
    }

    pref.save(store.as_mut()).map_err(|e| e.to_string())?;
    tracing::info!(proxy = %pref.describe(), "proxy changed from command line");
    println!("proxy: {}", pref.describe());
    Ok(())
}

async fn run_app(terminal: &mut ratatui::DefaultTerminal, app: &mut App) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.drain_loads();
        terminal.draw(|frame| ui::render(app, frame))?;

        if app.should_quit {
            return Ok(());
        }

        // Short poll so fades and staggered cards keep repainting
        if crossterm::event::poll(std::time::Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                handle_key(app, key);
            }
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Any key dismisses an alert
    if app.alert.is_some() {
        app.alert = None;
        return;
    }

    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    if app.proxy_overlay.is_some() {
        handle_proxy_key(app, key);
        return;
    }

    if app.input_mode == InputMode::Editing {
        handle_search_input(app, key);
        return;
    }

    // Help toggle (global)
    if key.code == KeyCode::Char('?') {
        app.show_help = !app.show_help;
        return;
    }

    // If an info overlay is showing, any key closes it
    if app.show_help || app.show_submit {
        app.show_help = false;
        app.show_submit = false;
        return;
    }

    match key.code {
        KeyCode::Char('p') => {
            app.open_proxy_settings();
            return;
        }
        KeyCode::Char('a') => {
            app.show_submit = true;
            return;
        }
        KeyCode::Char('r') => {
            app.request_reload();
            return;
        }
        _ => {}
    }

    match app.view {
        View::List => handle_list_key(app, key),
        View::Detail => handle_detail_key(app, key),
    }
}

fn handle_proxy_key(app: &mut App, key: KeyEvent) {
    let editing = app
        .proxy_overlay
        .as_ref()
        .is_some_and(|o| o.custom_input.is_some());

    if editing {
        match key.code {
            KeyCode::Enter | KeyCode::Tab => app.commit_custom_input(),
            KeyCode::Esc => app.cancel_custom_input(),
            KeyCode::Backspace => app.custom_input_pop(),
            KeyCode::Char(c) => app.custom_input_push(c),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Down | KeyCode::Char('j') => app.proxy_row_next(),
        KeyCode::Up | KeyCode::Char('k') => app.proxy_row_prev(),
        KeyCode::Enter => app.proxy_choose(),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('p') => app.close_proxy_settings(),
        _ => {}
    }
}

fn handle_search_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => app.pop_search_char(),
        KeyCode::Char(c) => app.push_search_char(c),
        _ => {}
    }
}

fn handle_list_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Char('/') => {
            app.input_mode = InputMode::Editing;
        }
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Char('g') | KeyCode::Home => app.select_first(),
        KeyCode::Char('G') | KeyCode::End => app.select_last(),
        KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => app.next_category(),
        KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => app.prev_category(),
        KeyCode::Char('s') => app.cycle_sort(),
        KeyCode::Enter => {
            app.open_selected();
        }
        KeyCode::Esc => {
            if !app.search.is_empty() {
                app.clear_search();
            }
        }
        _ => {}
    }
}

fn handle_detail_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Backspace => app.go_back(),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_up(),
        KeyCode::Char('d') => {
            app.status_msg = match app.detail_view().and_then(|d| d.download) {
                Some(url) => open_link(&url),
                None => "No download link for this app".to_string(),
            };
        }
        KeyCode::Char('o') => {
            if let Some(detail) = app.detail_view() {
                app.status_msg = open_link(&detail.repository);
            }
        }
        KeyCode::Char('y') => {
            if let Some(detail) = app.detail_view() {
                app.status_msg = copy_to_clipboard(&detail.repository);
            }
        }
        _ => {}
    }
}

/// Hand `url` to the desktop's opener. Returns a status line.
fn open_link(url: &str) -> String {
    if url.is_empty() {
        return "No link to open".to_string();
    }
    let opener = if cfg!(target_os = "macos") { "open" } else { "xdg-open" };
    match std::process::Command::new(opener)
        .arg(url)
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .spawn()
    {
        Ok(_) => {
            tracing::info!(%url, "opened link");
            format!("Opening: {}", url)
        }
        Err(e) => {
            tracing::warn!(%url, "could not run {}: {}", opener, e);
            format!("Link: {} ({} not available)", url, opener)
        }
    }
}

/// Try xclip, then wl-copy. Returns a status line.
fn copy_to_clipboard(text: &str) -> String {
    use std::io::Write;
    use std::process::{Command, Stdio};

    let candidates: [(&str, &[&str]); 2] = [("xclip", &["-selection", "clipboard"]), ("wl-copy", &[])];
    for (program, args) in candidates {
        if let Ok(mut child) = Command::new(program).args(args).stdin(Stdio::piped()).spawn() {
            if let Some(mut stdin) = child.stdin.take() {
                let _ = stdin.write_all(text.as_bytes());
            }
            let _ = child.wait();
            return format!("Copied: {}", text);
        }
    }
    format!("Link: {} (clipboard not available)", text)
}
