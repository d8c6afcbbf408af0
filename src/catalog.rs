use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::categories::{self, ALL};
use crate::model::AppRecord;

/// Ordering applied to the visible list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SortKey {
    #[default]
    Name,
    Stars,
    Updated,
}

impl SortKey {
    pub fn next(self) -> Self {
        match self {
            Self::Name => Self::Stars,
            Self::Stars => Self::Updated,
            Self::Updated => Self::Name,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Stars => "Stars",
            Self::Updated => "Updated",
        }
    }
}

/// The loaded catalog plus the current filter and sort inputs.
///
/// `visible` always reflects the four inputs: every setter recomputes it
/// before returning.
#[derive(Debug)]
pub struct CatalogStore {
    all_apps: Vec<AppRecord>,
    categories: Vec<String>,
    category: String,
    search_term: String,
    sort: SortKey,
    visible: Vec<usize>,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogStore {
    pub fn new() -> Self {
        Self {
            all_apps: Vec::new(),
            categories: vec![ALL.to_string()],
            category: ALL.to_string(),
            search_term: String::new(),
            sort: SortKey::Name,
            visible: Vec::new(),
        }
    }

    pub fn all_apps(&self) -> &[AppRecord] {
        &self.all_apps
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    /// Visible records in display order.
    pub fn visible(&self) -> impl Iterator<Item = &AppRecord> {
        self.visible.iter().map(|&i| &self.all_apps[i])
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn visible_at(&self, index: usize) -> Option<&AppRecord> {
        self.visible.get(index).map(|&i| &self.all_apps[i])
    }

    pub fn find(&self, id: &str) -> Option<&AppRecord> {
        self.all_apps.iter().find(|a| a.id == id)
    }

    pub fn set_category(&mut self, category: &str) {
        self.category = category.to_string();
        self.recompute();
    }

    pub fn set_search_term(&mut self, term: &str) {
        self.search_term = term.to_string();
        self.recompute();
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
        self.recompute();
    }

    /// Replace the whole catalog. Filter inputs are kept.
    pub fn replace_apps(&mut self, apps: Vec<AppRecord>) {
        self.all_apps = apps;
        self.categories = categories::derive_categories(&self.all_apps);
        self.recompute();
    }

    fn recompute(&mut self) {
        self.visible = derive_visible(&self.all_apps, &self.category, &self.search_term, self.sort);
    }
}

/// Indices of the records that pass the category and search filters,
/// stably sorted by `sort`.
pub fn derive_visible(apps: &[AppRecord], category: &str, search_term: &str, sort: SortKey) -> Vec<usize> {
    let term = search_term.trim().to_lowercase();
    let mut indices: Vec<usize> = apps
        .iter()
        .enumerate()
        .filter(|(_, app)| matches_category(app, category))
        .filter(|(_, app)| term.is_empty() || matches_term(app, &term))
        .map(|(i, _)| i)
        .collect();

    match sort {
        SortKey::Name => indices.sort_by_cached_key(|&i| NameKey::new(&apps[i].name)),
        SortKey::Stars => indices.sort_by(|&a, &b| apps[b].stars().cmp(&apps[a].stars())),
        SortKey::Updated => {
            // parse each date once
            let mut keyed: Vec<_> = indices.iter().map(|&i| (apps[i].updated_at(), i)).collect();
            keyed.sort_by(|a, b| b.0.cmp(&a.0));
            indices = keyed.into_iter().map(|(_, i)| i).collect();
        }
    }
    indices
}

fn matches_category(app: &AppRecord, category: &str) -> bool {
    category == ALL || app.category() == Some(category)
}

/// `term` must already be trimmed and lower-cased.
fn matches_term(app: &AppRecord, term: &str) -> bool {
    app.name.to_lowercase().contains(term)
        || app
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(term))
        || app.author.to_lowercase().contains(term)
}

/// Collation key for names, compared field by field: base letters with
/// accents and case folded away, then accents (case folded), then the raw
/// name. "apple" < "Éclair" < "eclairs" < "Zed".
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct NameKey {
    base: String,
    accented: String,
    raw: String,
}

impl NameKey {
    fn new(name: &str) -> Self {
        let accented: String = name.nfd().flat_map(char::to_lowercase).collect();
        let base = accented.chars().filter(|c| !is_combining_mark(*c)).collect();
        Self {
            base,
            accented,
            raw: name.to_string(),
        }
    }
}
