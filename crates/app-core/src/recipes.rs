//! Recipe feed and list projection
//!
//! The feed holds the last recipe list fetched from the backend. Screens never
//! filter that list directly; they read a [`Projection`] computed from the
//! snapshot, the selected category and the search query.

use parking_lot::Mutex;
use recipe_client::{Recipe, RecipeApi};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;

/// Catch-all category label
pub const ALL_CATEGORY: &str = "Semua";

/// Shown when a search matched nothing
pub const NO_MATCH_MESSAGE: &str = "Tidak ada resep ditemukan";

/// Shown when there is nothing to search yet
pub const EMPTY_MESSAGE: &str = "Belum ada resep";

/// Shown when a detail lookup finds nothing
pub const NOT_FOUND_MESSAGE: &str = "Resep tidak ditemukan";

/// Feed errors
#[derive(Debug, Error)]
pub enum FeedError {
    /// Backend request failed
    #[error("Failed to load recipes: {0}")]
    Api(#[from] recipe_client::Error),
}

/// Result type for feed operations
pub type Result<T> = std::result::Result<T, FeedError>;

// =============================================================================
// Projection
// =============================================================================

/// Filtered view of a recipe snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    /// At least one recipe matched, in snapshot order
    Results(Vec<Recipe>),
    /// Snapshot is loaded but nothing matched (or it is empty)
    NoResults,
}

impl Projection {
    /// Matched recipes; empty for `NoResults`
    pub fn recipes(&self) -> &[Recipe] {
        match self {
            Projection::Results(recipes) => recipes,
            Projection::NoResults => &[],
        }
    }

    /// Number of matched recipes
    pub fn len(&self) -> usize {
        self.recipes().len()
    }

    /// Check if nothing matched
    pub fn is_empty(&self) -> bool {
        matches!(self, Projection::NoResults)
    }
}

/// Filter a snapshot by category and free-text query
///
/// A category other than [`ALL_CATEGORY`] keeps only recipes whose category
/// is exactly equal (case-sensitive). A query, after trimming, keeps recipes
/// whose title or description contains it case-insensitively.
pub fn project(snapshot: &[Recipe], category: &str, query: &str) -> Projection {
    let needle = query.trim().to_lowercase();

    let matched: Vec<Recipe> = snapshot
        .iter()
        .filter(|r| category == ALL_CATEGORY || r.category == category)
        .filter(|r| {
            needle.is_empty()
                || r.title.to_lowercase().contains(&needle)
                || r.description.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect();

    if matched.is_empty() {
        Projection::NoResults
    } else {
        Projection::Results(matched)
    }
}

/// Distinct categories in first-seen order, prefixed with [`ALL_CATEGORY`]
pub fn categories(snapshot: &[Recipe]) -> Vec<String> {
    let mut result = vec![ALL_CATEGORY.to_string()];
    for recipe in snapshot {
        if !result.iter().any(|c| c == &recipe.category) {
            result.push(recipe.category.clone());
        }
    }
    result
}

/// Message for an empty result list
pub fn empty_message(query: &str) -> &'static str {
    if query.trim().is_empty() {
        EMPTY_MESSAGE
    } else {
        NO_MATCH_MESSAGE
    }
}

// =============================================================================
// Feed
// =============================================================================

/// Load state of the feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedState {
    /// Nothing requested yet
    Idle,
    /// A request is in flight
    Loading,
    /// Last request succeeded
    Loaded,
    /// Last request failed; the previous snapshot is kept
    Failed(String),
}

/// What the feed currently has to show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedView {
    /// No snapshot has been loaded yet
    NotLoaded,
    /// Projection of the loaded snapshot
    Loaded(Projection),
}

/// Outcome of [`RecipeFeed::refresh`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Snapshot replaced with this many recipes
    Applied(usize),
    /// A newer request was started; this response was dropped
    Stale,
}

#[derive(Debug)]
struct FeedInner {
    snapshot: Option<Vec<Recipe>>,
    category: String,
    query: String,
    state: FeedState,
}

/// Recipe list owned by the home and search screens
///
/// Each refresh takes a generation number; a response is only applied if no
/// newer refresh (or [`cancel_pending`](Self::cancel_pending)) happened while
/// it was in flight.
pub struct RecipeFeed<A: RecipeApi + ?Sized> {
    api: Arc<A>,
    generation: AtomicU64,
    inner: Mutex<FeedInner>,
}

impl<A: RecipeApi + ?Sized> RecipeFeed<A> {
    /// Create an empty feed
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            generation: AtomicU64::new(0),
            inner: Mutex::new(FeedInner {
                snapshot: None,
                category: ALL_CATEGORY.to_string(),
                query: String::new(),
                state: FeedState::Idle,
            }),
        }
    }

    /// Fetch the recipe list and replace the snapshot
    pub async fn refresh(&self) -> Result<RefreshOutcome> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.lock().state = FeedState::Loading;

        let result = self.api.list_recipes().await;

        let mut inner = self.inner.lock();
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(generation, "discarding stale recipe response");
            return Ok(RefreshOutcome::Stale);
        }

        match result {
            Ok(recipes) => {
                let count = recipes.len();
                if inner.category != ALL_CATEGORY
                    && !recipes.iter().any(|r| r.category == inner.category)
                {
                    tracing::debug!(category = %inner.category, "selected category vanished");
                    inner.category = ALL_CATEGORY.to_string();
                }
                inner.snapshot = Some(recipes);
                inner.state = FeedState::Loaded;
                tracing::debug!(count, "recipe snapshot replaced");
                Ok(RefreshOutcome::Applied(count))
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load recipes");
                inner.state = FeedState::Failed(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Drop any in-flight response
    pub fn cancel_pending(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        let mut inner = self.inner.lock();
        if inner.state == FeedState::Loading {
            inner.state = if inner.snapshot.is_some() { FeedState::Loaded } else { FeedState::Idle };
        }
    }

    /// Fetch one recipe; `None` when the backend does not know the id
    pub async fn fetch_detail(&self, id: &str) -> Result<Option<Recipe>> {
        match self.api.get_recipe(id).await {
            Ok(recipe) => Ok(Some(recipe)),
            Err(recipe_client::Error::NotFound(_)) => {
                tracing::debug!(id, "recipe not found");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Current load state
    pub fn state(&self) -> FeedState {
        self.inner.lock().state.clone()
    }

    /// Check if a request is in flight
    pub fn is_loading(&self) -> bool {
        self.inner.lock().state == FeedState::Loading
    }

    /// Last successfully loaded snapshot
    pub fn snapshot(&self) -> Option<Vec<Recipe>> {
        self.inner.lock().snapshot.clone()
    }

    /// Categories of the current snapshot
    pub fn categories(&self) -> Vec<String> {
        match &self.inner.lock().snapshot {
            Some(snapshot) => categories(snapshot),
            None => vec![ALL_CATEGORY.to_string()],
        }
    }

    /// Selected category
    pub fn category(&self) -> String {
        self.inner.lock().category.clone()
    }

    /// Select a category
    pub fn select_category(&self, category: impl Into<String>) {
        self.inner.lock().category = category.into();
    }

    /// Current search query
    pub fn query(&self) -> String {
        self.inner.lock().query.clone()
    }

    /// Replace the search query
    pub fn set_query(&self, query: impl Into<String>) {
        self.inner.lock().query = query.into();
    }

    /// Projection for the current selection
    pub fn view(&self) -> FeedView {
        let inner = self.inner.lock();
        match &inner.snapshot {
            Some(snapshot) => FeedView::Loaded(project(snapshot, &inner.category, &inner.query)),
            None => FeedView::NotLoaded,
        }
    }
}
