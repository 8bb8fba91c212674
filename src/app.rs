use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::api::{ApiError, Film, FilmDetail, FilmPage, FilmSource, Ratings};
use crate::films::{self, SortMode};
use crate::ui::stars::StarRating;

/// Catalog load state. Only `Loaded` renders the list and detail panes.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogState {
    Loading,
    Error(String),
    Loaded(Vec<Film>),
}

/// Results delivered back to the UI task by spawned fetches.
#[derive(Debug)]
pub enum AppEvent {
    CatalogLoaded(Result<FilmPage, ApiError>),
    DetailLoaded {
        locator: String,
        result: Result<FilmDetail, ApiError>,
    },
    RatingsLoaded {
        locator: String,
        ratings: Ratings,
    },
}

/// Input mode for the search bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

pub const LIST_OVERHEAD: u16 = 6;
/// Each film row is three lines tall.
pub const ROW_HEIGHT: u16 = 3;
const DETAIL_EXTRA_LINES: usize = 4;

/// Main application state.
pub struct App<S: FilmSource> {
    source: Arc<S>,
    events_tx: UnboundedSender<AppEvent>,
    events_rx: UnboundedReceiver<AppEvent>,
    pending: usize,

    pub should_quit: bool,
    pub show_help: bool,
    pub total_stars: u8,

    pub catalog: CatalogState,
    /// Keyed by film locator, not title, so duplicate titles cannot collide.
    pub ratings: HashMap<String, Ratings>,

    // View state
    pub search_query: String,
    pub sort_mode: SortMode,
    pub selected: Option<String>,
    pub input_mode: InputMode,

    // List view state
    pub list_selected: usize,
    pub page_size: usize,

    // Detail pane state
    pub detail: Option<FilmDetail>,
    pub detail_error: Option<String>,
    pub detail_scroll: u16,

    pub status_msg: String,
}

impl<S: FilmSource> App<S> {
    pub fn new(source: Arc<S>, total_stars: u8) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            source,
            events_tx,
            events_rx,
            pending: 0,

            should_quit: false,
            show_help: false,
            total_stars,

            catalog: CatalogState::Loading,
            ratings: HashMap::new(),

            search_query: String::new(),
            sort_mode: SortMode::default(),
            selected: None,
            input_mode: InputMode::Normal,

            list_selected: 0,
            page_size: 5,

            detail: None,
            detail_error: None,
            detail_scroll: 0,

            status_msg: "Loading films...".to_string(),
        }
    }

    /// Number of spawned fetches whose results have not been handled yet.
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Run `fut` on the runtime and deliver its event back to this app.
    fn spawn<F>(&mut self, fut: F)
    where
        F: Future<Output = AppEvent> + Send + 'static,
    {
        self.pending += 1;
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            // The receiver lives as long as the app; a send error means we are shutting down.
            let _ = tx.send(fut.await);
        });
    }

    /// Start (or restart) the catalog fetch. Clears everything derived from a
    /// previous catalog.
    pub fn load_catalog(&mut self) {
        self.catalog = CatalogState::Loading;
        self.ratings.clear();
        self.clear_selection();
        self.list_selected = 0;
        self.status_msg = "Loading films...".to_string();

        let source = Arc::clone(&self.source);
        self.spawn(async move { AppEvent::CatalogLoaded(source.list_films().await) });
    }

    /// One ratings request per film, all in flight at once.
    fn dispatch_ratings(&mut self, films: &[Film]) {
        for film in films {
            let source = Arc::clone(&self.source);
            let locator = film.url.clone();
            let title = film.title.clone();
            let year = film.year();
            self.spawn(async move {
                let ratings = match source.get_ratings(&title, year).await {
                    Ok(r) => r,
                    Err(e) => {
                        log::debug!("No ratings for {} ({}): {}", title, year, e);
                        Ratings::unavailable()
                    }
                };
                AppEvent::RatingsLoaded { locator, ratings }
            });
        }
    }

    fn dispatch_detail(&mut self, locator: String) {
        let source = Arc::clone(&self.source);
        self.spawn(async move {
            let result = source.get_film_detail(&locator).await;
            AppEvent::DetailLoaded { locator, result }
        });
    }

    /// Apply a fetch result to the view state.
    pub fn handle_event(&mut self, event: AppEvent) {
        self.pending = self.pending.saturating_sub(1);

        match event {
            AppEvent::CatalogLoaded(Ok(page)) => {
                log::info!(
                    "Catalog loaded: {} films (count {})",
                    page.results.len(),
                    page.count
                );
                self.status_msg = format!("{} films loaded", page.results.len());
                self.dispatch_ratings(&page.results);
                self.catalog = CatalogState::Loaded(page.results);
                self.clamp_list_selection();
            }
            AppEvent::CatalogLoaded(Err(e)) => {
                log::warn!("Catalog fetch failed: {}", e);
                self.status_msg = e.user_message();
                self.catalog = CatalogState::Error(e.user_message());
            }
            AppEvent::DetailLoaded { locator, result } => {
                if self.selected.as_deref() != Some(locator.as_str()) {
                    log::debug!("Ignoring stale detail response for {}", locator);
                    return;
                }
                match result {
                    Ok(detail) => {
                        self.detail = Some(detail);
                        self.detail_error = None;
                    }
                    Err(e) => {
                        log::warn!("Detail fetch failed for {}: {}", locator, e);
                        self.detail = None;
                        self.detail_error = Some(e.user_message());
                        self.status_msg = "Could not load film details".to_string();
                    }
                }
            }
            AppEvent::RatingsLoaded { locator, ratings } => {
                if self.film_by_locator(&locator).is_some() {
                    self.ratings.insert(locator, ratings);
                } else {
                    log::debug!("Ignoring ratings for unknown film {}", locator);
                }
            }
        }
    }

    /// Handle every event that is already waiting, without blocking.
    pub fn drain_events(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    /// Wait for the next event and handle it. Returns false if nothing is in flight.
    pub async fn next_event(&mut self) -> bool {
        if self.pending == 0 {
            return false;
        }
        match self.events_rx.recv().await {
            Some(event) => {
                self.handle_event(event);
                true
            }
            None => false,
        }
    }

    /// Wait until every in-flight fetch has been handled.
    pub async fn settle(&mut self) {
        while self.next_event().await {}
    }

    // ── Derived view ──

    pub fn films(&self) -> &[Film] {
        match &self.catalog {
            CatalogState::Loaded(films) => films,
            _ => &[],
        }
    }

    /// Films matching the search query, in the current sort order.
    pub fn visible_films(&self) -> Vec<&Film> {
        films::visible_films(self.films(), &self.search_query, self.sort_mode)
    }

    pub fn film_by_locator(&self, locator: &str) -> Option<&Film> {
        self.films().iter().find(|f| f.url == locator)
    }

    pub fn selected_film(&self) -> Option<&Film> {
        self.selected
            .as_deref()
            .and_then(|locator| self.film_by_locator(locator))
    }

    pub fn ratings_for(&self, film: &Film) -> Option<&Ratings> {
        self.ratings.get(&film.url)
    }

    /// Stars for a film; an empty row until its ratings arrive.
    pub fn star_rating_for(&self, film: &Film) -> StarRating {
        let score = self
            .ratings_for(film)
            .map(|r| r.star_score(self.total_stars))
            .unwrap_or(0.0);
        StarRating::new(score).with_total(self.total_stars)
    }

    // ── Header controls ──

    /// Replace the search query. Any change, even to the same text, clears
    /// the selection.
    pub fn set_search_query(&mut self, query: String) {
        self.search_query = query;
        self.clear_selection();
        self.list_selected = 0;
    }

    pub fn push_search_char(&mut self, c: char) {
        let mut query = self.search_query.clone();
        query.push(c);
        self.set_search_query(query);
    }

    pub fn pop_search_char(&mut self) {
        let mut query = self.search_query.clone();
        query.pop();
        self.set_search_query(query);
    }

    pub fn set_sort_mode(&mut self, mode: SortMode) {
        self.sort_mode = mode;
        self.clamp_list_selection();
    }

    pub fn cycle_sort_mode(&mut self) {
        self.set_sort_mode(self.sort_mode.next());
    }

    // ── Selection ──

    /// Select a film by locator and fetch its detail. Re-selecting the film
    /// already shown is a no-op.
    pub fn select(&mut self, locator: String) {
        if self.selected.as_deref() == Some(locator.as_str()) && self.detail.is_some() {
            return;
        }
        self.selected = Some(locator.clone());
        self.detail = None;
        self.detail_error = None;
        self.detail_scroll = 0;
        self.dispatch_detail(locator);
    }

    /// Select the highlighted row.
    pub fn select_highlighted(&mut self) {
        let locator = self
            .visible_films()
            .get(self.list_selected)
            .map(|f| f.url.clone());
        if let Some(locator) = locator {
            self.select(locator);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.detail = None;
        self.detail_error = None;
        self.detail_scroll = 0;
    }

    // ── List navigation ──

    /// Update page size based on terminal height.
    pub fn update_page_size(&mut self, terminal_height: u16) {
        let rows = terminal_height.saturating_sub(LIST_OVERHEAD) / ROW_HEIGHT;
        self.page_size = (rows as usize).max(1);
    }

    fn clamp_list_selection(&mut self) {
        let len = self.visible_films().len();
        self.list_selected = self.list_selected.min(len.saturating_sub(1));
    }

    pub fn list_next(&mut self) {
        if self.list_selected + 1 < self.visible_films().len() {
            self.list_selected += 1;
        }
    }

    pub fn list_prev(&mut self) {
        self.list_selected = self.list_selected.saturating_sub(1);
    }

    pub fn list_page_down(&mut self) {
        self.list_selected += self.page_size;
        self.clamp_list_selection();
    }

    pub fn list_page_up(&mut self) {
        self.list_selected = self.list_selected.saturating_sub(self.page_size);
    }

    pub fn list_first(&mut self) {
        self.list_selected = 0;
    }

    pub fn list_last(&mut self) {
        self.list_selected = self.visible_films().len().saturating_sub(1);
    }

    /// Lines in the detail pane: heading, blank, crawl, blank, director.
    fn detail_line_count(&self) -> u16 {
        self.detail
            .as_ref()
            .map(|d| d.opening_crawl.lines().count() + DETAIL_EXTRA_LINES)
            .map_or(0, |n| u16::try_from(n).unwrap_or(u16::MAX))
    }

    /// Scroll the detail pane, stopping with the last line still on top.
    pub fn scroll_down(&mut self) {
        let max = self.detail_line_count().saturating_sub(1);
        self.detail_scroll = self.detail_scroll.saturating_add(1).min(max);
    }

    pub fn scroll_up(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_sub(1);
    }
}
