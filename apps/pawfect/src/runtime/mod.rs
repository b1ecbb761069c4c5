//! # Site Runtime
//!
//! Runs the widgets of one loaded page on tokio.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                       SiteRuntime                        │
//! │                                                          │
//! │  click / input ──▶ widgets ──┐                           │
//! │  submit ─────────▶ FormController ──▶ Transport (await)  │
//! │                              ▼                           │
//! │                    Arc<Mutex<Page>> ◀── timers (spawned) │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The page is the only shared state. Locks are taken page first and are
//! never held across a timer sleep or a delivery.

mod controller;
pub mod timers;
mod transport;

pub use controller::{FormController, SubmitReport};
pub use timers::Debouncer;
pub use transport::{SimulatedTransport, Transport};

use crate::config::RuntimeConfig;
use pawfect_core::widgets::{
    MapView, MobileMenu, Notifier, SearchFeature, SearchHit, SmoothScroller, TeamGallery,
    TeamInteractions,
};
use pawfect_core::{ElementId, Event, Page, PageKind, PawfectError, ScrollRequest, Severity, Site};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// The page shared by every handler and timer.
pub type SharedPage = Arc<Mutex<Page>>;

/// What a click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickEffect {
    /// Nothing listens on the target.
    Ignored,
    /// The mobile menu is now open (`true`) or closed.
    MenuToggled(bool),
    /// A team bio is now shown (`true`) or hidden.
    BioToggled(bool),
    GalleryOpened,
    GalleryClosed,
    /// An in-page link scrolled to its target.
    Scrolled(ScrollRequest),
    /// A search result was picked.
    SearchSelected(ElementId),
}

/// The running widgets of one page.
pub struct SiteRuntime<T: Transport> {
    page: SharedPage,
    kind: PageKind,
    widgets: Vec<&'static str>,
    menu: Option<MobileMenu>,
    scroller: SmoothScroller,
    team: Option<TeamInteractions>,
    gallery: Option<TeamGallery>,
    search: Option<Arc<Mutex<SearchFeature>>>,
    debouncer: Option<Debouncer>,
    form: Option<FormController<T>>,
    notification_display: Duration,
    reveal: Option<JoinHandle<Result<(), PawfectError>>>,
    map: Option<JoinHandle<Result<Option<MapView>, PawfectError>>>,
}

impl<T: Transport> SiteRuntime<T> {
    /// Initialise the widgets for `path` and start the page timers.
    ///
    /// Must be called inside a tokio runtime.
    pub fn start(
        mut page: Page,
        path: &str,
        map_library: bool,
        transport: T,
        config: &RuntimeConfig,
    ) -> Result<Self, PawfectError> {
        let site = Site::initialize(&mut page, path, map_library)?;
        let widgets = site.attached();
        let shared: SharedPage = Arc::new(Mutex::new(page));

        let form = site.form.map(|session| {
            let controller = FormController::new(shared.clone(), session, transport)
                .with_banner_display(config.banner_display());
            if config.notify_on_submit {
                controller.with_notifier(Notifier::new(), config.notification_display())
            } else {
                controller
            }
        });

        let reveal = timers::reveal_after(shared.clone(), site.loader, config.page_fade_delay());
        let map = site
            .map_pending
            .then(|| timers::init_map_after(shared.clone(), map_library, config.map_init_delay()));

        tracing::info!(page = %site.kind, widgets = ?widgets, "site initialized");

        Ok(Self {
            page: shared,
            kind: site.kind,
            widgets,
            menu: site.menu,
            scroller: site.scroller,
            team: site.team,
            gallery: site.gallery,
            search: site.search.map(|s| Arc::new(Mutex::new(s))),
            debouncer: config.search_debounce().map(Debouncer::new),
            form,
            notification_display: config.notification_display(),
            reveal: Some(reveal),
            map,
        })
    }

    #[must_use]
    pub fn page(&self) -> &SharedPage {
        &self.page
    }

    #[must_use]
    pub fn kind(&self) -> PageKind {
        self.kind
    }

    /// Names of the attached widgets.
    #[must_use]
    pub fn widgets(&self) -> &[&'static str] {
        &self.widgets
    }

    /// The contact form handlers, on the contact page.
    #[must_use]
    pub fn form(&self) -> Option<&FormController<T>> {
        self.form.as_ref()
    }

    /// Wait for the start-up timers. Returns the map view, if one was set up.
    pub async fn ready(&mut self) -> Result<Option<MapView>, PawfectError> {
        if let Some(reveal) = self.reveal.take() {
            timers::join(reveal).await??;
        }
        match self.map.take() {
            Some(map) => timers::join(map).await?,
            None => Ok(None),
        }
    }

    /// Route a click to whichever widget listens on its target.
    pub async fn click(&self, event: &mut Event) -> Result<ClickEffect, PawfectError> {
        let target = event.target;
        let mut page = self.page.lock().await;

        if let Some(menu) = self.menu.filter(|m| m.button() == target) {
            return Ok(ClickEffect::MenuToggled(menu.toggle(&mut page)?));
        }
        if let Some(team) = self.team.as_ref().filter(|t| t.members().contains(&target)) {
            return Ok(team
                .toggle_bio(&mut page, target)?
                .map_or(ClickEffect::Ignored, ClickEffect::BioToggled));
        }
        if let Some(gallery) = &self.gallery {
            if gallery.images().contains(&target) {
                gallery.open(&mut page, target)?;
                return Ok(ClickEffect::GalleryOpened);
            }
            if gallery.is_open(&page) && (target == gallery.overlay() || target == gallery.close_button()) {
                gallery.handle_click(&mut page, target)?;
                return Ok(ClickEffect::GalleryClosed);
            }
        }
        if let Some(search) = &self.search {
            let mut search = search.lock().await;
            if search.rows().contains(&target) {
                return Ok(search
                    .select(&mut page, target)?
                    .map_or(ClickEffect::Ignored, ClickEffect::SearchSelected));
            }
        }
        Ok(self
            .scroller
            .handle_click(&mut page, event)?
            .map_or(ClickEffect::Ignored, ClickEffect::Scrolled))
    }

    /// Input handler of the search box.
    ///
    /// Runs the search right away, or after the debounce delay when one is
    /// configured (a newer query replaces a pending one).
    pub async fn search_input(&mut self, query: &str) -> Result<(), PawfectError> {
        let Some(search) = self.search.clone() else {
            return Ok(());
        };
        let page = self.page.clone();
        match self.debouncer.as_mut() {
            Some(debouncer) => {
                let query = query.to_string();
                debouncer.call(async move {
                    let mut page = page.lock().await;
                    let mut search = search.lock().await;
                    match search.handle_query(&mut page, &query) {
                        Ok(hits) => tracing::debug!(query = %query, hits = hits.len(), "search ran"),
                        Err(e) => tracing::warn!("search failed: {}", e),
                    }
                });
                Ok(())
            }
            None => {
                let mut page = page.lock().await;
                let mut search = search.lock().await;
                let hits = search.handle_query(&mut page, query)?;
                tracing::debug!(query = %query, hits = hits.len(), "search ran");
                Ok(())
            }
        }
    }

    /// Wait for a debounced search to run.
    pub async fn flush_search(&mut self) -> Result<(), PawfectError> {
        match self.debouncer.as_mut() {
            Some(debouncer) => debouncer.flush().await,
            None => Ok(()),
        }
    }

    /// The hits currently shown.
    pub async fn search_hits(&self) -> Vec<SearchHit> {
        match &self.search {
            Some(search) => search.lock().await.hits().to_vec(),
            None => Vec::new(),
        }
    }

    /// Raise a floating notice, dismissed after the configured time.
    pub async fn notify(
        &self,
        message: &str,
        severity: Severity,
    ) -> Result<(ElementId, JoinHandle<bool>), PawfectError> {
        timers::notify(&self.page, Notifier::new(), message, severity, self.notification_display).await
    }
}
