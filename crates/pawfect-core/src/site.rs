//! # Site Module
//!
//! Page detection and per-page widget wiring.
//!
//! Every page gets the menu, smooth scrolling and the fade-in. The team page
//! adds the bio expander and the gallery; the contact page adds the form
//! and (when the tile library is loaded) the map. Search is attached on any
//! page that has a search box.

use crate::form::FormSession;
use crate::primitives::CONTACT_FORM_ID;
use crate::widgets::{
    MobileMenu, PageLoader, SearchFeature, SmoothScroller, TeamGallery, TeamInteractions,
};
use crate::{ElementId, Page, PawfectError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which page of the site is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    Home,
    About,
    Services,
    Team,
    Contact,
    Other,
}

impl PageKind {
    /// Detect the page from a URL path.
    ///
    /// The last path segment is matched by substring (`OUR_TEAM.html` is the
    /// team page); an empty last segment or the bare root is the home page.
    #[must_use]
    pub fn detect(path: &str) -> Self {
        let last = path.rsplit('/').next().unwrap_or_default();
        if last.contains("HOME") || last.contains("index") || last.is_empty() || path == "/" {
            Self::Home
        } else if last.contains("ABOUT") {
            Self::About
        } else if last.contains("SERVICES") || last.contains("PRODUCTS") {
            Self::Services
        } else if last.contains("TEAM") {
            Self::Team
        } else if last.contains("CONTACT") {
            Self::Contact
        } else {
            Self::Other
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Home => "HOME",
            Self::About => "ABOUT US",
            Self::Services => "SERVICES",
            Self::Team => "OUR TEAM",
            Self::Contact => "CONTACT US",
            Self::Other => "OTHER",
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The widgets attached to one loaded page.
#[derive(Debug, Clone)]
pub struct Site {
    pub kind: PageKind,
    pub menu: Option<MobileMenu>,
    pub scroller: SmoothScroller,
    pub loader: PageLoader,
    pub team: Option<TeamInteractions>,
    pub gallery: Option<TeamGallery>,
    pub form: Option<FormSession>,
    /// The map should be attached once the page has rendered.
    pub map_pending: bool,
    pub search: Option<SearchFeature>,
}

impl Site {
    /// Attach the widgets `path` calls for.
    ///
    /// `map_library` tells whether the external tile library is loaded.
    pub fn initialize(page: &mut Page, path: &str, map_library: bool) -> Result<Self, PawfectError> {
        let kind = PageKind::detect(path);

        let mut site = Self {
            kind,
            menu: MobileMenu::attach(page),
            scroller: SmoothScroller::attach(page),
            loader: PageLoader,
            team: None,
            gallery: None,
            form: None,
            map_pending: false,
            search: None,
        };

        match kind {
            PageKind::Team => {
                site.team = Some(TeamInteractions::attach(page)?);
                site.gallery = Some(TeamGallery::attach(page)?);
            }
            PageKind::Contact => {
                Self::name_contact_form(page)?;
                site.form = FormSession::attach(page, CONTACT_FORM_ID).ok();
                site.map_pending =
                    map_library && page.first_by_class(page.root(), "map-placeholder").is_some();
            }
            _ => {}
        }

        site.search = SearchFeature::attach(page);
        Ok(site)
    }

    /// Give an id-less `.contact-form` the well-known form id.
    ///
    /// Returns the form element, if the page has one.
    pub fn name_contact_form(page: &mut Page) -> Result<Option<ElementId>, PawfectError> {
        let Some(form) = page.first_by_class(page.root(), "contact-form") else {
            return Ok(page.by_dom_id(CONTACT_FORM_ID));
        };
        let element = page.element_mut(form)?;
        if element.dom_id.is_none() {
            element.dom_id = Some(CONTACT_FORM_ID.to_string());
        }
        Ok(Some(form))
    }

    /// Names of the attached widgets, for diagnostics.
    #[must_use]
    pub fn attached(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.menu.is_some() {
            names.push("mobile-menu");
        }
        names.push("smooth-scroller");
        names.push("page-loader");
        if self.team.is_some() {
            names.push("team-interactions");
        }
        if self.gallery.is_some() {
            names.push("team-gallery");
        }
        if self.form.is_some() {
            names.push("contact-form");
        }
        if self.map_pending {
            names.push("interactive-map");
        }
        if self.search.is_some() {
            names.push("search");
        }
        names
    }
}
