//! Smooth scrolling for in-page anchors.

use crate::page::{Event, ScrollRequest};
use crate::{ElementId, Page, PawfectError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmoothScroller {
    anchors: Vec<ElementId>,
}

impl SmoothScroller {
    /// Collect every `a` whose `href` starts with `#`.
    #[must_use]
    pub fn attach(page: &Page) -> Self {
        let anchors = page.find_all(page.root(), |e| {
            e.tag == "a" && e.attr("href").is_some_and(|h| h.starts_with('#'))
        });
        Self { anchors }
    }

    #[must_use]
    pub fn anchors(&self) -> &[ElementId] {
        &self.anchors
    }

    /// Click handler for an anchor.
    ///
    /// Prevents the jump and smooth-scrolls to the element named by the
    /// fragment. A fragment with no matching element does nothing else.
    pub fn handle_click(
        &self,
        page: &mut Page,
        event: &mut Event,
    ) -> Result<Option<ScrollRequest>, PawfectError> {
        if !self.anchors.contains(&event.target) {
            return Ok(None);
        }
        event.prevent_default();

        let fragment = page
            .attr(event.target, "href")
            .and_then(|h| h.strip_prefix('#'))
            .unwrap_or_default()
            .to_string();
        if fragment.is_empty() {
            return Ok(None);
        }
        let Some(target) = page.by_dom_id(&fragment) else {
            return Ok(None);
        };
        page.scroll_into_view(target, true)?;
        Ok(page.last_scroll())
    }
}
