//! # Search Widget
//!
//! Naive client-side text search over the current page.
//!
//! Headings, paragraphs and list items are matched by case-insensitive
//! substring. The first few matches are rendered into the results container;
//! selecting one scrolls to it and resets the search box.

use crate::primitives::{
    SEARCH_MAX_RESULTS, SEARCH_MIN_QUERY_CHARS, SEARCH_SNIPPET_CHARS, SEARCHABLE_TAGS,
};
use crate::{Element, ElementId, Page, PawfectError};
use serde::{Deserialize, Serialize};

/// One match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Upper-case tag of the matching element (`H2`, `P`, ...).
    pub title: String,
    /// Full text of the matching element.
    pub content: String,
    pub element: ElementId,
}

impl SearchHit {
    /// The shortened text shown in the results list.
    #[must_use]
    pub fn snippet(&self) -> String {
        let mut s: String = self.content.chars().take(SEARCH_SNIPPET_CHARS).collect();
        s.push_str("...");
        s
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFeature {
    input: ElementId,
    results: ElementId,
    hits: Vec<SearchHit>,
    rendered: Vec<ElementId>,
}

impl SearchFeature {
    /// Attach to `#search` and `#results`; `None` when either is missing.
    #[must_use]
    pub fn attach(page: &Page) -> Option<Self> {
        Some(Self {
            input: page.by_dom_id("search")?,
            results: page.by_dom_id("results")?,
            hits: Vec::new(),
            rendered: Vec::new(),
        })
    }

    #[must_use]
    pub fn input(&self) -> ElementId {
        self.input
    }

    #[must_use]
    pub fn results(&self) -> ElementId {
        self.results
    }

    /// Hits currently shown.
    #[must_use]
    pub fn hits(&self) -> &[SearchHit] {
        &self.hits
    }

    /// Find matches for `query` without touching the page.
    ///
    /// Text inside the results container is skipped. Each rendered hit
    /// repeats a heading and snippet of page text, so searching it would
    /// count earlier results as new matches and push real ones past the cap.
    #[must_use]
    pub fn search(&self, page: &Page, query: &str) -> Vec<SearchHit> {
        let needle = query.to_lowercase();
        let excluded: Vec<ElementId> = page.descendants(self.results);
        page.find_all(page.root(), |e| SEARCHABLE_TAGS.contains(&e.tag.as_str()))
            .into_iter()
            .filter(|id| *id != self.results && !excluded.contains(id))
            .filter_map(|id| {
                let content = page.text_content(id);
                content.to_lowercase().contains(&needle).then(|| SearchHit {
                    title: page.get(id).map(Element::tag_name).unwrap_or_default(),
                    content,
                    element: id,
                })
            })
            .take(SEARCH_MAX_RESULTS)
            .collect()
    }

    /// Input handler: re-run the search for the box's current text.
    ///
    /// Queries shorter than the minimum clear the results.
    pub fn handle_query(&mut self, page: &mut Page, query: &str) -> Result<&[SearchHit], PawfectError> {
        page.set_value(self.input, query)?;
        if query.chars().count() < SEARCH_MIN_QUERY_CHARS {
            self.clear_results(page)?;
            return Ok(&self.hits);
        }
        let hits = self.search(page, query);
        self.render(page, hits)?;
        Ok(&self.hits)
    }

    fn render(&mut self, page: &mut Page, hits: Vec<SearchHit>) -> Result<(), PawfectError> {
        self.clear_results(page)?;
        for hit in &hits {
            let row = page.append(
                self.results,
                Element::new("div")
                    .with_class("search-result")
                    .with_style("padding", "10px")
                    .with_style("border-bottom", "1px solid #ccc")
                    .with_style("cursor", "pointer"),
            )?;
            page.append(row, Element::new("h4").with_text(hit.title.clone()))?;
            page.append(row, Element::new("p").with_text(hit.snippet()))?;
            self.rendered.push(row);
        }
        self.hits = hits;
        Ok(())
    }

    fn clear_results(&mut self, page: &mut Page) -> Result<(), PawfectError> {
        page.clear_children(self.results)?;
        self.hits.clear();
        self.rendered.clear();
        Ok(())
    }

    /// Click handler for a rendered result row.
    ///
    /// Scrolls to the matching element, then empties the results and the
    /// search box. Returns the element scrolled to.
    pub fn select(&mut self, page: &mut Page, row: ElementId) -> Result<Option<ElementId>, PawfectError> {
        let Some(index) = self.rendered.iter().position(|&r| r == row) else {
            return Ok(None);
        };
        let target = self.hits.get(index).map(|h| h.element);
        if let Some(target) = target.filter(|t| page.contains(*t)) {
            page.scroll_into_view(target, true)?;
        }
        self.clear_results(page)?;
        page.set_value(self.input, "")?;
        Ok(target)
    }

    /// Rendered result rows, in hit order.
    #[must_use]
    pub fn rows(&self) -> &[ElementId] {
        &self.rendered
    }
}
