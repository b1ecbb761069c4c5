//! Image gallery lightbox.

use crate::{Element, ElementId, Page, PawfectError};

/// Full-screen overlay showing an enlarged copy of a clicked team photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamGallery {
    images: Vec<ElementId>,
    overlay: ElementId,
    close: ElementId,
    content: ElementId,
}

impl TeamGallery {
    /// Make every `img` in `main` clickable and append the hidden overlay
    /// to the end of the body.
    pub fn attach(page: &mut Page) -> Result<Self, PawfectError> {
        let images: Vec<ElementId> = page
            .by_tag(page.root(), "main")
            .into_iter()
            .flat_map(|main| page.by_tag(main, "img"))
            .collect();
        for &img in &images {
            page.set_style(img, "cursor", "pointer")?;
        }

        let body = page.body();
        let overlay = page.append(
            body,
            Element::new("div")
                .with_class("lightbox")
                .with_style("display", "none")
                .with_style("position", "fixed")
                .with_style("top", "0")
                .with_style("left", "0")
                .with_style("width", "100%")
                .with_style("height", "100%")
                .with_style("background", "rgba(0,0,0,0.8)")
                .with_style("z-index", "1000")
                .with_style("justify-content", "center")
                .with_style("align-items", "center"),
        )?;
        let close = page.append(
            overlay,
            Element::new("span")
                .with_class("close")
                .with_text("\u{00d7}")
                .with_style("position", "absolute")
                .with_style("top", "20px")
                .with_style("right", "30px")
                .with_style("color", "white")
                .with_style("font-size", "40px")
                .with_style("cursor", "pointer")
                .with_style("z-index", "1001"),
        )?;
        let content = page.append(
            overlay,
            Element::new("img")
                .with_class("lightbox-content")
                .with_style("max-width", "90%")
                .with_style("max-height", "90%")
                .with_style("border-radius", "10px"),
        )?;

        Ok(Self {
            images,
            overlay,
            close,
            content,
        })
    }

    #[must_use]
    pub fn images(&self) -> &[ElementId] {
        &self.images
    }

    #[must_use]
    pub fn overlay(&self) -> ElementId {
        self.overlay
    }

    #[must_use]
    pub fn close_button(&self) -> ElementId {
        self.close
    }

    #[must_use]
    pub fn content(&self) -> ElementId {
        self.content
    }

    #[must_use]
    pub fn is_open(&self, page: &Page) -> bool {
        page.style(self.overlay, "display") == Some("flex")
    }

    /// Show `img` enlarged.
    pub fn open(&self, page: &mut Page, img: ElementId) -> Result<(), PawfectError> {
        let src = page.attr(img, "src").unwrap_or_default().to_string();
        page.set_style(self.overlay, "display", "flex")?;
        page.set_attr(self.content, "src", &src)
    }

    pub fn close(&self, page: &mut Page) -> Result<(), PawfectError> {
        page.set_style(self.overlay, "display", "none")
    }

    /// Route a click inside the overlay.
    ///
    /// The close button closes; a click on the backdrop closes only when
    /// the backdrop itself is the target (not the enlarged image).
    pub fn handle_click(&self, page: &mut Page, target: ElementId) -> Result<(), PawfectError> {
        if target == self.close || target == self.overlay {
            self.close(page)?;
        }
        Ok(())
    }
}
