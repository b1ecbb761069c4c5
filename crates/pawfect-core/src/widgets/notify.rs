//! Floating notification banner.

use crate::{Element, ElementId, Page, PawfectError, Severity};

/// Stateless notice service. Widgets that want to report something hold a
/// copy and call [`Notifier::show`]; the runtime dismisses the notice later.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Notifier;

impl Notifier {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Append a fixed-position notice to the body and return its handle.
    pub fn show(&self, page: &mut Page, message: &str, severity: Severity) -> Result<ElementId, PawfectError> {
        let body = page.body();
        page.append(
            body,
            Element::new("div")
                .with_class("notification")
                .with_class(severity.as_str())
                .with_text(message)
                .with_style("position", "fixed")
                .with_style("top", "20px")
                .with_style("right", "20px")
                .with_style("padding", "15px 20px")
                .with_style("border-radius", "5px")
                .with_style("color", "white")
                .with_style("z-index", "10000")
                .with_style("font-weight", "bold")
                .with_style("background", severity.background()),
        )
    }

    /// Remove a notice. Dismissing twice is harmless.
    pub fn dismiss(&self, page: &mut Page, notice: ElementId) -> bool {
        page.remove(notice)
    }
}
