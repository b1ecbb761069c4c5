//! Page fade-in.

use crate::{Page, PawfectError};

/// Fades the body in once the page is ready. The runtime calls
/// [`PageLoader::reveal`] after the configured delay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageLoader;

impl PageLoader {
    pub fn reveal(&self, page: &mut Page) -> Result<(), PawfectError> {
        let body = page.body();
        page.set_style(body, "opacity", "1")?;
        page.set_style(body, "transition", "opacity 0.3s ease-in")
    }

    #[must_use]
    pub fn is_revealed(&self, page: &Page) -> bool {
        page.style(page.body(), "opacity") == Some("1")
    }
}
