//! Team bio expander.
//!
//! Every `h3` in `main` is a team member's name; the paragraph right after
//! it is the bio. Clicking the name shows or hides the bio.

use crate::{ElementId, Page, PawfectError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamInteractions {
    members: Vec<ElementId>,
}

impl TeamInteractions {
    /// Collect the member headings and give them a pointer cursor.
    pub fn attach(page: &mut Page) -> Result<Self, PawfectError> {
        let members: Vec<ElementId> = page
            .by_tag(page.root(), "main")
            .into_iter()
            .flat_map(|main| page.by_tag(main, "h3"))
            .collect();
        for &member in &members {
            page.set_style(member, "cursor", "pointer")?;
        }
        Ok(Self { members })
    }

    #[must_use]
    pub fn members(&self) -> &[ElementId] {
        &self.members
    }

    /// Click handler for a member heading.
    ///
    /// Returns the new bio visibility, or `None` when the heading is not
    /// followed by a paragraph.
    pub fn toggle_bio(&self, page: &mut Page, member: ElementId) -> Result<Option<bool>, PawfectError> {
        let Some(bio) = page
            .next_sibling(member)
            .filter(|&b| page.get(b).is_some_and(|e| e.tag == "p"))
        else {
            return Ok(None);
        };
        // An unset display counts as shown.
        let visible = page.style(bio, "display") == Some("none");
        page.set_style(bio, "display", if visible { "block" } else { "none" })?;
        Ok(Some(visible))
    }
}
