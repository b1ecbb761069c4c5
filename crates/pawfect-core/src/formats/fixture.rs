//! # Page Fixtures
//!
//! JSON description of a page body, used by the CLI and tests to load a
//! page and to print its state back out.
//!
//! ```json
//! {
//!   "path": "/CONTACT_US.html",
//!   "body": [
//!     { "tag": "form", "classes": ["contact-form"], "children": [
//!       { "tag": "input", "id": "email", "attrs": { "type": "email" }, "value": "a@b.com" }
//!     ]}
//!   ]
//! }
//! ```

use crate::{Element, ElementId, Page, PawfectError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Maximum nesting depth accepted when building a page from a fixture.
pub const MAX_FIXTURE_DEPTH: usize = 64;

/// One element and its subtree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeFixture {
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub styles: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub value: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeFixture>,
}

impl NodeFixture {
    fn to_element(&self) -> Result<Element, PawfectError> {
        if self.tag.trim().is_empty() {
            return Err(PawfectError::InvalidFixture("element without a tag".to_string()));
        }
        let mut element = Element::new(self.tag.trim());
        element.dom_id = self.id.clone();
        element.classes = self.classes.iter().cloned().collect();
        element.attrs = self.attrs.clone();
        element.styles = self.styles.clone();
        element.text = self.text.clone();
        element.value = self.value.clone();
        element.disabled = self.disabled;
        Ok(element)
    }

    fn from_element(page: &Page, id: ElementId) -> Option<Self> {
        let e = page.get(id)?;
        Some(Self {
            tag: e.tag.clone(),
            id: e.dom_id.clone(),
            classes: e.classes.iter().cloned().collect(),
            attrs: e.attrs.clone(),
            styles: e.styles.clone(),
            text: e.text.clone(),
            value: e.value.clone(),
            disabled: e.disabled,
            children: e
                .children()
                .iter()
                .filter_map(|&c| Self::from_element(page, c))
                .collect(),
        })
    }
}

/// A whole page: the URL path it is served under and the body content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageFixture {
    #[serde(default = "default_path")]
    pub path: String,
    #[serde(default)]
    pub body: Vec<NodeFixture>,
}

fn default_path() -> String {
    "/".to_string()
}

impl PageFixture {
    /// Parse a fixture from JSON bytes.
    pub fn from_json(bytes: &[u8]) -> Result<Self, PawfectError> {
        serde_json::from_slice(bytes).map_err(|e| PawfectError::InvalidFixture(e.to_string()))
    }

    /// Serialize the fixture as pretty JSON.
    pub fn to_json(&self) -> Result<String, PawfectError> {
        serde_json::to_string_pretty(self).map_err(|e| PawfectError::SerializationError(e.to_string()))
    }

    /// Build a fresh page from this fixture.
    pub fn build(&self) -> Result<Page, PawfectError> {
        let mut page = Page::new();
        let body = page.body();
        for node in &self.body {
            insert(&mut page, body, node, 1)?;
        }
        Ok(page)
    }

    /// Capture the current body of `page` under `path`.
    #[must_use]
    pub fn capture(page: &Page, path: &str) -> Self {
        Self {
            path: path.to_string(),
            body: page
                .children(page.body())
                .iter()
                .filter_map(|&c| NodeFixture::from_element(page, c))
                .collect(),
        }
    }
}

fn insert(page: &mut Page, parent: ElementId, node: &NodeFixture, depth: usize) -> Result<(), PawfectError> {
    if depth > MAX_FIXTURE_DEPTH {
        return Err(PawfectError::InvalidFixture(format!(
            "nesting deeper than {} levels",
            MAX_FIXTURE_DEPTH
        )));
    }
    let id = page.append(parent, node.to_element()?)?;
    for child in &node.children {
        insert(page, id, child, depth + 1)?;
    }
    Ok(())
}

/// A ready-made contact page, used by `pawfect sample` and tests.
#[must_use]
pub fn sample_contact_page() -> PageFixture {
    let input = |id: &str, ty: &str, required: bool| {
        let mut attrs = BTreeMap::from([("type".to_string(), ty.to_string())]);
        if required {
            attrs.insert("required".to_string(), String::new());
        }
        NodeFixture {
            tag: "input".to_string(),
            id: Some(id.to_string()),
            attrs,
            ..NodeFixture::default()
        }
    };
    let option = |value: &str, label: &str| NodeFixture {
        tag: "option".to_string(),
        attrs: BTreeMap::from([("value".to_string(), value.to_string())]),
        text: label.to_string(),
        ..NodeFixture::default()
    };

    let form = NodeFixture {
        tag: "form".to_string(),
        classes: vec!["contact-form".to_string()],
        children: vec![
            input("name", "text", true),
            input("email", "email", true),
            input("phone", "tel", false),
            NodeFixture {
                tag: "select".to_string(),
                id: Some("pet".to_string()),
                attrs: BTreeMap::from([("required".to_string(), String::new())]),
                children: vec![
                    option("", "Select your pet"),
                    option("dog", "Dog"),
                    option("cat", "Cat"),
                    option("other", "Other"),
                ],
                ..NodeFixture::default()
            },
            input("subject", "text", false),
            NodeFixture {
                tag: "textarea".to_string(),
                id: Some("message".to_string()),
                ..NodeFixture::default()
            },
            NodeFixture {
                tag: "button".to_string(),
                attrs: BTreeMap::from([("type".to_string(), "submit".to_string())]),
                text: "Send Message".to_string(),
                ..NodeFixture::default()
            },
        ],
        ..NodeFixture::default()
    };

    let nav = NodeFixture {
        tag: "nav".to_string(),
        children: vec![NodeFixture {
            tag: "div".to_string(),
            classes: vec!["container".to_string()],
            children: vec![
                NodeFixture {
                    tag: "button".to_string(),
                    classes: vec!["VET".to_string()],
                    text: "\u{2630}".to_string(),
                    ..NodeFixture::default()
                },
                NodeFixture {
                    tag: "ul".to_string(),
                    children: vec![NodeFixture {
                        tag: "li".to_string(),
                        text: "CONTACT US".to_string(),
                        ..NodeFixture::default()
                    }],
                    ..NodeFixture::default()
                },
            ],
            ..NodeFixture::default()
        }],
        ..NodeFixture::default()
    };

    let main = NodeFixture {
        tag: "main".to_string(),
        children: vec![
            NodeFixture {
                tag: "h2".to_string(),
                text: "Contact PAWfect Animals".to_string(),
                ..NodeFixture::default()
            },
            NodeFixture {
                tag: "p".to_string(),
                text: "Book a consultation or ask about vaccinations.".to_string(),
                ..NodeFixture::default()
            },
            form,
            NodeFixture {
                tag: "div".to_string(),
                classes: vec!["map-placeholder".to_string()],
                text: "Map".to_string(),
                ..NodeFixture::default()
            },
        ],
        ..NodeFixture::default()
    };

    PageFixture {
        path: "/CONTACT_US.html".to_string(),
        body: vec![nav, main],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_builds_and_captures_identically() {
        let fixture = sample_contact_page();
        let page = fixture.build().expect("build");
        let captured = PageFixture::capture(&page, &fixture.path);
        assert_eq!(captured, fixture);
    }

    #[test]
    fn parse_minimal_fixture() {
        let json = br#"{"body":[{"tag":"p","text":"hi"}]}"#;
        let fixture = PageFixture::from_json(json).expect("parse");
        assert_eq!(fixture.path, "/");
        let page = fixture.build().expect("build");
        assert_eq!(page.text_content(page.body()), "hi");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let json = br#"{"body":[{"tag":"p","colour":"red"}]}"#;
        assert!(matches!(
            PageFixture::from_json(json),
            Err(PawfectError::InvalidFixture(_))
        ));
    }

    #[test]
    fn empty_tag_is_rejected() {
        let fixture = PageFixture {
            path: "/".to_string(),
            body: vec![NodeFixture::default()],
        };
        assert!(matches!(fixture.build(), Err(PawfectError::InvalidFixture(_))));
    }

    #[test]
    fn overly_deep_fixture_is_rejected() {
        let mut node = NodeFixture {
            tag: "div".to_string(),
            ..NodeFixture::default()
        };
        for _ in 0..MAX_FIXTURE_DEPTH {
            node = NodeFixture {
                tag: "div".to_string(),
                children: vec![node],
                ..NodeFixture::default()
            };
        }
        let fixture = PageFixture {
            path: "/".to_string(),
            body: vec![node],
        };
        assert!(matches!(fixture.build(), Err(PawfectError::InvalidFixture(_))));
    }
}
