//! # Page Module
//!
//! The in-memory UI tree every widget reads and mutates.
//!
//! A `Page` is an arena of [`Element`]s keyed by [`ElementId`]. It models the
//! small slice of a document the widgets rely on: tags, DOM ids, classes,
//! attributes, inline styles, text, form values and the disabled flag, plus
//! ordered parent/child links.
//!
//! Elements are created detached and become part of the document once they
//! are appended under the root. Lookups by DOM id and tag/class queries only
//! see attached elements, in document (preorder) order.

use crate::{ElementId, PawfectError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

// =============================================================================
// ELEMENT
// =============================================================================

/// One node of the UI tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Lowercase tag name.
    pub tag: String,
    /// The `id` attribute, if any.
    pub dom_id: Option<String>,
    pub classes: BTreeSet<String>,
    pub attrs: BTreeMap<String, String>,
    pub styles: BTreeMap<String, String>,
    /// Text owned directly by this element (not by its children).
    pub text: String,
    /// Current value of a form control.
    pub value: String,
    pub disabled: bool,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

impl Element {
    /// Create a detached element with the given tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        let tag: String = tag.into();
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.dom_id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.insert(class.into());
        self
    }

    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_style(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.styles.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Upper-case tag name, as reported by `tagName`.
    #[must_use]
    pub fn tag_name(&self) -> String {
        self.tag.to_ascii_uppercase()
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Boolean attributes (`required`, `multiple`) are present or absent.
    #[must_use]
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    #[must_use]
    pub fn style(&self, name: &str) -> Option<&str> {
        self.styles.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    #[must_use]
    pub fn children(&self) -> &[ElementId] {
        &self.children
    }
}

// =============================================================================
// EVENTS
// =============================================================================

/// Kind of user interaction delivered to a widget handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Submit,
    Input,
    Blur,
}

/// A user interaction with a target element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    pub target: ElementId,
    default_prevented: bool,
}

impl Event {
    #[must_use]
    pub fn new(kind: EventKind, target: ElementId) -> Self {
        Self {
            kind,
            target,
            default_prevented: false,
        }
    }

    /// Suppress the browser's default action (navigation, form post).
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    #[must_use]
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// A request to bring an element into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollRequest {
    pub target: ElementId,
    pub smooth: bool,
}

// =============================================================================
// PAGE
// =============================================================================

/// The document: an arena of elements under an `html` root with a `body`.
#[derive(Debug, Clone)]
pub struct Page {
    elements: BTreeMap<ElementId, Element>,
    next_id: u64,
    root: ElementId,
    body: ElementId,
    last_scroll: Option<ScrollRequest>,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    /// Create an empty document with `html` and `body`.
    #[must_use]
    pub fn new() -> Self {
        let root = ElementId(0);
        let body = ElementId(1);

        let mut html = Element::new("html");
        html.children.push(body);
        let mut body_el = Element::new("body");
        body_el.parent = Some(root);

        let mut elements = BTreeMap::new();
        elements.insert(root, html);
        elements.insert(body, body_el);

        Self {
            elements,
            next_id: 2,
            root,
            body,
            last_scroll: None,
        }
    }

    #[must_use]
    pub fn root(&self) -> ElementId {
        self.root
    }

    #[must_use]
    pub fn body(&self) -> ElementId {
        self.body
    }

    /// Number of live elements (attached or not).
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    #[must_use]
    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(&id)
    }

    /// Like [`get`](Self::get) but a missing element is an error.
    pub fn element(&self, id: ElementId) -> Result<&Element, PawfectError> {
        self.elements
            .get(&id)
            .ok_or(PawfectError::ElementNotFound(id))
    }

    /// Like [`get_mut`](Self::get_mut) but a missing element is an error.
    pub fn element_mut(&mut self, id: ElementId) -> Result<&mut Element, PawfectError> {
        self.elements
            .get_mut(&id)
            .ok_or(PawfectError::ElementNotFound(id))
    }

    // =========================================================================
    // STRUCTURE
    // =========================================================================

    /// Add a detached element to the arena.
    pub fn create(&mut self, mut element: Element) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        element.parent = None;
        element.children.clear();
        self.elements.insert(id, element);
        id
    }

    /// Create an element and append it as the last child of `parent`.
    pub fn append(&mut self, parent: ElementId, element: Element) -> Result<ElementId, PawfectError> {
        self.element(parent)?;
        let id = self.create(element);
        self.append_child(parent, id)?;
        Ok(id)
    }

    /// Move `child` to the end of `parent`'s children.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) -> Result<(), PawfectError> {
        self.check_insertable(parent, child)?;
        self.detach(child);
        self.element_mut(parent)?.children.push(child);
        self.element_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Move `child` to the front of `parent`'s children.
    pub fn prepend_child(&mut self, parent: ElementId, child: ElementId) -> Result<(), PawfectError> {
        self.check_insertable(parent, child)?;
        self.detach(child);
        self.element_mut(parent)?.children.insert(0, child);
        self.element_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Move `node` so it directly follows `reference` under the same parent.
    pub fn insert_after(&mut self, reference: ElementId, node: ElementId) -> Result<(), PawfectError> {
        let parent = self
            .element(reference)?
            .parent
            .ok_or(PawfectError::ElementNotFound(reference))?;
        self.check_insertable(parent, node)?;
        self.detach(node);

        let siblings = &mut self.element_mut(parent)?.children;
        let index = siblings
            .iter()
            .position(|&c| c == reference)
            .map_or(siblings.len(), |i| i + 1);
        siblings.insert(index, node);
        self.element_mut(node)?.parent = Some(parent);
        Ok(())
    }

    /// Remove an element and its whole subtree.
    ///
    /// Returns `false` when the element was already gone. The root and the
    /// body cannot be removed.
    pub fn remove(&mut self, id: ElementId) -> bool {
        if id == self.root || id == self.body || !self.contains(id) {
            return false;
        }
        self.detach(id);
        let mut doomed = self.descendants(id);
        doomed.push(id);
        for d in doomed {
            self.elements.remove(&d);
        }
        if self.last_scroll.is_some_and(|s| !self.contains(s.target)) {
            self.last_scroll = None;
        }
        true
    }

    /// Remove every child of `id` (`innerHTML = ''`).
    pub fn clear_children(&mut self, id: ElementId) -> Result<(), PawfectError> {
        let children = self.element(id)?.children.clone();
        for child in children {
            self.remove(child);
        }
        Ok(())
    }

    fn detach(&mut self, id: ElementId) {
        let parent = self.elements.get_mut(&id).and_then(|e| e.parent.take());
        if let Some(parent) = parent
            && let Some(p) = self.elements.get_mut(&parent)
        {
            p.children.retain(|&c| c != id);
        }
    }

    fn check_insertable(&self, parent: ElementId, child: ElementId) -> Result<(), PawfectError> {
        self.element(parent)?;
        self.element(child)?;
        // An element cannot be moved under itself or its own subtree.
        if child == self.root || child == parent || self.is_ancestor(child, parent) {
            return Err(PawfectError::InvalidArgument(format!(
                "cannot insert {} under {}",
                child, parent
            )));
        }
        Ok(())
    }

    fn is_ancestor(&self, ancestor: ElementId, mut node: ElementId) -> bool {
        while let Some(parent) = self.parent(node) {
            if parent == ancestor {
                return true;
            }
            node = parent;
        }
        false
    }

    // =========================================================================
    // NAVIGATION
    // =========================================================================

    #[must_use]
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.elements.get(&id).and_then(|e| e.parent)
    }

    #[must_use]
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.elements.get(&id).map_or(&[], |e| e.children.as_slice())
    }

    /// The element following `id` under the same parent.
    #[must_use]
    pub fn next_sibling(&self, id: ElementId) -> Option<ElementId> {
        let siblings = self.children(self.parent(id)?);
        let index = siblings.iter().position(|&c| c == id)?;
        siblings.get(index + 1).copied()
    }

    /// Whether `id` is reachable from the root.
    #[must_use]
    pub fn is_attached(&self, id: ElementId) -> bool {
        id == self.root || (self.contains(id) && self.is_ancestor(self.root, id))
    }

    /// All elements below `id` in preorder, excluding `id` itself.
    #[must_use]
    pub fn descendants(&self, id: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Elements below `scope` matching `pred`, in document order.
    pub fn find_all<F>(&self, scope: ElementId, pred: F) -> Vec<ElementId>
    where
        F: Fn(&Element) -> bool,
    {
        self.descendants(scope)
            .into_iter()
            .filter(|id| self.elements.get(id).is_some_and(&pred))
            .collect()
    }

    /// First element below `scope` matching `pred`.
    pub fn find_first<F>(&self, scope: ElementId, pred: F) -> Option<ElementId>
    where
        F: Fn(&Element) -> bool,
    {
        self.descendants(scope)
            .into_iter()
            .find(|id| self.elements.get(id).is_some_and(&pred))
    }

    /// Elements below `scope` with the given tag.
    #[must_use]
    pub fn by_tag(&self, scope: ElementId, tag: &str) -> Vec<ElementId> {
        self.find_all(scope, |e| e.tag == tag)
    }

    /// First element below `scope` carrying `class`.
    #[must_use]
    pub fn first_by_class(&self, scope: ElementId, class: &str) -> Option<ElementId> {
        self.find_first(scope, |e| e.has_class(class))
    }

    /// The attached element with the given DOM id (`getElementById`).
    #[must_use]
    pub fn by_dom_id(&self, dom_id: &str) -> Option<ElementId> {
        self.find_first(self.root, |e| e.dom_id.as_deref() == Some(dom_id))
    }

    /// Text of the element and all its descendants (`textContent`).
    #[must_use]
    pub fn text_content(&self, id: ElementId) -> String {
        let mut out = String::new();
        if let Some(e) = self.elements.get(&id) {
            out.push_str(&e.text);
        }
        for d in self.descendants(id) {
            if let Some(e) = self.elements.get(&d) {
                out.push_str(&e.text);
            }
        }
        out
    }

    // =========================================================================
    // MUTATION HELPERS
    // =========================================================================

    pub fn add_class(&mut self, id: ElementId, class: &str) -> Result<(), PawfectError> {
        self.element_mut(id)?.classes.insert(class.to_string());
        Ok(())
    }

    /// Remove a class. Removing an absent class is a no-op.
    pub fn remove_class(&mut self, id: ElementId, class: &str) -> Result<(), PawfectError> {
        self.element_mut(id)?.classes.remove(class);
        Ok(())
    }

    /// Toggle a class and return whether it is now present.
    pub fn toggle_class(&mut self, id: ElementId, class: &str) -> Result<bool, PawfectError> {
        let classes = &mut self.element_mut(id)?.classes;
        if classes.remove(class) {
            Ok(false)
        } else {
            classes.insert(class.to_string());
            Ok(true)
        }
    }

    #[must_use]
    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.elements.get(&id).is_some_and(|e| e.has_class(class))
    }

    pub fn set_style(&mut self, id: ElementId, name: &str, value: &str) -> Result<(), PawfectError> {
        self.element_mut(id)?
            .styles
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    #[must_use]
    pub fn style(&self, id: ElementId, name: &str) -> Option<&str> {
        self.elements.get(&id).and_then(|e| e.style(name))
    }

    pub fn set_attr(&mut self, id: ElementId, name: &str, value: &str) -> Result<(), PawfectError> {
        self.element_mut(id)?
            .attrs
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    #[must_use]
    pub fn attr(&self, id: ElementId, name: &str) -> Option<&str> {
        self.elements.get(&id).and_then(|e| e.attr(name))
    }

    pub fn set_text(&mut self, id: ElementId, text: &str) -> Result<(), PawfectError> {
        self.element_mut(id)?.text = text.to_string();
        Ok(())
    }

    /// Current value of a form control.
    #[must_use]
    pub fn value(&self, id: ElementId) -> Option<&str> {
        self.elements.get(&id).map(|e| e.value.as_str())
    }

    pub fn set_value(&mut self, id: ElementId, value: &str) -> Result<(), PawfectError> {
        self.element_mut(id)?.value = value.to_string();
        Ok(())
    }

    pub fn set_disabled(&mut self, id: ElementId, disabled: bool) -> Result<(), PawfectError> {
        self.element_mut(id)?.disabled = disabled;
        Ok(())
    }

    /// Record a request to scroll `id` into view.
    pub fn scroll_into_view(&mut self, id: ElementId, smooth: bool) -> Result<(), PawfectError> {
        self.element(id)?;
        self.last_scroll = Some(ScrollRequest { target: id, smooth });
        Ok(())
    }

    /// The most recent scroll request, if its target still exists.
    #[must_use]
    pub fn last_scroll(&self) -> Option<ScrollRequest> {
        self.last_scroll
    }
}

// =============================================================================
// TESTS
// =============================================================================
