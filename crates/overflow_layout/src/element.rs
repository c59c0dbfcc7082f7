//! Declarative element descriptions
//!
//! An [`Element`] is what a widget's `render` produces: classes, attributes,
//! a Taffy style and children. Hosts turn it into a layout tree (see
//! [`LayoutTree::build`](crate::tree::LayoutTree::build)) and use the
//! markers on it to route input:
//!
//! - `region(name)` marks a hover region; the host reports pointer
//!   enter/leave for it by name
//! - `viewport()` marks the element whose box is the scroll viewport
//!
//! # Example
//!
//! ```rust
//! use overflow_layout::element::div;
//!
//! let el = div()
//!     .class("card")
//!     .class_if(true, "card--active")
//!     .attr("data-id", "7")
//!     .child(div().class("card__body"));
//!
//! assert_eq!(el.class_name(), "card card--active");
//! assert_eq!(el.attribute("data-id"), Some("7"));
//! ```

use indexmap::IndexMap;
use taffy::prelude::*;

/// A node of a rendered element tree
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    role: Option<String>,
    classes: Vec<String>,
    attrs: IndexMap<String, String>,
    style: Style,
    region: Option<String>,
    viewport: bool,
    children: Vec<Element>,
}

/// Create an empty element
pub fn div() -> Element {
    Element::default()
}

impl Element {
    // =========================================================================
    // Builder
    // =========================================================================

    /// Add one or more whitespace-separated classes
    pub fn class(mut self, class: impl AsRef<str>) -> Self {
        for token in class.as_ref().split_whitespace() {
            if !self.classes.iter().any(|c| c == token) {
                self.classes.push(token.to_string());
            }
        }
        self
    }

    /// Add classes only when `condition` holds
    pub fn class_if(self, condition: bool, class: impl AsRef<str>) -> Self {
        if condition {
            self.class(class)
        } else {
            self
        }
    }

    /// Add caller-supplied classes, if any
    pub fn class_opt(self, class: Option<&str>) -> Self {
        match class {
            Some(class) => self.class(class),
            None => self,
        }
    }

    /// Set an attribute (later values win)
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Set the accessibility role
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn aria_label(self, label: impl Into<String>) -> Self {
        self.attr("aria-label", label)
    }

    pub fn aria_hidden(self) -> Self {
        self.attr("aria-hidden", "true")
    }

    /// Replace the layout style
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Fixed width in pixels
    pub fn w(mut self, px: f32) -> Self {
        self.style.size.width = Dimension::Length(px);
        self
    }

    /// Fixed height in pixels
    pub fn h(mut self, px: f32) -> Self {
        self.style.size.height = Dimension::Length(px);
        self
    }

    pub fn size(self, width: f32, height: f32) -> Self {
        self.w(width).h(height)
    }

    /// Neither grow nor shrink inside a flex parent
    pub fn flex_none(mut self) -> Self {
        self.style.flex_grow = 0.0;
        self.style.flex_shrink = 0.0;
        self
    }

    /// Mark this element as a named hover region
    pub fn region(mut self, name: impl Into<String>) -> Self {
        self.region = Some(name.into());
        self
    }

    /// Mark this element as the scroll viewport
    pub fn viewport(mut self) -> Self {
        self.viewport = true;
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn role_name(&self) -> Option<&str> {
        self.role.as_deref()
    }

    pub fn class_list(&self) -> &[String] {
        &self.classes
    }

    /// Classes joined with single spaces
    pub fn class_name(&self) -> String {
        self.classes.join(" ")
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Attributes in insertion order
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn layout_style(&self) -> &Style {
        &self.style
    }

    pub fn region_name(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn is_viewport(&self) -> bool {
        self.viewport
    }

    pub fn child_elements(&self) -> &[Element] {
        &self.children
    }

    /// Depth-first search, including `self`
    pub fn find(&self, predicate: &dyn Fn(&Element) -> bool) -> Option<&Element> {
        if predicate(self) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(predicate))
    }

    /// Find the hover region with the given name
    pub fn find_region(&self, name: &str) -> Option<&Element> {
        self.find(&|el| el.region_name() == Some(name))
    }

    /// Names of all hover regions, in tree order
    pub fn region_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_regions(&mut names);
        names
    }

    fn collect_regions<'a>(&'a self, names: &mut Vec<&'a str>) {
        if let Some(name) = self.region.as_deref() {
            names.push(name);
        }
        for child in &self.children {
            child.collect_regions(names);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_tokens_deduplicated() {
        let el = div()
            .class("a b")
            .class("b  c")
            .class_if(false, "hidden")
            .class_opt(None)
            .class_opt(Some("d"));

        assert_eq!(el.class_list(), ["a", "b", "c", "d"]);
        assert!(el.has_class("c"));
        assert!(!el.has_class("hidden"));
    }

    #[test]
    fn test_attributes_keep_order_and_override() {
        let el = div()
            .role("region")
            .aria_label("first")
            .attr("data-x", "1")
            .aria_label("second");

        let attrs: Vec<_> = el.attributes().collect();
        assert_eq!(attrs, [("aria-label", "second"), ("data-x", "1")]);
        assert_eq!(el.role_name(), Some("region"));
    }

    #[test]
    fn test_find_regions() {
        let el = div()
            .child(div().region("left"))
            .child(div().child(div().region("down")))
            .child(div().viewport());

        assert_eq!(el.region_names(), ["left", "down"]);
        assert!(el.find_region("down").is_some());
        assert!(el.find_region("up").is_none());
        assert!(el.find(&|e| e.is_viewport()).is_some());
    }

    #[test]
    fn test_size_and_flex_none() {
        let el = div().size(300.0, 40.0).flex_none();
        let style = el.layout_style();
        assert_eq!(style.size.width, Dimension::Length(300.0));
        assert_eq!(style.size.height, Dimension::Length(40.0));
        assert_eq!(style.flex_shrink, 0.0);
    }
}
