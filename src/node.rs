// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use markuptree::{Element, SVG_NS};

use crate::Error;

/// Elements that are SVG even when cut out of an HTML document without a namespace.
const SVG_ROOTS: &[&str] = &["svg", "symbol", "g"];

/// A markup node the engine can work with.
///
/// Every method operates on an owned value. `Clone` must produce a deep,
/// independent copy, so artifacts never share a node with each other
/// or with the host document.
pub trait MarkupNode: Clone + Send + Sized {
    /// Parses a markup string into a standalone node.
    fn parse(text: &str) -> Result<Self, Error>;

    /// Creates a new empty element.
    fn create_element(namespace: Option<&str>, name: &str) -> Self;

    /// Returns the element's local name.
    fn tag_name(&self) -> &str;

    /// Returns an attribute value by a qualified name.
    fn attribute(&self, name: &str) -> Option<&str>;

    /// Sets an attribute without a namespace.
    fn set_attribute(&mut self, name: &str, value: &str);

    /// Sets a namespaced attribute using a qualified name.
    fn set_attribute_ns(&mut self, namespace: &str, name: &str, value: &str);

    /// Removes an attribute. Does nothing when the attribute is not set.
    fn remove_attribute(&mut self, name: &str);

    /// Appends a child element.
    fn append_child(&mut self, child: Self);

    /// Returns an iterator over this node and its descendant elements in the document order.
    fn descendants<'a>(&'a self) -> Box<dyn Iterator<Item = &'a Self> + 'a>;

    /// Calls `f` for this node and every descendant element in the document order.
    fn visit_mut(&mut self, f: &mut dyn FnMut(&mut Self));

    /// Serializes the node into a standalone markup.
    fn serialize(&self) -> String;

    /// Checks that the node has the specified local name.
    #[inline]
    fn has_tag_name(&self, name: &str) -> bool {
        self.tag_name() == name
    }

    /// Checks that the node has an attribute.
    #[inline]
    fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Returns a non-empty `id` attribute.
    fn element_id(&self) -> Option<&str> {
        self.attribute("id").filter(|id| !id.is_empty())
    }

    /// Returns `href` or `xlink:href`, preferring the former.
    fn href(&self) -> Option<&str> {
        self.attribute("href").or_else(|| self.attribute("xlink:href"))
    }
}

impl MarkupNode for Element {
    fn parse(text: &str) -> Result<Self, Error> {
        let mut root = Element::parse(text)?;
        if root.namespace().is_none() && SVG_ROOTS.contains(&root.name()) {
            root.adopt_namespace(SVG_NS);
        }

        Ok(root)
    }

    fn create_element(namespace: Option<&str>, name: &str) -> Self {
        match namespace {
            Some(ns) => Element::new_ns(ns, name),
            None => Element::new(name),
        }
    }

    #[inline]
    fn tag_name(&self) -> &str {
        self.name()
    }

    #[inline]
    fn attribute(&self, name: &str) -> Option<&str> {
        Element::attribute(self, name)
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        Element::set_attribute(self, name, value);
    }

    fn set_attribute_ns(&mut self, namespace: &str, name: &str, value: &str) {
        Element::set_attribute_ns(self, namespace, name, value);
    }

    fn remove_attribute(&mut self, name: &str) {
        Element::remove_attribute(self, name);
    }

    fn append_child(&mut self, child: Self) {
        self.append(child);
    }

    fn descendants<'a>(&'a self) -> Box<dyn Iterator<Item = &'a Self> + 'a> {
        Box::new(Element::descendants(self))
    }

    fn visit_mut(&mut self, f: &mut dyn FnMut(&mut Self)) {
        f(self);
        for child in self.child_elements_mut() {
            child.visit_mut(f);
        }
    }

    fn serialize(&self) -> String {
        self.to_string()
    }
}
