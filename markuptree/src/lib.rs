/*!
Represents an SVG or XHTML fragment as an owned, mutable tree.

`markuptree` uses [`roxmltree`](https://github.com/RazrFalcon/roxmltree) for parsing
and [`xmlwriter`](https://github.com/RazrFalcon/xmlwriter) for writing,
but unlike `roxmltree` the produced tree owns its data and can be edited,
cloned and serialized back without keeping the source text alive.

Only elements and text nodes are preserved. Comments, processing instructions
and the DTD are dropped during parsing.
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![warn(missing_copy_implementations)]

mod parse;
mod writer;

pub use roxmltree::{self, Error};

/// The SVG namespace URI.
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";
/// The XLink namespace URI.
pub const XLINK_NS: &str = "http://www.w3.org/1999/xlink";
/// The XML namespace URI.
pub const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// A tree node.
#[derive(Clone, PartialEq, Debug)]
pub enum Node {
    /// An element node.
    Element(Element),
    /// A text node.
    Text(String),
}

impl From<Element> for Node {
    #[inline]
    fn from(e: Element) -> Self {
        Node::Element(e)
    }
}

/// An element attribute.
#[derive(Clone, PartialEq, Debug)]
pub struct Attribute {
    /// A qualified name, like `viewBox` or `xlink:href`.
    pub name: String,
    /// Attribute's namespace URI. Unprefixed attributes have none.
    pub namespace: Option<String>,
    /// An unescaped value.
    pub value: String,
}

impl Attribute {
    /// Returns the name prefix, if any.
    pub fn prefix(&self) -> Option<&str> {
        self.name.split_once(':').map(|(prefix, _)| prefix)
    }

    /// Returns the name without a prefix.
    pub fn local_name(&self) -> &str {
        match self.name.split_once(':') {
            Some((_, local)) => local,
            None => &self.name,
        }
    }
}

/// An element with its attributes and children.
///
/// Cloning an element clones the whole subtree,
/// so two clones never share any data.
#[derive(Clone, PartialEq)]
pub struct Element {
    name: String,
    namespace: Option<String>,
    attributes: Vec<Attribute>,
    children: Vec<Node>,
}

impl Element {
    /// Creates a new element without a namespace.
    pub fn new(name: &str) -> Self {
        Element {
            name: name.to_string(),
            namespace: None,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Creates a new element in the specified namespace.
    pub fn new_ns(namespace: &str, name: &str) -> Self {
        let mut e = Element::new(name);
        e.namespace = Some(namespace.to_string());
        e
    }

    /// Parses the root element of an XML string.
    ///
    /// A DTD is allowed, but entities declared in it are not preserved.
    pub fn parse(text: &str) -> Result<Self, Error> {
        parse::parse(text)
    }

    /// Returns the element's local name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the element's namespace URI.
    #[inline]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Checks that the element has the specified local name.
    #[inline]
    pub fn has_name(&self, name: &str) -> bool {
        self.name == name
    }

    /// Returns element's attributes in the document order.
    #[inline]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Returns an attribute value by a qualified name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Checks that the element has an attribute with the specified qualified name.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.name == name)
    }

    /// Returns the `id` attribute value or an empty string.
    pub fn element_id(&self) -> &str {
        self.attribute("id").unwrap_or("")
    }

    /// Sets an attribute without a namespace.
    ///
    /// Replaces the value in place when the attribute is already present.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        self.set_attribute_impl(None, name, value);
    }

    /// Sets a namespaced attribute. `name` must be a qualified name, like `xlink:href`.
    pub fn set_attribute_ns(&mut self, namespace: &str, name: &str, value: &str) {
        self.set_attribute_impl(Some(namespace), name, value);
    }

    fn set_attribute_impl(&mut self, namespace: Option<&str>, name: &str, value: &str) {
        if let Some(attr) = self.attributes.iter_mut().find(|a| a.name == name) {
            attr.value = value.to_string();
            attr.namespace = namespace.map(str::to_string);
            return;
        }

        self.attributes.push(Attribute {
            name: name.to_string(),
            namespace: namespace.map(str::to_string),
            value: value.to_string(),
        });
    }

    /// Removes an attribute and returns its value.
    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        let idx = self.attributes.iter().position(|a| a.name == name)?;
        Some(self.attributes.remove(idx).value)
    }

    /// Returns children nodes.
    #[inline]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Checks that the element has at least one child node.
    #[inline]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Returns an iterator over children elements.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Returns an iterator over mutable children elements.
    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Appends a child node.
    pub fn append<T: Into<Node>>(&mut self, node: T) {
        self.children.push(node.into());
    }

    /// Returns an iterator over this element and its descendant elements,
    /// in the document order.
    pub fn descendants(&self) -> Descendants {
        Descendants { stack: vec![self] }
    }

    /// Moves this element and every descendant element without a namespace
    /// into the specified one.
    ///
    /// Useful when a fragment was cut out of an HTML document, where SVG elements
    /// are implicitly namespaced.
    pub fn adopt_namespace(&mut self, namespace: &str) {
        if self.namespace.is_none() {
            self.namespace = Some(namespace.to_string());
        }

        for child in &mut self.children {
            if let Node::Element(ref mut e) = child {
                e.adopt_namespace(namespace);
            }
        }
    }
}

/// Writes the element without indentation.
impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(&writer::write(self))
    }
}

impl std::fmt::Debug for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        macro_rules! writeln_indented {
            ($depth:expr, $f:expr, $fmt:expr) => {
                for _ in 0..$depth { write!($f, "    ")?; }
                writeln!($f, $fmt)?;
            };
            ($depth:expr, $f:expr, $fmt:expr, $($arg:tt)*) => {
                for _ in 0..$depth { write!($f, "    ")?; }
                writeln!($f, $fmt, $($arg)*)?;
            };
        }

        fn print_element(
            e: &Element,
            depth: usize,
            f: &mut std::fmt::Formatter,
        ) -> Result<(), std::fmt::Error> {
            writeln_indented!(depth, f, "Element {{");
            writeln_indented!(depth, f, "    tag_name: {:?}", e.name);

            if !e.attributes.is_empty() {
                writeln_indented!(depth + 1, f, "attributes: [");
                for attr in &e.attributes {
                    writeln_indented!(depth + 2, f, "{}={:?}", attr.name, attr.value);
                }
                writeln_indented!(depth + 1, f, "]");
            }

            if e.has_children() {
                writeln_indented!(depth, f, "    children: [");
                for child in &e.children {
                    match child {
                        Node::Element(ref c) => print_element(c, depth + 2, f)?,
                        Node::Text(ref text) => {
                            writeln_indented!(depth + 2, f, "Text({:?})", text);
                        }
                    }
                }
                writeln_indented!(depth, f, "    ]");
            }

            writeln_indented!(depth, f, "}}");
            Ok(())
        }

        print_element(self, 0, f)
    }
}

/// An iterator over an element and its descendant elements.
#[derive(Clone, Debug)]
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let e = self.stack.pop()?;
        // Reversed, so the first child will be popped first.
        for child in e.children.iter().rev() {
            if let Node::Element(ref c) = child {
                self.stack.push(c);
            }
        }

        Some(e)
    }
}
