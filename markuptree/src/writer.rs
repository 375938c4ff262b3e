use xmlwriter::{Indent, Options, XmlWriter};

use crate::{Element, Node, XML_NS};

/// Writes an element without indentation.
pub(crate) fn write(root: &Element) -> String {
    let opt = Options {
        use_single_quote: false,
        indent: Indent::None,
        attributes_indent: Indent::None,
    };

    let mut xml = XmlWriter::new(opt);
    write_element(root, None, true, &mut xml);
    xml.end_document()
}

fn write_element(e: &Element, parent_ns: Option<&str>, is_root: bool, xml: &mut XmlWriter) {
    xml.start_element(&e.name);

    // Unnamespaced children of a namespaced parent are written as is,
    // so they will inherit the parent namespace during the next parsing.
    if let Some(ns) = e.namespace() {
        if parent_ns != Some(ns) {
            xml.write_attribute("xmlns", ns);
        }
    }

    if is_root {
        for (prefix, ns) in collect_prefixes(e) {
            xml.write_attribute_fmt(&format!("xmlns:{}", prefix), format_args!("{}", ns));
        }
    }

    for attr in &e.attributes {
        xml.write_attribute(&attr.name, &escape(&attr.value, true));
    }

    let ns = e.namespace().or(parent_ns);
    for child in &e.children {
        match child {
            Node::Element(ref c) => write_element(c, ns, false, xml),
            Node::Text(ref text) => xml.write_text(&escape(text, false)),
        }
    }

    xml.end_element();
}

/// Collects all namespace prefixes used by attributes in the subtree.
fn collect_prefixes(root: &Element) -> Vec<(&str, &str)> {
    let mut prefixes: Vec<(&str, &str)> = Vec::new();
    for e in root.descendants() {
        for attr in &e.attributes {
            let (prefix, ns) = match (attr.prefix(), attr.namespace.as_deref()) {
                (Some(prefix), Some(ns)) => (prefix, ns),
                _ => continue,
            };

            if ns == XML_NS {
                continue;
            }

            if !prefixes.iter().any(|(p, _)| *p == prefix) {
                prefixes.push((prefix, ns));
            }
        }
    }

    prefixes
}

// `xmlwriter` escapes only quotes in attributes and `<` in text.
fn escape(text: &str, is_attribute: bool) -> String {
    let text = text.replace('&', "&amp;");
    if is_attribute {
        text.replace('<', "&lt;")
    } else {
        text
    }
}
