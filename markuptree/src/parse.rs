use roxmltree::Error;

use crate::{Attribute, Element, Node, XLINK_NS, XML_NS};

pub(crate) fn parse(text: &str) -> Result<Element, Error> {
    let xml_opt = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..Default::default()
    };

    let xml = roxmltree::Document::parse_with_options(text, xml_opt)?;
    Ok(parse_xml_element(xml.root_element()))
}

fn parse_xml_element(node: roxmltree::Node) -> Element {
    let tag_name = node.tag_name();
    let mut element = match tag_name.namespace() {
        Some(ns) => Element::new_ns(ns, tag_name.name()),
        None => Element::new(tag_name.name()),
    };

    for attr in node.attributes() {
        let name = match qualified_attribute_name(node, &attr) {
            Some(name) => name,
            None => {
                log::warn!("Attribute '{}' has an unknown namespace prefix. Skipped.", attr.name());
                continue;
            }
        };

        element.attributes.push(Attribute {
            name,
            namespace: attr.namespace().map(str::to_string),
            value: attr.value().to_string(),
        });
    }

    for child in node.children() {
        if child.is_element() {
            element.children.push(Node::Element(parse_xml_element(child)));
        } else if child.is_text() {
            if let Some(text) = child.text() {
                element.children.push(Node::Text(text.to_string()));
            }
        }
    }

    element
}

fn qualified_attribute_name(node: roxmltree::Node, attr: &roxmltree::Attribute) -> Option<String> {
    let ns = match attr.namespace() {
        Some(ns) => ns,
        None => return Some(attr.name().to_string()),
    };

    let prefix = match ns {
        XML_NS => "xml",
        // Always use the conventional prefix, so writers don't have to track the original one.
        XLINK_NS => "xlink",
        _ => node.lookup_prefix(ns)?,
    };

    Some(format!("{}:{}", prefix, attr.name()))
}
