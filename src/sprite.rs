// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use markuptree::{SVG_NS, XLINK_NS};

use crate::{EmbeddingType, MarkupNode, SvgArtifact};

/// Attributes copied from a symbol to its wrapper.
const GEOMETRY_ATTRIBUTES: &[&str] = &["viewBox", "width", "height"];

/// Promotes `symbol` and `g` artifacts to standalone sprites.
///
/// Other artifacts are returned untouched.
pub(crate) fn promote<N: MarkupNode>(mut artifact: SvgArtifact<N>) -> SvgArtifact<N> {
    if !matches!(
        artifact.embedding_type,
        EmbeddingType::Symbol | EmbeddingType::G
    ) {
        return artifact;
    }

    // `G` requires an ID during classification, but a symbol may lack one.
    let id = match artifact.node.element_id().map(str::to_string) {
        Some(id) => id,
        None => {
            log::warn!("Sprite {} has no ID and cannot be referenced.", artifact.id);
            artifact.embedding_type = EmbeddingType::Invalid;
            return artifact;
        }
    };

    let node = wrap(artifact.node.clone(), &id);
    let mut artifact = artifact.with_node(node);
    artifact.embedding_type = EmbeddingType::Sprite;
    artifact
}

/// Builds `<svg><original/><use xlink:href="#id"/></svg>`.
fn wrap<N: MarkupNode>(original: N, id: &str) -> N {
    let mut svg = N::create_element(Some(SVG_NS), "svg");
    for name in GEOMETRY_ATTRIBUTES {
        if let Some(value) = original.attribute(name) {
            svg.set_attribute(name, value);
        }
    }

    let mut use_node = N::create_element(Some(SVG_NS), "use");
    use_node.set_attribute_ns(XLINK_NS, "xlink:href", &format!("#{}", id));

    svg.append_child(original);
    svg.append_child(use_node);
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::IdGenerator;
    use crate::classify::{classify, Candidate};
    use crate::Heuristics;
    use markuptree::Element;

    fn run(markup: &str) -> SvgArtifact<Element> {
        let mut ids = IdGenerator::new();
        let a = classify(
            Candidate::Markup(markup.to_string()),
            "https://example.com/",
            &mut ids,
            &Heuristics::default(),
        );
        promote(a)
    }

    #[test]
    fn symbol() {
        let a = run("<symbol id='x' viewBox='0 0 16 16'><path d='M0 0'/></symbol>");
        assert_eq!(a.embedding_type(), EmbeddingType::Sprite);
        assert_eq!(
            a.svg_string(),
            "<svg xmlns=\"http://www.w3.org/2000/svg\" \
             xmlns:xlink=\"http://www.w3.org/1999/xlink\" viewBox=\"0 0 16 16\">\
             <symbol id=\"x\" viewBox=\"0 0 16 16\"><path d=\"M0 0\"/></symbol>\
             <use xlink:href=\"#x\"/></svg>"
        );
    }

    #[test]
    fn g_keeps_content() {
        let a = run("<g id='grp'><rect fill='none' stroke='black'/></g>");
        assert_eq!(a.embedding_type(), EmbeddingType::Sprite);
        let text = a.svg_string();
        assert!(text.contains("<rect fill=\"none\" stroke=\"black\"/>"));
        assert!(text.contains("<use xlink:href=\"#grp\"/>"));
    }

    #[test]
    fn geometry_is_copied() {
        let a = run("<symbol id='s' width='10' height='20'/>");
        assert_eq!(a.node().attribute("width"), Some("10"));
        assert_eq!(a.node().attribute("height"), Some("20"));
        assert_eq!(a.node().attribute("viewBox"), None);
    }

    #[test]
    fn symbol_without_id() {
        let a = run("<symbol/>");
        assert_eq!(a.embedding_type(), EmbeddingType::Invalid);
    }

    #[test]
    fn inline_is_untouched() {
        let a = run("<svg width='1'/>");
        assert_eq!(a.embedding_type(), EmbeddingType::Inline);
        assert_eq!(a.node().children().len(), 0);
    }
}
