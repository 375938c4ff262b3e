// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::{Heuristics, MarkupNode, SvgArtifact};

/// Attributes that bind a graphic to the host page layout.
const LAYOUT_ATTRIBUTES: &[&str] = &["height", "width", "style", "class"];

/// Builds a sanitized copy of the node meant for previews.
///
/// Cross-origin artifacts are kept intact, since we cannot tell
/// which of their attributes are safe to drop.
pub(crate) fn build<N: MarkupNode>(artifact: &mut SvgArtifact<N>) {
    let mut node = artifact.node.clone();
    if !artifact.cross_origin {
        for name in LAYOUT_ATTRIBUTES {
            node.remove_attribute(name);
        }

        // Keep the aspect ratio after the size was removed.
        if !node.has_attribute("viewBox") {
            if let Some(ref view_box) = artifact.view_box {
                node.set_attribute("viewBox", view_box);
            }
        }
    }

    artifact.presentation_markup = Some(node.serialize());
}

impl<N: MarkupNode> SvgArtifact<N> {
    /// Checks that the markup mentions a white color,
    /// so the graphic is likely invisible on a light background.
    pub fn white_fill(&self) -> bool {
        self.white_fill_with(&Heuristics::default())
    }

    /// Like [`white_fill`](Self::white_fill), but with custom color spellings.
    pub fn white_fill_with(&self, heuristics: &Heuristics) -> bool {
        heuristics.has_white_fill(&self.svg_string())
    }

    /// Removes `fill="none"` from the root node, unless it has a stroke.
    ///
    /// A graphic without both fill and stroke is usually invisible by accident.
    /// Returns `true` when the attribute was removed.
    pub fn remove_fill_none(&mut self) -> bool {
        if self.node.attribute("fill") != Some("none") || self.node.has_attribute("stroke") {
            return false;
        }

        self.node.remove_attribute("fill");
        build(self);
        true
    }

    /// Removes the `class` attribute from all elements.
    ///
    /// Classes are meaningless outside the host page stylesheet.
    pub fn remove_class(&mut self) {
        self.node
            .visit_mut(&mut |node: &mut N| node.remove_attribute("class"));
        build(self);
    }
}
