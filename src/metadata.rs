// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::str::FromStr;

use svgtypes::{Length, LengthUnit, ViewBox};

use crate::{MarkupNode, SvgArtifact};

/// A size label of an artifact without known dimensions.
pub(crate) const UNKNOWN_SIZE: &str = "N/A";

/// Derives `viewBox`, width, height and the size label from the node attributes.
///
/// Sizes are never guessed: when neither a `viewBox` nor absolute
/// `width` and `height` are present, they stay unset.
pub(crate) fn extract<N: MarkupNode>(artifact: &mut SvgArtifact<N>) {
    if let Some(value) = artifact.node.attribute("viewBox") {
        artifact.view_box = Some(value.to_string());
        if let Ok(vb) = ViewBox::from_str(value) {
            artifact.width = to_pixels(vb.w);
            artifact.height = to_pixels(vb.h);
        }
    } else {
        let width = artifact.node.attribute("width").and_then(parse_length);
        let height = artifact.node.attribute("height").and_then(parse_length);
        if let (Some(w), Some(h)) = (width, height) {
            artifact.width = Some(w);
            artifact.height = Some(h);
            artifact.view_box = Some(format!("0 0 {} {}", w, h));
        }
    }

    artifact.size_label = match (artifact.width, artifact.height) {
        (Some(w), Some(h)) => format!("{}x{}", w, h),
        _ => UNKNOWN_SIZE.to_string(),
    };
}

/// Parses an absolute length in pixels.
///
/// Percentages and font-relative units are rejected.
fn parse_length(text: &str) -> Option<u32> {
    let length = Length::from_str(text.trim()).ok()?;
    match length.unit {
        LengthUnit::None | LengthUnit::Px => to_pixels(length.number),
        _ => None,
    }
}

fn to_pixels(n: f64) -> Option<u32> {
    if n.is_finite() && n >= 0.0 && n <= u32::MAX as f64 {
        Some(n.ceil() as u32)
    } else {
        None
    }
}
