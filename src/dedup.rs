// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::collections::HashSet;

use crate::{MarkupNode, SvgArtifact};

/// Removes artifacts with the same canonical markup.
///
/// The first occurrence is kept and the order is preserved.
pub(crate) fn dedup<N: MarkupNode>(artifacts: Vec<SvgArtifact<N>>) -> Vec<SvgArtifact<N>> {
    let mut seen = HashSet::new();
    artifacts
        .into_iter()
        .filter(|a| {
            let is_new = seen.insert(a.svg_string());
            if !is_new {
                log::debug!("Artifact {} is a duplicate.", a.id);
            }
            is_new
        })
        .collect()
}
