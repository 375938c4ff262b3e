// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
`svgharvest` collects SVG graphics embedded into a document in many different ways
and turns them into a uniform, deduplicated collection of standalone SVG documents.

## Supported embeddings

- Inline `svg` elements, including the shells that only `use` a symbol from an external sprite sheet
- `symbol` elements and `g` elements with an ID. They will be wrapped into a standalone `svg`
- `object` elements
- `img` elements with an SVG file, a base64 or a plain text data URI
- CSS background images
- Sprite sheets will be expanded into one artifact per symbol
- SVGZ files will be decompressed

Each artifact has a canonical markup, a sanitized presentation copy and a size
derived from `viewBox` or absolute `width` and `height`.

## Limitations

- Candidates are produced by a page scanner, which is not a part of this crate
- Candidates must be well-formed XML. Only HTML start tags of `img` and `object` are accepted as well
- Neither rendering nor optimization are performed
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![allow(clippy::uninlined_format_args)]

mod artifact;
mod classify;
mod dedup;
mod error;
mod heuristics;
mod metadata;
mod node;
mod options;
mod pipeline;
mod presentation;
mod resolve;
mod sprite;

pub use markuptree;

pub use crate::artifact::{ArtifactId, EmbeddingType, SvgArtifact};
pub use crate::classify::Candidate;
pub use crate::error::Error;
pub use crate::heuristics::Heuristics;
pub use crate::node::MarkupNode;
pub use crate::options::Options;
pub use crate::pipeline::Pipeline;
pub use crate::resolve::{decompress_svgz, DefaultFetcher, Fetch};
