// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::MarkupNode;

/// An artifact identifier.
///
/// Identifiers are assigned in the discovery order and are unique within a single
/// [`Pipeline::process`](crate::Pipeline::process) call.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ArtifactId(u64);

impl ArtifactId {
    /// Returns the underlying number.
    #[inline]
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A monotonic [`ArtifactId`] source.
#[derive(Debug)]
pub(crate) struct IdGenerator(u64);

impl IdGenerator {
    pub fn new() -> Self {
        IdGenerator(0)
    }

    pub fn next_id(&mut self) -> ArtifactId {
        self.0 += 1;
        ArtifactId(self.0)
    }
}

/// The way an SVG was embedded into a document.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum EmbeddingType {
    /// An `svg` element.
    Inline,
    /// A `symbol` or a `g` element wrapped into a standalone `svg`.
    Sprite,
    /// A `symbol` element. Always promoted to `Sprite`.
    Symbol,
    /// An `img` element with an SVG source.
    ImgSrc,
    /// An `object` element with an SVG data reference.
    Object,
    /// An SVG CSS background image.
    BgImg,
    /// A `g` element with an ID. Always promoted to `Sprite`.
    G,
    /// Not an SVG or cannot be resolved.
    Invalid,
}

impl EmbeddingType {
    /// Returns a human readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            EmbeddingType::Inline => "inline",
            EmbeddingType::Sprite => "sprite",
            EmbeddingType::Symbol => "symbol",
            EmbeddingType::ImgSrc => "img src",
            EmbeddingType::Object => "object",
            EmbeddingType::BgImg => "bg img",
            EmbeddingType::G => "g",
            EmbeddingType::Invalid => "invalid",
        }
    }

    /// Checks that the type describes a reference to an external SVG.
    pub fn is_reference(&self) -> bool {
        matches!(
            self,
            EmbeddingType::ImgSrc | EmbeddingType::Object | EmbeddingType::BgImg
        )
    }
}

impl Default for EmbeddingType {
    #[inline]
    fn default() -> Self {
        EmbeddingType::Invalid
    }
}

impl std::fmt::Display for EmbeddingType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A discovered SVG.
///
/// Owns its node exclusively. Once returned from a [`Pipeline`](crate::Pipeline),
/// an artifact is always valid and has its metadata and presentation markup set.
#[derive(Clone, Debug)]
pub struct SvgArtifact<N> {
    pub(crate) id: ArtifactId,
    pub(crate) node: N,
    pub(crate) location: String,
    pub(crate) embedding_type: EmbeddingType,
    pub(crate) cross_origin: bool,
    pub(crate) sprite_href: Option<String>,
    pub(crate) img_src_href: Option<String>,
    pub(crate) data_src_href: Option<String>,
    pub(crate) view_box: Option<String>,
    pub(crate) width: Option<u32>,
    pub(crate) height: Option<u32>,
    pub(crate) size_label: String,
    pub(crate) presentation_markup: Option<String>,
    pub(crate) sprite_symbols: Option<Vec<N>>,
}

impl<N: MarkupNode> SvgArtifact<N> {
    pub(crate) fn new(id: ArtifactId, node: N, location: &str) -> Self {
        SvgArtifact {
            id,
            node,
            location: location.to_string(),
            embedding_type: EmbeddingType::Invalid,
            cross_origin: false,
            sprite_href: None,
            img_src_href: None,
            data_src_href: None,
            view_box: None,
            width: None,
            height: None,
            size_label: crate::metadata::UNKNOWN_SIZE.to_string(),
            presentation_markup: None,
            sprite_symbols: None,
        }
    }

    /// Rebuilds the artifact around a new node.
    ///
    /// The old node is dropped. Everything derived from a node is reset,
    /// while identity, type and references are kept.
    pub(crate) fn with_node(self, node: N) -> Self {
        SvgArtifact {
            node,
            view_box: None,
            width: None,
            height: None,
            size_label: crate::metadata::UNKNOWN_SIZE.to_string(),
            presentation_markup: None,
            sprite_symbols: None,
            ..self
        }
    }

    /// Returns the artifact identifier.
    #[inline]
    pub fn id(&self) -> ArtifactId {
        self.id
    }

    /// Returns the resolved node.
    #[inline]
    pub fn node(&self) -> &N {
        &self.node
    }

    /// Returns the URL of the document the artifact was found in.
    #[inline]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Returns the embedding type.
    #[inline]
    pub fn embedding_type(&self) -> EmbeddingType {
        self.embedding_type
    }

    /// Checks that the artifact is not `Invalid`.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.embedding_type != EmbeddingType::Invalid
    }

    /// Checks that the artifact came from a different origin than the document.
    #[inline]
    pub fn is_cross_origin(&self) -> bool {
        self.cross_origin
    }

    /// Returns an external `use` reference of an inline `svg`.
    #[inline]
    pub fn sprite_href(&self) -> Option<&str> {
        self.sprite_href.as_deref()
    }

    /// Returns an `img` or background image source.
    #[inline]
    pub fn img_src_href(&self) -> Option<&str> {
        self.img_src_href.as_deref()
    }

    /// Returns an `object` data reference.
    #[inline]
    pub fn data_src_href(&self) -> Option<&str> {
        self.data_src_href.as_deref()
    }

    /// Returns the `viewBox` string, either original or synthesized from the size.
    #[inline]
    pub fn view_box(&self) -> Option<&str> {
        self.view_box.as_deref()
    }

    /// Returns the width in pixels.
    #[inline]
    pub fn width(&self) -> Option<u32> {
        self.width
    }

    /// Returns the height in pixels.
    #[inline]
    pub fn height(&self) -> Option<u32> {
        self.height
    }

    /// Returns the size as `WxH` or `N/A`.
    #[inline]
    pub fn size_label(&self) -> &str {
        &self.size_label
    }

    /// Returns the sanitized markup meant for previews.
    #[inline]
    pub fn presentation_markup(&self) -> Option<&str> {
        self.presentation_markup.as_deref()
    }

    /// Returns the canonical markup.
    pub fn svg_string(&self) -> String {
        self.node.serialize()
    }

    /// Returns the reference that has to be fetched to resolve the artifact.
    pub(crate) fn external_href(&self) -> Option<&str> {
        self.sprite_href
            .as_deref()
            .or(self.img_src_href.as_deref())
            .or(self.data_src_href.as_deref())
    }
}
