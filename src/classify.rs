// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::artifact::IdGenerator;
use crate::{EmbeddingType, Error, Heuristics, MarkupNode, SvgArtifact};

/// A raw candidate produced by a page scanner.
#[derive(Clone, Debug)]
pub enum Candidate<N> {
    /// An owned copy of a document node.
    Node(N),
    /// A markup string, like an element's `outerHTML`.
    ///
    /// Must be well-formed XML, except for HTML start tags of `img` and `object`
    /// elements, like `<img src="icon.svg">`.
    Markup(String),
    /// A computed CSS `background-image` value, like `url("icon.svg")`.
    BackgroundImage(String),
}

/// Creates an artifact from a candidate and assigns its embedding type.
///
/// Never fails. Everything we cannot recognize becomes `Invalid`.
pub(crate) fn classify<N: MarkupNode>(
    candidate: Candidate<N>,
    location: &str,
    ids: &mut IdGenerator,
    heuristics: &Heuristics,
) -> SvgArtifact<N> {
    let id = ids.next_id();
    match candidate {
        Candidate::Node(node) => classify_node(SvgArtifact::new(id, node, location), heuristics),
        Candidate::Markup(text) => match parse_markup::<N>(&text) {
            Ok(node) => classify_node(SvgArtifact::new(id, node, location), heuristics),
            Err(e) => {
                log::warn!("Candidate {} is not a valid markup cause {}.", id, e);
                SvgArtifact::new(id, N::create_element(None, "parsererror"), location)
            }
        },
        Candidate::BackgroundImage(value) => {
            let src = unwrap_css_url(&value);
            let mut node = N::create_element(None, "img");
            node.set_attribute("src", src);

            let mut artifact = SvgArtifact::new(id, node, location);
            artifact.embedding_type = EmbeddingType::BgImg;
            inspect_source(artifact, src, heuristics)
        }
    }
}

/// Parses a candidate markup.
///
/// HTML serializes `img` as a void element without a closing slash,
/// so for `img` and `object` we retry with a self-closed start tag.
/// The `object` fallback content is never needed.
fn parse_markup<N: MarkupNode>(text: &str) -> Result<N, Error> {
    let e = match N::parse(text) {
        Ok(node) => return Ok(node),
        Err(e) => e,
    };

    match self_closed_start_tag(text) {
        Some(tag) => N::parse(&tag).map_err(|_| e),
        None => Err(e),
    }
}

/// Cuts the start tag of an `img` or `object` element and closes it.
fn self_closed_start_tag(text: &str) -> Option<String> {
    let text = text.trim_start();
    let name: String = text
        .strip_prefix('<')?
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();
    if !name.eq_ignore_ascii_case("img") && !name.eq_ignore_ascii_case("object") {
        return None;
    }

    let mut quote = None;
    for (i, c) in text.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == '>' => {
                let tag = text[..i].trim_end().trim_end_matches('/').trim_end();
                return Some(format!("{}/>", tag));
            }
            None => {}
        }
    }

    None
}

fn classify_node<N: MarkupNode>(mut artifact: SvgArtifact<N>, heuristics: &Heuristics) -> SvgArtifact<N> {
    let tag_name = artifact.node.tag_name().to_ascii_lowercase();
    match tag_name.as_str() {
        "svg" => {
            artifact.embedding_type = EmbeddingType::Inline;
            artifact.sprite_href = external_use_href(&artifact.node).map(str::to_string);
            if let Some(href) = artifact.sprite_href.clone() {
                artifact.cross_origin = is_cross_origin(&href, &artifact.location);
            }
        }
        "symbol" => {
            artifact.embedding_type = EmbeddingType::Symbol;
        }
        "g" => {
            if artifact.node.element_id().is_some() {
                artifact.embedding_type = EmbeddingType::G;
            }
        }
        "object" => {
            artifact.embedding_type = EmbeddingType::Object;
            artifact.data_src_href = artifact.node.attribute("data").map(str::to_string);
            if let Some(href) = artifact.data_src_href.clone() {
                artifact.cross_origin = is_cross_origin(&href, &artifact.location);
            }
        }
        "img" => {
            artifact.embedding_type = EmbeddingType::ImgSrc;
            if let Some(src) = artifact.node.attribute("src").map(str::to_string) {
                return inspect_source(artifact, &src, heuristics);
            }
        }
        _ => {}
    }

    artifact
}

/// Finds a `use` element that links into another document.
///
/// Only an `svg` that holds nothing but such a `use`, and maybe a title,
/// is a sprite shell. Any other content would be lost after resolving,
/// so such an `svg` stays as is.
fn external_use_href<N: MarkupNode>(svg: &N) -> Option<&str> {
    let mut elements = svg
        .descendants()
        .skip(1)
        .filter(|n| !n.has_tag_name("title") && !n.has_tag_name("desc"));
    let use_node = elements.next()?;
    if elements.next().is_some() || !use_node.has_tag_name("use") {
        return None;
    }

    use_node
        .href()
        .filter(|href| !href.is_empty() && !href.starts_with('#'))
}

/// Inspects an `img` or a background image source.
///
/// A reference to an SVG file is stored for the content resolver.
/// A plain text data URI is parsed right away and the artifact is rebuilt around it.
fn inspect_source<N: MarkupNode>(
    mut artifact: SvgArtifact<N>,
    src: &str,
    heuristics: &Heuristics,
) -> SvgArtifact<N> {
    // The embedded markup can mention `.svg` files too.
    if heuristics.is_utf8_data_uri(src) {
        let text = match embedded_markup(src) {
            Some(text) => text,
            None => return artifact,
        };

        match N::parse(&text) {
            Ok(node) => return artifact.with_node(node),
            Err(e) => log::warn!("Failed to parse an embedded SVG cause {}.", e),
        }
    } else if heuristics.is_svg_reference(src) {
        artifact.img_src_href = Some(src.to_string());
        artifact.cross_origin = is_cross_origin(src, &artifact.location);
    }

    artifact
}

/// Extracts markup between the first `<svg` and the last `</svg>`.
///
/// Percent-encoded data URIs are decoded first.
fn embedded_markup(src: &str) -> Option<String> {
    let decoded;
    let text = if src.contains("<svg") {
        src
    } else {
        let url = data_url::DataUrl::process(src).ok()?;
        let (data, _) = url.decode_to_vec().ok()?;
        decoded = String::from_utf8(data).ok()?;
        decoded.as_str()
    };

    let start = text.find("<svg")?;
    let end = text.rfind("</svg>")? + "</svg>".len();
    if end <= start {
        return None;
    }

    Some(text[start..end].to_string())
}

/// Unwraps a CSS `url()` function. Anything else is returned as is.
fn unwrap_css_url(value: &str) -> &str {
    let value = value.trim();
    let inner = match value.strip_prefix("url(").and_then(|s| s.strip_suffix(')')) {
        Some(inner) => inner.trim(),
        None => return value,
    };

    for quote in ['"', '\''] {
        if let Some(s) = inner.strip_prefix(quote).and_then(|s| s.strip_suffix(quote)) {
            return s;
        }
    }

    inner
}

/// Checks that a reference points to a different origin than the document.
///
/// Data URIs are never cross-origin. Local files are treated as a single origin.
pub(crate) fn is_cross_origin(href: &str, location: &str) -> bool {
    if href.trim_start().starts_with("data:") {
        return false;
    }

    let base = match url::Url::parse(location) {
        Ok(url) => url,
        Err(_) => return false,
    };

    let target = match base.join(href) {
        Ok(url) => url,
        Err(_) => return false,
    };

    if base.scheme() == "file" && target.scheme() == "file" {
        return false;
    }

    base.origin() != target.origin()
}
