// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::io::Read;

use rayon::prelude::*;

use crate::artifact::IdGenerator;
use crate::classify::{classify, Candidate};
use crate::{sprite, EmbeddingType, Error, Heuristics, MarkupNode, Options, SvgArtifact};

/// A source of external resources.
///
/// Called concurrently from multiple threads, once per unresolved reference.
/// Any error affects only the artifact that requested the resource.
pub trait Fetch: Send + Sync {
    /// Loads an absolute URL or a file path.
    fn fetch(&self, url: &str) -> Result<Vec<u8>, Error>;
}

impl<F> Fetch for F
where
    F: Fn(&str) -> Result<Vec<u8>, Error> + Send + Sync,
{
    fn fetch(&self, url: &str) -> Result<Vec<u8>, Error> {
        self(url)
    }
}

/// A fetcher that reads local files and, with the `http` feature, HTTP(S) URLs.
pub struct DefaultFetcher {
    max_size: usize,
    #[cfg(feature = "http")]
    user_agent: String,
    #[cfg(feature = "http")]
    agent: ureq::Agent,
}

impl DefaultFetcher {
    /// Creates a new fetcher using the timeout and the size limit from options.
    pub fn new(opt: &Options) -> Self {
        DefaultFetcher {
            max_size: opt.max_fetch_size,
            #[cfg(feature = "http")]
            user_agent: opt.user_agent.clone(),
            #[cfg(feature = "http")]
            agent: ureq::Agent::config_builder()
                .timeout_global(Some(opt.fetch_timeout))
                .build()
                .into(),
        }
    }

    fn read_file(&self, path: &std::path::Path) -> Result<Vec<u8>, Error> {
        let fetch_error = |e: std::io::Error| Error::FetchFailed {
            url: path.display().to_string(),
            reason: e.to_string(),
        };

        let file = std::fs::File::open(path).map_err(fetch_error)?;
        let mut data = Vec::new();
        file.take(self.max_size as u64 + 1)
            .read_to_end(&mut data)
            .map_err(fetch_error)?;

        if data.len() > self.max_size {
            return Err(Error::TooLarge(self.max_size));
        }

        Ok(data)
    }

    #[cfg(feature = "http")]
    fn read_http(&self, url: &str) -> Result<Vec<u8>, Error> {
        let fetch_error = |reason: String| Error::FetchFailed {
            url: url.to_string(),
            reason,
        };

        let mut response = self
            .agent
            .get(url)
            .header("User-Agent", &self.user_agent)
            .call()
            .map_err(|e| fetch_error(e.to_string()))?;

        response
            .body_mut()
            .with_config()
            .limit(self.max_size as u64)
            .read_to_vec()
            .map_err(|e| fetch_error(e.to_string()))
    }
}

impl Fetch for DefaultFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, Error> {
        let parsed = match url::Url::parse(url) {
            Ok(parsed) => parsed,
            Err(_) => return self.read_file(std::path::Path::new(url)),
        };

        match parsed.scheme() {
            "file" => {
                let path = parsed
                    .to_file_path()
                    .map_err(|_| Error::UnsupportedScheme(url.to_string()))?;
                self.read_file(&path)
            }
            #[cfg(feature = "http")]
            "http" | "https" => self.read_http(url),
            _ => Err(Error::UnsupportedScheme(url.to_string())),
        }
    }
}

impl std::fmt::Debug for DefaultFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DefaultFetcher { .. }")
    }
}

/// A content loaded for a single artifact.
enum Resolution<N> {
    /// A standalone graphic that replaces the artifact's node.
    Graphic(N),
    /// Symbols that replace the artifact itself.
    Symbols(Vec<N>),
}

/// Resolves external references of all artifacts concurrently.
///
/// The output has the same order as the input. Failed artifacts are marked `Invalid`.
pub(crate) fn resolve_all<N: MarkupNode>(
    artifacts: Vec<SvgArtifact<N>>,
    fetcher: &dyn Fetch,
    opt: &Options,
) -> Vec<SvgArtifact<N>> {
    artifacts
        .into_par_iter()
        .map(|artifact| resolve_one(artifact, fetcher, opt))
        .collect()
}

fn resolve_one<N: MarkupNode>(
    mut artifact: SvgArtifact<N>,
    fetcher: &dyn Fetch,
    opt: &Options,
) -> SvgArtifact<N> {
    if needs_fetch(&artifact) {
        match load(&artifact, fetcher, opt) {
            Ok(Resolution::Graphic(node)) => {
                log::debug!("Artifact {} was inlined.", artifact.id);
                artifact = artifact.with_node(node);
                artifact.embedding_type = EmbeddingType::Inline;
            }
            Ok(Resolution::Symbols(symbols)) => {
                artifact.sprite_symbols = Some(symbols);
            }
            Err(e) => {
                log::warn!(
                    "Failed to resolve '{}' cause {}. Skipped.",
                    artifact.external_href().unwrap_or_default(),
                    e
                );
                artifact.embedding_type = EmbeddingType::Invalid;
            }
        }
    }

    // References we cannot resolve do not describe any graphic.
    if artifact.embedding_type.is_reference()
        && !artifact.node.has_tag_name("svg")
        && artifact.sprite_symbols.is_none()
    {
        artifact.embedding_type = EmbeddingType::Invalid;
    }

    artifact
}

fn needs_fetch<N: MarkupNode>(artifact: &SvgArtifact<N>) -> bool {
    match artifact.embedding_type {
        EmbeddingType::ImgSrc | EmbeddingType::BgImg | EmbeddingType::Object => {
            !artifact.node.has_tag_name("svg")
                && (artifact.img_src_href.is_some() || artifact.data_src_href.is_some())
        }
        EmbeddingType::Inline => artifact.sprite_href.is_some(),
        _ => false,
    }
}

fn load<N: MarkupNode>(
    artifact: &SvgArtifact<N>,
    fetcher: &dyn Fetch,
    opt: &Options,
) -> Result<Resolution<N>, Error> {
    let href = artifact.external_href().unwrap_or_default().trim();

    let data = if href.starts_with("data:") {
        decode_data_url(href)?
    } else {
        let url = absolute_url(href, &artifact.location);
        log::debug!("Fetching '{}'.", url);
        fetcher.fetch(&url)?
    };

    if data.len() > opt.max_fetch_size {
        return Err(Error::TooLarge(opt.max_fetch_size));
    }

    let root = parse_svg::<N>(data, opt.max_fetch_size)?;

    // Only `use` references point to a specific symbol.
    if let Some(href) = artifact.sprite_href.as_deref() {
        if let Some(id) = fragment(href) {
            let symbol = root
                .descendants()
                .find(|n| n.element_id() == Some(id))
                .ok_or_else(|| Error::MissingSymbol(id.to_string()))?;
            return Ok(Resolution::Symbols(vec![symbol.clone()]));
        }
    }

    let symbols: Vec<&N> = root
        .descendants()
        .filter(|n| n.has_tag_name("symbol"))
        .collect();
    if symbols.len() > 1 {
        return Ok(Resolution::Symbols(symbols.into_iter().cloned().collect()));
    }

    Ok(Resolution::Graphic(root))
}

fn decode_data_url(href: &str) -> Result<Vec<u8>, Error> {
    let url = data_url::DataUrl::process(href).map_err(|_| Error::InvalidDataUrl)?;
    let (data, _) = url.decode_to_vec().map_err(|_| Error::InvalidDataUrl)?;
    Ok(data)
}

/// Resolves a reference against the document location and strips its fragment.
///
/// When the location is not a URL, the reference is returned as is.
fn absolute_url(href: &str, location: &str) -> String {
    match url::Url::parse(location).and_then(|base| base.join(href)) {
        Ok(mut url) => {
            url.set_fragment(None);
            url.to_string()
        }
        Err(_) => match href.split_once('#') {
            Some((path, _)) => path.to_string(),
            None => href.to_string(),
        },
    }
}

fn fragment(href: &str) -> Option<&str> {
    href.split_once('#')
        .map(|(_, id)| id)
        .filter(|id| !id.is_empty())
}

/// Parses an SVG or SVGZ document.
fn parse_svg<N: MarkupNode>(data: Vec<u8>, max_size: usize) -> Result<N, Error> {
    let data = if data.starts_with(&[0x1f, 0x8b]) {
        decompress_svgz(&data, max_size)?
    } else {
        data
    };

    let text = String::from_utf8(data).map_err(|_| Error::NotAnUtf8Str)?;
    let root = N::parse(&text)?;
    if !root.has_tag_name("svg") {
        return Err(Error::NotAnSvg);
    }

    Ok(root)
}

/// Decompresses an SVGZ file.
///
/// Fails with [`Error::TooLarge`] when the decompressed data is bigger than `max_size`.
pub fn decompress_svgz(data: &[u8], max_size: usize) -> Result<Vec<u8>, Error> {
    let mut decoder =
        flate2::read::GzDecoder::new(data).take((max_size as u64).saturating_add(1));
    let mut decoded = Vec::with_capacity(std::cmp::min(data.len() * 2, max_size));
    decoder
        .read_to_end(&mut decoded)
        .map_err(|_| Error::MalformedGZip)?;

    if decoded.len() > max_size {
        return Err(Error::TooLarge(max_size));
    }

    Ok(decoded)
}

/// Replaces an artifact that holds sprite sheet symbols with one sprite per symbol.
///
/// Each symbol goes through the classification and the sprite promotion again.
pub(crate) fn expand_symbols<N: MarkupNode>(
    mut artifact: SvgArtifact<N>,
    ids: &mut IdGenerator,
    heuristics: &Heuristics,
) -> Vec<SvgArtifact<N>> {
    let symbols = match artifact.sprite_symbols.take() {
        Some(symbols) => symbols,
        None => return vec![artifact],
    };

    log::debug!(
        "Artifact {} was expanded into {} symbols.",
        artifact.id,
        symbols.len()
    );

    symbols
        .into_iter()
        .map(|symbol| {
            let expanded = classify(Candidate::Node(symbol), &artifact.location, ids, heuristics);
            let mut expanded = sprite::promote(expanded);
            expanded.cross_origin = artifact.cross_origin;
            expanded
        })
        .collect()
}
