// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::artifact::IdGenerator;
use crate::{classify, dedup, metadata, presentation, resolve, sprite};
use crate::{Candidate, Fetch, MarkupNode, Options, SvgArtifact};

/// Turns raw candidates into a collection of standalone SVGs.
///
/// # Examples
///
/// ```
/// use svgharvest::{Candidate, DefaultFetcher, Options, Pipeline};
/// use svgharvest::markuptree::Element;
///
/// let opt = Options::default();
/// let pipeline = Pipeline::new(opt.clone(), DefaultFetcher::new(&opt));
/// let candidates: Vec<Candidate<Element>> = vec![
///     Candidate::Markup("<symbol id='x' viewBox='0 0 16 16'/>".to_string()),
///     Candidate::Markup("<div/>".to_string()),
/// ];
///
/// let artifacts = pipeline.process(candidates, "https://example.com/");
/// assert_eq!(artifacts.len(), 1);
/// assert_eq!(artifacts[0].size_label(), "16x16");
/// ```
pub struct Pipeline<'a> {
    opt: Options,
    fetcher: Box<dyn Fetch + 'a>,
}

impl<'a> Pipeline<'a> {
    /// Creates a new pipeline.
    pub fn new<F: Fetch + 'a>(opt: Options, fetcher: F) -> Self {
        Pipeline {
            opt,
            fetcher: Box::new(fetcher),
        }
    }

    /// Returns processing options.
    #[inline]
    pub fn options(&self) -> &Options {
        &self.opt
    }

    /// Processes candidates found on the `location` page.
    ///
    /// Candidates are owned copies, so the host document is never affected.
    /// Invalid and unresolvable candidates are skipped, duplicates are merged.
    /// The output keeps the discovery order.
    pub fn process<N: MarkupNode>(
        &self,
        candidates: Vec<Candidate<N>>,
        location: &str,
    ) -> Vec<SvgArtifact<N>> {
        let heuristics = &self.opt.heuristics;
        let mut ids = IdGenerator::new();

        let artifacts: Vec<_> = candidates
            .into_iter()
            .map(|c| classify::classify(c, location, &mut ids, heuristics))
            .map(sprite::promote)
            .filter(SvgArtifact::is_valid)
            .collect();

        let artifacts = resolve::resolve_all(artifacts, self.fetcher.as_ref(), &self.opt);

        let artifacts = artifacts
            .into_iter()
            .flat_map(|a| resolve::expand_symbols(a, &mut ids, heuristics))
            .filter(SvgArtifact::is_valid)
            .map(|mut a| {
                metadata::extract(&mut a);
                presentation::build(&mut a);
                a
            })
            .collect();

        dedup::dedup(artifacts)
    }
}

impl std::fmt::Debug for Pipeline<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("opt", &self.opt)
            .finish_non_exhaustive()
    }
}
