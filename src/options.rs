// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::time::Duration;

use crate::Heuristics;

/// Processing options.
#[derive(Clone, Debug)]
pub struct Options {
    /// A timeout for a single fetch.
    ///
    /// An expired fetch fails only the artifact that requested it.
    ///
    /// Default: 10 seconds
    pub fetch_timeout: Duration,

    /// The maximum size of a fetched resource in bytes.
    ///
    /// Applies to the decompressed data of SVGZ files as well.
    ///
    /// Default: 10 MiB
    pub max_fetch_size: usize,

    /// A `User-Agent` header value used by the default HTTP fetcher.
    ///
    /// Default: `svgharvest/<version>`
    pub user_agent: String,

    /// String heuristics used during classification and presentation.
    pub heuristics: Heuristics,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            fetch_timeout: Duration::from_secs(10),
            max_fetch_size: 10 * 1024 * 1024,
            user_agent: format!("svgharvest/{}", env!("CARGO_PKG_VERSION")),
            heuristics: Heuristics::default(),
        }
    }
}
