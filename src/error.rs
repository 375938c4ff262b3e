// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// List of all errors.
#[derive(Debug)]
pub enum Error {
    /// Only UTF-8 content are supported.
    NotAnUtf8Str,

    /// Compressed SVG must use the GZip algorithm.
    MalformedGZip,

    /// Failed to parse a markup.
    ParsingFailed(String),

    /// A parsed document doesn't have an `svg` root element.
    NotAnSvg,

    /// A referenced sprite sheet doesn't have an element with the specified ID.
    MissingSymbol(String),

    /// A `data:` URI is malformed.
    InvalidDataUrl,

    /// A reference uses a scheme we cannot fetch.
    UnsupportedScheme(String),

    /// A fetched resource is bigger than the allowed limit.
    TooLarge(usize),

    /// Failed to fetch a resource.
    FetchFailed {
        /// A requested URL.
        url: String,
        /// An underlying error description.
        reason: String,
    },
}

impl From<markuptree::Error> for Error {
    fn from(e: markuptree::Error) -> Self {
        Error::ParsingFailed(e.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Error::NotAnUtf8Str => {
                write!(f, "provided data has not an UTF-8 encoding")
            }
            Error::MalformedGZip => {
                write!(f, "provided data has a malformed GZip content")
            }
            Error::ParsingFailed(ref e) => {
                write!(f, "markup parsing failed cause {}", e)
            }
            Error::NotAnSvg => {
                write!(f, "the root element is not an 'svg'")
            }
            Error::MissingSymbol(ref id) => {
                write!(f, "an element with ID '{}' is not found", id)
            }
            Error::InvalidDataUrl => {
                write!(f, "the data URI is malformed")
            }
            Error::UnsupportedScheme(ref url) => {
                write!(f, "'{}' cannot be fetched", url)
            }
            Error::TooLarge(limit) => {
                write!(f, "the resource is bigger than {} bytes", limit)
            }
            Error::FetchFailed { ref url, ref reason } => {
                write!(f, "failed to fetch '{}' cause {}", url, reason)
            }
        }
    }
}

impl std::error::Error for Error {}
