//! Route encoding: symbol and page names to filesystem- and URL-safe strings.
//!
//! Every page in the output is identified by a route. Routes double as file
//! stems (`Foo.md`, `Foo/index.html`) and, composed with the base URL, as link
//! targets inside rendered pages. The same encoding runs in both places so a
//! link always names the file it points at.
//!
//! ## Encoding Steps
//!
//! 1. Spaces become dashes: `"Hello World"` → `"Hello-World"`
//! 2. Reserved characters `< > : " / \ | ? *` become `_`
//! 3. Optionally, the result is appended as a path component to the base URL
//! 4. Underscores are stripped, unless the string contains a protected suffix
//!    such as `_View` (UIKit-style names keep their underscore)
//!
//! Substitution runs before base-URL composition so the `/` separators the
//! composition introduces are never rewritten.

use thiserror::Error;
use url::Url;

#[derive(Error, Debug, PartialEq)]
pub enum RouteError {
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Characters that are never valid in a route.
pub const RESERVED: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Suffixes whose underscore survives encoding.
pub const PROTECTED_SUFFIXES: &[&str] = &[
    "_Button",
    "_View",
    "_Control",
    "_CollectionReusableView",
    "_CollectionViewCell",
    "_NavigationBar",
    "_ViewController",
];

/// Host used to resolve path-only base URLs such as `/` or `/docs/`.
const PLACEHOLDER_ORIGIN: &str = "http://swiftdoc.invalid/";

/// Encode an identifier as a bare route (file stem / index key).
///
/// Idempotent: encoding an encoded route returns it unchanged.
pub fn encode(identifier: &str) -> String {
    strip_underscores(substitute(identifier))
}

/// Encode an identifier as a link target under `base_url`.
///
/// Fails only when `base_url` itself cannot be used as a base.
pub fn encode_with_base(identifier: &str, base_url: &str) -> Result<String, RouteError> {
    let base = BaseUrl::parse(base_url)?;
    Ok(base.link(identifier))
}

fn substitute(identifier: &str) -> String {
    identifier
        .replace(' ', "-")
        .chars()
        .map(|c| if RESERVED.contains(&c) { '_' } else { c })
        .collect()
}

fn strip_underscores(route: String) -> String {
    if PROTECTED_SUFFIXES.iter().any(|suffix| route.contains(suffix)) {
        route
    } else {
        route.replace('_', "")
    }
}

/// A validated base URL that routes are appended to.
///
/// Absolute URLs (`https://example.com/docs/`) keep their origin in links;
/// path-only bases (`/`, `/docs`) produce root-relative links.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseUrl {
    url: Url,
    relative: bool,
}

impl BaseUrl {
    pub fn parse(base_url: &str) -> Result<Self, RouteError> {
        let invalid = |reason: String| RouteError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason,
        };

        let (url, relative) = match Url::parse(base_url) {
            Ok(url) => (url, false),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let origin = Url::parse(PLACEHOLDER_ORIGIN).map_err(|e| invalid(e.to_string()))?;
                let url = origin.join(base_url).map_err(|e| invalid(e.to_string()))?;
                (url, true)
            }
            Err(e) => return Err(invalid(e.to_string())),
        };

        if url.cannot_be_a_base() {
            return Err(invalid("URL cannot have path components appended".to_string()));
        }
        Ok(Self { url, relative })
    }

    /// Compose the link target for an identifier.
    pub fn link(&self, identifier: &str) -> String {
        let route = substitute(identifier);
        strip_underscores(self.append(&route))
    }

    /// Append `route` as a single path component. Falls back to the bare
    /// route if the URL refuses new segments.
    fn append(&self, route: &str) -> String {
        let mut url = self.url.clone();
        match url.path_segments_mut() {
            Ok(mut segments) => {
                segments.pop_if_empty().push(route);
            }
            Err(()) => return route.to_string(),
        }
        if self.relative {
            url.path().to_string()
        } else {
            url.to_string()
        }
    }

    /// Link to a static asset that sits at the output root (e.g. the stylesheet).
    pub fn asset(&self, file_name: &str) -> String {
        self.append(file_name)
    }
}

impl Default for BaseUrl {
    fn default() -> Self {
        Self::parse("/").expect("root base URL must parse")
    }
}
