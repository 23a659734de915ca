//! # swiftdoc
//!
//! A documentation generator for Swift modules. An external interface
//! extractor describes the module's public surface as a flat list of symbols;
//! swiftdoc decides which pages exist, names them, places them on disk next to
//! a mirror of the source layout, and writes them.
//!
//! # Architecture: Staged Pipeline
//!
//! ```text
//! 1. Scan      inputs + symbols.json  →  ScanResult      (validated roots, symbols)
//! 2. Classify  symbols                →  Classification  (route → page bucket)
//! 3. Index     classification         →  PageIndex       (+ Home, _Sidebar, _Footer)
//! 4. Plan      index                  →  PlannedWrite[]  (route → output path)
//! 5. Emit      plan                   →  docs/           (parallel writes)
//! ```
//!
//! Stages 2 to 4 are pure functions of their input and never touch the
//! filesystem, so the `check` command can print the full plan without writing
//! anything. Only emission runs in parallel.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Validates input directories, loads symbols through an [`scan::Extractor`] |
//! | [`types`] | Symbol data model: kinds, access levels, declaration context |
//! | [`route`] | Filesystem-safe route names and base-URL links |
//! | [`classify`] | Buckets symbols into pages, globals and external-type extensions |
//! | [`index`] | Route → page mapping plus synthesized navigation pages |
//! | [`plan`] | Output path of every page |
//! | [`render`] | Page bodies as CommonMark or HTML |
//! | [`emit`] | Directory creation and parallel writes |
//! | [`generate`] | Runs the stages in order and reports empty results |
//! | [`config`] | Layered `swiftdoc.toml` loading and validation |
//! | [`output`] | CLI output formatting of scans and plans |
//!
//! # Design Decisions
//!
//! ## Routes Are Names, Not Paths
//!
//! A route is derived from the page's display name alone (see
//! [`route::encode`]). The same route is used for the output file name and for
//! every link to the page, so a link is `{base_url}{route}` wherever the file
//! was placed. Directory mirroring happens only when the planner turns routes
//! into paths.
//!
//! Wiki hosts resolve `.md` pages by name, so mirrored CommonMark output links
//! correctly as written. Mirrored HTML does not: the link `/User` points at a
//! page written to `Models/User/index.html`. Serve HTML output either flattened
//! (every `route/index.html` moved to the site root) or behind URL rewrites
//! that map `/{route}` to the mirrored file.
//!
//! ## Single-Page Modules
//!
//! A module that yields exactly one page is written as `Home.md` (or
//! `index.html`) with no sidebar or footer. Navigation for one page is noise.
//!
//! ## Extractor Seam
//!
//! Swift semantic analysis stays outside the crate. [`scan::ManifestExtractor`]
//! reads the JSON manifest such a tool produces; other sources implement
//! [`scan::Extractor`].

pub mod classify;
pub mod config;
pub mod emit;
pub mod generate;
pub mod index;
pub mod output;
pub mod plan;
pub mod render;
pub mod route;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
