//! Output planning: where each page lands on disk.
//!
//! Paths are computed from the route, the anchor symbol and the output format
//! alone. Nothing here reads file contents or creates anything on disk.
//!
//! ## Layout
//!
//! ```text
//! single page run          multi-page run (commonmark)     multi-page run (html)
//! docs/                    docs/                           docs/
//! └── Home.md              ├── Home.md                     ├── index.html
//!     (or index.html)      ├── _Sidebar.md                 ├── all.css
//!                          ├── _Footer.md                  └── Models/
//!                          └── Models/                         └── User/
//!                              └── User.md                         └── index.html
//! ```
//!
//! Anchored pages mirror the directory of the file that declared their anchor,
//! relative to the input root containing it (`Sources/MyKit/Models/User.swift`
//! scanned from `Sources/MyKit` places `User` under `Models/`). Pages without
//! an anchor, and anchors outside every input root, sit at the output root.
//!
//! Input roots are canonical. An anchor directory that matches no root as
//! written is canonicalized and matched again, so sources reported through a
//! symlinked path still mirror.

use crate::config::OutputFormat;
use crate::index::{HOME, PageIndex};
use crate::types::Symbol;
use std::fs;
use std::path::{Path, PathBuf};

/// Stylesheet written once per HTML run.
pub const STYLESHEET: &str = "all.css";

/// What a planned write produces.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Page { route: String },
    Stylesheet,
}

/// One file the emitter will write.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedWrite {
    pub target: Target,
    pub path: PathBuf,
}

/// Computes output paths for one run.
#[derive(Debug, Clone)]
pub struct OutputPlanner {
    output_root: PathBuf,
    source_roots: Vec<PathBuf>,
    format: OutputFormat,
}

impl OutputPlanner {
    pub fn new(output_root: &Path, source_roots: &[PathBuf], format: OutputFormat) -> Self {
        // Most specific root first so nested inputs win over their parents
        let mut source_roots = source_roots.to_vec();
        source_roots.sort_by_key(|root| std::cmp::Reverse(root.components().count()));
        Self {
            output_root: output_root.to_path_buf(),
            source_roots,
            format,
        }
    }

    /// Plan every page in `index`, plus the stylesheet for HTML runs.
    pub fn plan(&self, index: &PageIndex) -> Vec<PlannedWrite> {
        let single_page = index.is_single_page();
        let mut writes: Vec<PlannedWrite> = index
            .iter()
            .map(|(route, indexed)| PlannedWrite {
                target: Target::Page {
                    route: route.to_string(),
                },
                path: self.path_for(route, indexed.anchor.as_ref(), single_page),
            })
            .collect();

        if self.format == OutputFormat::Html && !index.is_empty() {
            writes.push(PlannedWrite {
                target: Target::Stylesheet,
                path: self.output_root.join(STYLESHEET),
            });
        }
        writes
    }

    /// Output path of a single page.
    pub fn path_for(&self, route: &str, anchor: Option<&Symbol>, single_page: bool) -> PathBuf {
        if single_page {
            return self.output_root.join(match self.format {
                OutputFormat::Commonmark => "Home.md",
                OutputFormat::Html => "index.html",
            });
        }
        if self.format == OutputFormat::Html && route == HOME {
            return self.output_root.join("index.html");
        }

        match anchor {
            Some(symbol) => {
                let dir = self.output_root.join(self.mirrored_dir(symbol));
                match self.format {
                    OutputFormat::Commonmark => dir.join(format!("{route}.md")),
                    OutputFormat::Html => dir.join(route).join("index.html"),
                }
            }
            None => self
                .output_root
                .join(format!("{route}.{}", self.format.extension())),
        }
    }

    /// Directory of the anchor's declaring file relative to its input root.
    fn mirrored_dir(&self, symbol: &Symbol) -> PathBuf {
        let source = symbol.source_path();
        let Some(parent) = source.parent() else {
            return PathBuf::new();
        };
        if let Some(relative) = self.relative_to_root(parent) {
            return relative;
        }
        fs::canonicalize(parent)
            .ok()
            .and_then(|canonical| self.relative_to_root(&canonical))
            .unwrap_or_default()
    }

    fn relative_to_root(&self, dir: &Path) -> Option<PathBuf> {
        self.source_roots
            .iter()
            .find_map(|root| dir.strip_prefix(root).ok())
            .map(Path::to_path_buf)
    }
}
