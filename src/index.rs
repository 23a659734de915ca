//! Page index assembly.
//!
//! Turns a [`Classification`] into the final route → page mapping. Global and
//! external-type groups become pages here, and navigation pages are
//! synthesized when the run produces more than one page:
//!
//! | Classified pages | Synthesized (commonmark) | Synthesized (html) |
//! |------------------|--------------------------|--------------------|
//! | 0 | nothing (empty run) | nothing |
//! | 1 | nothing | nothing |
//! | 2+ | `Home`, `_Sidebar`, `_Footer` | `Home` |
//!
//! Inserts are last-write-wins. A classified page whose route equals a reserved
//! name is replaced by the synthesized page of that name.
//!
//! Operators spelled only with reserved characters (`*`, `||`, `<`) encode to
//! the empty route `""`. Such a page is kept under that route. In HTML output
//! its file is the root `index.html` when it has no mirrored directory, which
//! is also where `Home` goes, so one of the two overwrites the other.

use crate::classify::{Bucket, Classification};
use crate::config::OutputFormat;
use crate::types::{Symbol, SymbolKind};
use std::collections::BTreeMap;

pub const HOME: &str = "Home";
pub const SIDEBAR: &str = "_Sidebar";
pub const FOOTER: &str = "_Footer";

/// Heading a page is listed under on the home page and in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Section {
    Classes,
    Structures,
    Enumerations,
    Protocols,
    Typealiases,
    Operators,
    Functions,
    Variables,
    Extensions,
}

impl Section {
    pub fn title(self) -> &'static str {
        match self {
            Section::Classes => "Classes",
            Section::Structures => "Structures",
            Section::Enumerations => "Enumerations",
            Section::Protocols => "Protocols",
            Section::Typealiases => "Typealiases",
            Section::Operators => "Operators",
            Section::Functions => "Global Functions",
            Section::Variables => "Global Variables",
            Section::Extensions => "Extensions",
        }
    }
}

/// One line of the home page / sidebar listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub route: String,
    pub title: String,
    pub section: Section,
}

/// A page model handed to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    Type { symbol: Symbol, members: Vec<Symbol> },
    Typealias { symbol: Symbol },
    Operator { operators: Vec<Symbol>, implementations: Vec<Symbol> },
    /// Overloads of a global function or variable sharing one name.
    Global { name: String, symbols: Vec<Symbol> },
    /// Extension members on a type declared outside the module.
    ExternalType { type_name: String, members: Vec<Symbol> },
    Home { module: String, entries: Vec<Entry> },
    Sidebar { module: String, entries: Vec<Entry> },
    Footer { module: String },
}

impl Page {
    pub fn title(&self) -> String {
        match self {
            Page::Type { symbol, .. } => symbol.qualified_name(),
            Page::Typealias { symbol } => symbol.name.clone(),
            Page::Operator { operators, .. } => operators
                .first()
                .map(|o| o.name.clone())
                .unwrap_or_default(),
            Page::Global { name, .. } => name.clone(),
            Page::ExternalType { type_name, .. } => type_name.clone(),
            Page::Home { module, .. } => module.clone(),
            Page::Sidebar { .. } => "Sidebar".to_string(),
            Page::Footer { .. } => "Footer".to_string(),
        }
    }

    /// Short label for listings, e.g. `class` or `function`.
    pub fn kind_label(&self) -> &'static str {
        match self {
            Page::Type { symbol, .. } | Page::Typealias { symbol } => symbol.kind.as_str(),
            Page::Operator { .. } => "operator",
            Page::Global { symbols, .. } => symbols
                .first()
                .map(|s| s.kind.as_str())
                .unwrap_or("global"),
            Page::ExternalType { .. } => "extension",
            Page::Home { .. } => "home",
            Page::Sidebar { .. } => "sidebar",
            Page::Footer { .. } => "footer",
        }
    }

    fn section(&self) -> Option<Section> {
        let section = match self {
            Page::Type { symbol, .. } => match symbol.kind {
                SymbolKind::Class => Section::Classes,
                SymbolKind::Structure => Section::Structures,
                SymbolKind::Enumeration => Section::Enumerations,
                _ => Section::Protocols,
            },
            Page::Typealias { .. } => Section::Typealiases,
            Page::Operator { .. } => Section::Operators,
            Page::Global { symbols, .. } => match symbols.first().map(|s| s.kind) {
                Some(SymbolKind::Variable) => Section::Variables,
                _ => Section::Functions,
            },
            Page::ExternalType { .. } => Section::Extensions,
            Page::Home { .. } | Page::Sidebar { .. } | Page::Footer { .. } => return None,
        };
        Some(section)
    }
}

/// A page plus the symbol that decides where it is written.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedPage {
    pub page: Page,
    /// First symbol of the page. `None` for synthesized pages.
    pub anchor: Option<Symbol>,
}

/// Route → page mapping for one generation run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageIndex {
    pages: BTreeMap<String, IndexedPage>,
}

impl PageIndex {
    /// Assemble the index for `module` from a finished classification.
    pub fn build(classification: Classification, module: &str, format: OutputFormat) -> Self {
        let mut pages = BTreeMap::new();

        for (route, bucket) in classification.pages {
            let anchor = bucket.anchor().cloned();
            let page = match bucket {
                Bucket::Type { symbol, members } => Page::Type { symbol, members },
                Bucket::Typealias { symbol } => Page::Typealias { symbol },
                Bucket::Operator {
                    operators,
                    implementations,
                } => Page::Operator {
                    operators,
                    implementations,
                },
            };
            pages.insert(route, IndexedPage { page, anchor });
        }

        for (name, symbols) in classification.globals {
            let anchor = symbols.first().cloned();
            pages.insert(
                crate::route::encode(&name),
                IndexedPage {
                    page: Page::Global { name, symbols },
                    anchor,
                },
            );
        }

        for (type_name, members) in classification.external_types {
            let anchor = members.first().cloned();
            pages.insert(
                crate::route::encode(&type_name),
                IndexedPage {
                    page: Page::ExternalType { type_name, members },
                    anchor,
                },
            );
        }

        let mut index = Self { pages };
        if index.pages.len() > 1 {
            index.synthesize(module, format);
        }
        index
    }

    fn synthesize(&mut self, module: &str, format: OutputFormat) {
        let entries = self.entries();
        let module = module.to_string();

        self.insert_synthesized(
            HOME,
            Page::Home {
                module: module.clone(),
                entries: entries.clone(),
            },
        );
        if format == OutputFormat::Commonmark {
            self.insert_synthesized(
                SIDEBAR,
                Page::Sidebar {
                    module: module.clone(),
                    entries,
                },
            );
            self.insert_synthesized(FOOTER, Page::Footer { module });
        }
    }

    fn insert_synthesized(&mut self, route: &str, page: Page) {
        let previous = self
            .pages
            .insert(route.to_string(), IndexedPage { page, anchor: None });
        if let Some(previous) = previous {
            tracing::debug!(
                route,
                replaced = %previous.page.title(),
                "synthesized page replaced a classified page"
            );
        }
    }

    /// Listing entries for every classified page, ordered by section then title.
    fn entries(&self) -> Vec<Entry> {
        let mut entries: Vec<Entry> = self
            .pages
            .iter()
            .filter_map(|(route, indexed)| {
                indexed.page.section().map(|section| Entry {
                    route: route.clone(),
                    title: indexed.page.title(),
                    section,
                })
            })
            .collect();
        entries.sort_by(|a, b| (a.section, &a.title).cmp(&(b.section, &b.title)));
        entries
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// A run with exactly one page writes it as the home page.
    pub fn is_single_page(&self) -> bool {
        self.pages.len() == 1
    }

    pub fn get(&self, route: &str) -> Option<&IndexedPage> {
        self.pages.get(route)
    }

    pub fn routes(&self) -> impl Iterator<Item = &str> {
        self.pages.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &IndexedPage)> {
        self.pages.iter().map(|(route, page)| (route.as_str(), page))
    }
}
