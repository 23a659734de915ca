//! Shared types used across all pipeline stages.
//!
//! A [`Symbol`] is one declaration reported by the interface extractor. The
//! extractor runs outside this crate and hands symbols over as a JSON
//! manifest; nothing downstream ever mutates them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use url::Url;

/// Visibility tier of a declaration, ordered from least to most visible.
///
/// Deserializes case-insensitively, so `"Public"` in a config file works.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    Private,
    Fileprivate,
    Internal,
    Public,
    Open,
}

impl AccessLevel {
    /// Whether a declaration at `level` is at or above this minimum.
    pub fn includes(self, level: AccessLevel) -> bool {
        level >= self
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AccessLevel::Private => "private",
            AccessLevel::Fileprivate => "fileprivate",
            AccessLevel::Internal => "internal",
            AccessLevel::Public => "public",
            AccessLevel::Open => "open",
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AccessLevel {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl FromStr for AccessLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "private" => Ok(AccessLevel::Private),
            "fileprivate" => Ok(AccessLevel::Fileprivate),
            "internal" => Ok(AccessLevel::Internal),
            "public" => Ok(AccessLevel::Public),
            "open" => Ok(AccessLevel::Open),
            other => Err(format!(
                "unknown access level '{other}' \
                 (expected private, fileprivate, internal, public or open)"
            )),
        }
    }
}

/// Declaration kind. Anything the generator has no page for lands in `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Class,
    Enumeration,
    Structure,
    Protocol,
    Typealias,
    Operator,
    Function,
    Variable,
    #[serde(other)]
    Other,
}

impl SymbolKind {
    pub fn is_type(self) -> bool {
        matches!(
            self,
            SymbolKind::Class
                | SymbolKind::Enumeration
                | SymbolKind::Structure
                | SymbolKind::Protocol
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SymbolKind::Class => "class",
            SymbolKind::Enumeration => "enumeration",
            SymbolKind::Structure => "structure",
            SymbolKind::Protocol => "protocol",
            SymbolKind::Typealias => "typealias",
            SymbolKind::Operator => "operator",
            SymbolKind::Function => "function",
            SymbolKind::Variable => "variable",
            SymbolKind::Other => "other",
        }
    }
}

/// One enclosing scope of a declaration, outermost first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// `extension Array { ... }`
    Extension(String),
    /// `struct Outer { ... }`
    Type(String),
}

impl Scope {
    /// The type this scope is attached to, whichever form it takes.
    pub fn type_name(&self) -> &str {
        match self {
            Scope::Extension(name) | Scope::Type(name) => name,
        }
    }
}

/// A declaration as reported by the interface extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    /// Unique declaration identity (e.g. a USR).
    pub id: String,
    pub name: String,
    pub kind: SymbolKind,
    pub access: AccessLevel,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub context: Vec<Scope>,
    /// Declaring file, `file://` URL or absolute path.
    pub source: String,
}

/// Characters that may begin a Swift operator name.
const OPERATOR_HEAD: &[char] = &[
    '/', '=', '-', '+', '!', '*', '%', '<', '>', '&', '|', '^', '~', '?', '.',
];

impl Symbol {
    pub fn is_top_level(&self) -> bool {
        self.context.is_empty()
    }

    /// Enclosing type names plus the symbol name, joined with `.`.
    ///
    /// Extension scopes contribute their extended type, so `extension Foo { func bar() }`
    /// reads as `Foo.bar`.
    pub fn qualified_name(&self) -> String {
        let mut parts: Vec<&str> = self.context.iter().map(Scope::type_name).collect();
        parts.push(&self.name);
        parts.join(".")
    }

    /// A function declared with an operator name, e.g. `static func == (lhs:rhs:)`.
    pub fn is_operator_function(&self) -> bool {
        self.kind == SymbolKind::Function
            && self
                .name
                .chars()
                .next()
                .is_some_and(|c| OPERATOR_HEAD.contains(&c))
    }

    /// Filesystem path of the declaring file.
    pub fn source_path(&self) -> PathBuf {
        source_to_path(&self.source)
    }
}

/// Convert a `file://` URL to a filesystem path, percent-decoding it.
///
/// Plain paths, and URLs that name no local file, pass through unchanged.
pub fn source_to_path(source: &str) -> PathBuf {
    match Url::parse(source) {
        Ok(url) if url.scheme() == "file" => url
            .to_file_path()
            .unwrap_or_else(|()| PathBuf::from(source)),
        _ => PathBuf::from(source),
    }
}

/// Symbol manifest produced by the external interface extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolManifest {
    pub module: String,
    pub symbols: Vec<Symbol>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_levels_are_ordered() {
        assert!(AccessLevel::Private < AccessLevel::Fileprivate);
        assert!(AccessLevel::Fileprivate < AccessLevel::Internal);
        assert!(AccessLevel::Internal < AccessLevel::Public);
        assert!(AccessLevel::Public < AccessLevel::Open);
    }

    #[test]
    fn minimum_includes_levels_at_or_above() {
        let minimum = AccessLevel::Public;
        assert!(minimum.includes(AccessLevel::Public));
        assert!(minimum.includes(AccessLevel::Open));
        assert!(!minimum.includes(AccessLevel::Internal));
    }

    #[test]
    fn access_level_parses_case_insensitively() {
        assert_eq!("Public".parse::<AccessLevel>(), Ok(AccessLevel::Public));
        assert_eq!("fileprivate".parse::<AccessLevel>(), Ok(AccessLevel::Fileprivate));
        assert!("protected".parse::<AccessLevel>().is_err());
    }

    #[test]
    fn access_level_deserializes_any_case() {
        let level: AccessLevel = serde_json::from_str(r#""Internal""#).unwrap();
        assert_eq!(level, AccessLevel::Internal);
        assert!(serde_json::from_str::<AccessLevel>(r#""protected""#).is_err());
        assert_eq!(serde_json::to_string(&AccessLevel::Open).unwrap(), r#""open""#);
    }

    #[test]
    fn unknown_kind_deserializes_to_other() {
        let json = r#"{"id":"s:1","name":"init","kind":"initializer","access":"public",
            "source":"/a.swift"}"#;
        let symbol: Symbol = serde_json::from_str(json).unwrap();
        assert_eq!(symbol.kind, SymbolKind::Other);
        assert!(symbol.is_top_level());
    }

    #[test]
    fn context_deserializes_both_scope_forms() {
        let json = r#"{"id":"s:2","name":"first","kind":"variable","access":"public",
            "context":[{"extension":"Array"}],"source":"file:///src/A.swift"}"#;
        let symbol: Symbol = serde_json::from_str(json).unwrap();
        assert_eq!(symbol.context, vec![Scope::Extension("Array".into())]);
        assert_eq!(symbol.qualified_name(), "Array.first");
    }

    #[test]
    fn qualified_name_joins_type_scopes() {
        let symbol = Symbol {
            id: "s:3".into(),
            name: "Inner".into(),
            kind: SymbolKind::Structure,
            access: AccessLevel::Public,
            context: vec![Scope::Type("Outer".into())],
            source: "/a.swift".into(),
        };
        assert_eq!(symbol.qualified_name(), "Outer.Inner");
    }

    #[test]
    fn operator_functions_detected_by_name() {
        let mut symbol = Symbol {
            id: "s:4".into(),
            name: "==".into(),
            kind: SymbolKind::Function,
            access: AccessLevel::Public,
            context: vec![],
            source: "/a.swift".into(),
        };
        assert!(symbol.is_operator_function());
        symbol.name = "equals".into();
        assert!(!symbol.is_operator_function());
        symbol.name = "==".into();
        symbol.kind = SymbolKind::Variable;
        assert!(!symbol.is_operator_function());
    }

    #[test]
    fn file_urls_become_paths() {
        assert_eq!(source_to_path("file:///src/A.swift"), PathBuf::from("/src/A.swift"));
        assert_eq!(
            source_to_path("file://localhost/src/A.swift"),
            PathBuf::from("/src/A.swift")
        );
        assert_eq!(source_to_path("/src/A.swift"), PathBuf::from("/src/A.swift"));
    }

    #[test]
    fn file_urls_are_percent_decoded() {
        assert_eq!(
            source_to_path("file:///My%20Project/Sources/Models/Foo.swift"),
            PathBuf::from("/My Project/Sources/Models/Foo.swift")
        );
        assert_eq!(
            source_to_path("file:///src/Array%2BExtras.swift"),
            PathBuf::from("/src/Array+Extras.swift")
        );
    }

    #[test]
    fn plain_paths_with_spaces_pass_through() {
        assert_eq!(
            source_to_path("/My Project/Foo.swift"),
            PathBuf::from("/My Project/Foo.swift")
        );
    }
}
