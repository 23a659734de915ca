//! Symbol classification: a flat symbol list into named page buckets.
//!
//! Classification is a single fold over the access-filtered symbols. Each
//! top-level symbol lands in exactly one bucket, decided by its kind:
//!
//! | Kind | Bucket |
//! |------|--------|
//! | class, enumeration, structure, protocol | type page |
//! | typealias | typealias page |
//! | operator | operator group (dropped if nothing implements it) |
//! | function (non-operator), variable | global group keyed by name |
//! | anything else, operator functions | nowhere |
//!
//! Extension members whose extended type is not declared in the module form a
//! separate set of external-type groups.
//!
//! Symbols are visited in input order, so the first symbol of every group is
//! the one the extractor reported first. That symbol later anchors the page.

use crate::types::{AccessLevel, Scope, Symbol, SymbolKind};
use std::collections::{BTreeMap, HashSet};

/// A classified page before global and external groups are folded in.
#[derive(Debug, Clone, PartialEq)]
pub enum Bucket {
    Type { symbol: Symbol, members: Vec<Symbol> },
    Typealias { symbol: Symbol },
    Operator { operators: Vec<Symbol>, implementations: Vec<Symbol> },
}

impl Bucket {
    /// The first symbol placed in this bucket.
    pub fn anchor(&self) -> Option<&Symbol> {
        match self {
            Bucket::Type { symbol, .. } | Bucket::Typealias { symbol } => Some(symbol),
            Bucket::Operator { operators, .. } => operators.first(),
        }
    }
}

/// Result of classifying one module's symbols.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    /// Type, typealias and operator pages keyed by route.
    pub pages: BTreeMap<String, Bucket>,
    /// Global functions and variables grouped by name.
    pub globals: BTreeMap<String, Vec<Symbol>>,
    /// Members of extensions on types the module does not declare, by type name.
    pub external_types: BTreeMap<String, Vec<Symbol>>,
}

impl Classification {
    /// Number of pages this classification turns into.
    pub fn page_count(&self) -> usize {
        // Groups may share a route with a page; count distinct routes
        let mut routes: HashSet<String> = self.pages.keys().cloned().collect();
        routes.extend(self.globals.keys().map(|name| crate::route::encode(name)));
        routes.extend(self.external_types.keys().map(|name| crate::route::encode(name)));
        routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty() && self.globals.is_empty() && self.external_types.is_empty()
    }
}

/// Classify `symbols`, keeping only those at or above `minimum`.
pub fn classify(symbols: &[Symbol], minimum: AccessLevel) -> Classification {
    let visible: Vec<&Symbol> = symbols
        .iter()
        .filter(|s| minimum.includes(s.access))
        .collect();

    let mut pages = BTreeMap::new();
    let mut operator_groups: BTreeMap<String, Vec<Symbol>> = BTreeMap::new();
    let mut globals: BTreeMap<String, Vec<Symbol>> = BTreeMap::new();

    for symbol in visible.iter().filter(|s| s.is_top_level()) {
        match symbol.kind {
            SymbolKind::Class
            | SymbolKind::Enumeration
            | SymbolKind::Structure
            | SymbolKind::Protocol => {
                let route = crate::route::encode(&symbol.qualified_name());
                let members = members_of(&visible, &symbol.qualified_name());
                pages.insert(
                    route,
                    Bucket::Type {
                        symbol: (*symbol).clone(),
                        members,
                    },
                );
            }
            SymbolKind::Typealias => {
                pages.insert(
                    crate::route::encode(&symbol.name),
                    Bucket::Typealias {
                        symbol: (*symbol).clone(),
                    },
                );
            }
            SymbolKind::Operator => {
                operator_groups
                    .entry(crate::route::encode(&symbol.name))
                    .or_default()
                    .push((*symbol).clone());
            }
            SymbolKind::Function if symbol.is_operator_function() => {}
            SymbolKind::Function | SymbolKind::Variable => {
                globals
                    .entry(symbol.name.clone())
                    .or_default()
                    .push((*symbol).clone());
            }
            SymbolKind::Other => {}
        }
    }

    for (route, operators) in operator_groups {
        let implementations = implementations_of(&visible, &operators);
        if implementations.is_empty() {
            continue;
        }
        if route.is_empty() {
            tracing::debug!(
                operator = %operators[0].name,
                "operator name encodes to an empty route"
            );
        }
        pages.insert(
            route,
            Bucket::Operator {
                operators,
                implementations,
            },
        );
    }

    let external_types = group_external_extensions(symbols, &visible);

    Classification {
        pages,
        globals,
        external_types,
    }
}

/// Direct members of the named type, whether declared inline or in an extension.
fn members_of(visible: &[&Symbol], type_name: &str) -> Vec<Symbol> {
    visible
        .iter()
        .filter(|s| s.context.len() == 1 && s.context[0].type_name() == type_name)
        .map(|s| (*s).clone())
        .collect()
}

/// Functions whose name matches any of the operators, in any scope.
fn implementations_of(visible: &[&Symbol], operators: &[Symbol]) -> Vec<Symbol> {
    let names: HashSet<&str> = operators.iter().map(|o| o.name.as_str()).collect();
    visible
        .iter()
        .filter(|s| s.kind == SymbolKind::Function && names.contains(s.name.as_str()))
        .map(|s| (*s).clone())
        .collect()
}

/// Group members of single-level extensions on types the module does not declare.
///
/// A type counts as declared if any symbol in the module, at any access level,
/// is a type or typealias with that qualified name.
fn group_external_extensions(all: &[Symbol], visible: &[&Symbol]) -> BTreeMap<String, Vec<Symbol>> {
    let declared: HashSet<String> = all
        .iter()
        .filter(|s| s.kind.is_type() || s.kind == SymbolKind::Typealias)
        .map(Symbol::qualified_name)
        .collect();

    let mut groups: BTreeMap<String, Vec<Symbol>> = BTreeMap::new();
    for symbol in visible {
        let [Scope::Extension(extended)] = symbol.context.as_slice() else {
            continue;
        };
        if declared.contains(extended) {
            continue;
        }
        groups
            .entry(extended.clone())
            .or_default()
            .push((*symbol).clone());
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    fn classify_public(symbols: &[Symbol]) -> Classification {
        classify(symbols, AccessLevel::Public)
    }

    #[test]
    fn types_get_their_own_page() {
        let symbols = vec![
            class("Foo", "/src/A.swift"),
            structure("Bar", "/src/A.swift"),
            enumeration("Baz", "/src/B.swift"),
            protocol("Qux", "/src/B.swift"),
        ];
        let result = classify_public(&symbols);
        assert_eq!(route_keys(&result), vec!["Bar", "Baz", "Foo", "Qux"]);
        assert!(matches!(result.pages["Foo"], Bucket::Type { .. }));
    }

    #[test]
    fn type_page_collects_inline_and_extension_members() {
        let symbols = vec![
            class("Foo", "/src/A.swift"),
            member(function("run", "/src/A.swift"), Scope::Type("Foo".into())),
            member(variable("count", "/src/B.swift"), Scope::Extension("Foo".into())),
            member(function("other", "/src/B.swift"), Scope::Type("Bar".into())),
        ];
        let result = classify_public(&symbols);
        let Bucket::Type { members, .. } = &result.pages["Foo"] else {
            panic!("expected a type page");
        };
        let names: Vec<&str> = members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["run", "count"]);
    }

    #[test]
    fn typealias_gets_its_own_page() {
        let symbols = vec![typealias("Handler", "/src/A.swift")];
        let result = classify_public(&symbols);
        assert!(matches!(result.pages["Handler"], Bucket::Typealias { .. }));
    }

    #[test]
    fn globals_grouped_by_name_in_input_order() {
        let symbols = vec![
            class("Foo", "/src/A.swift"),
            function("bar", "/src/A.swift"),
            function("bar", "/src/B.swift"),
        ];
        let result = classify_public(&symbols);
        assert_eq!(route_keys(&result), vec!["Foo"]);
        let bar = &result.globals["bar"];
        assert_eq!(bar.len(), 2);
        assert_eq!(bar[0].source, "/src/A.swift");
        assert_eq!(bar[1].source, "/src/B.swift");
    }

    #[test]
    fn variables_join_globals() {
        let symbols = vec![variable("version", "/src/A.swift")];
        let result = classify_public(&symbols);
        assert_eq!(result.globals["version"].len(), 1);
    }

    #[test]
    fn operator_without_implementation_is_dropped() {
        let symbols = vec![operator("<=>", "/src/Ops.swift")];
        let result = classify_public(&symbols);
        assert!(result.pages.is_empty());
        assert!(result.is_empty());
    }

    #[test]
    fn operator_with_implementation_is_kept() {
        let symbols = vec![
            operator("+++", "/src/Ops.swift"),
            function("+++", "/src/Ops.swift"),
            member(function("+++", "/src/Ops.swift"), Scope::Extension("Int".into())),
        ];
        let result = classify_public(&symbols);
        let Bucket::Operator {
            operators,
            implementations,
        } = &result.pages["+++"]
        else {
            panic!("expected an operator page");
        };
        assert_eq!(operators.len(), 1);
        assert_eq!(implementations.len(), 2);
    }

    #[test]
    fn reserved_character_operator_keeps_empty_route() {
        let symbols = vec![
            operator("*", "/src/Ops.swift"),
            function("*", "/src/Ops.swift"),
        ];
        let result = classify_public(&symbols);
        assert_eq!(route_keys(&result), vec![""]);
        assert!(matches!(result.pages[""], Bucket::Operator { .. }));
    }

    #[test]
    fn operator_functions_are_not_globals() {
        let symbols = vec![function("==", "/src/Ops.swift")];
        let result = classify_public(&symbols);
        assert!(result.globals.is_empty());
    }

    #[test]
    fn other_kinds_are_skipped() {
        let mut init = function("init", "/src/A.swift");
        init.kind = SymbolKind::Other;
        let result = classify_public(&[init]);
        assert!(result.is_empty());
    }

    #[test]
    fn access_filter_excludes_lower_levels() {
        let mut hidden = class("Hidden", "/src/A.swift");
        hidden.access = AccessLevel::Internal;
        let symbols = vec![hidden, class("Shown", "/src/A.swift")];
        assert_eq!(route_keys(&classify_public(&symbols)), vec!["Shown"]);
        assert_eq!(
            route_keys(&classify(&symbols, AccessLevel::Internal)),
            vec!["Hidden", "Shown"]
        );
    }

    #[test]
    fn extension_on_external_type_is_grouped() {
        let symbols = vec![
            class("Foo", "/src/A.swift"),
            member(variable("second", "/src/Ext.swift"), Scope::Extension("Array".into())),
            member(function("chunked", "/src/Ext.swift"), Scope::Extension("Array".into())),
        ];
        let result = classify_public(&symbols);
        assert_eq!(result.external_types["Array"].len(), 2);
        assert_eq!(result.external_types["Array"][0].name, "second");
        assert!(!result.pages.contains_key("Array"));
    }

    #[test]
    fn extension_on_module_type_is_not_external() {
        let symbols = vec![
            class("Foo", "/src/A.swift"),
            member(function("run", "/src/B.swift"), Scope::Extension("Foo".into())),
        ];
        assert!(classify_public(&symbols).external_types.is_empty());
    }

    #[test]
    fn extension_on_typealias_is_not_external() {
        let symbols = vec![
            typealias("Handler", "/src/A.swift"),
            member(function("call", "/src/B.swift"), Scope::Extension("Handler".into())),
        ];
        assert!(classify_public(&symbols).external_types.is_empty());
    }

    #[test]
    fn extension_on_private_module_type_is_not_external() {
        let mut internal = structure("Cache", "/src/A.swift");
        internal.access = AccessLevel::Internal;
        let symbols = vec![
            internal,
            member(function("purge", "/src/B.swift"), Scope::Extension("Cache".into())),
        ];
        assert!(classify_public(&symbols).external_types.is_empty());
    }

    #[test]
    fn nested_extension_members_are_not_external() {
        let symbols = vec![member(
            member(function("deep", "/src/A.swift"), Scope::Extension("Array".into())),
            Scope::Type("Inner".into()),
        )];
        assert!(classify_public(&symbols).external_types.is_empty());
    }

    #[test]
    fn classification_is_a_partition() {
        let symbols = vec![
            class("Foo", "/src/A.swift"),
            typealias("Alias", "/src/A.swift"),
            operator("+++", "/src/A.swift"),
            function("+++", "/src/A.swift"),
            function("bar", "/src/A.swift"),
            variable("baz", "/src/A.swift"),
        ];
        let result = classify_public(&symbols);

        let mut seen: Vec<&str> = Vec::new();
        for bucket in result.pages.values() {
            match bucket {
                Bucket::Type { symbol, .. } | Bucket::Typealias { symbol } => seen.push(&symbol.id),
                Bucket::Operator { operators, .. } => {
                    seen.extend(operators.iter().map(|o| o.id.as_str()))
                }
            }
        }
        for group in result.globals.values() {
            seen.extend(group.iter().map(|s| s.id.as_str()));
        }
        let unique: HashSet<&str> = seen.iter().copied().collect();
        assert_eq!(unique.len(), seen.len(), "a symbol landed in two buckets");
        // The operator function is dropped from the buckets (it is an implementation)
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn page_count_merges_shared_routes() {
        let symbols = vec![class("Foo", "/src/A.swift"), function("Foo", "/src/A.swift")];
        assert_eq!(classify_public(&symbols).page_count(), 1);
    }
}
