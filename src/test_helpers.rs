//! Shared test utilities for the swiftdoc test suite.
//!
//! Symbol builders produce public, top-level declarations with unique ids.
//! Nest them with [`member`]:
//!
//! ```text
//! use crate::test_helpers::*;
//!
//! let symbols = vec![
//!     class("Foo", "/src/Foo.swift"),
//!     member(function("run", "/src/Foo.swift"), Scope::Type("Foo".into())),
//! ];
//! let result = classify(&symbols, AccessLevel::Public);
//! assert_eq!(route_keys(&result), vec!["Foo"]);
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::classify::Classification;
use crate::types::{AccessLevel, Scope, Symbol, SymbolKind};

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

// =========================================================================
// Symbol builders
// =========================================================================

fn symbol(kind: SymbolKind, name: &str, source: &str) -> Symbol {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    Symbol {
        id: format!("s:test{id}"),
        name: name.to_string(),
        kind,
        access: AccessLevel::Public,
        context: Vec::new(),
        source: source.to_string(),
    }
}

pub fn class(name: &str, source: &str) -> Symbol {
    symbol(SymbolKind::Class, name, source)
}

pub fn structure(name: &str, source: &str) -> Symbol {
    symbol(SymbolKind::Structure, name, source)
}

pub fn enumeration(name: &str, source: &str) -> Symbol {
    symbol(SymbolKind::Enumeration, name, source)
}

pub fn protocol(name: &str, source: &str) -> Symbol {
    symbol(SymbolKind::Protocol, name, source)
}

pub fn typealias(name: &str, source: &str) -> Symbol {
    symbol(SymbolKind::Typealias, name, source)
}

pub fn operator(name: &str, source: &str) -> Symbol {
    symbol(SymbolKind::Operator, name, source)
}

pub fn function(name: &str, source: &str) -> Symbol {
    symbol(SymbolKind::Function, name, source)
}

pub fn variable(name: &str, source: &str) -> Symbol {
    symbol(SymbolKind::Variable, name, source)
}

/// Wrap `symbol` in `scope`, outermost first.
pub fn member(mut symbol: Symbol, scope: Scope) -> Symbol {
    symbol.context.insert(0, scope);
    symbol
}

// =========================================================================
// Classification lookups
// =========================================================================

/// Routes of the declared pages, in sorted order.
pub fn route_keys(classification: &Classification) -> Vec<&str> {
    classification.pages.keys().map(String::as_str).collect()
}
