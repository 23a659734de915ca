//! Documentation generation: classify → index → plan → emit.
//!
//! The first three steps run on the calling thread, strictly in order, and
//! produce a [`RunPlan`]. Only emission fans out across worker threads.
//!
//! ## Outcomes
//!
//! - No pages after classification is not an error. [`Outcome::Empty`] carries
//!   a hint telling the caller whether lowering the minimum access level would
//!   have produced pages.
//! - An unusable base URL aborts before anything is planned.
//! - A failed write aborts the run once in-flight writes settle; pages already
//!   written stay on disk.

use crate::classify::classify;
use crate::config::{DocConfig, OutputFormat};
use crate::emit::{self, EmitError};
use crate::index::PageIndex;
use crate::plan::{OutputPlanner, PlannedWrite};
use crate::render::{RenderContext, Renderer};
use crate::route::{BaseUrl, RouteError};
use crate::scan::ScanResult;
use crate::types::AccessLevel;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Route error: {0}")]
    Route(#[from] RouteError),
    #[error("Emit error: {0}")]
    Emit(#[from] EmitError),
}

/// Settings for one run, usually resolved from [`DocConfig`].
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub output: PathBuf,
    pub format: OutputFormat,
    pub base_url: String,
    pub minimum_access: AccessLevel,
}

impl GenerateOptions {
    pub fn from_config(config: &DocConfig) -> Self {
        Self {
            output: PathBuf::from(&config.output),
            format: config.format.kind,
            base_url: config.format.base_url.clone(),
            minimum_access: config.access.minimum,
        }
    }
}

/// Why a run produced no pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyHint {
    /// Symbols exist below the minimum access level.
    LowerAccessLevel,
    /// Nothing documentable at any access level.
    NoPublicApi,
}

/// Everything needed to write a run: pages, their paths, render settings.
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub index: PageIndex,
    pub writes: Vec<PlannedWrite>,
    pub ctx: RenderContext,
}

#[derive(Debug)]
pub enum Outcome<T> {
    Empty(EmptyHint),
    Ready(T),
}

/// Classify, index and plan without writing anything.
pub fn plan(
    scan: &ScanResult,
    options: &GenerateOptions,
) -> Result<Outcome<RunPlan>, GenerateError> {
    let base_url = BaseUrl::parse(&options.base_url)?;

    let classification = classify(&scan.symbols, options.minimum_access);
    if classification.is_empty() {
        let hint = if options.minimum_access > AccessLevel::Private
            && !classify(&scan.symbols, AccessLevel::Private).is_empty()
        {
            EmptyHint::LowerAccessLevel
        } else {
            EmptyHint::NoPublicApi
        };
        return Ok(Outcome::Empty(hint));
    }
    tracing::info!(pages = classification.page_count(), "classified symbols");

    let index = PageIndex::build(classification, &scan.module, options.format);
    let planner = OutputPlanner::new(&options.output, &scan.root_paths(), options.format);
    let writes = planner.plan(&index);

    let ctx = RenderContext {
        module: scan.module.clone(),
        format: options.format,
        base_url,
        single_page: index.is_single_page(),
    };
    Ok(Outcome::Ready(RunPlan { index, writes, ctx }))
}

/// Plan and write the documentation for `scan`.
///
/// Returns the plan that was carried out.
pub fn generate(
    scan: &ScanResult,
    options: &GenerateOptions,
    renderer: &dyn Renderer,
) -> Result<Outcome<RunPlan>, GenerateError> {
    let run = match plan(scan, options)? {
        Outcome::Empty(hint) => return Ok(Outcome::Empty(hint)),
        Outcome::Ready(run) => run,
    };

    emit::prepare_directories(&options.output, &run.writes)?;
    emit::emit(&run.index, &run.writes, renderer, &run.ctx)?;
    tracing::info!(files = run.writes.len(), output = %options.output.display(), "generated");
    Ok(Outcome::Ready(run))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::SiteRenderer;
    use crate::test_helpers::*;
    use crate::types::Symbol;
    use tempfile::TempDir;

    fn scan_of(symbols: Vec<Symbol>) -> ScanResult {
        ScanResult {
            module: "MyKit".into(),
            roots: vec![],
            symbols,
        }
    }

    fn options(output: PathBuf, format: OutputFormat) -> GenerateOptions {
        GenerateOptions {
            output,
            format,
            base_url: "/".into(),
            minimum_access: AccessLevel::Public,
        }
    }

    #[test]
    fn no_symbols_is_empty_without_hint_to_lower() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("docs");
        let outcome = generate(
            &scan_of(vec![]),
            &options(out.clone(), OutputFormat::Commonmark),
            &SiteRenderer,
        )
        .unwrap();
        assert!(matches!(outcome, Outcome::Empty(EmptyHint::NoPublicApi)));
        assert!(!out.exists(), "empty run must not write anything");
    }

    #[test]
    fn internal_only_module_hints_lowering_access() {
        let mut internal = class("Cache", "/src/Cache.swift");
        internal.access = AccessLevel::Internal;
        let tmp = TempDir::new().unwrap();
        let outcome = generate(
            &scan_of(vec![internal]),
            &options(tmp.path().join("docs"), OutputFormat::Commonmark),
            &SiteRenderer,
        )
        .unwrap();
        assert!(matches!(outcome, Outcome::Empty(EmptyHint::LowerAccessLevel)));
    }

    #[test]
    fn single_page_run_writes_home_only() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("docs");
        let outcome = generate(
            &scan_of(vec![class("Foo", "/src/Foo.swift")]),
            &options(out.clone(), OutputFormat::Commonmark),
            &SiteRenderer,
        )
        .unwrap();
        let Outcome::Ready(run) = outcome else {
            panic!("expected pages");
        };
        assert_eq!(run.writes.len(), 1);
        let home = std::fs::read_to_string(out.join("Home.md")).unwrap();
        assert!(home.starts_with("# Foo"));
    }

    #[test]
    fn invalid_base_url_aborts_before_writing() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("docs");
        let mut opts = options(out.clone(), OutputFormat::Html);
        opts.base_url = "mailto:docs@example.com".into();
        let result = generate(&scan_of(vec![class("Foo", "/src/Foo.swift")]), &opts, &SiteRenderer);
        assert!(matches!(result, Err(GenerateError::Route(_))));
        assert!(!out.exists());
    }

    #[test]
    fn plan_reports_writes_without_touching_disk() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("docs");
        let symbols = vec![class("Foo", "/src/Foo.swift"), function("bar", "/src/Bar.swift")];
        let opts = options(out.clone(), OutputFormat::Commonmark);
        let Outcome::Ready(run) = plan(&scan_of(symbols), &opts).unwrap() else {
            panic!("expected a plan");
        };
        // Foo, bar, Home, _Sidebar, _Footer
        assert_eq!(run.writes.len(), 5);
        assert!(!run.ctx.single_page);
        assert!(!out.exists());
    }

    #[test]
    fn options_from_config() {
        let mut config = DocConfig::default();
        config.output = "wiki".into();
        config.format.kind = OutputFormat::Html;
        let opts = GenerateOptions::from_config(&config);
        assert_eq!(opts.output, PathBuf::from("wiki"));
        assert_eq!(opts.format, OutputFormat::Html);
        assert_eq!(opts.minimum_access, AccessLevel::Public);
    }
}
