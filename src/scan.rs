//! Input scanning and symbol loading.
//!
//! Stage 1 of the pipeline. Validates the input directories, walks them for
//! Swift sources, and asks an [`Extractor`] for the module's symbols.
//!
//! Semantic analysis of Swift sources happens outside this crate. The stock
//! [`ManifestExtractor`] reads the JSON symbol manifest such a tool writes:
//!
//! ```json
//! {
//!   "module": "MyKit",
//!   "symbols": [
//!     { "id": "s:5MyKit3FooC", "name": "Foo", "kind": "class", "access": "public",
//!       "source": "file:///project/Sources/MyKit/Foo.swift" },
//!     { "id": "s:Sa5MyKitE6secondxSgvp", "name": "second", "kind": "variable",
//!       "access": "public", "context": [{ "extension": "Array" }],
//!       "source": "file:///project/Sources/MyKit/Array+Extras.swift" }
//!   ]
//! }
//! ```
//!
//! ## Invalid Inputs
//!
//! An input that does not exist or is not a directory is logged as a warning
//! and skipped; the run continues with the remaining inputs.

use crate::types::{Symbol, SymbolManifest};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error in symbol manifest {path}: {source}")]
    Manifest {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Produces the symbols declared by a module.
pub trait Extractor {
    /// Module name as recorded by the extractor, if it knows one.
    fn module_name(&self) -> Option<&str> {
        None
    }

    fn extract(&self, roots: &[SourceRoot]) -> Result<Vec<Symbol>, ScanError>;
}

/// Reads symbols from a JSON manifest written by an external extractor.
#[derive(Debug, Clone)]
pub struct ManifestExtractor {
    manifest: SymbolManifest,
}

impl ManifestExtractor {
    pub fn from_path(path: &Path) -> Result<Self, ScanError> {
        let content = fs::read_to_string(path)?;
        let manifest = serde_json::from_str(&content).map_err(|source| ScanError::Manifest {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { manifest })
    }

    pub fn from_manifest(manifest: SymbolManifest) -> Self {
        Self { manifest }
    }
}

impl Extractor for ManifestExtractor {
    fn module_name(&self) -> Option<&str> {
        Some(&self.manifest.module)
    }

    fn extract(&self, _roots: &[SourceRoot]) -> Result<Vec<Symbol>, ScanError> {
        Ok(self.manifest.symbols.clone())
    }
}

/// A validated input directory.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRoot {
    /// Canonical absolute path.
    pub path: PathBuf,
    /// Number of `.swift` files found beneath it.
    pub swift_files: usize,
}

/// Everything the later stages need from the inputs.
#[derive(Debug, Clone)]
pub struct ScanResult {
    pub module: String,
    pub roots: Vec<SourceRoot>,
    pub symbols: Vec<Symbol>,
}

impl ScanResult {
    pub fn root_paths(&self) -> Vec<PathBuf> {
        self.roots.iter().map(|r| r.path.clone()).collect()
    }
}

/// Validate `inputs`, then extract symbols for `module`.
///
/// `module` overrides the name the extractor reports.
pub fn scan(
    inputs: &[PathBuf],
    module: Option<&str>,
    extractor: &dyn Extractor,
) -> Result<ScanResult, ScanError> {
    let roots = validate_inputs(inputs);
    let symbols = extractor.extract(&roots)?;
    let module = module
        .or(extractor.module_name())
        .unwrap_or("Module")
        .to_string();
    tracing::info!(
        module = %module,
        roots = roots.len(),
        symbols = symbols.len(),
        "scanned inputs"
    );
    Ok(ScanResult {
        module,
        roots,
        symbols,
    })
}

/// Keep the inputs that are existing directories, warning about the rest.
pub fn validate_inputs(inputs: &[PathBuf]) -> Vec<SourceRoot> {
    inputs
        .iter()
        .filter_map(|input| {
            if !input.exists() {
                tracing::warn!(path = %input.display(), "input directory not found, skipping");
                return None;
            }
            if !input.is_dir() {
                tracing::warn!(path = %input.display(), "input is not a directory, skipping");
                return None;
            }
            let path = fs::canonicalize(input).unwrap_or_else(|_| input.clone());
            let swift_files = count_swift_files(&path);
            Some(SourceRoot { path, swift_files })
        })
        .collect()
}

fn count_swift_files(root: &Path) -> usize {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.file_type().is_file()
                && e.path()
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case("swift"))
                    .unwrap_or(false)
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AccessLevel, SymbolKind};
    use tempfile::TempDir;

    const MANIFEST: &str = r#"{
        "module": "MyKit",
        "symbols": [
            {"id": "s:1", "name": "Foo", "kind": "class", "access": "public",
             "source": "file:///project/Sources/MyKit/Foo.swift"},
            {"id": "s:2", "name": "bar", "kind": "function", "access": "internal",
             "source": "/project/Sources/MyKit/Bar.swift"}
        ]
    }"#;

    fn source_tree() -> TempDir {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("Sources/Models")).unwrap();
        fs::write(tmp.path().join("Sources/Foo.swift"), "").unwrap();
        fs::write(tmp.path().join("Sources/Models/User.swift"), "").unwrap();
        fs::write(tmp.path().join("Sources/README.md"), "").unwrap();
        tmp
    }

    #[test]
    fn manifest_extractor_reads_symbols() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("symbols.json");
        fs::write(&path, MANIFEST).unwrap();

        let extractor = ManifestExtractor::from_path(&path).unwrap();
        assert_eq!(extractor.module_name(), Some("MyKit"));
        let symbols = extractor.extract(&[]).unwrap();
        assert_eq!(symbols.len(), 2);
        assert_eq!(symbols[0].kind, SymbolKind::Class);
        assert_eq!(symbols[1].access, AccessLevel::Internal);
    }

    #[test]
    fn malformed_manifest_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("symbols.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            ManifestExtractor::from_path(&path),
            Err(ScanError::Manifest { .. })
        ));
    }

    #[test]
    fn missing_manifest_is_io_error() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            ManifestExtractor::from_path(&tmp.path().join("nope.json")),
            Err(ScanError::Io(_))
        ));
    }

    #[test]
    fn valid_input_counts_swift_files() {
        let tmp = source_tree();
        let roots = validate_inputs(&[tmp.path().join("Sources")]);
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].swift_files, 2);
        assert!(roots[0].path.is_absolute());
    }

    #[test]
    fn invalid_inputs_are_skipped() {
        let tmp = source_tree();
        let roots = validate_inputs(&[
            tmp.path().join("missing"),
            tmp.path().join("Sources/Foo.swift"),
            tmp.path().join("Sources"),
        ]);
        assert_eq!(roots.len(), 1);
        assert!(roots[0].path.ends_with("Sources"));
    }

    #[test]
    fn scan_prefers_explicit_module_name() {
        let tmp = source_tree();
        let manifest: SymbolManifest = serde_json::from_str(MANIFEST).unwrap();
        let extractor = ManifestExtractor::from_manifest(manifest);

        let result = scan(&[tmp.path().join("Sources")], Some("Renamed"), &extractor).unwrap();
        assert_eq!(result.module, "Renamed");
        assert_eq!(result.symbols.len(), 2);

        let result = scan(&[], None, &extractor).unwrap();
        assert_eq!(result.module, "MyKit");
        assert!(result.roots.is_empty());
    }
}
