//! Parallel emission of planned files.
//!
//! Every planned write is independent, so writes are fanned out over the rayon
//! pool (one work item per file, work-stealing keeps every worker busy). The
//! first failure stops new writes from being scheduled; writes already running
//! finish on their own and the failure is returned once they have settled.
//!
//! Files written before a failure stay on disk. There is no rollback.
//!
//! Directories are created up front, before any write, in a single pass.

use crate::index::PageIndex;
use crate::plan::{PlannedWrite, Target};
use crate::render::{RenderContext, RenderError, Renderer};
use rayon::prelude::*;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EmitError {
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("Planned page '{0}' is missing from the index")]
    MissingPage(String),
}

/// Create every directory the planned writes need.
pub fn prepare_directories(output_root: &Path, writes: &[PlannedWrite]) -> Result<(), EmitError> {
    let mut dirs: BTreeSet<&Path> = writes.iter().filter_map(|w| w.path.parent()).collect();
    dirs.insert(output_root);
    for dir in dirs {
        fs::create_dir_all(dir).map_err(|source| EmitError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Render and write all planned files concurrently.
pub fn emit(
    index: &PageIndex,
    writes: &[PlannedWrite],
    renderer: &dyn Renderer,
    ctx: &RenderContext,
) -> Result<(), EmitError> {
    writes
        .par_iter()
        .try_for_each(|write| write_one(index, write, renderer, ctx))
}

fn write_one(
    index: &PageIndex,
    write: &PlannedWrite,
    renderer: &dyn Renderer,
    ctx: &RenderContext,
) -> Result<(), EmitError> {
    let contents = match &write.target {
        Target::Page { route } => {
            let indexed = index
                .get(route)
                .ok_or_else(|| EmitError::MissingPage(route.clone()))?;
            renderer.render(route, &indexed.page, ctx)?
        }
        Target::Stylesheet => renderer.stylesheet(),
    };
    fs::write(&write.path, contents).map_err(|source| EmitError::Write {
        path: write.path.clone(),
        source,
    })?;
    tracing::debug!(path = %write.path.display(), "wrote");
    Ok(())
}
