// Copyright 2026 Oxide Computer Company

//! Resolve the previous revision of a binary asset and hand both revisions
//! to a visual diff tool.
//!
//! Binary assets such as Unreal Engine `.uasset` files can only be compared
//! by a format-aware tool, which needs two files on disk. This crate finds
//! the repository root and project descriptor, asks Git for the last
//! revision that touched the asset, and produces a file holding that
//! revision:
//!
//! * For assets stored inline in Git history, the blob is exported into a
//!   temporary file that is deleted after the diff.
//! * For assets stored in Git LFS, the object is located in the local LFS
//!   store and used in place.
//!
//! The diff tool is then run as `<tool> <project> -diff <old> <new>`.
//!
//! # Usage
//!
//! ```no_run
//! use asset_diff_vcs::AssetDiff;
//! use camino::{Utf8Path, Utf8PathBuf};
//!
//! let cwd = Utf8PathBuf::try_from(std::env::current_dir().unwrap()).unwrap();
//! // Reads $UE_DIFF_BIN for the diff tool.
//! let asset_diff = AssetDiff::standard(&cwd, None)
//!     .expect("repository and project found");
//! asset_diff
//!     .run(&cwd, Utf8Path::new("Content/Foo.uasset"))
//!     .expect("diff tool ran");
//! ```
//!
//! The Git and diff-tool seams are the [`VcsGateway`] and [`DiffLauncher`]
//! traits, so the pipeline can run against test doubles.

#![deny(missing_docs)]

mod anchors;
mod diff;
mod errors;
mod materialize;
mod pipeline;
pub mod resolve;
pub mod search;
mod vcs;

pub use anchors::{
    Anchors, Asset, PROJECT_SUFFIX, find_project_descriptor,
    find_repository_root,
};
pub use diff::{
    DIFF_BIN_ENV, DiffCommand, DiffLauncher, ProcessLauncher,
    diff_tool_from_env,
};
pub use errors::{
    AnchorError, AssetPathError, AtomicWriteError, DiffToolError, EnvError,
    MaterializeError, ResolveError, RunError, SearchError, ToolError,
};
pub use materialize::{
    OldContent, local_media_dir, materialize, materialize_inline,
    materialize_lfs, pointer_oid, temp_file_name,
};
pub use pipeline::AssetDiff;
pub use vcs::{GitCli, VcsGateway};
