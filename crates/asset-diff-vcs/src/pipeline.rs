// Copyright 2026 Oxide Computer Company

//! The end-to-end asset diff run.

use crate::{
    Anchors, Asset, DiffCommand, DiffLauncher, GitCli, OldContent,
    ProcessLauncher, RunError, VcsGateway, diff::diff_tool_from_env,
    materialize::materialize,
    resolve::{classify_storage, find_last_revision},
};
use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, warn};

/// Compares assets against their last committed revision.
///
/// Holds the repository anchors, the diff tool path, a
/// [`VcsGateway`] and a [`DiffLauncher`]. Use
/// [`AssetDiff::standard`] for the real `git` and process launcher.
#[derive(Debug, Clone)]
pub struct AssetDiff<G, L> {
    anchors: Anchors,
    diff_tool: Utf8PathBuf,
    vcs: G,
    launcher: L,
}

impl AssetDiff<GitCli, ProcessLauncher> {
    /// Locates the repository and project from `cwd`, reads the git
    /// binary from `$GIT`, and the diff tool from `diff_tool` or, if
    /// `None`, from `$UE_DIFF_BIN`.
    ///
    /// `cwd` must be absolute.
    pub fn standard(
        cwd: &Utf8Path,
        diff_tool: Option<Utf8PathBuf>,
    ) -> Result<Self, RunError> {
        let anchors = Anchors::locate(cwd)?;
        let diff_tool = match diff_tool {
            Some(tool) => tool,
            None => diff_tool_from_env()?,
        };
        let vcs = GitCli::new(anchors.repo_root())?;
        Ok(AssetDiff::new(anchors, diff_tool, vcs, ProcessLauncher))
    }
}

impl<G: VcsGateway, L: DiffLauncher> AssetDiff<G, L> {
    /// Creates an `AssetDiff` from its parts.
    pub fn new(
        anchors: Anchors,
        diff_tool: impl Into<Utf8PathBuf>,
        vcs: G,
        launcher: L,
    ) -> Self {
        AssetDiff { anchors, diff_tool: diff_tool.into(), vcs, launcher }
    }

    /// Returns the repository anchors.
    pub fn anchors(&self) -> &Anchors {
        &self.anchors
    }

    /// Returns the diff tool path.
    pub fn diff_tool(&self) -> &Utf8Path {
        &self.diff_tool
    }

    /// Diffs the asset at `asset_path` (relative to `cwd`) against its
    /// last committed revision.
    ///
    /// Any temporary file is removed before this returns, whether or not
    /// the diff tool succeeded.
    pub fn run(
        &self,
        cwd: &Utf8Path,
        asset_path: &Utf8Path,
    ) -> Result<(), RunError> {
        let asset =
            Asset::validate(cwd, self.anchors.repo_root(), asset_path)?;
        let old = self.prepare(&asset)?;

        let command = DiffCommand::new(
            &self.diff_tool,
            self.anchors.project(),
            old.path(),
            Some(asset.path().to_owned()),
        );
        let launched = self.launcher.launch(self.anchors.repo_root(), &command);

        if let Err(error) = old.close() {
            warn!(%error, "failed to remove temporary files");
        }
        launched?;
        Ok(())
    }

    /// Resolves and materializes the last committed revision of `asset`.
    pub fn prepare(&self, asset: &Asset) -> Result<OldContent, RunError> {
        let revision = find_last_revision(&self.vcs, asset.repo_path())?;
        let mode = classify_storage(&self.vcs, asset.repo_path())?;
        let old = materialize(&self.vcs, asset, &revision, mode)?;
        debug!(left = %old.path(), %mode, "old revision ready");
        Ok(old)
    }
}
