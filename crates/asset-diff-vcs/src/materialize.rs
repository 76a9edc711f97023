// Copyright 2026 Oxide Computer Company

//! Materializing the previous revision of an asset as a file on disk.

use crate::{Asset, MaterializeError, VcsGateway, errors::AtomicWriteError};
use asset_diff::{LfsOid, RepoPath, Revision, StorageMode};
use atomicwrites::AtomicFile;
use camino::{Utf8Path, Utf8PathBuf};
use camino_tempfile::Utf8TempDir;
use std::io::{self, Write};
use tracing::debug;

const LOCAL_MEDIA_DIR_LABEL: &str = "LocalMediaDir=";
const POINTER_OID_LABEL: &str = "oid sha256:";

/// The previous revision of an asset, available as a file.
///
/// For inline assets the file lives in a temporary directory owned by this
/// value and is deleted when it is dropped (or [`closed`](Self::close)).
/// For LFS assets the path points into the LFS object store, which is
/// never modified.
#[derive(Debug)]
pub enum OldContent {
    /// Content exported from Git history into a temporary file.
    Inline {
        /// The temporary file.
        path: Utf8PathBuf,
        /// The directory containing `path`, removed on drop.
        dir: Utf8TempDir,
    },
    /// Content found in the local LFS object store.
    Lfs {
        /// The object file.
        path: Utf8PathBuf,
    },
}

impl OldContent {
    /// Returns the path to the old content.
    pub fn path(&self) -> &Utf8Path {
        match self {
            OldContent::Inline { path, .. } | OldContent::Lfs { path } => path,
        }
    }

    /// Returns how the content was obtained.
    pub fn storage_mode(&self) -> StorageMode {
        match self {
            OldContent::Inline { .. } => StorageMode::Inline,
            OldContent::Lfs { .. } => StorageMode::LargeFileStorage,
        }
    }

    /// Removes any temporary files, reporting errors that dropping would
    /// ignore. Does nothing for LFS content.
    pub fn close(self) -> io::Result<()> {
        match self {
            OldContent::Inline { dir, .. } => dir.close(),
            OldContent::Lfs { .. } => Ok(()),
        }
    }
}

/// Materializes `asset` as of `revision`, using the strategy for `mode`.
pub fn materialize<G: VcsGateway>(
    vcs: &G,
    asset: &Asset,
    revision: &Revision,
    mode: StorageMode,
) -> Result<OldContent, MaterializeError> {
    match mode {
        StorageMode::Inline => materialize_inline(vcs, asset, revision),
        StorageMode::LargeFileStorage => {
            materialize_lfs(vcs, asset.repo_path(), revision)
        }
    }
}

/// Exports `asset` at `revision` from history into a new temporary
/// directory, as `<stem>_<revision>.<extension>`.
pub fn materialize_inline<G: VcsGateway>(
    vcs: &G,
    asset: &Asset,
    revision: &Revision,
) -> Result<OldContent, MaterializeError> {
    let content = vcs.show_blob(revision, asset.repo_path())?;

    let dir = Utf8TempDir::with_prefix("asset-diff-")
        .map_err(MaterializeError::CreateTempDir)?;
    let path = dir.path().join(temp_file_name(asset.path(), revision));

    AtomicFile::new(&path, atomicwrites::OverwriteBehavior::AllowOverwrite)
        .write(|f| f.write_all(&content))
        .map_err(|error| {
            let error = match error {
                atomicwrites::Error::Internal(e) => AtomicWriteError::Rename(e),
                atomicwrites::Error::User(e) => AtomicWriteError::Write(e),
            };
            MaterializeError::WriteOutput { path: path.clone(), error }
        })?;

    debug!(%path, bytes = content.len(), "wrote old revision");
    Ok(OldContent::Inline { path, dir })
}

/// Locates the LFS object for `path` at `revision` in the local object
/// store. Nothing is created or copied.
pub fn materialize_lfs<G: VcsGateway>(
    vcs: &G,
    path: &RepoPath,
    revision: &Revision,
) -> Result<OldContent, MaterializeError> {
    let env_output = vcs.lfs_env()?;
    let media_dir = local_media_dir(&env_output).ok_or_else(|| {
        MaterializeError::LocalMediaDirMissing { output: env_output.clone() }
    })?;
    debug!(%media_dir, "lfs media dir");

    let pointer = vcs.cat_file_object(revision, path)?;
    let oid_str = pointer_oid(&pointer).ok_or_else(|| {
        MaterializeError::ObjectIdMissing {
            path: path.clone(),
            revision: revision.clone(),
            output: pointer.clone(),
        }
    })?;
    let oid: LfsOid =
        oid_str.parse().map_err(|error| MaterializeError::InvalidObjectId {
            path: path.clone(),
            revision: revision.clone(),
            oid: oid_str.to_owned(),
            error,
        })?;
    debug!(%oid, "asset oid");

    let object_path = media_dir.join(oid.fan_out_path());
    if !object_path.is_file() {
        return Err(MaterializeError::ObjectNotFound { path: object_path });
    }
    debug!(path = %object_path, "old revision is in the lfs store");
    Ok(OldContent::Lfs { path: object_path })
}

/// Extracts the local media directory from `git lfs env` output.
pub fn local_media_dir(env_output: &str) -> Option<Utf8PathBuf> {
    env_output
        .lines()
        .filter_map(|line| line.trim().strip_prefix(LOCAL_MEDIA_DIR_LABEL))
        .find(|dir| !dir.is_empty())
        .map(Utf8PathBuf::from)
}

/// Extracts the hex oid from an LFS pointer file.
pub fn pointer_oid(pointer: &str) -> Option<&str> {
    pointer
        .lines()
        .find_map(|line| line.trim().strip_prefix(POINTER_OID_LABEL))
        .map(str::trim)
}

/// Returns `<stem>_<revision><.extension>` for `asset_path`.
pub fn temp_file_name(asset_path: &Utf8Path, revision: &Revision) -> String {
    let stem = asset_path.file_stem().unwrap_or("asset");
    match asset_path.extension() {
        Some(extension) => format!("{stem}_{revision}.{extension}"),
        None => format!("{stem}_{revision}"),
    }
}
