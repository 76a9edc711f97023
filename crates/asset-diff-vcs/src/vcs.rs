// Copyright 2026 Oxide Computer Company

//! Version control gateway: the Git and Git LFS commands the pipeline
//! depends on.

use crate::{EnvError, ToolError};
use asset_diff::{RepoPath, Revision};
use camino::{Utf8Path, Utf8PathBuf};
use std::process::Command;
use tracing::debug;

/// Reads an executable path from an environment variable, falling back
/// to `default` if the variable is unset or empty.
///
/// The value is trimmed of leading and trailing whitespace.
///
/// Returns an error if the variable is set but is not valid UTF-8.
fn read_binary_env(
    var: &'static str,
    default: &str,
) -> Result<String, EnvError> {
    match std::env::var(var) {
        Ok(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Ok(default.to_string())
            } else {
                Ok(trimmed.to_string())
            }
        }
        Err(std::env::VarError::NotPresent) => Ok(default.to_string()),
        Err(std::env::VarError::NotUnicode(value)) => {
            Err(EnvError::NonUtf8 { var, value })
        }
    }
}

/// Read-only access to version control history.
///
/// Every method runs against a single repository. Paths are relative to the
/// repository root. Text output is returned undecoded beyond lossy UTF-8
/// conversion; interpreting it is up to the caller.
pub trait VcsGateway {
    /// Returns the output of a log query for the short id of the most
    /// recent revision that touched `path`. Empty if there is none.
    fn log_last_revision(&self, path: &RepoPath) -> Result<String, ToolError>;

    /// Returns the raw content of `path` at `revision`.
    fn show_blob(
        &self,
        revision: &Revision,
        path: &RepoPath,
    ) -> Result<Vec<u8>, ToolError>;

    /// Returns the listing of LFS-tracked files, one per line.
    fn list_lfs_files(&self) -> Result<String, ToolError>;

    /// Returns the LFS environment dump.
    fn lfs_env(&self) -> Result<String, ToolError>;

    /// Returns the pretty-printed object for `path` at `revision`. For
    /// LFS-tracked files this is the pointer file.
    fn cat_file_object(
        &self,
        revision: &Revision,
        path: &RepoPath,
    ) -> Result<String, ToolError>;
}

impl<T: VcsGateway + ?Sized> VcsGateway for &T {
    fn log_last_revision(&self, path: &RepoPath) -> Result<String, ToolError> {
        (**self).log_last_revision(path)
    }

    fn show_blob(
        &self,
        revision: &Revision,
        path: &RepoPath,
    ) -> Result<Vec<u8>, ToolError> {
        (**self).show_blob(revision, path)
    }

    fn list_lfs_files(&self) -> Result<String, ToolError> {
        (**self).list_lfs_files()
    }

    fn lfs_env(&self) -> Result<String, ToolError> {
        (**self).lfs_env()
    }

    fn cat_file_object(
        &self,
        revision: &Revision,
        path: &RepoPath,
    ) -> Result<String, ToolError> {
        (**self).cat_file_object(revision, path)
    }
}

/// A [`VcsGateway`] backed by the `git` command-line tool (with the
/// `git-lfs` extension for the LFS queries).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GitCli {
    binary: String,
    repo_root: Utf8PathBuf,
}

impl GitCli {
    /// Creates a gateway for the repository at `repo_root`, using the
    /// `$GIT` environment variable or `"git"`.
    ///
    /// Returns an error if the `$GIT` environment variable is set
    /// but is not valid UTF-8.
    pub fn new(repo_root: impl Into<Utf8PathBuf>) -> Result<Self, EnvError> {
        let binary = read_binary_env("GIT", "git")?;
        Ok(Self::with_binary(binary, repo_root))
    }

    /// Creates a gateway using an explicit git binary.
    pub fn with_binary(
        binary: impl Into<String>,
        repo_root: impl Into<Utf8PathBuf>,
    ) -> Self {
        GitCli { binary: binary.into(), repo_root: repo_root.into() }
    }

    /// Returns the path to the git binary.
    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Returns the repository root commands run in.
    pub fn repo_root(&self) -> &Utf8Path {
        &self.repo_root
    }

    fn run(&self, args: &[&str]) -> Result<Vec<u8>, ToolError> {
        let command = format!("{} {}", self.binary, args.join(" "));
        debug!(cwd = %self.repo_root, "running `{command}`");

        let output = Command::new(&self.binary)
            .current_dir(&self.repo_root)
            .args(args)
            .output()
            .map_err(|source| ToolError::SpawnFailed {
                binary_path: self.binary.clone(),
                cwd: self.repo_root.clone(),
                source,
            })?;

        if output.status.success() {
            Ok(output.stdout)
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(ToolError::Failed {
                command,
                exit_status: output.status.to_string(),
                stderr: stderr.trim().to_string(),
            })
        }
    }

    fn run_text(&self, args: &[&str]) -> Result<String, ToolError> {
        let stdout = self.run(args)?;
        Ok(String::from_utf8_lossy(&stdout).into_owned())
    }
}

impl VcsGateway for GitCli {
    fn log_last_revision(&self, path: &RepoPath) -> Result<String, ToolError> {
        // `--` is required so filenames beginning with `-` are treated as
        // paths rather than options.
        self.run_text(&["log", "--format=%h", "-n", "1", "--", path.as_str()])
    }

    fn show_blob(
        &self,
        revision: &Revision,
        path: &RepoPath,
    ) -> Result<Vec<u8>, ToolError> {
        self.run(&["show", &revision.blob_spec(path)])
    }

    fn list_lfs_files(&self) -> Result<String, ToolError> {
        self.run_text(&["lfs", "ls-files"])
    }

    fn lfs_env(&self) -> Result<String, ToolError> {
        self.run_text(&["lfs", "env"])
    }

    fn cat_file_object(
        &self,
        revision: &Revision,
        path: &RepoPath,
    ) -> Result<String, ToolError> {
        self.run_text(&["cat-file", "-p", &revision.blob_spec(path)])
    }
}
