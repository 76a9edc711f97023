// Copyright 2026 Oxide Computer Company

//! Launching the external diff tool.

use crate::{DiffToolError, EnvError};
use camino::{Utf8Path, Utf8PathBuf};
use std::process::Command;
use tracing::debug;

/// The environment variable naming the diff tool executable.
pub const DIFF_BIN_ENV: &str = "UE_DIFF_BIN";

/// Reads the diff tool path from [`DIFF_BIN_ENV`].
///
/// The value is trimmed; an unset or blank variable is an error.
pub fn diff_tool_from_env() -> Result<Utf8PathBuf, EnvError> {
    match std::env::var(DIFF_BIN_ENV) {
        Ok(s) if !s.trim().is_empty() => {
            let tool = Utf8PathBuf::from(s.trim());
            debug!(%tool, "diff tool path");
            Ok(tool)
        }
        Ok(_) | Err(std::env::VarError::NotPresent) => Err(EnvError::Missing {
            var: DIFF_BIN_ENV,
            hint: "set it to your UnrealEditor-Cmd executable",
        }),
        Err(std::env::VarError::NotUnicode(value)) => {
            Err(EnvError::NonUtf8 { var: DIFF_BIN_ENV, value })
        }
    }
}

/// A diff tool invocation:
/// `<tool> <project> -diff <left> [<right>]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiffCommand {
    tool: Utf8PathBuf,
    project: Utf8PathBuf,
    left: Utf8PathBuf,
    right: Option<Utf8PathBuf>,
}

impl DiffCommand {
    /// Creates a command comparing `left` (old) against `right` (new).
    pub fn new(
        tool: impl Into<Utf8PathBuf>,
        project: impl Into<Utf8PathBuf>,
        left: impl Into<Utf8PathBuf>,
        right: Option<Utf8PathBuf>,
    ) -> Self {
        DiffCommand {
            tool: tool.into(),
            project: project.into(),
            left: left.into(),
            right,
        }
    }

    /// Returns the diff tool executable.
    pub fn tool(&self) -> &Utf8Path {
        &self.tool
    }

    /// Returns the arguments passed to the tool, excluding the tool itself.
    pub fn args(&self) -> Vec<&str> {
        let mut args =
            vec![self.project.as_str(), "-diff", self.left.as_str()];
        if let Some(right) = &self.right {
            args.push(right.as_str());
        }
        args
    }

    /// Returns the full argument vector, starting with the tool.
    pub fn argv(&self) -> Vec<&str> {
        let mut argv = vec![self.tool.as_str()];
        argv.extend(self.args());
        argv
    }
}

/// Something that can run a [`DiffCommand`] to completion.
pub trait DiffLauncher {
    /// Runs `command` with `cwd` as the working directory and waits for
    /// it to exit.
    fn launch(
        &self,
        cwd: &Utf8Path,
        command: &DiffCommand,
    ) -> Result<(), DiffToolError>;
}

impl<T: DiffLauncher + ?Sized> DiffLauncher for &T {
    fn launch(
        &self,
        cwd: &Utf8Path,
        command: &DiffCommand,
    ) -> Result<(), DiffToolError> {
        (**self).launch(cwd, command)
    }
}

/// Launches the diff tool as a child process, inheriting stdio.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessLauncher;

impl DiffLauncher for ProcessLauncher {
    fn launch(
        &self,
        cwd: &Utf8Path,
        command: &DiffCommand,
    ) -> Result<(), DiffToolError> {
        debug!(%cwd, "running `{}`", command.argv().join(" "));

        let status = Command::new(command.tool())
            .current_dir(cwd)
            .args(command.args())
            .status()
            .map_err(|source| DiffToolError::SpawnFailed {
                tool: command.tool().to_owned(),
                cwd: cwd.to_owned(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(DiffToolError::Failed {
                tool: command.tool().to_owned(),
                exit_status: status.to_string(),
            })
        }
    }
}
