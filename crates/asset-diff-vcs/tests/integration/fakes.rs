// Copyright 2026 Oxide Computer Company

//! Test doubles for the version control gateway and the diff launcher.

use asset_diff::{RepoPath, Revision};
use asset_diff_vcs::{
    DiffCommand, DiffLauncher, DiffToolError, ToolError, VcsGateway,
};
use camino::{Utf8Path, Utf8PathBuf};
use std::{cell::RefCell, collections::HashMap};

/// A [`VcsGateway`] that answers from canned output and records calls.
#[derive(Debug, Default)]
pub struct FakeVcs {
    pub log: String,
    pub blobs: HashMap<String, Vec<u8>>,
    pub lfs_files: String,
    pub lfs_env: String,
    pub objects: HashMap<String, String>,
    pub calls: RefCell<Vec<String>>,
}

impl FakeVcs {
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

fn not_found(command: &str, spec: &str) -> ToolError {
    ToolError::Failed {
        command: format!("git {command} {spec}"),
        exit_status: "exit status: 128".to_owned(),
        stderr: format!("fatal: path '{spec}' does not exist"),
    }
}

impl VcsGateway for FakeVcs {
    fn log_last_revision(&self, path: &RepoPath) -> Result<String, ToolError> {
        self.record(format!("log {path}"));
        Ok(self.log.clone())
    }

    fn show_blob(
        &self,
        revision: &Revision,
        path: &RepoPath,
    ) -> Result<Vec<u8>, ToolError> {
        let spec = revision.blob_spec(path);
        self.record(format!("show {spec}"));
        self.blobs.get(&spec).cloned().ok_or_else(|| not_found("show", &spec))
    }

    fn list_lfs_files(&self) -> Result<String, ToolError> {
        self.record("lfs ls-files".to_owned());
        Ok(self.lfs_files.clone())
    }

    fn lfs_env(&self) -> Result<String, ToolError> {
        self.record("lfs env".to_owned());
        Ok(self.lfs_env.clone())
    }

    fn cat_file_object(
        &self,
        revision: &Revision,
        path: &RepoPath,
    ) -> Result<String, ToolError> {
        let spec = revision.blob_spec(path);
        self.record(format!("cat-file {spec}"));
        self.objects
            .get(&spec)
            .cloned()
            .ok_or_else(|| not_found("cat-file -p", &spec))
    }
}

/// What the launcher saw when it was invoked.
#[derive(Clone, Debug)]
pub struct Launch {
    pub cwd: Utf8PathBuf,
    pub argv: Vec<String>,
    pub left: Utf8PathBuf,
    /// The left file's content at launch time, if it existed.
    pub left_content: Option<Vec<u8>>,
}

/// A [`DiffLauncher`] that records invocations instead of running a tool.
#[derive(Debug, Default)]
pub struct RecordingLauncher {
    pub fail: bool,
    pub launches: RefCell<Vec<Launch>>,
}

impl RecordingLauncher {
    pub fn failing() -> Self {
        RecordingLauncher { fail: true, ..Default::default() }
    }

    pub fn launches(&self) -> Vec<Launch> {
        self.launches.borrow().clone()
    }
}

impl DiffLauncher for RecordingLauncher {
    fn launch(
        &self,
        cwd: &Utf8Path,
        command: &DiffCommand,
    ) -> Result<(), DiffToolError> {
        let argv: Vec<String> =
            command.argv().into_iter().map(str::to_owned).collect();
        let left = Utf8PathBuf::from(&argv[3]);
        let left_content = std::fs::read(&left).ok();
        self.launches.borrow_mut().push(Launch {
            cwd: cwd.to_owned(),
            argv,
            left,
            left_content,
        });

        if self.fail {
            Err(DiffToolError::Failed {
                tool: command.tool().to_owned(),
                exit_status: "exit status: 1".to_owned(),
            })
        } else {
            Ok(())
        }
    }
}
