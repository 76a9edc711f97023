// Copyright 2026 Oxide Computer Company

//! Tests against a real Git repository.

use crate::fakes::RecordingLauncher;
use anyhow::Result;
use asset_diff::RepoPath;
use asset_diff_vcs::{
    Anchors, Asset, AssetDiff, GitCli, ResolveError, ToolError, VcsGateway,
    materialize_inline, resolve::find_last_revision,
};
use camino::{Utf8Path, Utf8PathBuf};
use camino_tempfile::Utf8TempDir;
use std::{fs, process::Command};

const OLD_BYTES: &[u8] = b"\x00\x01\x02old\r\n\xff";

fn git_binary() -> String {
    std::env::var("GIT").unwrap_or_else(|_| "git".to_string())
}

/// Returns a `Command` for git, respecting the `$GIT` environment variable.
fn git_command() -> Command {
    Command::new(git_binary())
}

fn git(repo_root: &Utf8Path, args: &[&str]) -> Result<String> {
    let output = git_command().args(args).current_dir(repo_root).output()?;
    assert!(
        output.status.success(),
        "git {} failed: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stderr)
    );
    Ok(String::from_utf8(output.stdout)?.trim().to_string())
}

/// Returns whether git-lfs tests should run.
///
/// They are skipped only when `SKIP_LFS_TESTS` is set. A missing git-lfs
/// is otherwise an error, so the tests never pass silently.
fn check_lfs_available() -> Result<bool> {
    if std::env::var("SKIP_LFS_TESTS").is_ok() {
        return Ok(false);
    }

    match git_command().args(["lfs", "version"]).output() {
        Ok(o) if o.status.success() => Ok(true),
        Ok(o) => Err(anyhow::anyhow!(
            "git lfs version failed ({}): {}. \
             Set SKIP_LFS_TESTS=1 to skip these tests",
            o.status,
            String::from_utf8_lossy(&o.stderr).trim(),
        )),
        Err(e) => Err(anyhow::anyhow!(
            "failed to run git lfs: {e}. \
             Set SKIP_LFS_TESTS=1 to skip these tests",
        )),
    }
}

/// Sets up a repository with a project file and a committed binary asset
/// that has since been modified in the working copy.
/// Returns (temp_dir, repo_root, short_commit_hash).
fn setup_git_repo() -> Result<(Utf8TempDir, Utf8PathBuf, String)> {
    let temp = Utf8TempDir::with_prefix("asset-diff-git-")?;
    let repo_root = temp.path().to_owned();

    git(&repo_root, &["init"])?;
    git(&repo_root, &["config", "user.email", "test@example.com"])?;
    git(&repo_root, &["config", "user.name", "Test User"])?;

    fs::create_dir_all(repo_root.join("Content"))?;
    fs::write(repo_root.join("Game.uproject"), "{}")?;
    fs::write(repo_root.join("Content/Foo.uasset"), OLD_BYTES)?;
    git(&repo_root, &["add", "."])?;
    git(&repo_root, &["commit", "-m", "Add asset"])?;
    let short_hash = git(&repo_root, &["log", "--format=%h", "-n", "1"])?;

    fs::write(repo_root.join("Content/Foo.uasset"), b"modified")?;
    Ok((temp, repo_root, short_hash))
}

#[test]
fn test_git_last_revision_and_blob() -> Result<()> {
    let (_temp, repo_root, short_hash) = setup_git_repo()?;
    let vcs = GitCli::with_binary(git_binary(), &repo_root);
    let path: RepoPath = "Content/Foo.uasset".parse()?;

    let revision = find_last_revision(&vcs, &path)?;
    assert_eq!(revision.as_str(), short_hash);

    let blob = vcs.show_blob(&revision, &path)?;
    assert_eq!(blob, OLD_BYTES, "blob bytes are returned unmodified");
    Ok(())
}

#[test]
fn test_git_inline_materialization() -> Result<()> {
    let (_temp, repo_root, short_hash) = setup_git_repo()?;
    let vcs = GitCli::with_binary(git_binary(), &repo_root);
    let asset = Asset::validate(
        &repo_root,
        &repo_root,
        Utf8Path::new("Content/Foo.uasset"),
    )?;
    let revision = find_last_revision(&vcs, asset.repo_path())?;

    let old = materialize_inline(&vcs, &asset, &revision)?;
    let old_path = old.path().to_owned();
    assert_eq!(
        old_path.file_name(),
        Some(format!("Foo_{short_hash}.uasset").as_str())
    );
    assert_eq!(fs::read(&old_path)?, OLD_BYTES);

    drop(old);
    assert!(!old_path.exists(), "temp file removed on drop");
    Ok(())
}

#[test]
fn test_git_uncommitted_asset_has_no_history() -> Result<()> {
    let (_temp, repo_root, _) = setup_git_repo()?;
    fs::write(repo_root.join("Content/New.uasset"), b"new")?;
    let vcs = GitCli::with_binary(git_binary(), &repo_root);

    let result = find_last_revision(&vcs, &"Content/New.uasset".parse()?);
    assert!(
        matches!(result, Err(ResolveError::NoHistory { .. })),
        "got {result:?}"
    );
    Ok(())
}

#[test]
fn test_git_show_missing_path_fails() -> Result<()> {
    let (_temp, repo_root, short_hash) = setup_git_repo()?;
    let vcs = GitCli::with_binary(git_binary(), &repo_root);

    let result = vcs.show_blob(
        &short_hash.parse()?,
        &"Content/Missing.uasset".parse()?,
    );
    assert!(
        matches!(result, Err(ToolError::Failed { .. })),
        "got {result:?}"
    );
    Ok(())
}

#[test]
fn test_git_anchors_located_from_subdirectory() -> Result<()> {
    let (_temp, repo_root, _) = setup_git_repo()?;
    let anchors = Anchors::locate(&repo_root.join("Content"))?;
    assert_eq!(anchors.repo_root(), repo_root);
    assert_eq!(anchors.project(), repo_root.join("Game.uproject"));
    Ok(())
}

#[test]
fn test_git_full_run_inline() -> Result<()> {
    if !check_lfs_available()? {
        eprintln!("git-lfs tests skipped (SKIP_LFS_TESTS set)");
        return Ok(());
    }

    let (_temp, repo_root, _) = setup_git_repo()?;
    let anchors = Anchors::locate(&repo_root)?;
    let vcs = GitCli::with_binary(git_binary(), anchors.repo_root());
    let launcher = RecordingLauncher::default();
    let asset_diff =
        AssetDiff::new(anchors, "/ue/UnrealEditor-Cmd", vcs, &launcher);

    asset_diff
        .run(&repo_root.join("Content"), Utf8Path::new("Foo.uasset"))?;

    let launches = launcher.launches();
    assert_eq!(launches.len(), 1);
    assert_eq!(launches[0].left_content.as_deref(), Some(OLD_BYTES));
    assert!(!launches[0].left.exists());
    Ok(())
}
