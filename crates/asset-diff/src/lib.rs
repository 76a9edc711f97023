// Copyright 2026 Oxide Computer Company

//! Value types for resolving asset revisions.
//!
//! Binary assets (for example Unreal Engine `.uasset` files) cannot be
//! compared line by line. To show a visual diff, a format-aware tool needs
//! two files on disk: the asset as it was at its last commit, and the asset
//! as it is in the working copy. This crate holds the small validated
//! values that describe the old side of that comparison:
//!
//! * [`RepoPath`]: an asset path relative to the repository root, always
//!   with forward slashes.
//! * [`Revision`]: the short commit identifier that last touched the asset.
//! * [`LfsOid`]: the SHA-256 object id of a Git LFS object.
//! * [`StorageMode`]: whether an asset lives inline in Git history or in
//!   Git LFS.
//!
//! # Examples
//!
//! ```
//! use asset_diff::{LfsOid, RepoPath, Revision};
//!
//! let path: RepoPath = "Content\\Maps\\Foo.uasset".parse().unwrap();
//! assert_eq!(path.as_str(), "Content/Maps/Foo.uasset");
//!
//! let revision: Revision = "abc1234\n".parse().unwrap();
//! assert_eq!(revision.to_string(), "abc1234");
//! assert_eq!(
//!     revision.blob_spec(&path),
//!     "abc1234:Content/Maps/Foo.uasset",
//! );
//!
//! let oid: LfsOid =
//!     "deadbeef00000000000000000000000000000000000000000000000000000000"
//!         .parse()
//!         .unwrap();
//! assert_eq!(
//!     oid.fan_out_path().as_str(),
//!     "de/ad/deadbeef00000000000000000000000000000000000000000000000000000000",
//! );
//! ```
//!
//! # Related crates
//!
//! The resolution pipeline that produces these values from a real
//! repository lives in `asset-diff-vcs`.

#![deny(missing_docs)]

mod errors;
mod oid;
mod repo_path;
mod revision;

pub use errors::{LfsOidParseError, RepoPathError, RevisionParseError};
pub use oid::LfsOid;
pub use repo_path::RepoPath;
pub use revision::{Revision, StorageMode};
