// Copyright 2026 Oxide Computer Company

//! Git LFS object ids.

use crate::LfsOidParseError;
use camino::Utf8PathBuf;
use std::{fmt, str::FromStr};

/// The SHA-256 object id of a Git LFS object.
///
/// LFS pointer files reference content as `oid sha256:<64 hex chars>`. The
/// local object store keeps each object under a two-level fan-out
/// directory derived from the first four hex characters; see
/// [`LfsOid::fan_out_path`].
///
/// # Parsing
///
/// ```
/// use asset_diff::LfsOid;
///
/// let oid: LfsOid =
///     "4d7a214614ab2935c943f9e0ff69d22eadbb8f32b1258daaa5e2ca24d17e2393"
///         .parse()
///         .unwrap();
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LfsOid([u8; 32]);

impl LfsOid {
    /// Returns the object's path relative to the LFS local media directory:
    /// `<hex[0..2]>/<hex[2..4]>/<hex>`.
    pub fn fan_out_path(&self) -> Utf8PathBuf {
        let hex = self.to_string();
        Utf8PathBuf::from(format!("{}/{}/{}", &hex[0..2], &hex[2..4], hex))
    }
}

impl FromStr for LfsOid {
    type Err = LfsOidParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 64 {
            return Err(LfsOidParseError::InvalidLength(s.len()));
        }
        let mut bytes = [0; 32];
        hex::decode_to_slice(s, &mut bytes)
            .map_err(LfsOidParseError::InvalidHex)?;
        Ok(LfsOid(bytes))
    }
}

impl fmt::Display for LfsOid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        hex::encode(self.0).fmt(f)
    }
}
