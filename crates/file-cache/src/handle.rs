//! Dataset handles, open modes and cache keys.

use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

use crate::error::CacheError;

/// Error type returned by openers and close actions.
pub type HandleError = Box<dyn std::error::Error + Send + Sync>;

/// An externally opened dataset that the cache can release.
pub trait DatasetHandle {
    /// Release the underlying resources.
    fn close(&mut self) -> Result<(), HandleError>;
}

/// Mode passed through to the opener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OpenMode {
    /// `r`
    #[default]
    Read,
    /// `w`
    Write,
    /// `a`
    Append,
    /// `r+`
    ReadWrite,
}

impl OpenMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "r",
            Self::Write => "w",
            Self::Append => "a",
            Self::ReadWrite => "r+",
        }
    }

    pub fn is_writable(&self) -> bool {
        !matches!(self, Self::Read)
    }
}

impl FromStr for OpenMode {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "r" => Ok(Self::Read),
            "w" => Ok(Self::Write),
            "a" => Ok(Self::Append),
            "r+" => Ok(Self::ReadWrite),
            other => Err(CacheError::InvalidMode(other.to_string())),
        }
    }
}

impl fmt::Display for OpenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lexically normalise a path for use as a cache key.
///
/// Drops `.` components and folds `..` into the preceding directory. The
/// filesystem is never consulted, so paths that do not exist yet still map
/// to a stable key. `..` directly under the root is discarded.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}
