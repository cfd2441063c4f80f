//! NetCDF dataset handles backed by the native netCDF-C library.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::handle::{DatasetHandle, HandleError, OpenMode};

enum NetCdfFile {
    ReadOnly(netcdf::File),
    Writable(netcdf::FileMut),
}

/// An open NetCDF file.
///
/// The library closes the file when the inner value is dropped, so
/// [`DatasetHandle::close`] just releases it. Closing twice is a no-op.
pub struct NetCdfHandle {
    path: PathBuf,
    mode: OpenMode,
    file: Option<NetCdfFile>,
}

impl NetCdfHandle {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mode(&self) -> OpenMode {
        self.mode
    }

    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    /// Read-only view of the file, `None` once closed.
    pub fn file(&self) -> Option<&netcdf::File> {
        match self.file.as_ref()? {
            NetCdfFile::ReadOnly(file) => Some(file),
            NetCdfFile::Writable(file) => Some(&**file),
        }
    }

    /// Writable view of the file, `None` when opened read-only or closed.
    pub fn file_mut(&mut self) -> Option<&mut netcdf::FileMut> {
        match self.file.as_mut()? {
            NetCdfFile::Writable(file) => Some(file),
            NetCdfFile::ReadOnly(_) => None,
        }
    }
}

impl DatasetHandle for NetCdfHandle {
    fn close(&mut self) -> Result<(), HandleError> {
        if self.file.take().is_some() {
            debug!(path = %self.path.display(), "Closed NetCDF file");
        }
        Ok(())
    }
}

/// Opener for [`FileHandleCache`](crate::FileHandleCache).
///
/// `r` opens read-only, `w` creates (truncating), `a` and `r+` open an
/// existing file for writing.
pub fn open_netcdf(path: &Path, mode: OpenMode) -> Result<NetCdfHandle, HandleError> {
    let file = match mode {
        OpenMode::Read => NetCdfFile::ReadOnly(netcdf::open(path)?),
        OpenMode::Write => NetCdfFile::Writable(netcdf::create(path)?),
        OpenMode::Append | OpenMode::ReadWrite => NetCdfFile::Writable(netcdf::append(path)?),
    };

    Ok(NetCdfHandle {
        path: path.to_path_buf(),
        mode,
        file: Some(file),
    })
}
