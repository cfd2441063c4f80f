//! Mock dataset handles for exercising the file-handle cache.
//!
//! A [`MockOpener`] hands out [`MockHandle`]s that share state with it, so a
//! test can ask the opener whether a handle the cache owns has been closed.

use std::cell::RefCell;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use file_cache::{DatasetHandle, HandleError, OpenMode};

#[derive(Debug, Default)]
struct MockState {
    opened: Vec<(PathBuf, OpenMode)>,
    closed: Vec<PathBuf>,
    fail_open: HashSet<PathBuf>,
    fail_close: HashSet<PathBuf>,
}

/// Factory for mock handles that records every open and close.
#[derive(Debug, Clone, Default)]
pub struct MockOpener {
    state: Rc<RefCell<MockState>>,
}

impl MockOpener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every future open of `path` fail.
    pub fn fail_open_for(&self, path: impl Into<PathBuf>) {
        self.state.borrow_mut().fail_open.insert(path.into());
    }

    /// Make every close of a handle for `path` report an error.
    pub fn fail_close_for(&self, path: impl Into<PathBuf>) {
        self.state.borrow_mut().fail_close.insert(path.into());
    }

    /// Open a mock handle. Matches the cache's opener signature.
    pub fn open(&self, path: &Path, mode: OpenMode) -> Result<MockHandle, HandleError> {
        let mut state = self.state.borrow_mut();
        if state.fail_open.contains(path) {
            return Err(format!("cannot open {}", path.display()).into());
        }
        state.opened.push((path.to_path_buf(), mode));
        Ok(MockHandle {
            path: path.to_path_buf(),
            mode,
            id: state.opened.len(),
            closed: false,
            state: Rc::clone(&self.state),
        })
    }

    /// An owned opener closure suitable for passing to `FileHandleCache::open`.
    pub fn opener(&self) -> impl FnOnce(&Path, OpenMode) -> Result<MockHandle, HandleError> {
        let this = self.clone();
        move |path, mode| this.open(path, mode)
    }

    /// Number of successful opens.
    pub fn open_count(&self) -> usize {
        self.state.borrow().opened.len()
    }

    /// Number of successful opens of `path`.
    pub fn open_count_for(&self, path: impl AsRef<Path>) -> usize {
        let path = path.as_ref();
        self.state
            .borrow()
            .opened
            .iter()
            .filter(|(p, _)| p == path)
            .count()
    }

    /// Paths in the order they were opened.
    pub fn opened(&self) -> Vec<PathBuf> {
        self.state
            .borrow()
            .opened
            .iter()
            .map(|(p, _)| p.clone())
            .collect()
    }

    /// Mode used for the most recent open of `path`.
    pub fn last_mode(&self, path: impl AsRef<Path>) -> Option<OpenMode> {
        let path = path.as_ref();
        self.state
            .borrow()
            .opened
            .iter()
            .rev()
            .find(|(p, _)| p == path)
            .map(|(_, mode)| *mode)
    }

    /// Paths in the order their handles were closed.
    pub fn closed(&self) -> Vec<PathBuf> {
        self.state.borrow().closed.clone()
    }

    /// Whether every handle opened for `path` has been closed.
    pub fn is_closed(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        let closes = self
            .state
            .borrow()
            .closed
            .iter()
            .filter(|p| *p == path)
            .count();
        let opens = self.open_count_for(path);
        opens > 0 && closes >= opens
    }
}

/// Handle produced by [`MockOpener`].
#[derive(Debug)]
pub struct MockHandle {
    path: PathBuf,
    mode: OpenMode,
    id: usize,
    closed: bool,
    state: Rc<RefCell<MockState>>,
}

impl MockHandle {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mode(&self) -> OpenMode {
        self.mode
    }

    /// 1-based sequence number of the open that produced this handle.
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl DatasetHandle for MockHandle {
    fn close(&mut self) -> Result<(), HandleError> {
        self.closed = true;
        let mut state = self.state.borrow_mut();
        state.closed.push(self.path.clone());
        if state.fail_close.contains(&self.path) {
            return Err(format!("cannot close {}", self.path.display()).into());
        }
        Ok(())
    }
}
