//! Common test utilities for durability tests

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tessera::{AccessMode, OpenOptions, Store};

/// A temporary directory holding one store file
pub struct TestStore {
    // Keeps the directory alive
    _dir: TempDir,
    path: PathBuf,
}

impl TestStore {
    /// Create a new, not yet opened, store location.
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.tsj");
        TestStore { _dir: dir, path }
    }

    /// Path of the journal file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Target string for `Store::open`.
    pub fn target(&self) -> &str {
        self.path.to_str().unwrap()
    }

    /// Open read-write.
    pub fn open(&self) -> Store {
        Store::open(self.target()).unwrap()
    }

    /// Open read-write with `durability = "always"`.
    pub fn open_always(&self) -> Store {
        Store::open_with_options(self.target(), OpenOptions::new().durability("always")).unwrap()
    }

    /// Open read-only.
    pub fn open_read_only(&self) -> tessera::Result<Store> {
        Store::open_with_options(
            self.target(),
            OpenOptions::new().access_mode(AccessMode::ReadOnly),
        )
    }
}
