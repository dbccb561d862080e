//! Shared fakes for service tests.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::application::{
    ApplicationError,
    ports::{
        CommandOutput, CommandRunner, Filesystem, Invocation, MockCommandRunner,
        MockRegistryClient, MockTemplateStore, RegistryClient, TemplateStore,
    },
};
use crate::domain::PeerRecord;
use crate::error::HoistResult;

#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Dir,
    File(String),
    Link(PathBuf),
}

/// Map-backed filesystem with just enough semantics for the services.
#[derive(Debug, Default)]
pub struct FakeFs {
    entries: Mutex<BTreeMap<PathBuf, Entry>>,
}

impl FakeFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dir(self, path: &str) -> Self {
        self.create_dir_all(Path::new(path)).unwrap();
        self
    }

    pub fn with_file(self, path: &str, content: &str) -> Self {
        let path = Path::new(path);
        if let Some(parent) = path.parent() {
            self.create_dir_all(parent).unwrap();
        }
        self.write_file(path, content).unwrap();
        self
    }

    pub fn entry(&self, path: &str) -> Option<Entry> {
        self.entries.lock().unwrap().get(Path::new(path)).cloned()
    }

    pub fn file(&self, path: &str) -> Option<String> {
        match self.entry(path) {
            Some(Entry::File(s)) => Some(s),
            _ => None,
        }
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.entries.lock().unwrap().keys().cloned().collect()
    }
}

impl Filesystem for FakeFs {
    fn exists(&self, path: &Path) -> bool {
        path == Path::new("/") || self.entries.lock().unwrap().contains_key(path)
    }

    fn read_to_string(&self, path: &Path) -> HoistResult<String> {
        match self.entries.lock().unwrap().get(path) {
            Some(Entry::File(s)) => Ok(s.clone()),
            _ => Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "not a file".into(),
            }
            .into()),
        }
    }

    fn write_file(&self, path: &Path, content: &str) -> HoistResult<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), Entry::File(content.to_string()));
        Ok(())
    }

    fn create_dir(&self, path: &Path) -> HoistResult<()> {
        let mut entries = self.entries.lock().unwrap();
        if entries.contains_key(path) {
            return Err(ApplicationError::PathExists {
                path: path.to_path_buf(),
            }
            .into());
        }
        entries.insert(path.to_path_buf(), Entry::Dir);
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> HoistResult<()> {
        let mut entries = self.entries.lock().unwrap();
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() || ancestor == Path::new("/") {
                continue;
            }
            entries
                .entry(ancestor.to_path_buf())
                .or_insert(Entry::Dir);
        }
        Ok(())
    }

    fn symlink(&self, target: &Path, link: &Path) -> HoistResult<()> {
        let mut entries = self.entries.lock().unwrap();
        if entries.contains_key(link) {
            return Err(ApplicationError::PathExists {
                path: link.to_path_buf(),
            }
            .into());
        }
        entries.insert(link.to_path_buf(), Entry::Link(target.to_path_buf()));
        Ok(())
    }
}

/// Registry answering from a fixed list, keyed by name.
pub fn registry(records: Vec<PeerRecord>) -> Arc<dyn RegistryClient> {
    let by_name: BTreeMap<String, PeerRecord> =
        records.into_iter().map(|r| (r.name.clone(), r)).collect();
    let mut mock = MockRegistryClient::new();
    mock.expect_query().returning(move |name, range| {
        by_name.get(name).cloned().ok_or_else(|| {
            ApplicationError::RegistryNotFound {
                package: name.to_string(),
                range: range.to_string(),
            }
            .into()
        })
    });
    Arc::new(mock)
}

/// Runner that succeeds and records every command line.
pub fn recording_runner(log: Arc<Mutex<Vec<String>>>) -> Arc<dyn CommandRunner> {
    let mut mock = MockCommandRunner::new();
    mock.expect_run().returning(move |inv: &Invocation| {
        log.lock()
            .unwrap()
            .push(format!("{} @ {}", inv.command_line(), inv.cwd.display()));
        Ok(CommandOutput::success())
    });
    Arc::new(mock)
}

/// Store that must not be touched.
pub fn unused_store() -> Arc<dyn TemplateStore> {
    let mut mock = MockTemplateStore::new();
    mock.expect_get().never();
    Arc::new(mock)
}
