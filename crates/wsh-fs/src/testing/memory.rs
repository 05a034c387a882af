//! In-memory storage provider for testing.
//!
//! Behaves like the remote API (directory-destination move/copy, the
//! provider error vocabulary) without any network. Every call is
//! recorded so tests can assert exactly which provider operations an
//! adapter issued, and single failures can be scripted per operation.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use async_trait::async_trait;

use crate::path::{filename, join_path, parent_path};
use crate::provider::{ProviderError, StorageProvider};
use crate::types::{DirEntry, StatRecord};

/// One recorded provider invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProviderCall {
    /// readdir(path)
    Readdir { path: String },
    /// stat(path)
    Stat { path: String },
    /// mkdir(path)
    Mkdir { path: String },
    /// read(path)
    Read { path: String },
    /// write(path, ..)
    Write { path: String },
    /// delete(path, recursive)
    Delete { path: String, recursive: bool },
    /// move_item(source, dest, new_name)
    Move {
        source: String,
        dest: String,
        new_name: Option<String>,
    },
    /// copy_item(source, dest, new_name)
    Copy {
        source: String,
        dest: String,
        new_name: Option<String>,
    },
}

#[derive(Default)]
struct State {
    dirs: BTreeSet<String>,
    files: BTreeMap<String, Vec<u8>>,
    calls: Vec<ProviderCall>,
    fail_next: Option<(String, ProviderError)>,
}

impl State {
    fn exists(&self, path: &str) -> bool {
        self.dirs.contains(path) || self.files.contains_key(path)
    }

    fn take_failure(&mut self, op: &str) -> Option<ProviderError> {
        let scripted = matches!(&self.fail_next, Some((for_op, _)) if for_op == op);
        if scripted {
            self.fail_next.take().map(|(_, err)| err)
        } else {
            None
        }
    }

    fn ensure_dirs(&mut self, path: &str) {
        let mut current = String::from(path);
        while current != "/" {
            self.dirs.insert(current.clone());
            current = parent_path(&current);
        }
    }

    fn children(&self, path: &str) -> Vec<DirEntry> {
        let mut entries: Vec<DirEntry> = self
            .dirs
            .iter()
            .filter(|dir| dir.as_str() != path && parent_path(dir) == path)
            .map(|dir| DirEntry::from(&StatRecord::directory(dir)))
            .collect();
        entries.extend(
            self.files
                .iter()
                .filter(|(file, _)| parent_path(file) == path)
                .map(|(file, content)| DirEntry::from(&StatRecord::file(file, content.len() as u64))),
        );
        entries
    }

    fn has_children(&self, path: &str) -> bool {
        !self.children(path).is_empty()
    }

    fn remove_tree(&mut self, path: &str) {
        let prefix = format!("{}/", path);
        self.dirs.remove(path);
        self.files.remove(path);
        self.dirs.retain(|dir| !dir.starts_with(&prefix));
        self.files.retain(|file, _| !file.starts_with(&prefix));
    }

    fn relocate_tree(&mut self, source: &str, target: &str, keep_source: bool) {
        let prefix = format!("{}/", source);
        if let Some(content) = self.files.get(source).cloned() {
            self.files.insert(String::from(target), content);
            if !keep_source {
                self.files.remove(source);
            }
            return;
        }

        self.dirs.insert(String::from(target));
        let moved_dirs: Vec<String> = self
            .dirs
            .iter()
            .filter(|dir| dir.starts_with(&prefix))
            .cloned()
            .collect();
        for dir in moved_dirs {
            self.dirs
                .insert(format!("{}{}", target, &dir[source.len()..]));
            if !keep_source {
                self.dirs.remove(&dir);
            }
        }
        let moved_files: Vec<(String, Vec<u8>)> = self
            .files
            .iter()
            .filter(|(file, _)| file.starts_with(&prefix))
            .map(|(file, content)| (file.clone(), content.clone()))
            .collect();
        for (file, content) in moved_files {
            self.files
                .insert(format!("{}{}", target, &file[source.len()..]), content);
            if !keep_source {
                self.files.remove(&file);
            }
        }
        if !keep_source {
            self.dirs.remove(source);
        }
    }
}

/// In-memory provider double.
///
/// Clones share state, so a test can keep one handle for assertions
/// while the adapter owns another.
#[derive(Clone)]
pub struct MemoryProvider {
    state: Rc<RefCell<State>>,
}

impl Default for MemoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryProvider {
    /// Create an empty provider with a root directory.
    pub fn new() -> Self {
        let provider = Self {
            state: Rc::new(RefCell::new(State::default())),
        };
        provider.state.borrow_mut().dirs.insert(String::from("/"));
        provider
    }

    /// Seed a directory (ancestors are created too).
    pub fn add_dir(&self, path: &str) {
        self.state.borrow_mut().ensure_dirs(path);
    }

    /// Seed a file (parent directories are created too).
    pub fn add_file(&self, path: &str, content: &[u8]) {
        let mut state = self.state.borrow_mut();
        let parent = parent_path(path);
        state.ensure_dirs(&parent);
        state.files.insert(String::from(path), content.to_vec());
    }

    /// Every provider call made so far, in order.
    pub fn calls(&self) -> Vec<ProviderCall> {
        self.state.borrow().calls.clone()
    }

    /// Script the next invocation of `op` (`"stat"`, `"delete"`, ...) to
    /// fail with the given identifier and message.
    pub fn fail_next(&self, op: &str, identifier: &str, message: &str) {
        self.state.borrow_mut().fail_next = Some((
            String::from(op),
            ProviderError::new(identifier, message),
        ));
    }
}

#[async_trait(?Send)]
impl StorageProvider for MemoryProvider {
    async fn readdir(&self, path: &str) -> Result<Vec<DirEntry>, ProviderError> {
        let mut state = self.state.borrow_mut();
        state.calls.push(ProviderCall::Readdir {
            path: String::from(path),
        });
        if let Some(err) = state.take_failure("readdir") {
            return Err(err);
        }
        if state.files.contains_key(path) {
            return Err(ProviderError::new(
                "readdir_of_non_directory",
                format!("'{path}' is not a directory"),
            ));
        }
        if !state.dirs.contains(path) {
            return Err(ProviderError::new(
                "subject_does_not_exist",
                format!("'{path}' does not exist"),
            ));
        }
        Ok(state.children(path))
    }

    async fn stat(&self, path: &str) -> Result<StatRecord, ProviderError> {
        let mut state = self.state.borrow_mut();
        state.calls.push(ProviderCall::Stat {
            path: String::from(path),
        });
        if let Some(err) = state.take_failure("stat") {
            return Err(err);
        }
        if state.dirs.contains(path) {
            Ok(StatRecord::directory(path))
        } else if let Some(content) = state.files.get(path) {
            Ok(StatRecord::file(path, content.len() as u64))
        } else {
            Err(ProviderError::new(
                "subject_does_not_exist",
                format!("'{path}' does not exist"),
            ))
        }
    }

    async fn mkdir(&self, path: &str) -> Result<(), ProviderError> {
        let mut state = self.state.borrow_mut();
        state.calls.push(ProviderCall::Mkdir {
            path: String::from(path),
        });
        if let Some(err) = state.take_failure("mkdir") {
            return Err(err);
        }
        if state.exists(path) {
            return Err(ProviderError::new(
                "item_with_same_name_exists",
                format!("'{path}' already exists"),
            ));
        }
        let parent = parent_path(path);
        if state.files.contains_key(&parent) {
            return Err(ProviderError::new(
                "parent_is_not_a_directory",
                format!("'{parent}' is not a directory"),
            ));
        }
        if !state.dirs.contains(&parent) {
            return Err(ProviderError::new(
                "parent_does_not_exist",
                format!("'{parent}' does not exist"),
            ));
        }
        state.dirs.insert(String::from(path));
        Ok(())
    }

    async fn read(&self, path: &str) -> Result<Vec<u8>, ProviderError> {
        let mut state = self.state.borrow_mut();
        state.calls.push(ProviderCall::Read {
            path: String::from(path),
        });
        if let Some(err) = state.take_failure("read") {
            return Err(err);
        }
        if state.dirs.contains(path) {
            return Err(ProviderError::new(
                "cannot_read_a_directory",
                format!("'{path}' is a directory"),
            ));
        }
        state.files.get(path).cloned().ok_or_else(|| {
            ProviderError::new("subject_does_not_exist", format!("'{path}' does not exist"))
        })
    }

    async fn write(&self, path: &str, data: &[u8]) -> Result<(), ProviderError> {
        let mut state = self.state.borrow_mut();
        state.calls.push(ProviderCall::Write {
            path: String::from(path),
        });
        if let Some(err) = state.take_failure("write") {
            return Err(err);
        }
        if state.dirs.contains(path) {
            return Err(ProviderError::new(
                "cannot_write_to_a_directory",
                format!("'{path}' is a directory"),
            ));
        }
        let parent = parent_path(path);
        if !state.dirs.contains(&parent) {
            return Err(ProviderError::new(
                "parent_does_not_exist",
                format!("'{parent}' does not exist"),
            ));
        }
        state.files.insert(String::from(path), data.to_vec());
        Ok(())
    }

    async fn delete(&self, path: &str, recursive: bool) -> Result<(), ProviderError> {
        let mut state = self.state.borrow_mut();
        state.calls.push(ProviderCall::Delete {
            path: String::from(path),
            recursive,
        });
        if let Some(err) = state.take_failure("delete") {
            return Err(err);
        }
        if !state.exists(path) {
            return Err(ProviderError::new(
                "subject_does_not_exist",
                format!("'{path}' does not exist"),
            ));
        }
        if state.dirs.contains(path) && !recursive && state.has_children(path) {
            return Err(ProviderError::new(
                "cannot_delete_non_empty_directory",
                format!("'{path}' is not empty"),
            ));
        }
        state.remove_tree(path);
        Ok(())
    }

    async fn move_item(
        &self,
        source: &str,
        dest: &str,
        new_name: Option<&str>,
    ) -> Result<(), ProviderError> {
        let mut state = self.state.borrow_mut();
        state.calls.push(ProviderCall::Move {
            source: String::from(source),
            dest: String::from(dest),
            new_name: new_name.map(String::from),
        });
        if let Some(err) = state.take_failure("move") {
            return Err(err);
        }
        let target = relocation_target(&state, source, dest, new_name)?;
        state.relocate_tree(source, &target, false);
        Ok(())
    }

    async fn copy_item(
        &self,
        source: &str,
        dest: &str,
        new_name: Option<&str>,
    ) -> Result<(), ProviderError> {
        let mut state = self.state.borrow_mut();
        state.calls.push(ProviderCall::Copy {
            source: String::from(source),
            dest: String::from(dest),
            new_name: new_name.map(String::from),
        });
        if let Some(err) = state.take_failure("copy") {
            return Err(err);
        }
        let target = relocation_target(&state, source, dest, new_name)?;
        state.relocate_tree(source, &target, true);
        Ok(())
    }
}

fn relocation_target(
    state: &State,
    source: &str,
    dest: &str,
    new_name: Option<&str>,
) -> Result<String, ProviderError> {
    if !state.exists(source) {
        return Err(ProviderError::new(
            "source_does_not_exist",
            format!("'{source}' does not exist"),
        ));
    }
    if state.files.contains_key(dest) {
        return Err(ProviderError::new(
            "dest_is_not_a_directory",
            format!("'{dest}' is not a directory"),
        ));
    }
    if !state.dirs.contains(dest) {
        return Err(ProviderError::new(
            "parent_does_not_exist",
            format!("'{dest}' does not exist"),
        ));
    }
    let target = join_path(dest, new_name.unwrap_or_else(|| filename(source)));
    if state.exists(&target) {
        return Err(ProviderError::new(
            "item_with_same_name_exists",
            format!("'{target}' already exists"),
        ));
    }
    Ok(target)
}
