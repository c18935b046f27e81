use std::{
    cell::RefCell,
    collections::{HashMap, VecDeque},
    rc::Rc,
};

use serde_json::Value;

use rollcall_shared::{MemoryRemote, RemoteStore};

#[derive(Default)]
struct RemoteState {
    tree: MemoryRemote,
    writes: Vec<(String, Value)>,
    attempts: usize,
    scripts: HashMap<String, VecDeque<bool>>,
    failing_reads: usize,
    last_error: Option<String>,
}

impl RemoteState {
    /// Scripted result for a write to `path`, if one is queued
    fn scripted(&mut self, path: &str) -> Option<bool> {
        self.scripts
            .iter_mut()
            .find(|(prefix, _)| path.starts_with(prefix.as_str()))
            .and_then(|(_, script)| script.pop_front())
    }

    fn read_fails(&mut self) -> bool {
        if self.failing_reads == 0 {
            return false;
        }
        self.failing_reads -= 1;
        self.last_error = Some("scripted read failure".to_string());
        true
    }
}

/// In-memory remote tree that records every successful write in order and
/// can fail writes under a path prefix on demand. Clones share state.
#[derive(Clone)]
pub struct FakeRemote {
    inner: Rc<RefCell<RemoteState>>,
}

impl FakeRemote {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(RemoteState {
                tree: MemoryRemote::new(),
                ..Default::default()
            })),
        }
    }

    pub fn set_ready(&self, ready: bool) {
        self.inner.borrow_mut().tree.set_ready(ready);
    }

    /// Write a node as another client would; not recorded as a device write
    pub fn set(&self, path: &str, value: Value) {
        let mut inner = self.inner.borrow_mut();
        let ready = inner.tree.is_ready();
        inner.tree.set_ready(true);
        inner.tree.write_json(path, &value);
        inner.tree.set_ready(ready);
    }

    pub fn get(&self, path: &str) -> Option<Value> {
        self.inner.borrow().tree.get(path).cloned()
    }

    /// Results for the next writes to any path starting with `prefix`;
    /// `false` entries fail. Writes beyond the script succeed.
    pub fn script_writes(&self, prefix: &str, results: Vec<bool>) {
        self.inner
            .borrow_mut()
            .scripts
            .insert(prefix.to_string(), results.into_iter().collect());
    }

    /// The next `count` reads fail as if the request timed out
    pub fn fail_reads(&self, count: usize) {
        self.inner.borrow_mut().failing_reads = count;
    }

    /// Every successful device write under `prefix`, oldest first
    pub fn writes_under(&self, prefix: &str) -> Vec<(String, Value)> {
        self.inner
            .borrow()
            .writes
            .iter()
            .filter(|(path, _)| path.starts_with(prefix))
            .cloned()
            .collect()
    }

    /// Write attempts made by the device, failed ones included
    pub fn write_attempts(&self) -> usize {
        self.inner.borrow().attempts
    }

    /// Every node under `prefix`
    pub fn nodes_under(&self, prefix: &str) -> Vec<(String, Value)> {
        self.inner
            .borrow()
            .tree
            .children(prefix)
            .map(|(path, value)| (path.clone(), value.clone()))
            .collect()
    }
}

impl Default for FakeRemote {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteStore for FakeRemote {
    fn is_ready(&self) -> bool {
        self.inner.borrow().tree.is_ready()
    }

    fn write_json(&mut self, path: &str, document: &Value) -> bool {
        let mut inner = self.inner.borrow_mut();
        inner.attempts += 1;
        if inner.scripted(path) == Some(false) {
            inner.last_error = Some(format!("scripted failure at {}", path));
            return false;
        }
        if !inner.tree.write_json(path, document) {
            inner.last_error = Some("not ready".to_string());
            return false;
        }
        inner.writes.push((path.to_string(), document.clone()));
        true
    }

    fn read_string(&mut self, path: &str) -> Option<String> {
        let mut inner = self.inner.borrow_mut();
        if inner.read_fails() {
            return None;
        }
        inner.tree.read_string(path)
    }

    fn read_json(&mut self, path: &str) -> Option<Value> {
        let mut inner = self.inner.borrow_mut();
        if inner.read_fails() {
            return None;
        }
        inner.tree.read_json(path)
    }

    fn delete_node(&mut self, path: &str) -> bool {
        self.inner.borrow_mut().tree.delete_node(path)
    }

    fn last_error(&self) -> Option<String> {
        self.inner.borrow().last_error.clone()
    }
}
