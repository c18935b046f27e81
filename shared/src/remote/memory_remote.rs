use std::collections::BTreeMap;

use serde_json::Value;

use super::RemoteStore;

/// In-process remote store keyed by full path. Handy for simulation and for
/// running the device without a backend.
#[derive(Clone, Debug, Default)]
pub struct MemoryRemote {
    nodes: BTreeMap<String, Value>,
    ready: bool,
}

impl MemoryRemote {
    pub fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
            ready: true,
        }
    }

    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    pub fn get(&self, path: &str) -> Option<&Value> {
        self.nodes.get(path)
    }

    /// Every node at or below `prefix`
    pub fn children<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = (&'a String, &'a Value)> {
        self.nodes
            .iter()
            .filter(move |(path, _)| is_at_or_below(path, prefix))
    }
}

fn is_at_or_below(path: &str, prefix: &str) -> bool {
    path == prefix
        || path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
}

impl RemoteStore for MemoryRemote {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn write_json(&mut self, path: &str, document: &Value) -> bool {
        if !self.ready {
            return false;
        }
        self.nodes.insert(path.to_string(), document.clone());
        true
    }

    fn read_string(&mut self, path: &str) -> Option<String> {
        match self.nodes.get(path)? {
            Value::String(text) => Some(text.clone()),
            _ => None,
        }
    }

    fn read_json(&mut self, path: &str) -> Option<Value> {
        self.nodes.get(path).cloned()
    }

    fn delete_node(&mut self, path: &str) -> bool {
        if !self.ready {
            return false;
        }
        self.nodes.retain(|node, _| !is_at_or_below(node, path));
        true
    }
}
