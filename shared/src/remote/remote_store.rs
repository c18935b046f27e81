use serde_json::Value;

/// Path-addressed JSON document store (a realtime-database style tree)
pub trait RemoteStore {
    /// Whether the client is initialized and authenticated. No request is made while false.
    fn is_ready(&self) -> bool;

    fn write_json(&mut self, path: &str, document: &Value) -> bool;

    fn read_string(&mut self, path: &str) -> Option<String>;

    fn read_json(&mut self, path: &str) -> Option<Value>;

    fn delete_node(&mut self, path: &str) -> bool;

    /// Reason for the most recent failed request, if the client exposes one
    fn last_error(&self) -> Option<String> {
        None
    }
}
