use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

/// Resolution value for a graph node.
///
/// For plugins this is the activation hook's return value; for the
/// environment node it is the host view object.
pub type PluginValue = Arc<dyn Any + Send + Sync>;

/// Dependency graph with explicit waiters.
///
/// Each registered node carries the set of names it waits on. `resolve`
/// stores a value for a name and walks the pending list, returning every
/// node whose dependency set just became fully satisfied; the caller drives
/// the resulting loads. Nodes whose dependencies never resolve (missing or
/// cyclic) simply stay pending forever. That stall is an accepted
/// limitation, not an error, and is deliberately not detected here.
#[derive(Default)]
pub struct DependencyGraph {
    /// Resolved values by node name
    resolved: HashMap<String, PluginValue>,
    /// Pending nodes in registration order, with their full dependency sets
    pending: Vec<(String, Vec<String>)>,
}

impl DependencyGraph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node waiting on `deps`.
    ///
    /// Returns true if every dependency is already resolved, in which case
    /// the node never enters the pending list and the caller should proceed
    /// immediately. Re-adding a name replaces its previous pending entry.
    pub fn add(&mut self, name: &str, deps: Vec<String>) -> bool {
        self.pending.retain(|(n, _)| n != name);
        if deps.iter().all(|d| self.resolved.contains_key(d)) {
            return true;
        }
        self.pending.push((name.to_string(), deps));
        false
    }

    /// Record a resolution value for `name` and return the names of pending
    /// nodes whose dependency sets are now fully satisfied, in registration
    /// order. Satisfied nodes leave the pending list; they become resolved
    /// themselves only when the caller calls `resolve` for them in turn.
    pub fn resolve(&mut self, name: &str, value: PluginValue) -> Vec<String> {
        self.resolved.insert(name.to_string(), value);

        let mut ready = Vec::new();
        self.pending.retain(|(node, deps)| {
            if deps.iter().all(|d| self.resolved.contains_key(d)) {
                ready.push(node.clone());
                false
            } else {
                true
            }
        });
        ready
    }

    /// Whether `name` has been resolved.
    pub fn is_resolved(&self, name: &str) -> bool {
        self.resolved.contains_key(name)
    }

    /// The resolved value for `name`, if any.
    pub fn resolved_value(&self, name: &str) -> Option<PluginValue> {
        self.resolved.get(name).cloned()
    }

    /// Names still parked on unresolved dependencies. Diagnostic only; a
    /// permanently pending node is visible through plugin status, never
    /// reported as an error.
    pub fn pending_names(&self) -> Vec<String> {
        self.pending.iter().map(|(n, _)| n.clone()).collect()
    }

    /// Drop all nodes and values.
    pub fn clear(&mut self) {
        self.resolved.clear();
        self.pending.clear();
    }
}
