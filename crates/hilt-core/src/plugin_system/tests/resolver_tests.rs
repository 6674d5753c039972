use std::sync::Arc;

use crate::plugin_system::resolver::{DependencyGraph, PluginValue};

fn value(n: u32) -> PluginValue {
    Arc::new(n)
}

#[test]
fn add_with_no_dependencies_is_ready_immediately() {
    let mut graph = DependencyGraph::new();
    assert!(graph.add("a", vec![]));
    assert!(graph.pending_names().is_empty());
}

#[test]
fn add_with_unresolved_dependency_is_pending() {
    let mut graph = DependencyGraph::new();
    assert!(!graph.add("a", vec!["@env".to_string()]));
    assert_eq!(graph.pending_names(), vec!["a".to_string()]);
}

#[test]
fn resolve_releases_satisfied_waiters_in_registration_order() {
    let mut graph = DependencyGraph::new();
    graph.add("a", vec!["@env".to_string()]);
    graph.add("b", vec!["@env".to_string()]);
    graph.add("c", vec!["@env".to_string(), "a".to_string()]);

    let ready = graph.resolve("@env", value(0));
    assert_eq!(ready, vec!["a".to_string(), "b".to_string()]);
    // c still waits on a
    assert_eq!(graph.pending_names(), vec!["c".to_string()]);

    let ready = graph.resolve("a", value(1));
    assert_eq!(ready, vec!["c".to_string()]);
    assert!(graph.pending_names().is_empty());
}

#[test]
fn add_after_dependencies_resolved_is_ready() {
    let mut graph = DependencyGraph::new();
    graph.resolve("@env", value(0));
    assert!(graph.add("late", vec!["@env".to_string()]));
}

#[test]
fn missing_dependency_stalls_forever() {
    let mut graph = DependencyGraph::new();
    graph.add("p", vec!["never registered".to_string(), "@env".to_string()]);
    graph.resolve("@env", value(0));
    // No error, no readiness: the node just stays pending.
    assert_eq!(graph.pending_names(), vec!["p".to_string()]);
}

#[test]
fn cyclic_dependencies_stall_forever() {
    let mut graph = DependencyGraph::new();
    graph.add("a", vec!["b".to_string(), "@env".to_string()]);
    graph.add("b", vec!["a".to_string(), "@env".to_string()]);
    let ready = graph.resolve("@env", value(0));
    assert!(ready.is_empty());
    assert_eq!(graph.pending_names().len(), 2);
}

#[test]
fn re_adding_a_name_replaces_its_pending_entry() {
    let mut graph = DependencyGraph::new();
    graph.add("a", vec!["x".to_string()]);
    graph.add("a", vec!["@env".to_string()]);
    assert_eq!(graph.pending_names(), vec!["a".to_string()]);

    let ready = graph.resolve("@env", value(0));
    assert_eq!(ready, vec!["a".to_string()]);
}

#[test]
fn resolved_values_are_retrievable() {
    let mut graph = DependencyGraph::new();
    assert!(!graph.is_resolved("a"));
    graph.resolve("a", value(7));
    assert!(graph.is_resolved("a"));

    let stored = graph.resolved_value("a").expect("value should be stored");
    assert_eq!(stored.downcast_ref::<u32>(), Some(&7));
    assert!(graph.resolved_value("b").is_none());
}

#[test]
fn clear_drops_all_state() {
    let mut graph = DependencyGraph::new();
    graph.add("a", vec!["@env".to_string()]);
    graph.resolve("@env", value(0));
    graph.clear();
    assert!(!graph.is_resolved("@env"));
    assert!(graph.pending_names().is_empty());
}
