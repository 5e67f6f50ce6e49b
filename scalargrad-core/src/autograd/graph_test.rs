use super::*;
use crate::error::ScalarGradError;

#[test]
fn test_leaf_starts_with_zero_grad() {
    let graph = Graph::new();
    let x = graph.leaf(3.5);
    let node = graph.node(x.id()).unwrap();
    assert_eq!(node.data(), 3.5);
    assert_eq!(node.grad(), 0.0);
    assert!(node.op().is_leaf());
    assert_eq!(node.op().producers().count(), 0);
}

#[test]
fn test_topological_order_producers_first() {
    let graph = Graph::new();
    let a = graph.leaf(1.0);
    let b = graph.leaf(2.0);
    let c = a * b;
    let d = c + a;
    let e = d.tanh();

    let order = graph.topological_order(e.id()).unwrap();
    assert_eq!(order.len(), 5);
    assert_eq!(*order.last().unwrap(), e.id());

    let position = |id: NodeId| order.iter().position(|&o| o == id).unwrap();
    for &id in &order {
        for producer in graph.node(id).unwrap().op().producers() {
            assert!(position(producer) < position(id));
        }
    }
}

#[test]
fn test_topological_order_visits_shared_nodes_once() {
    let graph = Graph::new();
    let x = graph.leaf(2.0);
    let y = x * x;
    let z = y + y;
    let order = graph.topological_order(z.id()).unwrap();
    assert_eq!(order, vec![x.id(), y.id(), z.id()]);
}

#[test]
fn test_topological_order_ignores_unreachable_nodes() {
    let graph = Graph::new();
    let a = graph.leaf(1.0);
    let unrelated = graph.leaf(9.0) * 2.0;
    let b = a + 1.0;
    let order = graph.topological_order(b.id()).unwrap();
    assert!(!order.contains(&unrelated.id()));
    assert_eq!(order.len(), 3);
}

#[test]
fn test_deep_chain_does_not_overflow() {
    let graph = Graph::new();
    let x = graph.leaf(1.0);
    let mut acc = x;
    for _ in 0..100_000 {
        acc = acc + 0.0;
    }
    acc.backward();
    assert_eq!(x.grad(), 1.0);
}

#[test]
fn test_backward_does_not_reset_other_grads() {
    let graph = Graph::new();
    let x = graph.leaf(2.0);
    let y = x * 3.0;
    y.backward();
    assert_eq!(x.grad(), 3.0);
    // Caller did not zero: contributions accumulate.
    y.backward();
    assert_eq!(x.grad(), 6.0);
}

#[test]
fn test_backward_after_zero_grad_is_repeatable() {
    let graph = Graph::new();
    let a = graph.leaf(0.7);
    let b = graph.leaf(-1.3);
    let out = (a * b + a.pow(2.0).unwrap()).tanh();

    graph.zero_grad();
    out.backward();
    let first = (a.grad(), b.grad(), out.grad());

    graph.zero_grad();
    out.backward();
    let second = (a.grad(), b.grad(), out.grad());

    assert_eq!(first, second);
}

#[test]
fn test_accumulation_across_roots() {
    let graph = Graph::new();
    let x = graph.leaf(2.0);
    let first = x * 3.0;
    let second = x * 5.0;
    graph.backward(first.id()).unwrap();
    graph.backward(second.id()).unwrap();
    assert_eq!(x.grad(), 8.0);
}

#[test]
fn test_backward_leaves_data_untouched() {
    let graph = Graph::new();
    let a = graph.leaf(1.25);
    let out = (a * a).sigmoid();
    let before = out.data();
    out.backward();
    assert_eq!(a.data(), 1.25);
    assert_eq!(out.data(), before);
}

#[test]
fn test_set_data_and_grad_by_id() {
    let graph = Graph::new();
    let p = graph.leaf(1.0).id();
    graph.set_data(p, 2.0).unwrap();
    graph.set_grad(p, -4.0).unwrap();
    assert_eq!(graph.data(p).unwrap(), 2.0);
    assert_eq!(graph.grad(p).unwrap(), -4.0);
}

#[test]
fn test_unknown_node_is_reported() {
    let graph = Graph::new();
    graph.leaf(1.0);
    let missing = NodeId {
        graph: graph.uid,
        index: 5,
    };
    assert_eq!(
        graph.data(missing),
        Err(ScalarGradError::NodeNotFound { id: 5, len: 1 })
    );
    assert!(graph.backward(missing).is_err());
    assert!(graph.value(missing).is_err());
    assert!(graph.topological_order(missing).is_err());
}

#[test]
fn test_ids_from_another_graph_are_rejected() {
    let small = Graph::new();
    let foreign = small.leaf(1.0).id();
    let large = Graph::new();
    let first = large.leaf(100.0).id();
    for i in 1..10 {
        large.leaf(100.0 + i as f64);
    }
    // Same index, different graph.
    assert_eq!(foreign.index(), first.index());
    assert_ne!(foreign, first);

    let foreign_err = ScalarGradError::ForeignNode { id: foreign.index() };
    assert_eq!(large.data(foreign), Err(foreign_err.clone()));
    assert_eq!(large.set_data(foreign, 0.0), Err(foreign_err.clone()));
    assert_eq!(large.set_grad(foreign, 0.0), Err(foreign_err.clone()));
    assert!(large.value(foreign).is_err());
    assert!(large.backward(foreign).is_err());
    assert!(large.topological_order(foreign).is_err());

    assert_eq!(large.data(first), Ok(100.0));
    assert_eq!(large.grad(first), Ok(0.0));
    assert_eq!(small.data(foreign), Ok(1.0));
}

#[test]
fn test_truncate_keeps_nodes_before_checkpoint() {
    let mut graph = Graph::new();
    let w = graph.leaf(0.5).id();
    let checkpoint = graph.checkpoint();

    {
        let w_val = graph.value(w).unwrap();
        let out = w_val * 4.0 + 1.0;
        out.backward();
    }
    assert_eq!(graph.len(), 5);
    assert_eq!(graph.grad(w).unwrap(), 4.0);

    graph.truncate(checkpoint);
    assert_eq!(graph.len(), 1);
    assert_eq!(graph.data(w).unwrap(), 0.5);
    assert_eq!(graph.grad(w).unwrap(), 4.0);
}

#[test]
fn test_truncate_to_current_checkpoint_is_noop() {
    let mut graph = Graph::new();
    let _ = graph.leaf(1.0) * 2.0;
    let checkpoint = graph.checkpoint();
    graph.truncate(checkpoint);
    assert_eq!(graph.len(), 3);
}

#[test]
fn test_clear_empties_arena() {
    let mut graph = Graph::with_capacity(8);
    let _ = graph.leaf(1.0) + 2.0;
    assert!(!graph.is_empty());
    graph.clear();
    assert!(graph.is_empty());
}
