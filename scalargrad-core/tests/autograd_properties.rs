mod common;

use common::assert_near;
use proptest::prelude::*;
use scalargrad_core::Graph;

fn finite() -> impl Strategy<Value = f64> {
    -1.0e3..1.0e3
}

proptest! {
    #[test]
    fn add_passes_gradient_through(a in finite(), b in finite()) {
        let graph = Graph::new();
        let (x, y) = (graph.leaf(a), graph.leaf(b));
        let out = x + y;
        prop_assert_eq!(out.data(), a + b);
        out.backward();
        prop_assert_eq!(x.grad(), 1.0);
        prop_assert_eq!(y.grad(), 1.0);
    }

    #[test]
    fn mul_swaps_operands(a in finite(), b in finite()) {
        let graph = Graph::new();
        let (x, y) = (graph.leaf(a), graph.leaf(b));
        let out = x * y;
        prop_assert_eq!(out.data(), a * b);
        out.backward();
        prop_assert_eq!(x.grad(), b);
        prop_assert_eq!(y.grad(), a);
    }

    #[test]
    fn reused_operand_accumulates(a in finite()) {
        let graph = Graph::new();
        let x = graph.leaf(a);
        let y = x * x;
        y.backward();
        prop_assert_eq!(x.grad(), 2.0 * a);
    }

    #[test]
    fn backward_after_reset_is_repeatable(a in -3.0f64..3.0, b in -3.0f64..3.0) {
        let graph = Graph::new();
        let (x, y) = (graph.leaf(a), graph.leaf(b));
        let out = (x * y + x).tanh() * y.sigmoid();

        graph.zero_grad();
        out.backward();
        let first = (x.grad(), y.grad());

        graph.zero_grad();
        out.backward();
        prop_assert_eq!((x.grad(), y.grad()), first);
    }

    #[test]
    fn relu_gates_by_sign(a in 0.001f64..1.0e3) {
        let graph = Graph::new();
        let neg = graph.leaf(-a);
        let pos = graph.leaf(a);
        let out = neg.relu() + pos.relu();
        prop_assert_eq!(out.data(), a);
        out.backward();
        prop_assert_eq!(neg.grad(), 0.0);
        prop_assert_eq!(pos.grad(), 1.0);
    }
}

#[test]
fn chain_rule_through_tanh() {
    let graph = Graph::new();
    let x = graph.leaf(2.0);
    let y = (x * graph.leaf(3.0)).tanh();
    y.backward();
    assert_near(x.grad(), 3.0 * (1.0 - 6.0f64.tanh().powi(2)), 1e-9);
}

#[test]
fn relu_boundary_values() {
    let graph = Graph::new();
    let low = graph.leaf(-5.0);
    let low_out = low.relu();
    assert_eq!(low_out.data(), 0.0);
    low_out.backward();
    assert_eq!(low.grad(), 0.0);

    let high = graph.leaf(5.0);
    let high_out = high.relu();
    assert_eq!(high_out.data(), 5.0);
    high_out.backward();
    assert_eq!(high.grad(), 1.0);
}

#[test]
fn backward_accumulates_across_roots() {
    let graph = Graph::new();
    let x = graph.leaf(3.0);
    let a = x * 2.0;
    let b = x * 5.0;
    a.backward();
    b.backward();
    assert_eq!(x.grad(), 7.0);
}

#[test]
fn long_chain_does_not_overflow_the_stack() {
    let graph = Graph::new();
    let x = graph.leaf(1.0);
    let mut acc = x;
    for _ in 0..100_000 {
        acc = acc + x;
    }
    acc.backward();
    assert_eq!(x.grad(), 100_001.0);
}
