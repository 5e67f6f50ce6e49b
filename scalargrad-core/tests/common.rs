use scalargrad_core::nn::{Init, Mlp};
use scalargrad_core::{Activation, Graph};
use rand::rngs::StdRng;
use rand::SeedableRng;

// Shared by several test crates; not every one uses every helper.
#[allow(dead_code)]
pub fn assert_near(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "actual={:?}, expected={:?}, tolerance={:?}",
        actual,
        expected,
        tolerance
    );
}

/// A 2-4-1 tanh network with seeded weights.
#[allow(dead_code)]
pub fn small_tanh_mlp(graph: &Graph, seed: u64) -> Mlp {
    Mlp::new(
        graph,
        2,
        &[4, 1],
        &[Activation::Tanh, Activation::Tanh],
        Init::default(),
        &mut StdRng::seed_from_u64(seed),
    )
    .expect("valid network configuration")
}
