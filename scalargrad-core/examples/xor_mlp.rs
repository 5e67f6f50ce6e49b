//! # Training a small MLP on XOR
//!
//! Builds a 2-4-4-1 tanh network, trains it with full-batch gradient descent
//! through [`scalargrad_core::fit`], prints the loss curve and predictions, and
//! writes the last iteration's loss graph as Graphviz DOT to `xor_loss.dot`.
//!
//! Run with `cargo run --example xor_mlp`.

use rand::rngs::StdRng;
use rand::SeedableRng;
use scalargrad_core::nn::{Init, Mlp, Module, MseLoss, Reduction};
use scalargrad_core::{fit, predict, Activation, Graph, ScalarGradError, TrainConfig};

fn main() -> Result<(), ScalarGradError> {
    let inputs = vec![
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 0.0],
        vec![1.0, 1.0],
    ];
    let targets = vec![vec![-1.0], vec![1.0], vec![1.0], vec![-1.0]];

    let mut graph = Graph::new();
    let mlp = Mlp::new(
        &graph,
        2,
        &[4, 4, 1],
        &[Activation::Tanh, Activation::Tanh, Activation::Tanh],
        Init::default(),
        &mut StdRng::seed_from_u64(1337),
    )?;
    println!("Model: {} parameters", mlp.num_parameters());

    let config = TrainConfig::default()
        .with_iterations(500)
        .with_learning_rate(0.05)
        .with_log_every(50);
    let report = fit(
        &mlp,
        &mut graph,
        &inputs,
        &targets,
        &MseLoss::new(Reduction::Sum),
        &config,
    )?;

    for entry in report.history.iter().step_by(50) {
        println!("iteration {:>4}: loss {:.6}", entry.iteration, entry.loss);
    }
    if let Some(loss) = report.final_loss() {
        println!("final loss: {:.6}", loss);
    }

    let predictions = predict(&mlp, &mut graph, &inputs)?;
    for (x, y) in inputs.iter().zip(&predictions) {
        println!("{:?} -> {:+.4}", x, y[0]);
    }

    match std::fs::write("xor_loss.dot", report.final_graph.to_dot()) {
        Ok(()) => println!(
            "wrote xor_loss.dot ({} nodes)",
            report.final_graph.nodes.len()
        ),
        Err(e) => eprintln!("could not write xor_loss.dot: {}", e),
    }
    Ok(())
}
