use super::{MseLoss, Reduction};
use crate::autograd::Graph;
use crate::error::ScalarGradError;
use crate::nn::losses::Loss;
use approx::assert_relative_eq;

#[test]
fn test_sum_reduction_and_gradient() {
    let graph = Graph::new();
    let p0 = graph.leaf(0.5);
    let p1 = graph.leaf(2.0);
    let loss = MseLoss::default()
        .calculate(&[vec![p0], vec![p1]], &[vec![1.0], vec![-1.0]])
        .unwrap();
    // (0.5 - 1)^2 + (2 + 1)^2
    assert_relative_eq!(loss.data(), 0.25 + 9.0, epsilon = 1e-12);
    loss.backward();
    // d/dp (p - y)^2 = 2 (p - y)
    assert_relative_eq!(p0.grad(), -1.0, epsilon = 1e-12);
    assert_relative_eq!(p1.grad(), 6.0, epsilon = 1e-12);
}

#[test]
fn test_mean_reduction() {
    let graph = Graph::new();
    let preds = vec![vec![graph.leaf(1.0), graph.leaf(3.0)]];
    let loss = MseLoss::new(Reduction::Mean)
        .calculate(&preds, &[vec![0.0, 0.0]])
        .unwrap();
    assert_relative_eq!(loss.data(), (1.0 + 9.0) / 2.0, epsilon = 1e-12);
    loss.backward();
    assert_relative_eq!(preds[0][0].grad(), 1.0, epsilon = 1e-12);
    assert_relative_eq!(preds[0][1].grad(), 3.0, epsilon = 1e-12);
}

#[test]
fn test_length_mismatches() {
    let graph = Graph::new();
    let loss = MseLoss::default();
    assert!(matches!(
        loss.calculate(&[vec![graph.leaf(1.0)]], &[vec![1.0], vec![2.0]]),
        Err(ScalarGradError::LengthMismatch { expected: 2, actual: 1, .. })
    ));
    assert!(matches!(
        loss.calculate(&[vec![graph.leaf(1.0)]], &[vec![1.0, 2.0]]),
        Err(ScalarGradError::LengthMismatch { expected: 2, actual: 1, .. })
    ));
}

#[test]
fn test_empty_is_rejected() {
    assert!(matches!(
        MseLoss::default().calculate(&[], &[]),
        Err(ScalarGradError::EmptyDataset { .. })
    ));
}

#[test]
fn test_reduction_from_str() {
    assert_eq!("Mean".parse::<Reduction>(), Ok(Reduction::Mean));
    assert_eq!("sum".parse::<Reduction>(), Ok(Reduction::Sum));
    assert_eq!(
        "max".parse::<Reduction>(),
        Err(ScalarGradError::UnknownReduction("max".to_string()))
    );
}
