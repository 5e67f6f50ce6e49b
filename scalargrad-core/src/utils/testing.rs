use crate::autograd::Value;

/// Checks that every value matches its expected data within `tolerance`.
/// Panics on the first mismatch, naming its index.
pub(crate) fn check_values_near(actual: &[Value<'_>], expected: &[f64], tolerance: f64) {
    let actual: Vec<f64> = actual.iter().map(|v| v.data()).collect();
    check_slice_near(&actual, expected, tolerance);
}

pub(crate) fn check_slice_near(actual: &[f64], expected: &[f64], tolerance: f64) {
    assert_eq!(actual.len(), expected.len(), "Data length mismatch");
    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        let diff = (a - e).abs();
        if diff > tolerance || diff.is_nan() {
            panic!(
                "Data mismatch at index {}: actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
                i, a, e, diff, tolerance
            );
        }
    }
}
