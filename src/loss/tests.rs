pub(crate) use super::*;
use crate::distribution::NormalDistribution;
use crate::error::NormError;
use crate::primitives::{Matrix, Vector};

fn mat(rows: usize, cols: usize, data: &[f64]) -> Matrix<f64> {
    Matrix::from_vec(rows, cols, data.to_vec()).expect("test data matches shape")
}

#[test]
fn test_reconstruction_name() {
    let criterion = ReconstructionLoss::<Matrix<f64>>::new();
    assert_eq!(criterion.name(), "Reconstruction");
}

#[test]
fn test_reconstruction_fresh_state_is_empty() {
    let criterion = ReconstructionLoss::<Matrix<f64>>::default();
    assert!(criterion.delta().is_none());
    assert!(criterion.output_parameter().is_none());
    assert!(criterion.last_loss().is_none());
    assert!(criterion.normal_dist().is_none());
}

#[test]
fn test_reconstruction_forward_is_negative_log_likelihood() {
    let input = mat(4, 1, &[0.3, -0.5, 1.0, 2.0]);
    let target = mat(2, 1, &[0.5, 1.5]);

    let mut criterion = ReconstructionLoss::new();
    let loss = criterion.forward(&input, &target).expect("even rows");

    let expected = -NormalDistribution::from_combined(&input)
        .and_then(|d| d.log_probability(&target))
        .expect("even rows");
    assert!((loss - expected).abs() < 1e-12);
    assert_eq!(criterion.last_loss(), Some(loss));
    assert_eq!(criterion.output_parameter(), Some(&input));
    assert!(criterion.normal_dist().is_some());
}

#[test]
fn test_reconstruction_backward_negates_log_prob_gradient() {
    let input = mat(4, 2, &[0.3, -0.5, 1.0, 2.0, 0.0, 1.0, -1.0, 0.5]);
    let target = mat(2, 2, &[0.5, 1.5, -0.2, 0.0]);

    let mut criterion = ReconstructionLoss::new();
    let grad = criterion.backward(&input, &target).expect("even rows");

    let log_prob_grad = NormalDistribution::from_combined(&input)
        .and_then(|d| d.log_prob_backward(&target))
        .expect("even rows");

    assert_eq!(grad.shape(), input.shape());
    for (g, lg) in grad.as_slice().iter().zip(log_prob_grad.as_slice()) {
        assert_eq!(*g, -lg);
    }
    assert_eq!(criterion.delta(), Some(&grad));
}

#[test]
fn test_reconstruction_backward_matches_forward_finite_difference() {
    let block = [0.2, -1.0, 0.5, 0.8, 1.5, -0.4];
    let target = mat(3, 1, &[1.0, 0.0, -1.0]);

    let mut criterion = ReconstructionLoss::new();
    let grad = criterion
        .backward(&mat(6, 1, &block), &target)
        .expect("even rows");

    let h = 1e-5;
    for i in 0..block.len() {
        let (mut plus, mut minus) = (block, block);
        plus[i] += h;
        minus[i] -= h;
        let f_plus = criterion.forward(&mat(6, 1, &plus), &target).expect("even rows");
        let f_minus = criterion.forward(&mat(6, 1, &minus), &target).expect("even rows");
        let numeric = (f_plus - f_minus) / (2.0 * h);
        let analytic = grad.as_slice()[i];

        assert!(
            (analytic - numeric).abs() < 1e-4 * analytic.abs().max(1.0),
            "element {i}: analytic {analytic} vs numeric {numeric}"
        );
    }
}

#[test]
fn test_reconstruction_gradient_step_decreases_loss() {
    let mut input = mat(4, 1, &[0.0, 0.0, 0.0, 0.0]);
    let target = mat(2, 1, &[2.0, -1.0]);
    let mut criterion = ReconstructionLoss::new();

    let before = criterion.forward(&input, &target).expect("even rows");
    let grad = criterion.backward(&input, &target).expect("even rows");
    input = input
        .zip_map(&grad, |p, g| p - 0.05 * g)
        .expect("same shape");
    let after = criterion.forward(&input, &target).expect("even rows");

    assert!(after < before, "loss went from {before} to {after}");
}

#[test]
fn test_reconstruction_odd_rows_propagates() {
    let mut criterion = ReconstructionLoss::new();
    let input = mat(3, 1, &[0.0, 0.0, 0.0]);
    let target = mat(1, 1, &[0.0]);

    assert_eq!(
        criterion.forward(&input, &target).unwrap_err(),
        NormError::InvalidParameterBlock { rows: 3 }
    );
    assert_eq!(
        criterion.backward(&input, &target).unwrap_err(),
        NormError::InvalidParameterBlock { rows: 3 }
    );
    assert!(criterion.delta().is_none());
    assert!(criterion.last_loss().is_none());
}

#[test]
fn test_reconstruction_target_shape_mismatch() {
    let mut criterion = ReconstructionLoss::new();
    let input = mat(4, 1, &[0.0; 4]);
    let target = mat(3, 1, &[0.0; 3]);

    assert!(matches!(
        criterion.forward(&input, &target),
        Err(NormError::DimensionMismatch { .. })
    ));
}

#[test]
fn test_reconstruction_on_vectors() {
    let mut criterion = ReconstructionLoss::new();
    let input = Vector::from_slice(&[0.0, 0.0, 1.0, 1.0]);
    let target = Vector::from_slice(&[1.0, 1.0]);

    let loss = criterion.forward(&input, &target).expect("even length");
    // σ = ln 2 at both elements, x = μ
    let expected = 2.0 * (std::f64::consts::LN_2.ln() + 0.5 * (2.0 * std::f64::consts::PI).ln());
    assert!((loss - expected).abs() < 1e-12);

    let grad = criterion.backward(&input, &target).expect("even length");
    assert_eq!(grad.len(), 4);
    // At the mode the mean gradient vanishes
    assert_eq!(grad.as_slice()[2], 0.0);
    assert_eq!(grad.as_slice()[3], 0.0);
}

#[test]
fn test_reconstruction_through_trait_object() {
    let mut losses: Vec<Box<dyn LossFunction<Matrix<f64>>>> =
        vec![Box::new(ReconstructionLoss::new())];
    let input = mat(2, 1, &[0.0, 0.0]);
    let target = mat(1, 1, &[0.0]);
    for criterion in &mut losses {
        assert!(criterion.forward(&input, &target).expect("even rows").is_finite());
    }
}
