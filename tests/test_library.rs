//! End-to-end tests for the backprop_lab library
//!
//! This file tests the public API as a driver would use it:
//! - Model selection by topology, including the unimplemented kinds
//! - Training the MLP and CNN on their demo samples
//! - The loss contract

use approx::assert_relative_eq;
use backprop_lab::config::TrainingConfig;
use backprop_lab::models::{sample_for, Model, ModelKind, Trainable};
use backprop_lab::utils::loss::half_squared_error;
use backprop_lab::utils::SimpleRng;
use backprop_lab::EngineError;

const EPOCHS: usize = 20;

// Loss after each of `epochs` training steps on the demo sample.
fn loss_curve(kind: ModelKind, learning_rate: f64, epochs: usize) -> Vec<f64> {
    let config = TrainingConfig::default();
    let mut model = Model::build(kind, &config).unwrap();
    let sample = sample_for(kind).unwrap();
    let (input, target) = (&sample.input, &sample.target);

    (0..epochs)
        .map(|_| {
            model.train(input, target, learning_rate).unwrap();
            let output = model.predict(input).unwrap();
            model.loss(&output, target).unwrap()
        })
        .collect()
}

// ============================================================================
// Training scenarios
// ============================================================================

mod scenario_tests {
    use super::*;

    #[test]
    fn test_mlp_loss_trend_over_twenty_epochs() {
        let losses = loss_curve(ModelKind::Mlp, 0.5, EPOCHS);
        assert_eq!(losses.len(), EPOCHS);

        let non_increasing = losses.windows(2).filter(|w| w[1] <= w[0]).count() + 1;
        assert!(
            non_increasing >= 15,
            "loss rose too often: {:?}",
            losses
        );
        assert!(losses[EPOCHS - 1] < losses[0]);
    }

    #[test]
    fn test_mlp_output_moves_toward_target() {
        let config = TrainingConfig::default();
        let mut model = Model::build(ModelKind::Mlp, &config).unwrap();
        let sample = sample_for(ModelKind::Mlp).unwrap();

        let before = model.predict(&sample.input).unwrap()[0];
        for _ in 0..EPOCHS {
            model.train(&sample.input, &sample.target, 0.5).unwrap();
        }
        let after = model.predict(&sample.input).unwrap()[0];
        assert!((after - 0.8).abs() < (before - 0.8).abs());
    }

    #[test]
    fn test_cnn_final_loss_below_first_epoch() {
        let losses = loss_curve(ModelKind::Cnn, 0.1, EPOCHS);
        assert!(
            losses[EPOCHS - 1] < losses[0],
            "first {} last {}",
            losses[0],
            losses[EPOCHS - 1]
        );
    }

    #[test]
    fn test_cnn_output_approaches_one() {
        let config = TrainingConfig::default();
        let mut model = Model::build(ModelKind::Cnn, &config).unwrap();
        let sample = sample_for(ModelKind::Cnn).unwrap();

        model.train(&sample.input, &sample.target, 0.1).unwrap();
        let first = model.predict(&sample.input).unwrap()[0];
        for _ in 1..EPOCHS {
            model.train(&sample.input, &sample.target, 0.1).unwrap();
        }
        let last = model.predict(&sample.input).unwrap()[0];
        assert!((1.0 - last).abs() < (1.0 - first).abs());
    }

    #[test]
    fn test_training_runs_are_reproducible() {
        assert_eq!(
            loss_curve(ModelKind::Mlp, 0.5, 5),
            loss_curve(ModelKind::Mlp, 0.5, 5)
        );
        assert_eq!(
            loss_curve(ModelKind::Cnn, 0.1, 5),
            loss_curve(ModelKind::Cnn, 0.1, 5)
        );
    }
}

// ============================================================================
// Model selection
// ============================================================================

mod selection_tests {
    use super::*;

    #[test]
    fn test_build_by_name() {
        let config = TrainingConfig::default();
        let kind: ModelKind = "cnn".parse().unwrap();
        let model = Model::build(kind, &config).unwrap();
        assert_eq!(model.kind(), ModelKind::Cnn);
    }

    #[test]
    fn test_unimplemented_kinds_fail_loudly() {
        let config = TrainingConfig::default();
        for name in ["rnn", "attention"] {
            let kind: ModelKind = name.parse().unwrap();
            let err = Model::build(kind, &config).unwrap_err();
            assert_eq!(err, EngineError::NotImplemented(kind));
            assert!(err.to_string().contains("not implemented"));
        }
    }

    #[test]
    fn test_unknown_topology() {
        assert!(matches!(
            "lstm".parse::<ModelKind>(),
            Err(EngineError::UnknownTopology(_))
        ));
    }

    #[test]
    fn test_wrong_input_length_per_topology() {
        let config = TrainingConfig::default();
        let mut mlp = Model::build(ModelKind::Mlp, &config).unwrap();
        let mut cnn = Model::build(ModelKind::Cnn, &config).unwrap();

        assert!(matches!(
            mlp.predict(&[1.0; 64]),
            Err(EngineError::DimensionMismatch { .. })
        ));
        assert!(matches!(
            cnn.predict(&[1.0, 0.5, -1.2]),
            Err(EngineError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_models_are_independent() {
        let config = TrainingConfig::default();
        let mut trained = Model::build(ModelKind::Mlp, &config).unwrap();
        let mut fresh = Model::build(ModelKind::Mlp, &config).unwrap();
        let sample = sample_for(ModelKind::Mlp).unwrap();

        let fresh_before = fresh.predict(&sample.input).unwrap();
        trained.train(&sample.input, &sample.target, 0.5).unwrap();
        assert_eq!(fresh.predict(&sample.input).unwrap(), fresh_before);
        assert_ne!(trained.predict(&sample.input).unwrap(), fresh_before);
    }
}

// ============================================================================
// Loss contract
// ============================================================================

mod loss_tests {
    use super::*;

    #[test]
    fn test_loss_non_negative_and_zero_at_equality() {
        let mut rng = SimpleRng::new(2718);
        for len in 1..6 {
            let y: Vec<f64> = (0..len).map(|_| rng.gen_range_f64(-5.0, 5.0)).collect();
            let t: Vec<f64> = (0..len).map(|_| rng.gen_range_f64(-5.0, 5.0)).collect();
            assert!(half_squared_error(&y, &t).unwrap() >= 0.0);
            assert_eq!(half_squared_error(&y, &y).unwrap(), 0.0);
        }
    }

    #[test]
    fn test_model_loss_delegates() {
        let model = Model::build(ModelKind::Mlp, &TrainingConfig::default()).unwrap();
        assert_relative_eq!(model.loss(&[0.5], &[0.8]).unwrap(), 0.045, epsilon = 1e-12);
        assert!(model.loss(&[0.5], &[0.8, 0.1]).is_err());
    }
}
