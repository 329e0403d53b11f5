// Tests for activation functions and their derivatives.
// Derivatives are checked against central finite differences away from the ReLU kink.

use approx::assert_relative_eq;
use backprop_lab::utils::activations::{relu, relu_derivative, sigmoid, sigmoid_derivative};
use backprop_lab::utils::Activation;

const H: f64 = 1e-6;

fn numerical_derivative(f: impl Fn(f64) -> f64, x: f64) -> f64 {
    (f(x + H) - f(x - H)) / (2.0 * H)
}

// ============================================================================
// Sigmoid
// ============================================================================

mod sigmoid_tests {
    use super::*;

    #[test]
    fn test_sigmoid_symmetry() {
        for x in [0.1, 0.5, 1.0, 2.5, 7.0] {
            assert_relative_eq!(sigmoid(x) + sigmoid(-x), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_sigmoid_saturation() {
        assert!(sigmoid(40.0) > 1.0 - 1e-12);
        assert!(sigmoid(-40.0) < 1e-12);
        assert!(sigmoid(-40.0) > 0.0);
    }

    #[test]
    fn test_sigmoid_derivative_matches_numerical() {
        for x in [-4.0, -1.0, -0.1, 0.0, 0.3, 2.0, 5.0] {
            let analytical = Activation::Sigmoid.derivative(x);
            let numerical = numerical_derivative(sigmoid, x);
            assert_relative_eq!(analytical, numerical, epsilon = 1e-8);
            assert_relative_eq!(analytical, sigmoid_derivative(sigmoid(x)), epsilon = 1e-15);
        }
    }

    #[test]
    fn test_sigmoid_derivative_peak() {
        assert_relative_eq!(Activation::Sigmoid.derivative(0.0), 0.25);
        assert!(Activation::Sigmoid.derivative(3.0) < 0.25);
    }
}

// ============================================================================
// ReLU
// ============================================================================

mod relu_tests {
    use super::*;

    #[test]
    fn test_relu_values() {
        assert_eq!(relu(-2.0), 0.0);
        assert_eq!(relu(0.0), 0.0);
        assert_eq!(relu(3.5), 3.5);
        assert_eq!(Activation::Relu.value(-0.1), 0.0);
    }

    #[test]
    fn test_relu_derivative_strict_comparison() {
        assert_eq!(relu_derivative(-1.0), 0.0);
        assert_eq!(relu_derivative(0.0), 0.0);
        assert_eq!(relu_derivative(f64::MIN_POSITIVE), 1.0);
        assert_eq!(Activation::Relu.derivative(0.0), 0.0);
    }

    #[test]
    fn test_relu_derivative_matches_numerical_away_from_zero() {
        for x in [-3.0, -0.5, 0.5, 3.0] {
            let numerical = numerical_derivative(relu, x);
            assert_relative_eq!(Activation::Relu.derivative(x), numerical, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_relu_ignores_cached_output() {
        // The derivative depends on z alone.
        assert_eq!(Activation::Relu.derivative_from_output(2.0, 123.0), 1.0);
        assert_eq!(Activation::Relu.derivative_from_output(-2.0, 123.0), 0.0);
    }
}
