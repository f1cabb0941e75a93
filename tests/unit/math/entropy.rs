//! Tests for weighted Shannon entropy

#[cfg(test)]
mod tests {

    use approx::assert_relative_eq;
    use wavetile::math::entropy::{entropy_of_weights, shannon_entropy, weight_log_weight};

    #[test]
    fn test_weight_log_weight() {
        assert_relative_eq!(weight_log_weight(1.0), 0.0);
        assert_relative_eq!(weight_log_weight(0.0), 0.0);
        assert_relative_eq!(weight_log_weight(2.0), 2.0 * 2.0_f64.ln());
    }

    // Tests uniform weights give ln(n)
    #[test]
    fn test_uniform_entropy_is_log_count() {
        assert_relative_eq!(entropy_of_weights(&[1.0; 4]), 4.0_f64.ln(), epsilon = 1e-12);
        assert_relative_eq!(entropy_of_weights(&[3.0; 5]), 5.0_f64.ln(), epsilon = 1e-12);
    }

    #[test]
    fn test_single_and_empty_have_zero_entropy() {
        assert_relative_eq!(entropy_of_weights(&[7.0]), 0.0);
        assert_relative_eq!(entropy_of_weights(&[]), 0.0);
        assert_relative_eq!(shannon_entropy(0.0, 0.0), 0.0);
    }

    // Tests the cached-sum form matches the probability form
    // Verified by dropping the log term
    #[test]
    fn test_matches_direct_formula() {
        let weights = [1.0, 2.0, 5.0];
        let total: f64 = weights.iter().sum();
        let direct: f64 = weights
            .iter()
            .map(|w| {
                let p = w / total;
                -p * p.ln()
            })
            .sum();
        assert_relative_eq!(entropy_of_weights(&weights), direct, epsilon = 1e-12);
    }

    #[test]
    fn test_skewed_is_below_uniform() {
        assert!(entropy_of_weights(&[1.0, 9.0]) < entropy_of_weights(&[5.0, 5.0]));
    }

    #[test]
    fn test_never_negative() {
        // Sums that drifted past exact zero entropy
        assert!(shannon_entropy(2.0, 2.0 * 2.0_f64.ln() + 1e-12) >= 0.0);
    }
}
