/// Contribution of one pattern to the weighted-log-weight sum
///
/// Zero weights contribute nothing, matching the limit of `w ln w` as `w → 0`.
pub fn weight_log_weight(weight: f64) -> f64 {
    if weight > 0.0 { weight * weight.ln() } else { 0.0 }
}

/// Shannon entropy of a weight-normalised distribution from its cached sums
///
/// For weights `w_i` with `W = Σ w_i` and `L = Σ w_i ln w_i`, the entropy of
/// `p_i = w_i / W` is `ln W - L / W`. An empty distribution has entropy zero.
pub fn shannon_entropy(weight_sum: f64, weight_log_weight_sum: f64) -> f64 {
    if weight_sum <= 0.0 {
        return 0.0;
    }
    // Cached sums drift slightly under repeated subtraction
    (weight_sum.ln() - weight_log_weight_sum / weight_sum).max(0.0)
}

/// Entropy computed directly from a list of weights
pub fn entropy_of_weights(weights: &[f64]) -> f64 {
    let weight_sum: f64 = weights.iter().sum();
    let log_sum: f64 = weights.iter().copied().map(weight_log_weight).sum();
    shannon_entropy(weight_sum, log_sum)
}
