//! Mechanical work bookkeeping.

/// Cumulative trapezoidal integral of `values` over `times`, starting at zero.
///
/// The output has the same length as the inputs; entry `i` is the integral
/// from `times[0]` to `times[i]`. Extra trailing samples in the longer
/// slice are ignored.
pub fn cumulative_trapezoid(values: &[f64], times: &[f64]) -> Vec<f64> {
    let n = values.len().min(times.len());
    if n == 0 {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(n);
    let mut total = 0.0;
    out.push(total);
    for i in 1..n {
        total += 0.5 * (values[i - 1] + values[i]) * (times[i] - times[i - 1]);
        out.push(total);
    }
    out
}

/// Total trapezoidal integral of `values` over `times`.
pub fn trapezoid(values: &[f64], times: &[f64]) -> f64 {
    cumulative_trapezoid(values, times)
        .last()
        .copied()
        .unwrap_or(0.0)
}
