/// Maximum-likelihood fit of a discrete power law `p(d) ~ d^-alpha` for `d >= x_min`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerLawFit {
    pub alpha: f64,
    pub x_min: usize,
    /// Number of degrees the fit was computed over.
    pub n_tail: usize,
    /// Standard error of `alpha`.
    pub sigma: f64,
}

/// Fits the exponent over the positive degrees with `x_min` set to the smallest of them, using
/// the discrete estimator `alpha = 1 + n / sum(ln(d / (x_min - 0.5)))`, where the `- 0.5`
/// corrects for the degrees being integers.
///
/// `None` if fewer than two degrees are positive.
pub fn fit(degrees: &[usize]) -> Option<PowerLawFit> {
    let tail = degrees.iter().copied().filter(|&d| d > 0).collect::<Vec<_>>();
    if tail.len() < 2 {
        return None;
    }
    let x_min = *tail.iter().min()?;
    let shifted = x_min as f64 - 0.5;
    let log_sum = tail
        .iter()
        .map(|&d| (d as f64 / shifted).ln())
        .sum::<f64>();
    let n = tail.len() as f64;
    let alpha = 1.0 + n / log_sum;
    Some(PowerLawFit {
        alpha,
        x_min,
        n_tail: tail.len(),
        sigma: (alpha - 1.0) / n.sqrt(),
    })
}

#[cfg(test)]
mod tests {
    use crate::analysis::powerlaw::fit;
    use crate::test_util::assert_close;

    #[test]
    fn hand_computed() {
        let result = fit(&[0, 1, 1, 2, 4]).unwrap();
        assert_eq!(result.x_min, 1);
        assert_eq!(result.n_tail, 4);
        let log_sum = 2.0 * 2f64.ln() + 4f64.ln() + 8f64.ln();
        assert_close(result.alpha, 1.0 + 4.0 / log_sum);
        assert_close(result.sigma, (result.alpha - 1.0) / 2.0);
    }

    #[test]
    fn heavier_tail_has_smaller_exponent() {
        let light = fit(&[1, 1, 1, 1, 2, 2, 3]).unwrap();
        let heavy = fit(&[1, 1, 1, 1, 20, 50, 100]).unwrap();
        assert!(heavy.alpha < light.alpha);
    }

    #[test]
    fn too_few_degrees() {
        assert_eq!(fit(&[]), None);
        assert_eq!(fit(&[0, 0, 3]), None);
    }
}
