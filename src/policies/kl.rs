//! Bernoulli KL divergence and the bisection used by KL-UCB to invert it.

/// Width of the bracket at which [`find_q`] stops.
pub const TOLERANCE: f64 = 0.01;

/// Divergence between Bernoulli distributions of means `p` and `q`.
///
/// Defined for `p` in `[0, 1]` and `q` in `(0, 1)`. Arguments outside that
/// domain are not checked and yield NaN or infinities.
pub fn bernoulli_kl(p: f64, q: f64) -> f64 {
    if p == 0.0 {
        (1.0 - p) * ((1.0 - p) / (1.0 - q)).ln()
    } else if p == 1.0 {
        p * (p / q).ln()
    } else {
        p * (p / q).ln() + (1.0 - p) * ((1.0 - p) / (1.0 - q)).ln()
    }
}

/// Largest `q` in `[p, 1]` with `bernoulli_kl(p, q)` close to `target`.
///
/// Bisects `[p, 1]` until the bracket is at most [`TOLERANCE`] wide and returns
/// its midpoint, so the result is only accurate to about half the tolerance.
pub fn find_q(target: f64, p: f64) -> f64 {
    let mut low = p;
    let mut high = 1.0;

    while high - low > TOLERANCE {
        let mid = (high + low) / 2.0;
        let divergence = bernoulli_kl(p, mid);
        if divergence == target {
            return mid;
        } else if divergence > target {
            high = mid;
        } else {
            low = mid;
        }
    }

    (high + low) / 2.0
}
