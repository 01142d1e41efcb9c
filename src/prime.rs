//! Prime capacity sizing shared by both table variants

/// Returns the smallest prime that is greater than or equal to `n`.
///
/// Even inputs are bumped to the next odd number before the scan, so the result is
/// never 2: `next_prime(0)`, `next_prime(1)` and `next_prime(2)` all return 3.
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn next_prime(n: usize) -> usize {
    let mut candidate = if n % 2 == 0 { n.saturating_add(1) } else { n };

    while !is_prime(candidate) {
        candidate = candidate.saturating_add(2);
    }

    candidate
}

/// Determines whether `n` is prime by trial division with odd factors up to `√n`.
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn is_prime(n: usize) -> bool {
    if n == 2 || n == 3 {
        return true;
    }
    if n < 2 || n % 2 == 0 {
        return false;
    }

    let mut factor: usize = 3;
    // `factor <= n / factor` is `factor² <= n` without the overflow
    while factor <= n / factor {
        if n % factor == 0 {
            return false;
        }
        factor += 2;
    }

    true
}
