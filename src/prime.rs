//! Prime table sizing shared by both map variants

/// Returns the first prime reached by stepping through odd numbers from `capacity`.
///
/// An even `capacity` is bumped to the next odd number before any primality check,
/// so `2` is never returned and `next_prime(4)` starts its search at `5`.
#[must_use]
pub fn next_prime(capacity: usize) -> usize {
    let mut candidate = if capacity % 2 == 0 { capacity.saturating_add(1) } else { capacity };

    while !is_prime(candidate) {
        candidate = candidate.saturating_add(2);
    }

    candidate
}

/// Checks primality by trial division over odd factors up to the square root
#[must_use]
pub fn is_prime(capacity: usize) -> bool {
    if capacity == 2 || capacity == 3 {
        return true;
    }
    if capacity == 1 || capacity % 2 == 0 {
        return false;
    }

    let mut factor: usize = 3;
    while factor.saturating_mul(factor) <= capacity {
        if capacity % factor == 0 {
            return false;
        }
        factor = factor.saturating_add(2);
    }

    true
}
