//! Bound state of a cardinality constraint.
//!
//! These records only validate and compute; the solver side effects are done by
//! [`Cardinality`](super::Cardinality).

use itertools::Itertools;
use snafu::ensure;

use crate::error::{InvalidBoundSnafu, Result};
use crate::lit::Lit;

/// Permanently declared bounds. Both only ever tighten.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct DeclaredBounds {
    /// Strict upper bound: `count < upper`.
    upper: Option<usize>,
    /// Lower bound: `count >= lower`.
    lower: Option<usize>,
}

impl DeclaredBounds {
    pub fn upper(&self) -> Option<usize> {
        self.upper
    }

    pub fn lower(&self) -> Option<usize> {
        self.lower
    }

    /// State after declaring `count < new_ub` over `size` literals.
    pub fn tighten_upper(self, new_ub: usize, size: usize) -> Result<Self> {
        if let Some(cur) = self.upper {
            ensure!(
                new_ub <= cur,
                InvalidBoundSnafu {
                    what: "upper",
                    bound: new_ub,
                    reason: format!("cannot soften upper bound (declared < {})", cur),
                }
            );
        }
        ensure!(
            new_ub <= size,
            InvalidBoundSnafu {
                what: "upper",
                bound: new_ub,
                reason: format!("must not exceed the number of literals ({})", size),
            }
        );
        Ok(Self {
            upper: Some(new_ub),
            ..self
        })
    }

    /// State after declaring `count >= new_lb` over `size` literals.
    pub fn tighten_lower(self, new_lb: usize, size: usize) -> Result<Self> {
        if let Some(cur) = self.lower {
            ensure!(
                new_lb >= cur,
                InvalidBoundSnafu {
                    what: "lower",
                    bound: new_lb,
                    reason: format!("cannot soften lower bound (declared >= {})", cur),
                }
            );
        }
        ensure!(
            new_lb >= 1 && new_lb <= size,
            InvalidBoundSnafu {
                what: "lower",
                bound: new_lb,
                reason: format!("must be in range 1..={}", size),
            }
        );
        Ok(Self {
            lower: Some(new_lb),
            ..self
        })
    }
}

/// Per-solve assumptions. Each side is replaced wholesale on every update.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct AssumedBounds {
    upper: Vec<Lit>,
    lower: Vec<Lit>,
}

impl AssumedBounds {
    pub fn upper(&self) -> &[Lit] {
        &self.upper
    }

    pub fn lower(&self) -> &[Lit] {
        &self.lower
    }

    pub fn set_upper(&mut self, lits: Vec<Lit>) {
        self.upper = lits;
    }

    pub fn set_lower(&mut self, lits: Vec<Lit>) {
        self.lower = lits;
    }

    /// Current contribution to the solver assumptions: upper first, then lower.
    pub fn assumptions(&self) -> Vec<Lit> {
        self.upper.iter().chain(self.lower.iter()).copied().collect_vec()
    }
}

/// Assumptions for `count <= k`: every "at least `i`" with `i > k` is negated.
pub fn assumptions_at_most(totalizer: &[Lit], k: usize) -> Result<Vec<Lit>> {
    let n = totalizer.len();
    ensure!(
        k <= n,
        InvalidBoundSnafu {
            what: "upper",
            bound: k,
            reason: format!("is too large (size = {})", n),
        }
    );
    Ok(totalizer[k..].iter().map(|&x| -x).collect_vec())
}

/// Assumptions for `count >= k`: every "at least `i`" with `i <= k` holds.
pub fn assumptions_at_least(totalizer: &[Lit], k: usize) -> Result<Vec<Lit>> {
    let n = totalizer.len();
    ensure!(
        k >= 1 && k <= n,
        InvalidBoundSnafu {
            what: "lower",
            bound: k,
            reason: format!("must be in range 1..={}", n),
        }
    );
    Ok(totalizer[..k].to_vec())
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use crate::error::CardError;

    use super::*;

    fn lits(xs: &[i32]) -> Vec<Lit> {
        xs.iter().map(|&x| Lit::new(x)).collect()
    }

    #[test]
    fn test_tighten_upper_monotonic() {
        let b = DeclaredBounds::default();
        let b = b.tighten_upper(3, 5).unwrap();
        assert_eq!(b.upper(), Some(3));
        assert_eq!(b.lower(), None);

        assert!(matches!(b.tighten_upper(5, 5), Err(CardError::InvalidBound { bound: 5, .. })));
        assert_eq!(b.tighten_upper(3, 5).unwrap().upper(), Some(3));
        assert_eq!(b.tighten_upper(0, 5).unwrap().upper(), Some(0));
    }

    #[test]
    fn test_tighten_upper_range() {
        let b = DeclaredBounds::default();
        assert!(b.tighten_upper(6, 5).is_err());
        assert!(b.tighten_upper(5, 5).is_ok());
    }

    #[test]
    fn test_tighten_lower_monotonic() {
        let b = DeclaredBounds::default().tighten_lower(2, 5).unwrap();
        assert_eq!(b.lower(), Some(2));
        assert!(b.tighten_lower(1, 5).is_err());
        assert_eq!(b.tighten_lower(5, 5).unwrap().lower(), Some(5));
        assert!(b.tighten_lower(6, 5).is_err());
        assert!(DeclaredBounds::default().tighten_lower(0, 5).is_err());
    }

    #[test]
    fn test_tracks_are_independent() {
        let b = DeclaredBounds::default().tighten_upper(4, 5).unwrap().tighten_lower(1, 5).unwrap();
        assert_eq!((b.upper(), b.lower()), (Some(4), Some(1)));
    }

    #[test]
    fn test_assumptions_at_most() {
        let t = lits(&[10, 11, 12, 13]);
        assert_eq!(assumptions_at_most(&t, 1).unwrap(), lits(&[-11, -12, -13]));
        assert_eq!(assumptions_at_most(&t, 0).unwrap(), lits(&[-10, -11, -12, -13]));
        assert!(assumptions_at_most(&t, 4).unwrap().is_empty());
        assert!(assumptions_at_most(&t, 5).is_err());
    }

    #[test]
    fn test_assumptions_at_least() {
        let t = lits(&[10, 11, 12, 13]);
        assert_eq!(assumptions_at_least(&t, 2).unwrap(), lits(&[10, 11]));
        assert_eq!(assumptions_at_least(&t, 4).unwrap(), t);
        assert!(assumptions_at_least(&t, 0).is_err());
        assert!(assumptions_at_least(&t, 5).is_err());
    }

    #[test]
    fn test_assumed_bounds_replace_wholesale() {
        let mut a = AssumedBounds::default();
        a.set_lower(lits(&[1, 2]));
        a.set_upper(lits(&[-4]));
        assert_eq!(a.assumptions(), lits(&[-4, 1, 2]));
        a.set_upper(lits(&[-3, -4]));
        assert_eq!(a.upper(), lits(&[-3, -4]).as_slice());
        a.set_upper(Vec::new());
        assert_eq!(a.assumptions(), lits(&[1, 2]));
    }

    #[quickcheck]
    fn assumption_sizes(n: u8, k: u8) -> bool {
        let n = n as usize % 32 + 1;
        let k = k as usize % (n + 1);
        let t = (1..=n as i32).map(Lit::new).collect::<Vec<_>>();
        let at_most = assumptions_at_most(&t, k).unwrap();
        let at_most_ok = at_most.len() == n - k && at_most.iter().all(|x| !x.is_positive());
        let at_least_ok = match assumptions_at_least(&t, k) {
            Ok(lits) => k >= 1 && lits == t[..k],
            Err(_) => k == 0,
        };
        at_most_ok && at_least_ok
    }
}
