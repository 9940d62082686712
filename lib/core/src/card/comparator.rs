//! Threshold clauses over a totalizer output.
//!
//! Both comparators are incremental: given the previously declared bound they only
//! emit the clauses that are not yet in the solver.
//!
//! Bounds are validated by the caller (see [`DeclaredBounds`](super::DeclaredBounds));
//! here they are only debug-asserted.

use crate::lit::Lit;
use crate::solver::Solver;

/// Declare `count < upper_bound`, where `count` is the number of true inputs
/// of the given totalizer output.
///
/// `declared` is the strict upper bound already declared on this totalizer, if any.
/// Requires `upper_bound <= totalizer.len()` and no softening of `declared`.
/// Returns the number of emitted clauses.
pub fn declare_comparator_less_than<S>(
    solver: &mut S,
    totalizer: &[Lit],
    upper_bound: usize,
    declared: Option<usize>,
) -> usize
where
    S: Solver,
{
    let n = totalizer.len();
    debug_assert!(upper_bound <= n, "upper bound {} exceeds {} literals", upper_bound, n);
    debug_assert!(
        declared.map_or(true, |cur| upper_bound <= cur),
        "cannot soften upper bound (declared < {:?})",
        declared
    );

    // Outputs at `end` and above are already negated.
    let end = declared.unwrap_or(n + 1);
    if upper_bound == end {
        return 0;
    }

    solver.comment(&format!("Comparator(<{} up to {})", upper_bound, end - 1));
    for i in (upper_bound..end).rev() {
        if i == 0 {
            // `count < 0` is unsatisfiable
            solver.add_clause(Vec::<Lit>::new());
        } else {
            // Note: `totalizer` is 0-based, but all params are naturally 1-based
            solver.add_unit(-totalizer[i - 1]);
        }
    }
    end - upper_bound
}

/// Declare `count >= lower_bound`.
///
/// `declared` is the lower bound already declared on this totalizer, if any.
/// Requires `1 <= lower_bound <= totalizer.len()` and no softening of `declared`.
/// Returns the number of emitted clauses.
pub fn declare_comparator_greater_than_or_equal<S>(
    solver: &mut S,
    totalizer: &[Lit],
    lower_bound: usize,
    declared: Option<usize>,
) -> usize
where
    S: Solver,
{
    let n = totalizer.len();
    debug_assert!(lower_bound >= 1 && lower_bound <= n, "lower bound {} not in 1..={}", lower_bound, n);
    debug_assert!(
        declared.map_or(true, |cur| lower_bound >= cur),
        "cannot soften lower bound (declared >= {:?})",
        declared
    );

    let start = declared.map_or(1, |cur| cur + 1);
    if start > lower_bound {
        return 0;
    }

    solver.comment(&format!("Comparator(>={} from {})", lower_bound, start));
    for i in start..=lower_bound {
        // Note: `totalizer` is 0-based, but all params are naturally 1-based
        solver.add_unit(totalizer[i - 1]);
    }
    lower_bound + 1 - start
}
