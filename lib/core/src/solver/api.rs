use std::borrow::Cow;

use log::{debug, trace};

use crate::assumptions::AssumptionsObservable;
use crate::lit::Lit;

use super::types::*;

// Note: `Solver` trait is NOT object-safe.
// const _: Option<&dyn Solver> = None; // doesn't compile, see `rustc --explain E0038`

pub trait Solver: Sized {
    /// Return the signature of the solver as a `Cow<str>`.
    fn signature(&self) -> Cow<str>;

    /// Reset the solver to its initial state.
    ///
    /// Implementations must zero the counters and clear the assumptions observable.
    fn reset(&mut self);

    /// Return the number of variables in the solver.
    fn num_vars(&self) -> usize;

    /// Return the number of clauses in the solver.
    fn num_clauses(&self) -> usize;

    /// Create a new variable in the solver and return its (positive) literal representation.
    fn new_var(&mut self) -> Lit;

    /// Add a clause to the solver.
    /// The clause is represented by an iterator of literals.
    fn add_clause<I>(&mut self, lits: I)
    where
        I: IntoIterator,
        I::Item: Into<Lit>;

    /// Add a unit clause to the solver.
    fn add_unit<L>(&mut self, lit: L)
    where
        L: Into<Lit>,
    {
        self.add_clause([lit.into()])
    }

    /// Attach a comment to the clause stream.
    fn comment(&mut self, comment: &str) {
        trace!("// {}", comment);
    }

    /// Registry of per-solve assumption providers.
    fn assumptions_observable(&self) -> &AssumptionsObservable;

    fn assumptions_observable_mut(&mut self) -> &mut AssumptionsObservable;

    /// Solve the problem under exactly the given assumptions.
    fn solve_under(&mut self, assumptions: &[Lit]) -> SolveResponse;

    /// Solve the problem under the assumptions collected from all registered providers.
    fn solve(&mut self) -> SolveResponse {
        let assumptions = self.assumptions_observable().collect();
        if assumptions.is_empty() {
            debug!("solve()");
        } else {
            debug!("solve(assumptions = {:?})", assumptions);
        }
        self.solve_under(&assumptions)
    }

    /// Return the value of the given literal in the solver.
    fn value<L>(&self, lit: L) -> LitValue
    where
        L: Into<Lit>;
}
