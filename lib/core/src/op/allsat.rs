use itertools::Itertools;
use log::debug;

use crate::lit::Lit;
use crate::solver::{SolveResponse, Solver};

/// Model enumeration by blocking clauses.
///
/// Each found model is banned with a permanent clause over the essential literals
/// before the next `solve()`, so assumptions registered with the solver (e.g. assumed
/// cardinality bounds) stay active for the whole enumeration.
pub trait AllSat: Solver {
    /// Enumerate models that differ on *any* variable of the solver.
    fn all_sat<T, F>(&mut self, f: F) -> Models<Self, F>
    where
        F: FnMut(&Self) -> T,
    {
        let essential = (1..=self.num_vars()).map(|v| Lit::new(v as i32)).collect_vec();
        self.all_sat_essential(essential, f)
    }

    /// Enumerate models that differ on the `essential` literals.
    fn all_sat_essential<I, T, F>(&mut self, essential: I, f: F) -> Models<Self, F>
    where
        I: IntoIterator,
        I::Item: Into<Lit>,
        F: FnMut(&Self) -> T,
    {
        Models {
            essential: essential.into_iter().map_into::<Lit>().collect(),
            solver: self,
            callback: f,
            pending_block: false,
            found: 0,
        }
    }

    /// Clause excluding the current model projected onto `essential`.
    fn blocking_clause(&self, essential: &[Lit]) -> Vec<Lit> {
        essential
            .iter()
            .map(|&x| if self.value(x).bool() { -x } else { x })
            .collect()
    }
}

impl<S> AllSat for S where S: Solver {}

pub struct Models<'s, S, F> {
    solver: &'s mut S,
    callback: F,
    essential: Vec<Lit>,
    pending_block: bool,
    found: usize,
}

impl<'s, S, F> Models<'s, S, F> {
    /// Number of models produced so far.
    pub fn found(&self) -> usize {
        self.found
    }
}

impl<'s, T, S, F> Iterator for Models<'s, S, F>
where
    S: Solver,
    F: FnMut(&S) -> T,
{
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pending_block {
            // The model is still loaded, so the clause can be built lazily.
            let clause = self.solver.blocking_clause(&self.essential);
            self.solver.add_clause(clause);
            self.pending_block = false;
        }

        let response = self.solver.solve();
        if response != SolveResponse::Sat {
            debug!("All-SAT finished with {} after {} models", response, self.found);
            return None;
        }
        self.found += 1;
        self.pending_block = true;
        Some((self.callback)(&*self.solver))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::mock::MockSolver;
    use crate::solver::SolverExt;

    #[test]
    fn test_unknown_stops_enumeration() {
        let mut solver = MockSolver::new();
        solver.new_var_vec(3);
        let mut models = solver.all_sat(|_| ());
        assert!(models.next().is_none());
        assert_eq!(models.found(), 0);
        drop(models);
        assert_eq!(solver.solve_calls().len(), 1);
        assert_eq!(solver.num_clauses(), 0);
    }
}
