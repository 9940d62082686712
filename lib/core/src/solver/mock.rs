use std::borrow::Cow;
use std::fmt::{Display, Formatter};

use itertools::Itertools;

use crate::assumptions::AssumptionsObservable;
use crate::lit::Lit;

use super::types::*;
use super::Solver;

/// Solver that only records what it is given.
///
/// Clauses and comments are kept in emission order, and every `solve` call
/// remembers the assumptions it was invoked with. No search is performed.
#[derive(Debug, Default)]
pub struct MockSolver {
    nvars: usize,
    clauses: Vec<Vec<Lit>>,
    comments: Vec<(usize, String)>,
    assumptions_observable: AssumptionsObservable,
    solve_calls: Vec<Vec<Lit>>,
}

impl MockSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clauses(&self) -> &[Vec<Lit>] {
        &self.clauses
    }

    /// Comments, each paired with the number of clauses emitted before it.
    pub fn comments(&self) -> &[(usize, String)] {
        &self.comments
    }

    /// Assumptions passed to every `solve` call so far.
    pub fn solve_calls(&self) -> &[Vec<Lit>] {
        &self.solve_calls
    }

    pub fn to_dimacs(&self) -> String {
        let mut out = format!("p cnf {} {}\n", self.nvars, self.clauses.len());
        let mut comments = self.comments.iter().peekable();
        for (i, clause) in self.clauses.iter().enumerate() {
            while let Some((_, c)) = comments.next_if(|(pos, _)| *pos == i) {
                out.push_str(&format!("c {}\n", c));
            }
            out.push_str(&format!("{} 0\n", clause.iter().join(" ")));
        }
        for (_, c) in comments {
            out.push_str(&format!("c {}\n", c));
        }
        out
    }
}

impl Display for MockSolver {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", tynm::type_name::<Self>(), self.signature())
    }
}

impl Solver for MockSolver {
    fn signature(&self) -> Cow<str> {
        "mock".into()
    }

    fn reset(&mut self) {
        self.nvars = 0;
        self.clauses.clear();
        self.comments.clear();
        self.solve_calls.clear();
        // Keeps the id counter, so handles from before the reset stay invalid.
        self.assumptions_observable.clear();
    }

    fn num_vars(&self) -> usize {
        self.nvars
    }
    fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    fn new_var(&mut self) -> Lit {
        self.nvars += 1;
        Lit::new(self.nvars as i32)
    }

    fn add_clause<I>(&mut self, lits: I)
    where
        I: IntoIterator,
        I::Item: Into<Lit>,
    {
        let lits = lits.into_iter().map_into::<Lit>().collect_vec();
        self.clauses.push(lits);
    }

    fn comment(&mut self, comment: &str) {
        self.comments.push((self.clauses.len(), comment.to_string()));
    }

    fn assumptions_observable(&self) -> &AssumptionsObservable {
        &self.assumptions_observable
    }
    fn assumptions_observable_mut(&mut self) -> &mut AssumptionsObservable {
        &mut self.assumptions_observable
    }

    fn solve_under(&mut self, assumptions: &[Lit]) -> SolveResponse {
        self.solve_calls.push(assumptions.to_vec());
        SolveResponse::Unknown
    }

    fn value<L>(&self, _lit: L) -> LitValue
    where
        L: Into<Lit>,
    {
        LitValue::DontCare
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_solver() -> color_eyre::Result<()> {
        let mut solver = MockSolver::new();
        assert_eq!(solver.signature(), "mock");

        let a = solver.new_var();
        let b = solver.new_var();
        let c = solver.new_var();
        let d = solver.new_var();
        assert_eq!(solver.num_vars(), 4);

        solver.add_clause([a, b]);
        solver.add_clause(&[c, d]);
        solver.add_clause(vec![-a, -b]);
        solver.add_clause(&vec![-c, -d]);
        solver.add_unit(a);
        solver.add_unit(-c);
        assert_eq!(solver.num_clauses(), 6);
        assert_eq!(solver.clauses()[2], vec![-a, -b]);

        Ok(())
    }

    #[test]
    fn test_mock_records_solve_assumptions() {
        let mut solver = MockSolver::new();
        let x = solver.new_var();
        solver.assumptions_observable_mut().register(move || vec![-x]);

        assert_eq!(solver.solve(), SolveResponse::Unknown);
        assert_eq!(solver.solve_under(&[x]), SolveResponse::Unknown);
        assert_eq!(solver.solve_calls(), &[vec![-x], vec![x]]);
    }

    #[test]
    fn test_mock_dimacs() {
        let mut solver = MockSolver::new();
        solver.comment("header");
        solver.add_clause([1, -2]);
        solver.comment("tail");
        solver.add_unit(2);
        solver.comment("end");
        solver.nvars = 2;
        assert_eq!(solver.to_dimacs(), "p cnf 2 2\nc header\n1 -2 0\nc tail\n2 0\nc end\n");
    }

    #[test]
    fn test_mock_reset() {
        let mut solver = MockSolver::new();
        solver.new_var();
        solver.add_unit(1);
        solver.assumptions_observable_mut().register(Vec::<Lit>::new);
        solver.reset();
        assert_eq!(solver.num_vars(), 0);
        assert_eq!(solver.num_clauses(), 0);
        assert!(solver.assumptions_observable().is_empty());
    }

    #[test]
    fn test_mock_reset_does_not_reuse_provider_ids() {
        let mut solver = MockSolver::new();
        let stale = solver.assumptions_observable_mut().register(Vec::<Lit>::new);
        solver.reset();
        let fresh = solver.assumptions_observable_mut().register(Vec::<Lit>::new);
        assert_ne!(stale, fresh);
        assert!(solver.assumptions_observable_mut().unregister(stale).is_err());
        assert!(solver.assumptions_observable().contains(fresh));
    }
}
