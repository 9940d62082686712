use itertools::Itertools;

use crate::lit::Lit;

use super::{LitValue, Solver};

impl<S> SolverExt for S where S: Solver {}

pub trait SolverExt: Solver {
    fn new_var_vec(&mut self, len: usize) -> Vec<Lit> {
        (0..len).map(|_| self.new_var()).collect()
    }

    /// Values of the given literals, valid right after a satisfiable `solve`.
    fn values<I>(&self, lits: I) -> Vec<LitValue>
    where
        I: IntoIterator,
        I::Item: Into<Lit>,
    {
        lits.into_iter().map(|x| self.value(x)).collect_vec()
    }

    /// Number of literals that are true in the current model.
    fn count_true<I>(&self, lits: I) -> usize
    where
        I: IntoIterator,
        I::Item: Into<Lit>,
    {
        lits.into_iter().map_into::<Lit>().filter(|&x| self.value(x).bool()).count()
    }
}
