use itertools::Itertools;

use crate::lit::Lit;
use crate::solver::Solver;

impl<S> Ops for S where S: Solver {}

pub trait Ops: Solver {
    /// `lhs => rhs`
    fn imply(&mut self, lhs: Lit, rhs: Lit) {
        self.add_clause([-lhs, rhs]);
    }

    /// `lhs <=> rhs`
    fn iff(&mut self, lhs: Lit, rhs: Lit) {
        self.imply(lhs, rhs);
        self.imply(rhs, lhs);
    }

    /// `lhs => AND(rhs)`
    fn imply_and<I>(&mut self, lhs: Lit, rhs: I)
    where
        I: IntoIterator<Item = Lit>,
    {
        for x in rhs.into_iter() {
            self.imply(lhs, x);
        }
    }

    /// `lhs => OR(rhs)`
    fn imply_or<I>(&mut self, lhs: Lit, rhs: I)
    where
        I: IntoIterator<Item = Lit>,
    {
        let rhs = rhs.into_iter();
        let mut v = Vec::with_capacity(1 + rhs.size_hint().0);
        v.push(-lhs);
        v.extend(rhs);
        self.add_clause(v);
    }

    /// `OR(lits)`
    fn at_least_one(&mut self, lits: &[Lit]) {
        self.add_clause(lits);
    }

    /// Pairwise `AMO(lits)`.
    fn at_most_one(&mut self, lits: &[Lit]) {
        for (&a, &b) in lits.iter().tuple_combinations() {
            self.imply(a, -b);
        }
    }
}
