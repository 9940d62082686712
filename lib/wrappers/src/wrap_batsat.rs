use std::borrow::Cow;
use std::fmt::{Debug, Display, Formatter};

use ::batsat::intmap::AsIndex;
use ::batsat::{lbool, BasicSolver, SolverInterface};
use itertools::Itertools;
use log::trace;

use card_nexus_core::assumptions::AssumptionsObservable;
use card_nexus_core::lit::Lit;
use card_nexus_core::solver::{LitValue, SolveResponse, Solver};

/// Incremental solver backed by [BatSat](https://github.com/c-cube/batsat), a pure-Rust MiniSat port.
pub struct BatsatSolver {
    inner: BasicSolver,
    nvars: usize,
    nclauses: usize,
    assumptions_observable: AssumptionsObservable,
}

impl BatsatSolver {
    pub fn new() -> Self {
        Self::new_custom(BasicSolver::default())
    }

    pub fn new_custom(inner: BasicSolver) -> Self {
        Self {
            inner,
            nvars: 0,
            nclauses: 0,
            assumptions_observable: AssumptionsObservable::new(),
        }
    }

    // Our variables are 1-based, BatSat indices are used as-is.
    fn to_batsat(&mut self, lit: Lit) -> ::batsat::Lit {
        let var = self.inner.var_of_int(lit.var());
        ::batsat::Lit::new(var, lit.is_positive())
    }
}

impl Default for BatsatSolver {
    fn default() -> Self {
        BatsatSolver::new()
    }
}

impl From<BasicSolver> for BatsatSolver {
    fn from(inner: BasicSolver) -> Self {
        BatsatSolver::new_custom(inner)
    }
}

impl Debug for BatsatSolver {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatsatSolver")
            .field("nvars", &self.nvars)
            .field("nclauses", &self.nclauses)
            .field("assumptions_observable", &self.assumptions_observable)
            .finish()
    }
}

impl Display for BatsatSolver {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", tynm::type_name::<Self>(), self.signature())
    }
}

impl Solver for BatsatSolver {
    fn signature(&self) -> Cow<str> {
        "batsat-0.6".into()
    }

    fn reset(&mut self) {
        self.inner = BasicSolver::default();
        self.nvars = 0;
        self.nclauses = 0;
        self.assumptions_observable.clear();
    }

    fn num_vars(&self) -> usize {
        self.nvars
    }
    fn num_clauses(&self) -> usize {
        self.nclauses
    }

    fn new_var(&mut self) -> Lit {
        self.nvars += 1;
        let lit = Lit::new(self.nvars as i32);
        // Force the allocation, so that unconstrained variables still get a value.
        self.inner.var_of_int(lit.var());
        lit
    }

    fn add_clause<I>(&mut self, lits: I)
    where
        I: IntoIterator,
        I::Item: Into<Lit>,
    {
        self.nclauses += 1;
        let mut clause = lits.into_iter().map_into::<Lit>().map(|x| self.to_batsat(x)).collect_vec();
        self.inner.add_clause_reuse(&mut clause);
    }

    fn assumptions_observable(&self) -> &AssumptionsObservable {
        &self.assumptions_observable
    }
    fn assumptions_observable_mut(&mut self) -> &mut AssumptionsObservable {
        &mut self.assumptions_observable
    }

    fn solve_under(&mut self, assumptions: &[Lit]) -> SolveResponse {
        let assumptions = assumptions.iter().map(|&x| self.to_batsat(x)).collect_vec();
        let response = match self.inner.solve_limited(&assumptions) {
            x if x == lbool::TRUE => SolveResponse::Sat,
            x if x == lbool::FALSE => SolveResponse::Unsat,
            _ => SolveResponse::Unknown,
        };
        trace!("BatSat returned {} under {} assumptions", response, assumptions.len());
        response
    }

    fn value<L>(&self, lit: L) -> LitValue
    where
        L: Into<Lit>,
    {
        let lit = lit.into();
        let var = ::batsat::Var::from_index(lit.var() as usize);
        match self.inner.value_lit(::batsat::Lit::new(var, lit.is_positive())) {
            x if x == lbool::TRUE => LitValue::True,
            x if x == lbool::FALSE => LitValue::False,
            _ => LitValue::DontCare,
        }
    }
}
