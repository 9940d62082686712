use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use crate::assumptions::ProviderId;
use crate::error::{InvalidBoundSnafu, Result};
use crate::lit::Lit;
use crate::solver::Solver;

use super::bounds::{assumptions_at_least, assumptions_at_most, AssumedBounds, DeclaredBounds};
use super::comparator::{declare_comparator_greater_than_or_equal, declare_comparator_less_than};
use super::totalizer::{Totalizer, TotalizerOptions, DEFAULT_OPTIONS};

/// Cardinality constraint over a fixed set of literals.
///
/// Bounds can be *declared* (permanent clauses, monotonically tightening) or
/// *assumed* (passed to the solver as assumptions on every subsequent `solve()`,
/// freely changeable). The constraint registers itself with the solver's
/// assumptions observable on construction.
#[derive(Debug)]
pub struct Cardinality {
    totalizer: Totalizer,
    declared: DeclaredBounds,
    assumed: Rc<RefCell<AssumedBounds>>,
    provider: ProviderId,
}

impl Cardinality {
    pub fn declare<S, I>(solver: &mut S, literals: I) -> Result<Self>
    where
        S: Solver,
        I: IntoIterator,
        I::Item: Into<Lit>,
    {
        Self::declare_with(solver, literals, &DEFAULT_OPTIONS)
    }

    pub fn declare_with<S, I>(solver: &mut S, literals: I, options: &TotalizerOptions) -> Result<Self>
    where
        S: Solver,
        I: IntoIterator,
        I::Item: Into<Lit>,
    {
        let totalizer = Totalizer::declare_with(solver, literals, options)?;
        let assumed = Rc::new(RefCell::new(AssumedBounds::default()));
        let shared = Rc::clone(&assumed);
        let provider = solver
            .assumptions_observable_mut()
            .register(move || shared.borrow().assumptions());
        Ok(Self {
            totalizer,
            declared: DeclaredBounds::default(),
            assumed,
            provider,
        })
    }

    pub fn totalizer(&self) -> &Totalizer {
        &self.totalizer
    }

    /// Number of constrained literals.
    pub fn size(&self) -> usize {
        self.totalizer.size()
    }

    /// Declared strict upper bound (`count < k`), if any.
    pub fn declared_upper_bound(&self) -> Option<usize> {
        self.declared.upper()
    }

    /// Declared lower bound (`count >= k`), if any.
    pub fn declared_lower_bound(&self) -> Option<usize> {
        self.declared.lower()
    }

    pub fn declared_bounds(&self) -> DeclaredBounds {
        self.declared
    }

    pub fn provider(&self) -> ProviderId {
        self.provider
    }

    pub fn is_registered<S>(&self, solver: &S) -> bool
    where
        S: Solver,
    {
        solver.assumptions_observable().contains(self.provider)
    }

    /// Detach from the solver's assumptions. Declared clauses stay in the solver.
    pub fn unregister<S>(&self, solver: &mut S) -> Result<()>
    where
        S: Solver,
    {
        solver.assumptions_observable_mut().unregister(self.provider)
    }

    /// Current contribution to the solver assumptions.
    pub fn assumptions(&self) -> Vec<Lit> {
        self.assumed.borrow().assumptions()
    }

    // ================
    // declared bounds
    // ================

    /// Permanently declare `count < new_ub`. `None` does nothing.
    pub fn declare_upper_bound_less_than<S>(&mut self, solver: &mut S, new_ub: Option<usize>) -> Result<()>
    where
        S: Solver,
    {
        let Some(new_ub) = new_ub else {
            return Ok(());
        };
        let next = self.declared.tighten_upper(new_ub, self.size())?;
        let emitted = declare_comparator_less_than(solver, self.totalizer.output_vars(), new_ub, self.declared.upper());
        debug!("Declared UB < {} ({} new clauses)", new_ub, emitted);
        self.declared = next;
        Ok(())
    }

    pub fn declare_upper_bound_less_than_or_equal<S>(&mut self, solver: &mut S, new_ub: Option<usize>) -> Result<()>
    where
        S: Solver,
    {
        self.declare_upper_bound_less_than(solver, new_ub.map(|x| x.saturating_add(1)))
    }

    pub fn declare_lower_bound_greater_than<S>(&mut self, solver: &mut S, new_lb: Option<usize>) -> Result<()>
    where
        S: Solver,
    {
        self.declare_lower_bound_greater_than_or_equal(solver, new_lb.map(|x| x.saturating_add(1)))
    }

    /// Permanently declare `count >= new_lb`. `None` does nothing.
    pub fn declare_lower_bound_greater_than_or_equal<S>(
        &mut self,
        solver: &mut S,
        new_lb: Option<usize>,
    ) -> Result<()>
    where
        S: Solver,
    {
        let Some(new_lb) = new_lb else {
            return Ok(());
        };
        let next = self.declared.tighten_lower(new_lb, self.size())?;
        let emitted = declare_comparator_greater_than_or_equal(
            solver,
            self.totalizer.output_vars(),
            new_lb,
            self.declared.lower(),
        );
        debug!("Declared LB >= {} ({} new clauses)", new_lb, emitted);
        self.declared = next;
        Ok(())
    }

    // ===============
    // assumed bounds
    // ===============

    /// Assume `count <= new_ub` for subsequent solves. `None` drops the assumption.
    pub fn assume_upper_bound_less_than_or_equal(&mut self, new_ub: Option<usize>) -> Result<()> {
        let lits = match new_ub {
            None => {
                debug!("De-assuming the upper bound");
                Vec::new()
            }
            Some(k) => assumptions_at_most(self.totalizer.output_vars(), k)?,
        };
        self.assumed.borrow_mut().set_upper(lits);
        Ok(())
    }

    pub fn assume_upper_bound_less_than(&mut self, new_ub: Option<usize>) -> Result<()> {
        let new_ub = match new_ub {
            Some(0) => {
                return InvalidBoundSnafu {
                    what: "upper",
                    bound: 0_usize,
                    reason: "count < 0 cannot be assumed",
                }
                .fail()
            }
            other => other.map(|x| x - 1),
        };
        self.assume_upper_bound_less_than_or_equal(new_ub)
    }

    /// Assume `count >= new_lb` for subsequent solves. `None` drops the assumption.
    pub fn assume_lower_bound_greater_than_or_equal(&mut self, new_lb: Option<usize>) -> Result<()> {
        let lits = match new_lb {
            None => {
                debug!("De-assuming the lower bound");
                Vec::new()
            }
            Some(k) => assumptions_at_least(self.totalizer.output_vars(), k)?,
        };
        self.assumed.borrow_mut().set_lower(lits);
        Ok(())
    }

    pub fn assume_lower_bound_greater_than(&mut self, new_lb: Option<usize>) -> Result<()> {
        self.assume_lower_bound_greater_than_or_equal(new_lb.map(|x| x.saturating_add(1)))
    }
}
