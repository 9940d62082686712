//! Aggregation of per-solve assumptions.
//!
//! Every live constraint registers an [`AssumptionsProvider`] with the solver's
//! [`AssumptionsObservable`]. Right before a no-argument `solve()`, the solver
//! calls [`AssumptionsObservable::collect`] and passes the concatenation, in
//! registration order, to the underlying engine.

use std::fmt::{Debug, Display, Formatter};

use log::trace;
use snafu::OptionExt;

use crate::error::{Result, UnregisteredProviderSnafu};
use crate::lit::Lit;

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct ProviderId(usize);

impl Display for ProviderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub trait AssumptionsProvider {
    fn assumptions(&self) -> Vec<Lit>;
}

impl<F> AssumptionsProvider for F
where
    F: Fn() -> Vec<Lit>,
{
    fn assumptions(&self) -> Vec<Lit> {
        self()
    }
}

#[derive(Default)]
pub struct AssumptionsObservable {
    // Insertion-ordered, so that `collect` is reproducible.
    listeners: Vec<(ProviderId, Box<dyn AssumptionsProvider>)>,
    next_id: usize,
}

impl AssumptionsObservable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn contains(&self, id: ProviderId) -> bool {
        self.listeners.iter().any(|(x, _)| *x == id)
    }

    pub fn register<P>(&mut self, provider: P) -> ProviderId
    where
        P: AssumptionsProvider + 'static,
    {
        let id = ProviderId(self.next_id);
        self.next_id += 1;
        trace!("Registering assumptions provider {}", id);
        self.listeners.push((id, Box::new(provider)));
        id
    }

    /// Remove exactly one registration.
    pub fn unregister(&mut self, id: ProviderId) -> Result<()> {
        let index = self
            .listeners
            .iter()
            .position(|(x, _)| *x == id)
            .context(UnregisteredProviderSnafu { id })?;
        trace!("Unregistering assumptions provider {}", id);
        self.listeners.remove(index);
        Ok(())
    }

    /// Drop all providers. Ids are never handed out twice, even after a clear.
    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    pub fn collect(&self) -> Vec<Lit> {
        self.listeners.iter().flat_map(|(_, p)| p.assumptions()).collect()
    }
}

impl Debug for AssumptionsObservable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssumptionsObservable")
            .field("providers", &self.listeners.iter().map(|(id, _)| id).collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::error::CardError;

    use super::*;

    fn lits(xs: &[i32]) -> Vec<Lit> {
        xs.iter().map(|&x| Lit::new(x)).collect()
    }

    #[test]
    fn test_collect_in_registration_order() {
        let mut obs = AssumptionsObservable::new();
        obs.register(|| lits(&[3, -4]));
        obs.register(|| lits(&[1]));
        obs.register(Vec::<Lit>::new);
        assert_eq!(obs.len(), 3);
        assert_eq!(obs.collect(), lits(&[3, -4, 1]));
    }

    #[test]
    fn test_collect_sees_latest_state() {
        let state = Rc::new(RefCell::new(lits(&[5])));
        let mut obs = AssumptionsObservable::new();
        let shared = Rc::clone(&state);
        obs.register(move || shared.borrow().clone());
        assert_eq!(obs.collect(), lits(&[5]));

        *state.borrow_mut() = lits(&[-5, 6]);
        assert_eq!(obs.collect(), lits(&[-5, 6]));
    }

    #[test]
    fn test_unregister_exactly_once() {
        let mut obs = AssumptionsObservable::new();
        let a = obs.register(|| lits(&[1]));
        let b = obs.register(|| lits(&[2]));
        assert!(obs.contains(a));

        obs.unregister(a).unwrap();
        assert!(!obs.contains(a));
        assert_eq!(obs.collect(), lits(&[2]));

        assert_eq!(obs.unregister(a), Err(CardError::UnregisteredProvider { id: a }));
        assert!(obs.contains(b));
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut obs = AssumptionsObservable::new();
        let a = obs.register(Vec::<Lit>::new);
        obs.unregister(a).unwrap();
        let b = obs.register(Vec::<Lit>::new);
        assert_ne!(a, b);
    }

    #[test]
    fn test_clear() {
        let mut obs = AssumptionsObservable::new();
        obs.register(|| lits(&[1]));
        obs.clear();
        assert!(obs.is_empty());
        assert!(obs.collect().is_empty());
    }
}
