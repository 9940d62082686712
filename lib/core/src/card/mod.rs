pub use bounds::{AssumedBounds, DeclaredBounds};
pub use cardinality::Cardinality;
pub use totalizer::{MergeStrategy, Totalizer, TotalizerOptions};

use crate::error::Result;
use crate::lit::Lit;
use crate::solver::Solver;

pub mod bounds;
mod cardinality;
pub mod comparator;
pub mod totalizer;

impl<S> DeclareCardinality for S where S: Solver {}

pub trait DeclareCardinality: Solver {
    fn declare_totalizer<I>(&mut self, input_vars: I) -> Result<Totalizer>
    where
        I: IntoIterator,
        I::Item: Into<Lit>,
    {
        Totalizer::declare(self, input_vars)
    }

    fn declare_cardinality<I>(&mut self, literals: I) -> Result<Cardinality>
    where
        I: IntoIterator,
        I::Item: Into<Lit>,
    {
        Cardinality::declare(self, literals)
    }

    fn declare_cardinality_with<I>(&mut self, literals: I, options: &TotalizerOptions) -> Result<Cardinality>
    where
        I: IntoIterator,
        I::Item: Into<Lit>,
    {
        Cardinality::declare_with(self, literals, options)
    }
}
