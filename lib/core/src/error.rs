use snafu::Snafu;

use crate::assumptions::ProviderId;

pub type Result<T, E = CardError> = std::result::Result<T, E>;

#[derive(Debug, Snafu, Clone, Eq, PartialEq)]
#[snafu(visibility(pub(crate)))]
pub enum CardError {
    #[snafu(display("Cannot build a totalizer over zero literals"))]
    EmptyInput,

    #[snafu(display("Literal #{} is zero, which does not name a variable", position))]
    ZeroLiteral { position: usize },

    #[snafu(display("Invalid {} bound {}: {}", what, bound, reason))]
    InvalidBound {
        what: &'static str,
        bound: usize,
        reason: String,
    },

    #[snafu(display("Assumptions provider {} is not registered", id))]
    UnregisteredProvider { id: ProviderId },
}
