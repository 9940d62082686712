pub mod assumptions;
pub mod card;
pub mod error;
pub mod lit;
pub mod op;
pub mod solver;
