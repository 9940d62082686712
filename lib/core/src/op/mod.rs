pub mod allsat;
pub mod ops;
