#[path = "wrap_batsat.rs"]
pub mod batsat;
