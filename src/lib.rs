pub use card_nexus_core as core;
pub use card_nexus_wrappers as wrappers;
