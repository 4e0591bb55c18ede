//! Application layer: the bootstrap use cases

pub mod use_cases;
