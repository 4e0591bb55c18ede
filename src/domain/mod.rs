//! Core domain model: repository descriptors, run options, results and the processed set

pub mod entities;
pub mod value_objects;
