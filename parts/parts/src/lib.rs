//! Part numbers, manufacturer ids and the rules for issuing and validating them.
//!
//! Storage is abstracted by [`repository::PartsRepository`], front ends drive [`workflow::NewPartWorkflow`] and the
//! functions in [`operations`].

pub mod error;
pub mod manufacturer;
pub mod operations;
pub mod part;
pub mod part_number;
pub mod repository;
pub mod validation;
pub mod workflow;

#[cfg(any(test, feature = "testing"))]
pub mod memory;
