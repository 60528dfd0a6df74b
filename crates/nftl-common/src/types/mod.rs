//! Core data types for the lending registry

pub mod loan;
