//! Utility functions shared across adapters.

pub mod validation;
