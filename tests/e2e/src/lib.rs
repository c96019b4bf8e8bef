//! End-to-end test support for the statseek engine
//!
//! Provides mock retrieval collaborators and catalog fixtures shared by the
//! journey tests.

pub mod mocks;
