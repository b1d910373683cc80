//! Integration tests module
//!
//! End-to-end runs of the classification pipeline against a wiremock Steam
//! API, covering:
//! - Complete partition → analyze → category files flow
//! - Failure isolation between accounts and workers
//! - Output integrity under concurrent writers

pub mod fixtures;
pub mod pipeline_test;
