//! Shared test utilities for liita integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file.

#![allow(dead_code)]

pub mod assertions;
pub mod builders;
pub mod fake_endpoint;
pub mod fixtures;
pub mod logs;

pub use builders::*;
pub use fake_endpoint::FakeEndpoint;
pub use fixtures::*;
pub use logs::CapturedLogs;
