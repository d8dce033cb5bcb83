//! # pivot-api - Methodology Engine Client
//!
//! Talks to the methodology engine's JSON REST API. Everything the console
//! knows about assets, playbooks and generated commands comes through here.
//!
//! Depends on [`pivot_core`] for wire models and error handling.
//!
//! ## Public API
//!
//! - [`EngineApi`] / [`LocalEngineApi`] - Async operation seam (Send / non-Send variants)
//! - [`HttpEngineApi`] - reqwest implementation
//! - [`check_asset()`], [`check_relationship()`] - Client-side validation run before any request
//!
//! With the `test-helpers` feature, `test_utils` provides an in-memory
//! `FakeEngineApi` that records requests.

pub mod client;
pub mod engine_api;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

pub use client::{HttpEngineApi, DEFAULT_TIMEOUT};
pub use engine_api::{check_asset, check_relationship, EngineApi, LocalEngineApi};
