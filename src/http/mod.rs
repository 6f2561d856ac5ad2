//! HTTP transport layer.
//!
//! Provides the built-in API routes mounted under the `/api` namespace.

pub mod handlers;
