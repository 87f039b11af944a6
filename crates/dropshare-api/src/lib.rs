//! # dropshare-api
//!
//! HTTP API layer for Dropshare: Axum router, handlers, DTOs, and the
//! mapping from domain errors to HTTP responses.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
