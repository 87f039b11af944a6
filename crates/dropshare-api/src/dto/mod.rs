//! Request/response DTOs for the HTTP API.

pub mod response;
