//! # dropshare-service
//!
//! Business logic for Dropshare: the share link manager and the file
//! service orchestrating the storage backend.

pub mod file;
pub mod share;
