//! # dropshare-storage
//!
//! Filesystem-backed implementation of the [`FileStore`] trait from
//! `dropshare-core`.
//!
//! [`FileStore`]: dropshare_core::traits::storage::FileStore

pub mod local;

pub use local::LocalFileStore;
