//! File upload, download, deletion, and listing.

pub mod service;

pub use service::FileService;
