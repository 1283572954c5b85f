//! protoc plugin generating XState scaffolding from proto services.
//!
//! Two entry points share one pipeline:
//! - [`handshake`]: protoc plugin mode, request on stdin, response on stdout
//! - [`offline`]: generation from a `FileDescriptorSet` on disk

#![forbid(unsafe_code)]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

pub mod error;
pub mod handshake;
pub mod logging;
pub mod offline;

pub use error::PluginError;
