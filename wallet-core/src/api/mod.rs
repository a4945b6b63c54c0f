// wallet-core/src/api/mod.rs
#[allow(clippy::module_inception)]
mod api;

pub use api::*;
