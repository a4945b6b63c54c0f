// wallet-core/src/chains/spark/mod.rs

//! Spark Layer-2 addresses
//!
//! A Spark address is bound to the wallet's taproot output key, so it
//! changes if and only if the taproot address changes.

pub mod address;

pub use address::SparkAddress;
