// wallet-core/src/chains/mod.rs
pub mod bitcoin;
pub mod spark;
