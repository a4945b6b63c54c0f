// wallet-core/src/network/mod.rs
//
// Network Module - mainnet/testnet parameters shared by every encoder

pub mod models;

pub use models::Network;
