//! Remote studio service access: wire types, trait seams, reqwest client.

pub mod api;
pub mod client;
pub mod types;
