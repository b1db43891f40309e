//! Client-side orchestration: the only part of the app with real control
//! flow. Everything here talks to the studio service through the trait seams
//! in [`crate::studio::api`] and holds no durable state; authoritative
//! lists are always re-fetched from the server after a mutation settles.

pub mod agent;
pub mod batch;
pub mod gate;
pub mod trends;
