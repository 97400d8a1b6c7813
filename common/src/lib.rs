//! Types and helpers shared by the Third Eye API, worker and console.

pub mod config;
pub mod protocol;
pub mod schema;
