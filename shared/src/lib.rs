// Domain models shared between the engine and any presentation layer.

pub mod columns;
pub mod filter;
pub mod models;
