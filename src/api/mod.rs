pub mod client;
pub mod auth;

pub use client::*;
