//! PageStack for the browser
//!
//! Implements the platform capability on top of the real document and
//! `window.history`. Only the history record decoding is target independent.

mod state;

#[cfg(target_arch = "wasm32")]
mod web;

pub use state::decode_history_state;

#[cfg(target_arch = "wasm32")]
pub use web::{install_web, WebPlatform};
