//! Figma Content Library
//!
//! This library generates multi-tone UX copy tokens and merges them into a
//! three-layer design-token file set (Language, Type and Tone layers across
//! 13 JSON files), including the naming rules, the token matrix builder, the
//! additive merge engine and the token file store.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod services;
pub mod tokens;
#[cfg(feature = "web")]
pub mod web;

pub use error::{TokenError, TokenResult};
