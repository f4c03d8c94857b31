//! Vidforge - Topic-to-published-video pipeline
//!
//! This library crate exposes the core functionality for integration testing.

pub mod composer;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod publisher;
pub mod server;
pub mod services;
pub mod synthesizer;
pub mod tracker;
