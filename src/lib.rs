//! Image analysis relay
//!
//! Accepts an image from the browser, asks the DashScope `qwen-vl-plus`
//! vision-language model to describe it, and relays the text back. The same
//! server hosts the pre-built single-page application.

pub mod app_state;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
