//! Client for the asynchronous image-generation API.
//!
//! A blend is a two-step exchange: [`GenerationApi::submit`] hands the API
//! two reference photos and gets back a job id, then
//! [`GenerationApi::await_result`] polls that job until it reaches a
//! terminal state or the polling budget runs out.

pub mod api;
pub mod config;
pub mod poll;
pub mod types;

pub use api::{GenerationApi, GenerationError};
pub use config::{GenerationConfig, PollConfig};
