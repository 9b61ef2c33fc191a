//! HTTP transport module
//!
//! The single network collaborator behind every resource API and poll
//! function.
//!
//! # Features
//!
//! - **Automatic Retries**: 429, 5xx, request timeouts and connect errors,
//!   with exponential backoff
//! - **Single-Attempt Status Checks**: `check_json` for poll functions
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Structured Status Errors**: `NotFound` (404) and `Gone` (410) kinds

mod client;
mod rate_limit;

pub use client::{Attempts, HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use rate_limit::RateLimiterConfig;
