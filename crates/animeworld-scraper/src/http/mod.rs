//! HTTP fetching layer.
//!
//! This module provides the page fetcher used by the scraper: a reqwest
//! client with a fixed browser-like header profile and an optional
//! randomized pre-request delay.

pub mod client;
pub mod delay;

pub use client::{HttpFetcher, PageFetcher};
pub use delay::RequestDelay;
