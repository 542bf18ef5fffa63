//! WhatDoTheyKnow API client: endpoints, throttling, response models.

mod endpoints;
pub(crate) mod fetch;

pub use endpoints::{body_url, directory_url};
pub use fetch::{DetailInfo, FetchConfig, FetchError, Fetcher, DEFAULT_BASE_URL, DEFAULT_DELAY};
