//! WhatDoTheyKnow client with a fixed pre-request delay. No retries.

use crate::wdtk::endpoints::{body_url, directory_url};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://www.whatdotheyknow.com";
pub const DEFAULT_DELAY: Duration = Duration::from_secs(2);

#[derive(Clone, Debug)]
pub struct FetchConfig {
    pub base_url: String,
    /// Slept before every body request, including the first.
    pub delay: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            delay: DEFAULT_DELAY,
        }
    }
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request: {0}")]
    Request(#[from] reqwest::Error),
    #[error("base url: {0}")]
    BaseUrl(#[from] url::ParseError),
    #[error("base url cannot take path segments: {0}")]
    NotABase(String),
    #[error("api error: {url} status {status} body {body}")]
    Api {
        url: String,
        status: u16,
        body: String,
    },
    #[error("parse {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// The `info` object of a body's JSON record: aggregate request statistics.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct DetailInfo(Map<String, Value>);

impl DetailInfo {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for DetailInfo {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Only `info` is read; everything else in the record is ignored.
#[derive(Deserialize)]
struct BodyRecord {
    info: DetailInfo,
}

/// Sequential WDTK client.
pub struct Fetcher {
    config: FetchConfig,
    base: Url,
    client: reqwest::Client,
    request_count: AtomicU64,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let base = Url::parse(&config.base_url)?;
        if base.cannot_be_a_base() {
            return Err(FetchError::NotABase(config.base_url));
        }
        let client = reqwest::Client::builder().use_rustls_tls().build()?;
        Ok(Self {
            config,
            base,
            client,
            request_count: AtomicU64::new(0),
        })
    }

    async fn pause(&self) {
        if !self.config.delay.is_zero() {
            debug!(delay_ms = self.config.delay.as_millis() as u64, "sleeping");
            tokio::time::sleep(self.config.delay).await;
        }
    }

    async fn get_text(&self, url: Url) -> Result<String, FetchError> {
        debug!(%url, "GET");
        let resp = self.client.get(url.clone()).send().await?;
        self.request_count.fetch_add(1, Ordering::Relaxed);
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(FetchError::Api {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    /// Fetch the raw directory CSV of every FOI-subject body.
    pub async fn directory_csv(&self) -> Result<String, FetchError> {
        let body = self.get_text(directory_url(&self.base)).await?;
        info!(bytes = body.len(), "fetched directory");
        Ok(body)
    }

    /// Sleep the configured delay, then fetch `{base}/body/{code}.json` and
    /// return its `info` object.
    pub async fn body_info(&self, code: &str) -> Result<DetailInfo, FetchError> {
        self.pause().await;
        let url = body_url(&self.base, code);
        let body = self.get_text(url.clone()).await?;
        let record: BodyRecord = serde_json::from_str(&body).map_err(|e| FetchError::Parse {
            url: url.to_string(),
            source: e,
        })?;
        info!(code, fields = record.info.len(), "fetched body info");
        Ok(record.info)
    }

    pub fn request_count(&self) -> u64 {
        self.request_count.load(Ordering::Relaxed)
    }
}
