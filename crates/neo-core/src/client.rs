use crate::config::UpstreamConfig;
use crate::dates::DateRange;
use crate::error::{NeoError, Result};
use crate::types::{
    Dataset, Datasets, DiameterEstimate, Endpoint, MissDistanceSample, VelocitySample,
};
use reqwest::{StatusCode, Url};

/// Read-only client for the upstream statistics service.
#[derive(Debug, Clone)]
pub struct NeoClient {
    http: reqwest::Client,
    base_url: Url,
}

impl NeoClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let base_url = parse_base_url(&config.base_url)?;
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(NeoError::HttpClient)?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base_url}{endpoint}?start_date=..&end_date=..`
    pub fn endpoint_url(&self, endpoint: Endpoint, range: &DateRange) -> Result<Url> {
        let mut url =
            self.base_url
                .join(endpoint.as_str())
                .map_err(|e| NeoError::InvalidBaseUrl {
                    url: self.base_url.to_string(),
                    reason: e.to_string(),
                })?;
        url.query_pairs_mut()
            .append_pair("start_date", &range.start_param())
            .append_pair("end_date", &range.end_param());
        Ok(url)
    }

    /// Fetch one endpoint.
    ///
    /// A non-200 status degrades to the dataset's empty value. Transport and
    /// decode failures are returned as errors.
    pub async fn fetch<D: Dataset>(&self, endpoint: Endpoint, range: &DateRange) -> Result<D> {
        let url = self.endpoint_url(endpoint, range)?;
        tracing::debug!(%endpoint, %url, "fetching upstream dataset");

        let transport = |source: reqwest::Error| NeoError::Transport {
            endpoint: endpoint.to_string(),
            source,
        };
        let response = self.http.get(url).send().await.map_err(transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!(
                %endpoint,
                status = status.as_u16(),
                "error fetching data from upstream; drawing an empty panel"
            );
            return Ok(D::empty());
        }

        let body = response.bytes().await.map_err(transport)?;
        serde_json::from_slice(&body).map_err(|source| NeoError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }

    /// Fetch all three datasets concurrently.
    pub async fn fetch_all(&self, range: &DateRange) -> Result<Datasets> {
        let (miss_distances, velocities, diameter) = tokio::try_join!(
            self.fetch::<Vec<MissDistanceSample>>(Endpoint::MissDistance, range),
            self.fetch::<Vec<VelocitySample>>(Endpoint::RelativeVelocity, range),
            self.fetch::<Option<DiameterEstimate>>(Endpoint::MaxMinDiameter, range),
        )?;
        Ok(Datasets {
            miss_distances,
            velocities,
            diameter,
        })
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let invalid = |reason: String| NeoError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };
    let mut normalized = raw.trim().to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    let url = Url::parse(&normalized).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme '{other}'"))),
    }
}
