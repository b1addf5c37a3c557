use anyhow::{Context, Result};
use reqwest::{Client, StatusCode, Url, header};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::AppConfig;
use crate::models::{
    Artist, ArtistKey, ChartQuery, PageRequest, Paged, SimilarArtist, Tag, Track,
};

use super::dto::{
    ApiErrorBody, ArtistInfoResponse, ChartArtistsResponse, ChartTagsResponse,
    ChartTracksResponse, SearchResponse, SimilarResponse, TopTracksResponse,
};

#[derive(Debug, Error)]
pub enum LastFmError {
    #[error("network error: {0}")]
    Network(reqwest::Error),
    #[error("unexpected status: {0}")]
    Status(StatusCode),
    #[error("api error {code}: {message}")]
    Api { code: u32, message: String },
    #[error("failed to parse response: {0}")]
    Parse(String),
    #[error("invalid request url: {0}")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for LastFmError {
    /// Request URLs carry the API key, so they are dropped before the error travels.
    fn from(err: reqwest::Error) -> Self {
        LastFmError::Network(err.without_url())
    }
}

/// Read-only Last.fm client. Every call carries the API key and `format=json`.
#[derive(Clone)]
pub struct LastFmClient {
    http: Client,
    base_url: Url,
    api_key: String,
}

impl LastFmClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            "X-Client-Id",
            header::HeaderValue::from_str(config.client_id())
                .context("invalid client identifier header value")?,
        );

        let http = Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent())
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .context("unable to construct http client")?;

        let base_url = Url::parse(config.base_url())
            .with_context(|| format!("invalid API base URL: {}", config.base_url()))?;

        Ok(Self {
            http,
            base_url,
            api_key: config.api_key().to_string(),
        })
    }

    /// Builds the request URL. Empty parameter values are left out.
    pub fn request_url(
        &self,
        method: &str,
        params: &[(&str, String)],
    ) -> Result<Url, LastFmError> {
        let fixed = [
            ("method", method),
            ("api_key", self.api_key.as_str()),
            ("format", "json"),
        ];
        let extra = params
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| (*key, value.as_str()));

        Url::parse_with_params(self.base_url.as_str(), fixed.into_iter().chain(extra))
            .map_err(|err| LastFmError::InvalidUrl(err.to_string()))
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: &[(&str, String)],
    ) -> Result<T, LastFmError> {
        let url = self.request_url(method, params)?;
        log::debug!("GET {method} {}", describe_params(params));

        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        decode_body(status, &body)
    }

    pub async fn artist_info(&self, key: &ArtistKey) -> Result<Artist, LastFmError> {
        let params = artist_params(key, None);
        let body: ArtistInfoResponse = self.call("artist.getInfo", &params).await?;
        body.into_artist()
            .ok_or_else(|| LastFmError::Parse("response has no artist".to_string()))
    }

    pub async fn artist_top_tracks(
        &self,
        key: &ArtistKey,
        limit: u32,
    ) -> Result<Vec<Track>, LastFmError> {
        let params = artist_params(key, Some(limit));
        let body: TopTracksResponse = self.call("artist.getTopTracks", &params).await?;
        Ok(body.into_tracks())
    }

    pub async fn artist_similar(
        &self,
        key: &ArtistKey,
        limit: u32,
    ) -> Result<Vec<SimilarArtist>, LastFmError> {
        let params = artist_params(key, Some(limit));
        let body: SimilarResponse = self.call("artist.getSimilar", &params).await?;
        Ok(body.into_similar())
    }

    pub async fn search_artists(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<Artist>, LastFmError> {
        let params = [
            ("artist", query.to_string()),
            ("limit", limit.to_string()),
        ];
        let body: SearchResponse = self.call("artist.search", &params).await?;
        Ok(body.into_artists())
    }

    pub async fn chart_top_artists(
        &self,
        query: ChartQuery,
    ) -> Result<Paged<Artist>, LastFmError> {
        let params = chart_params(query.page, Some(query));
        let body: ChartArtistsResponse = self.call("chart.getTopArtists", &params).await?;
        Ok(body.into_paged())
    }

    pub async fn chart_top_tracks(
        &self,
        query: ChartQuery,
    ) -> Result<Paged<Track>, LastFmError> {
        let params = chart_params(query.page, Some(query));
        let body: ChartTracksResponse = self.call("chart.getTopTracks", &params).await?;
        Ok(body.into_paged())
    }

    pub async fn chart_top_tags(&self, page: PageRequest) -> Result<Paged<Tag>, LastFmError> {
        let params = chart_params(page, None);
        let body: ChartTagsResponse = self.call("chart.getTopTags", &params).await?;
        Ok(body.into_paged())
    }
}

/// Maps an HTTP status and body into a typed payload or an error.
pub(crate) fn decode_body<T: DeserializeOwned>(
    status: StatusCode,
    body: &str,
) -> Result<T, LastFmError> {
    let value: serde_json::Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) if !status.is_success() => return Err(LastFmError::Status(status)),
        Err(err) => return Err(LastFmError::Parse(err.to_string())),
    };

    if value.get("error").is_some() {
        if let Ok(api_error) = serde_json::from_value::<ApiErrorBody>(value.clone()) {
            return Err(LastFmError::Api {
                code: api_error.error,
                message: api_error.message,
            });
        }
    }

    if !status.is_success() {
        return Err(LastFmError::Status(status));
    }

    serde_json::from_value(value).map_err(|err| LastFmError::Parse(err.to_string()))
}

/// `artist.getInfo` looks up by one key only: the mbid when known, the name otherwise.
fn artist_params(key: &ArtistKey, limit: Option<u32>) -> Vec<(&'static str, String)> {
    let mut params = Vec::with_capacity(4);
    match limit {
        None if !key.mbid.is_empty() => params.push(("mbid", key.mbid.clone())),
        None => params.push(("artist", key.name.clone())),
        Some(limit) => {
            params.push(("mbid", key.mbid.clone()));
            params.push(("artist", key.name.clone()));
            params.push(("limit", limit.to_string()));
        }
    }
    params.push(("autocorrect", "1".to_string()));
    params
}

fn chart_params(page: PageRequest, query: Option<ChartQuery>) -> Vec<(&'static str, String)> {
    let mut params = vec![("limit", page.limit.to_string())];
    if let Some(number) = page.page {
        params.push(("page", number.to_string()));
    }
    if let Some(query) = query {
        params.push(("period", query.period.as_param().to_string()));
    }
    params
}

fn describe_params(params: &[(&str, String)]) -> String {
    params
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join(" ")
}
