//! Access to the external statistics API.
//!
//! Pages talk to [`StatsApi`] rather than the concrete client so the
//! controller can be driven by a recording mock in tests.

mod dto;
pub mod lastfm;
#[cfg(test)]
pub mod mock;

use async_trait::async_trait;

use crate::models::{
    Artist, ArtistKey, ChartQuery, PageRequest, Paged, SimilarArtist, Tag, Track,
};

pub use lastfm::{LastFmClient, LastFmError};

#[async_trait]
pub trait StatsApi: Send + Sync {
    /// `artist.getInfo`
    async fn artist_info(&self, key: &ArtistKey) -> Result<Artist, LastFmError>;

    /// `artist.getTopTracks`
    async fn artist_top_tracks(
        &self,
        key: &ArtistKey,
        limit: u32,
    ) -> Result<Vec<Track>, LastFmError>;

    /// `artist.getSimilar`
    async fn artist_similar(
        &self,
        key: &ArtistKey,
        limit: u32,
    ) -> Result<Vec<SimilarArtist>, LastFmError>;

    /// `artist.search`
    async fn search_artists(&self, query: &str, limit: u32) -> Result<Vec<Artist>, LastFmError>;

    /// `chart.getTopArtists`
    async fn chart_top_artists(&self, query: ChartQuery) -> Result<Paged<Artist>, LastFmError>;

    /// `chart.getTopTracks`
    async fn chart_top_tracks(&self, query: ChartQuery) -> Result<Paged<Track>, LastFmError>;

    /// `chart.getTopTags`; tag charts are not period-scoped.
    async fn chart_top_tags(&self, page: PageRequest) -> Result<Paged<Tag>, LastFmError>;
}

#[async_trait]
impl StatsApi for LastFmClient {
    async fn artist_info(&self, key: &ArtistKey) -> Result<Artist, LastFmError> {
        self.artist_info(key).await
    }

    async fn artist_top_tracks(
        &self,
        key: &ArtistKey,
        limit: u32,
    ) -> Result<Vec<Track>, LastFmError> {
        self.artist_top_tracks(key, limit).await
    }

    async fn artist_similar(
        &self,
        key: &ArtistKey,
        limit: u32,
    ) -> Result<Vec<SimilarArtist>, LastFmError> {
        self.artist_similar(key, limit).await
    }

    async fn search_artists(&self, query: &str, limit: u32) -> Result<Vec<Artist>, LastFmError> {
        self.search_artists(query, limit).await
    }

    async fn chart_top_artists(&self, query: ChartQuery) -> Result<Paged<Artist>, LastFmError> {
        self.chart_top_artists(query).await
    }

    async fn chart_top_tracks(&self, query: ChartQuery) -> Result<Paged<Track>, LastFmError> {
        self.chart_top_tracks(query).await
    }

    async fn chart_top_tags(&self, page: PageRequest) -> Result<Paged<Tag>, LastFmError> {
        self.chart_top_tags(page).await
    }
}
