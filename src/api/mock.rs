//! Recording [`StatsApi`] double for controller and page tests.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{LastFmError, StatsApi};
use crate::models::{
    Artist, ArtistKey, ChartQuery, PageRequest, Paged, SimilarArtist, Tag, Track,
};

#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    ArtistInfo(ArtistKey),
    ArtistTopTracks(ArtistKey, u32),
    ArtistSimilar(ArtistKey, u32),
    Search(String, u32),
    ChartArtists(ChartQuery),
    ChartTracks(ChartQuery),
    ChartTags(PageRequest),
}

impl ApiCall {
    pub fn method(&self) -> &'static str {
        match self {
            ApiCall::ArtistInfo(_) => "artist.getInfo",
            ApiCall::ArtistTopTracks(..) => "artist.getTopTracks",
            ApiCall::ArtistSimilar(..) => "artist.getSimilar",
            ApiCall::Search(..) => "artist.search",
            ApiCall::ChartArtists(_) => "chart.getTopArtists",
            ApiCall::ChartTracks(_) => "chart.getTopTracks",
            ApiCall::ChartTags(_) => "chart.getTopTags",
        }
    }
}

/// Returns canned data and remembers every call it receives.
#[derive(Default)]
pub struct MockStatsApi {
    pub artists: Vec<Artist>,
    pub tracks: Vec<Track>,
    pub similar: Vec<SimilarArtist>,
    pub tags: Vec<Tag>,
    pub total_pages: Option<u32>,
    /// Methods named here fail with an API error.
    pub failing: Vec<&'static str>,
    calls: Mutex<Vec<ApiCall>>,
}

impl MockStatsApi {
    pub fn with_fixtures() -> Self {
        Self {
            artists: vec![
                Artist {
                    mbid: "mbid-cher".into(),
                    name: "Cher".into(),
                    url: "https://www.last.fm/music/Cher".into(),
                    listeners: 1_200_000,
                    playcount: 30_000_000,
                    bio_summary: Some("Cher is an American singer.".into()),
                    tags: vec!["pop".into(), "80s".into()],
                    ..Default::default()
                },
                Artist {
                    mbid: String::new(),
                    name: "Cher Lloyd".into(),
                    url: "https://www.last.fm/music/Cher+Lloyd".into(),
                    listeners: 400_000,
                    ..Default::default()
                },
            ],
            tracks: vec![
                Track {
                    name: "Believe".into(),
                    url: "https://www.last.fm/music/Cher/_/Believe".into(),
                    playcount: 5_000_000,
                    listeners: 900_000,
                    ..Default::default()
                },
                Track {
                    name: "Strong Enough".into(),
                    url: "https://www.last.fm/music/Cher/_/Strong+Enough".into(),
                    playcount: 1_000_000,
                    listeners: 300_000,
                    ..Default::default()
                },
            ],
            similar: vec![SimilarArtist {
                name: "Madonna".into(),
                mbid: "mbid-madonna".into(),
                match_score: 0.83,
                ..Default::default()
            }],
            tags: vec![Tag {
                name: "rock".into(),
                reach: 400_000,
                taggings: 4_000_000,
                ..Default::default()
            }],
            total_pages: Some(3),
            ..Default::default()
        }
    }

    pub fn failing(mut self, method: &'static str) -> Self {
        self.failing.push(method);
        self
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn methods(&self) -> Vec<&'static str> {
        self.calls().iter().map(ApiCall::method).collect()
    }

    fn record(&self, call: ApiCall) -> Result<(), LastFmError> {
        let method = call.method();
        self.calls.lock().unwrap().push(call);
        if self.failing.contains(&method) {
            return Err(LastFmError::Api {
                code: 8,
                message: format!("{method} failed"),
            });
        }
        Ok(())
    }

    fn paged<T: Clone>(&self, items: &[T], page: Option<u32>) -> Paged<T> {
        Paged {
            items: items.to_vec(),
            page: page.unwrap_or(1),
            total_pages: self.total_pages,
        }
    }
}

#[async_trait]
impl StatsApi for MockStatsApi {
    async fn artist_info(&self, key: &ArtistKey) -> Result<Artist, LastFmError> {
        self.record(ApiCall::ArtistInfo(key.clone()))?;
        self.artists
            .first()
            .cloned()
            .ok_or_else(|| LastFmError::Parse("no fixture".into()))
    }

    async fn artist_top_tracks(
        &self,
        key: &ArtistKey,
        limit: u32,
    ) -> Result<Vec<Track>, LastFmError> {
        self.record(ApiCall::ArtistTopTracks(key.clone(), limit))?;
        Ok(self.tracks.clone())
    }

    async fn artist_similar(
        &self,
        key: &ArtistKey,
        limit: u32,
    ) -> Result<Vec<SimilarArtist>, LastFmError> {
        self.record(ApiCall::ArtistSimilar(key.clone(), limit))?;
        Ok(self.similar.clone())
    }

    async fn search_artists(&self, query: &str, limit: u32) -> Result<Vec<Artist>, LastFmError> {
        self.record(ApiCall::Search(query.to_string(), limit))?;
        Ok(self.artists.clone())
    }

    async fn chart_top_artists(&self, query: ChartQuery) -> Result<Paged<Artist>, LastFmError> {
        self.record(ApiCall::ChartArtists(query))?;
        Ok(self.paged(&self.artists, query.page.page))
    }

    async fn chart_top_tracks(&self, query: ChartQuery) -> Result<Paged<Track>, LastFmError> {
        self.record(ApiCall::ChartTracks(query))?;
        Ok(self.paged(&self.tracks, query.page.page))
    }

    async fn chart_top_tags(&self, page: PageRequest) -> Result<Paged<Tag>, LastFmError> {
        self.record(ApiCall::ChartTags(page))?;
        Ok(self.paged(&self.tags, page.page))
    }
}
