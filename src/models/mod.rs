pub mod artist;
pub mod period;
pub mod tag;
pub mod text;
pub mod track;

pub use artist::{Artist, ArtistDetail, ArtistKey, Image, ImageSize, SimilarArtist};
pub use period::ChartPeriod;
pub use tag::Tag;
pub use track::{ArtistRef, Track};

/// One page of a ranked chart, as reported by the API.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub total_pages: Option<u32>,
}

/// Page number and size sent with paginated chart requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: u32,
    pub page: Option<u32>,
}

impl PageRequest {
    pub fn first(limit: u32) -> Self {
        Self { limit, page: None }
    }

    pub fn nth(limit: u32, page: u32) -> Self {
        Self {
            limit,
            page: Some(page.max(1)),
        }
    }
}

/// Parameters for the period-scoped artist and track charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartQuery {
    pub page: PageRequest,
    pub period: ChartPeriod,
}
