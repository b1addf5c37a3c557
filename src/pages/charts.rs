use super::RequestStatus;
use crate::app::Ticket;
use crate::models::{Artist, ChartPeriod, Tag, Track};

pub const CHARTS_ERROR: &str = "Failed to fetch chart data. Please try again.";

/// Entries shown in the "top 5" summaries under the charts.
pub const SUMMARY_ROWS: usize = 5;

/// What the charts overview asks the controller for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartsRequest {
    pub period: ChartPeriod,
    /// Tags are period independent; they are fetched once per page view.
    pub include_tags: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartsUpdate {
    pub period: ChartPeriod,
    pub artists: Vec<Artist>,
    pub tracks: Vec<Track>,
    pub tags: Option<Vec<Tag>>,
}

#[derive(Debug, Default)]
pub struct ChartsPage {
    pub period: ChartPeriod,
    pub artists: Vec<Artist>,
    pub tracks: Vec<Track>,
    pub tags: Option<Vec<Tag>>,
    pub status: RequestStatus,
}

impl ChartsPage {
    pub fn request(&self) -> ChartsRequest {
        ChartsRequest {
            period: self.period,
            include_tags: self.tags.is_none(),
        }
    }

    /// Moves through the recent periods. Returns whether a reload is needed.
    pub fn cycle_period(&mut self, delta: isize) -> bool {
        let next = self.period.cycle(&ChartPeriod::RECENT, delta);
        if next == self.period {
            return false;
        }
        self.period = next;
        true
    }

    pub fn begin(&mut self, ticket: Ticket) {
        self.status.begin(ticket);
    }

    pub fn apply_update(&mut self, ticket: Ticket, update: ChartsUpdate) -> bool {
        if !self.status.complete(ticket) {
            return false;
        }
        self.period = update.period;
        self.artists = update.artists;
        self.tracks = update.tracks;
        if let Some(tags) = update.tags {
            self.tags = Some(tags);
        }
        true
    }

    pub fn apply_failure(&mut self, ticket: Ticket) -> bool {
        self.status.fail(ticket, CHARTS_ERROR)
    }

    pub fn tags(&self) -> &[Tag] {
        self.tags.as_deref().unwrap_or_default()
    }
}
