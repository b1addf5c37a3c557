use ratatui::widgets::ListState;

use super::{RequestStatus, move_selection, reset_selection};
use crate::app::Ticket;
use crate::models::{Artist, ArtistDetail, ArtistKey, SimilarArtist};

pub const ARTIST_ERROR: &str = "Failed to fetch artist details. Please try again.";

/// Number of top tracks plotted in the play count chart.
pub const CHART_TRACKS: usize = 5;

#[derive(Debug)]
pub struct ArtistPage {
    pub key: ArtistKey,
    /// Artist handed over by the page that linked here.
    pub prefetched: Option<Artist>,
    pub detail: Option<ArtistDetail>,
    pub similar_list: ListState,
    pub status: RequestStatus,
}

impl ArtistPage {
    pub fn new(key: ArtistKey, prefetched: Option<Artist>) -> Self {
        Self {
            key,
            prefetched,
            detail: None,
            similar_list: ListState::default(),
            status: RequestStatus::default(),
        }
    }

    pub fn title(&self) -> &str {
        self.detail
            .as_ref()
            .map(|detail| detail.artist.name.as_str())
            .or_else(|| self.prefetched.as_ref().map(|artist| artist.name.as_str()))
            .unwrap_or("Artist")
    }

    pub fn begin(&mut self, ticket: Ticket) {
        self.status.begin(ticket);
    }

    pub fn apply_detail(&mut self, ticket: Ticket, detail: ArtistDetail) -> bool {
        if !self.status.complete(ticket) {
            return false;
        }
        reset_selection(&mut self.similar_list, detail.similar.len());
        self.detail = Some(detail);
        true
    }

    pub fn apply_failure(&mut self, ticket: Ticket) -> bool {
        if !self.status.fail(ticket, ARTIST_ERROR) {
            return false;
        }
        self.detail = None;
        true
    }

    pub fn selected_similar(&self) -> Option<&SimilarArtist> {
        let detail = self.detail.as_ref()?;
        self.similar_list
            .selected()
            .and_then(|idx| detail.similar.get(idx))
    }

    pub fn move_selection(&mut self, delta: isize) {
        let len = self
            .detail
            .as_ref()
            .map(|detail| detail.similar.len())
            .unwrap_or(0);
        move_selection(&mut self.similar_list, len, delta);
    }

    /// `(track name, play count)` pairs for the chart.
    pub fn chart_points(&self) -> Vec<(&str, u64)> {
        self.detail
            .as_ref()
            .map(|detail| {
                detail
                    .top_tracks
                    .iter()
                    .take(CHART_TRACKS)
                    .map(|track| (track.name.as_str(), track.playcount))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::TicketCounter;
    use crate::models::Track;

    fn detail() -> ArtistDetail {
        ArtistDetail {
            artist: Artist {
                name: "Cher".into(),
                ..Default::default()
            },
            top_tracks: (1..=7)
                .map(|n| Track {
                    name: format!("Track {n}"),
                    playcount: n * 100,
                    ..Default::default()
                })
                .collect(),
            similar: vec![SimilarArtist {
                name: "Madonna".into(),
                ..Default::default()
            }],
        }
    }

    #[test]
    fn chart_uses_first_five_tracks() {
        let mut tickets = TicketCounter::default();
        let mut page = ArtistPage::new(ArtistKey::by_mbid("m"), None);
        let ticket = tickets.issue();
        page.begin(ticket);
        assert!(page.apply_detail(ticket, detail()));

        let points = page.chart_points();
        assert_eq!(points.len(), CHART_TRACKS);
        assert_eq!(points[0], ("Track 1", 100));
        assert_eq!(page.selected_similar().map(|s| s.name.as_str()), Some("Madonna"));
        assert_eq!(page.title(), "Cher");
    }

    #[test]
    fn failure_drops_detail() {
        let mut tickets = TicketCounter::default();
        let mut page = ArtistPage::new(ArtistKey::by_mbid("m"), None);
        let first = tickets.issue();
        page.begin(first);
        page.apply_detail(first, detail());

        let second = tickets.issue();
        page.begin(second);
        assert!(page.apply_failure(second));
        assert!(page.detail.is_none());
        assert_eq!(page.status.error(), Some(ARTIST_ERROR));
    }

    #[test]
    fn title_falls_back_to_prefetched() {
        let page = ArtistPage::new(
            ArtistKey::by_mbid("m"),
            Some(Artist {
                name: "Cher".into(),
                ..Default::default()
            }),
        );
        assert_eq!(page.title(), "Cher");
    }
}
