use crate::models::{Artist, ArtistDetail};
use crate::pages::charts::ChartsUpdate;
use crate::pages::top_charts::TopChartData;

/// Identifies one load. A response only lands if its ticket is still the
/// pending one on the page that is currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
pub struct TicketCounter {
    last: u64,
}

impl TicketCounter {
    pub fn issue(&mut self) -> Ticket {
        self.last += 1;
        Ticket(self.last)
    }
}

#[derive(Debug, Clone)]
pub enum AppMessage {
    SearchResults {
        ticket: Ticket,
        artists: Vec<Artist>,
    },
    ArtistLoaded {
        ticket: Ticket,
        detail: ArtistDetail,
    },
    ChartsLoaded {
        ticket: Ticket,
        update: ChartsUpdate,
    },
    TopChartLoaded {
        ticket: Ticket,
        data: TopChartData,
    },
    RequestFailed {
        ticket: Ticket,
        reason: String,
    },
}

impl AppMessage {
    pub fn ticket(&self) -> Ticket {
        match self {
            AppMessage::SearchResults { ticket, .. }
            | AppMessage::ArtistLoaded { ticket, .. }
            | AppMessage::ChartsLoaded { ticket, .. }
            | AppMessage::TopChartLoaded { ticket, .. }
            | AppMessage::RequestFailed { ticket, .. } => *ticket,
        }
    }
}
