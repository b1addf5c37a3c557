//! Per-page view state. Each page owns the view models it fetched and is
//! rebuilt from scratch whenever it is navigated to.

pub mod artist;
pub mod charts;
pub mod home;
pub mod search;
pub mod top_charts;

use ratatui::widgets::ListState;

use crate::app::Ticket;

/// Loading/error bookkeeping shared by every page that fetches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestStatus {
    pending: Option<Ticket>,
    error: Option<&'static str>,
}

impl RequestStatus {
    pub fn begin(&mut self, ticket: Ticket) {
        self.pending = Some(ticket);
        self.error = None;
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    pub fn accepts(&self, ticket: Ticket) -> bool {
        self.pending == Some(ticket)
    }

    /// Clears the pending ticket if it matches. Returns whether it did.
    pub fn complete(&mut self, ticket: Ticket) -> bool {
        if !self.accepts(ticket) {
            return false;
        }
        self.pending = None;
        true
    }

    pub fn fail(&mut self, ticket: Ticket, message: &'static str) -> bool {
        if !self.complete(ticket) {
            return false;
        }
        self.error = Some(message);
        true
    }

    /// Failure that never reached the network.
    pub fn fail_now(&mut self, message: &'static str) {
        self.pending = None;
        self.error = Some(message);
    }
}

pub(crate) fn move_selection(state: &mut ListState, len: usize, delta: isize) {
    if len == 0 {
        state.select(None);
        return;
    }

    let current = state.selected().unwrap_or(0);
    let step = delta.unsigned_abs();
    let new_index = if delta < 0 {
        current.saturating_sub(step)
    } else {
        (current + step).min(len - 1)
    };
    state.select(Some(new_index));
}

pub(crate) fn reset_selection(state: &mut ListState, len: usize) {
    state.select(if len == 0 { None } else { Some(0) });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::TicketCounter;

    #[test]
    fn stale_tickets_are_rejected() {
        let mut tickets = TicketCounter::default();
        let first = tickets.issue();
        let second = tickets.issue();

        let mut status = RequestStatus::default();
        status.begin(first);
        status.begin(second);

        assert!(!status.complete(first));
        assert!(status.is_loading());
        assert!(status.complete(second));
        assert!(!status.is_loading());
    }

    #[test]
    fn failure_clears_loading_and_sets_error() {
        let mut tickets = TicketCounter::default();
        let ticket = tickets.issue();
        let mut status = RequestStatus::default();
        status.begin(ticket);

        assert!(status.fail(ticket, "boom"));
        assert!(!status.is_loading());
        assert_eq!(status.error(), Some("boom"));

        status.begin(tickets.issue());
        assert_eq!(status.error(), None);
    }

    #[test]
    fn selection_stays_in_bounds() {
        let mut state = ListState::default();
        move_selection(&mut state, 3, 5);
        assert_eq!(state.selected(), Some(2));
        move_selection(&mut state, 3, -10);
        assert_eq!(state.selected(), Some(0));
        move_selection(&mut state, 0, 1);
        assert_eq!(state.selected(), None);
    }
}
