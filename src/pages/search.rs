use ratatui::widgets::ListState;

use super::{RequestStatus, move_selection, reset_selection};
use crate::app::Ticket;
use crate::models::Artist;

pub const SEARCH_ERROR: &str = "Failed to fetch results. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    Input,
    Results,
}

#[derive(Debug)]
pub struct SearchPage {
    pub input: String,
    pub results: Vec<Artist>,
    pub list: ListState,
    pub focus: SearchFocus,
    pub status: RequestStatus,
    /// Query of the search in flight.
    submitted: Option<String>,
    /// Query of the last completed search.
    searched: Option<String>,
}

impl Default for SearchPage {
    fn default() -> Self {
        Self {
            input: String::new(),
            results: Vec::new(),
            list: ListState::default(),
            focus: SearchFocus::Input,
            status: RequestStatus::default(),
            submitted: None,
            searched: None,
        }
    }
}

impl SearchPage {
    /// The query to send, or `None` when the input is blank.
    pub fn pending_query(&self) -> Option<String> {
        let query = self.input.trim();
        (!query.is_empty()).then(|| query.to_string())
    }

    pub fn begin(&mut self, ticket: Ticket) {
        self.status.begin(ticket);
        self.submitted = self.pending_query();
    }

    pub fn apply_results(&mut self, ticket: Ticket, artists: Vec<Artist>) -> bool {
        if !self.status.complete(ticket) {
            return false;
        }
        self.results = artists;
        self.searched = self.submitted.take();
        reset_selection(&mut self.list, self.results.len());
        if !self.results.is_empty() {
            self.focus = SearchFocus::Results;
        }
        true
    }

    pub fn apply_failure(&mut self, ticket: Ticket) -> bool {
        self.status.fail(ticket, SEARCH_ERROR)
    }

    /// True once a search finished with nothing to show.
    pub fn shows_no_results(&self) -> bool {
        self.searched.is_some()
            && self.results.is_empty()
            && !self.status.is_loading()
            && self.status.error().is_none()
    }

    pub fn searched_query(&self) -> Option<&str> {
        self.searched.as_deref()
    }

    pub fn selected(&self) -> Option<&Artist> {
        self.list.selected().and_then(|idx| self.results.get(idx))
    }

    pub fn move_selection(&mut self, delta: isize) {
        move_selection(&mut self.list, self.results.len(), delta);
    }

    pub fn push_char(&mut self, ch: char) {
        self.input.push(ch);
    }

    pub fn pop_char(&mut self) {
        self.input.pop();
    }
}
