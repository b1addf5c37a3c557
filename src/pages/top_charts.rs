use ratatui::widgets::ListState;

use super::{RequestStatus, move_selection, reset_selection};
use crate::app::Ticket;
use crate::models::{Artist, ChartPeriod, PageRequest, Tag, Track};

pub const TOP_CHARTS_ERROR: &str = "Failed to fetch data. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TopChartTab {
    #[default]
    Artists,
    Tracks,
    Tags,
}

impl TopChartTab {
    pub const ALL: [TopChartTab; 3] = [TopChartTab::Artists, TopChartTab::Tracks, TopChartTab::Tags];

    pub fn label(self) -> &'static str {
        match self {
            TopChartTab::Artists => "Top Artists",
            TopChartTab::Tracks => "Top Tracks",
            TopChartTab::Tags => "Popular Tags",
        }
    }

    pub fn index(self) -> usize {
        match self {
            TopChartTab::Artists => 0,
            TopChartTab::Tracks => 1,
            TopChartTab::Tags => 2,
        }
    }

    pub fn cycle(self, delta: isize) -> Self {
        let len = Self::ALL.len() as isize;
        Self::ALL[(self.index() as isize + delta).rem_euclid(len) as usize]
    }

    /// The tag chart has no time window.
    pub fn uses_period(self) -> bool {
        !matches!(self, TopChartTab::Tags)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopChartRequest {
    pub tab: TopChartTab,
    pub period: ChartPeriod,
    pub page: PageRequest,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartEntries {
    Artists(Vec<Artist>),
    Tracks(Vec<Track>),
    Tags(Vec<Tag>),
}

impl ChartEntries {
    pub fn empty(tab: TopChartTab) -> Self {
        match tab {
            TopChartTab::Artists => ChartEntries::Artists(Vec::new()),
            TopChartTab::Tracks => ChartEntries::Tracks(Vec::new()),
            TopChartTab::Tags => ChartEntries::Tags(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ChartEntries::Artists(items) => items.len(),
            ChartEntries::Tracks(items) => items.len(),
            ChartEntries::Tags(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopChartData {
    pub entries: ChartEntries,
    pub total_pages: Option<u32>,
}

#[derive(Debug)]
pub struct TopChartsPage {
    pub tab: TopChartTab,
    pub period: ChartPeriod,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: Option<u32>,
    pub entries: ChartEntries,
    pub list: ListState,
    pub status: RequestStatus,
}

impl TopChartsPage {
    pub fn new(per_page: u32) -> Self {
        Self {
            tab: TopChartTab::default(),
            period: ChartPeriod::default(),
            page: 1,
            per_page: per_page.max(1),
            total_pages: None,
            entries: ChartEntries::empty(TopChartTab::default()),
            list: ListState::default(),
            status: RequestStatus::default(),
        }
    }

    pub fn request(&self) -> TopChartRequest {
        TopChartRequest {
            tab: self.tab,
            period: self.period,
            page: PageRequest::nth(self.per_page, self.page),
        }
    }

    /// Switches tab and restarts at page 1. Returns whether a reload is needed.
    pub fn select_tab(&mut self, tab: TopChartTab) -> bool {
        if tab == self.tab {
            return false;
        }
        self.tab = tab;
        self.page = 1;
        self.total_pages = None;
        self.entries = ChartEntries::empty(tab);
        self.list.select(None);
        true
    }

    pub fn cycle_tab(&mut self, delta: isize) -> bool {
        self.select_tab(self.tab.cycle(delta))
    }

    /// Ignored on the tag tab, where no period selector is shown.
    pub fn cycle_period(&mut self, delta: isize) -> bool {
        if !self.tab.uses_period() {
            return false;
        }
        let next = self.period.cycle(&ChartPeriod::ALL, delta);
        if next == self.period {
            return false;
        }
        self.period = next;
        true
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.total_pages.is_none_or(|total| self.page < total)
    }

    pub fn previous_page(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.page -= 1;
        true
    }

    pub fn next_page(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.page = self.page.saturating_add(1);
        true
    }

    /// Overall chart position of the row at `index` on the current page.
    pub fn rank(&self, index: usize) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page) + index as u64 + 1
    }

    pub fn begin(&mut self, ticket: Ticket) {
        self.status.begin(ticket);
    }

    pub fn apply_data(&mut self, ticket: Ticket, data: TopChartData) -> bool {
        if !self.status.complete(ticket) {
            return false;
        }
        self.total_pages = data.total_pages;
        self.entries = data.entries;
        reset_selection(&mut self.list, self.entries.len());
        true
    }

    pub fn apply_failure(&mut self, ticket: Ticket) -> bool {
        self.status.fail(ticket, TOP_CHARTS_ERROR)
    }

    pub fn move_selection(&mut self, delta: isize) {
        move_selection(&mut self.list, self.entries.len(), delta);
    }

    /// The selected artist, when the artist tab is showing.
    pub fn selected_artist(&self) -> Option<&Artist> {
        match &self.entries {
            ChartEntries::Artists(artists) => {
                self.list.selected().and_then(|idx| artists.get(idx))
            }
            _ => None,
        }
    }
}
