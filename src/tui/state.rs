use std::collections::VecDeque;

use chrono::Local;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::app::{AppMessage, TicketCounter};
use crate::models::Artist;
use crate::navigation::{Location, Navigator, Route};
use crate::pages::artist::{ARTIST_ERROR, ArtistPage};
use crate::pages::charts::ChartsPage;
use crate::pages::home::HomePage;
use crate::pages::search::{SearchFocus, SearchPage};
use crate::pages::top_charts::TopChartsPage;

use super::controller::AppController;

const LOG_CAPACITY: usize = 200;

/// The page currently on screen. Only one exists at a time.
#[derive(Debug)]
pub enum Page {
    Home(HomePage),
    Search(SearchPage),
    Artist(ArtistPage),
    Charts(ChartsPage),
    TopCharts(TopChartsPage),
}

pub struct App {
    pub controller: AppController,
    pub msg_rx: UnboundedReceiver<AppMessage>,
    pub navigator: Navigator,
    pub page: Page,
    pub logs: VecDeque<String>,
    pub should_quit: bool,
    tickets: TicketCounter,
}

impl App {
    pub fn new(controller: AppController, msg_rx: UnboundedReceiver<AppMessage>, start: Route) -> Self {
        Self {
            controller,
            msg_rx,
            navigator: Navigator::new(Location::new(start)),
            page: Page::Home(HomePage::default()),
            logs: VecDeque::with_capacity(LOG_CAPACITY),
            should_quit: false,
            tickets: TicketCounter::default(),
        }
    }

    /// Mounts the start page.
    pub fn bootstrap(&mut self) {
        let location = self.navigator.current().clone();
        self.mount(location);
    }

    pub fn route(&self) -> &Route {
        &self.navigator.current().route
    }

    pub fn navigate(&mut self, route: Route) {
        self.navigate_to(Location::new(route));
    }

    /// Opens an artist page, handing over what is already known about the artist.
    pub fn open_artist(&mut self, artist: Artist) {
        self.navigate_to(Location::artist(artist));
    }

    fn navigate_to(&mut self, location: Location) {
        if self.navigator.push(location.clone()) {
            log::info!("Navigate to {}", location.route);
            self.mount(location);
        }
    }

    /// Steps through the navigation bar. Artist pages count as sitting before Home.
    pub fn cycle_nav(&mut self, delta: isize) {
        let len = Route::NAV.len() as isize;
        let next = match self.route().nav_index() {
            Some(idx) => (idx as isize + delta).rem_euclid(len),
            None if delta < 0 => len - 1,
            None => 0,
        };
        self.navigate(Route::NAV[next as usize].clone());
    }

    pub fn go_back(&mut self) {
        if let Some(location) = self.navigator.back().cloned() {
            log::info!("Back to {}", location.route);
            self.mount(location);
        }
    }

    /// Rebuilds the page for `location` and starts its initial loads.
    fn mount(&mut self, location: Location) {
        let limits = self.controller.limits();
        self.page = match location.route {
            Route::Home => Page::Home(HomePage::default()),
            Route::Search => Page::Search(SearchPage::default()),
            Route::Charts => Page::Charts(ChartsPage::default()),
            Route::TopCharts => Page::TopCharts(TopChartsPage::new(limits.top_charts_page_size)),
            Route::Artist(key) => Page::Artist(ArtistPage::new(key, location.artist)),
        };
        self.reload();
    }

    /// Re-issues whatever the current page loads on mount.
    pub fn reload(&mut self) {
        match &mut self.page {
            Page::Home(_) | Page::Search(_) => {}
            Page::Artist(page) => {
                let prefetched = page.prefetched.clone();
                if page.key.is_empty() && prefetched.is_none() {
                    log::warn!("Artist page opened without an identifier");
                    page.status.fail_now(ARTIST_ERROR);
                    return;
                }
                let ticket = self.tickets.issue();
                page.begin(ticket);
                self.controller.load_artist(ticket, page.key.clone(), prefetched);
            }
            Page::Charts(page) => {
                let ticket = self.tickets.issue();
                page.begin(ticket);
                self.controller.load_charts(ticket, page.request());
            }
            Page::TopCharts(page) => {
                let ticket = self.tickets.issue();
                page.begin(ticket);
                self.controller.load_top_chart(ticket, page.request());
            }
        }
    }

    pub fn submit_search(&mut self) {
        let Page::Search(page) = &mut self.page else {
            return;
        };
        let Some(query) = page.pending_query() else {
            return;
        };
        let ticket = self.tickets.issue();
        page.begin(ticket);
        self.push_log(format!("Searching for '{query}'"));
        self.controller.search_artists(ticket, query);
    }

    pub fn cycle_chart_period(&mut self, delta: isize) {
        let changed = match &mut self.page {
            Page::Charts(page) => page.cycle_period(delta),
            Page::TopCharts(page) => page.cycle_period(delta),
            _ => false,
        };
        if changed {
            self.reload();
        }
    }

    pub fn cycle_top_chart_tab(&mut self, delta: isize) {
        if let Page::TopCharts(page) = &mut self.page {
            if page.cycle_tab(delta) {
                self.reload();
            }
        }
    }

    pub fn change_top_chart_page(&mut self, forward: bool) {
        if let Page::TopCharts(page) = &mut self.page {
            let changed = if forward {
                page.next_page()
            } else {
                page.previous_page()
            };
            if changed {
                self.reload();
            }
        }
    }

    /// Follows the highlighted row, if it links anywhere.
    pub fn open_selected(&mut self) {
        match &self.page {
            Page::Home(page) => {
                if let Some(route) = page.selected_route() {
                    self.navigate(route);
                }
            }
            Page::Search(page) => {
                if let Some(artist) = page.selected().cloned() {
                    self.open_artist(artist);
                }
            }
            Page::Artist(page) => {
                // Similar entries carry no stats, so the profile is fetched.
                if let Some(key) = page.selected_similar().map(|similar| similar.key()) {
                    self.navigate(Route::Artist(key));
                }
            }
            Page::TopCharts(page) => {
                if let Some(artist) = page.selected_artist().cloned() {
                    self.open_artist(artist);
                }
            }
            Page::Charts(_) => {}
        }
    }

    pub fn move_selection(&mut self, delta: isize) {
        match &mut self.page {
            Page::Home(page) => page.move_selection(delta),
            Page::Search(page) => page.move_selection(delta),
            Page::Artist(page) => page.move_selection(delta),
            Page::TopCharts(page) => page.move_selection(delta),
            Page::Charts(_) => {}
        }
    }

    pub fn handle_message(&mut self, message: AppMessage) {
        let ticket = message.ticket();
        let mut note = None;
        let applied = match message {
            AppMessage::SearchResults { ticket, artists } => match &mut self.page {
                Page::Search(page) => {
                    let count = artists.len();
                    let applied = page.apply_results(ticket, artists);
                    if applied {
                        note = Some(format!("Search returned {count} artists"));
                    }
                    applied
                }
                _ => false,
            },
            AppMessage::ArtistLoaded { ticket, detail } => match &mut self.page {
                Page::Artist(page) => page.apply_detail(ticket, detail),
                _ => false,
            },
            AppMessage::ChartsLoaded { ticket, update } => match &mut self.page {
                Page::Charts(page) => page.apply_update(ticket, update),
                _ => false,
            },
            AppMessage::TopChartLoaded { ticket, data } => match &mut self.page {
                Page::TopCharts(page) => page.apply_data(ticket, data),
                _ => false,
            },
            AppMessage::RequestFailed { ticket, reason } => {
                let applied = match &mut self.page {
                    Page::Search(page) => page.apply_failure(ticket),
                    Page::Artist(page) => page.apply_failure(ticket),
                    Page::Charts(page) => page.apply_failure(ticket),
                    Page::TopCharts(page) => page.apply_failure(ticket),
                    Page::Home(_) => false,
                };
                if applied {
                    note = Some(reason);
                }
                applied
            }
        };

        if let Some(note) = note {
            self.push_log(note);
        }
        if !applied {
            log::debug!("Dropped stale response {ticket:?}");
        }
    }

    pub fn push_log<S: Into<String>>(&mut self, message: S) {
        if self.logs.len() == LOG_CAPACITY {
            self.logs.pop_front();
        }
        let stamp = Local::now().format("%H:%M:%S");
        self.logs.push_back(format!("{stamp} {}", message.into()));
    }

    pub fn latest_log(&self) -> Option<&str> {
        self.logs.back().map(String::as_str)
    }

    /// Whether key presses currently go to a text field.
    pub fn is_typing(&self) -> bool {
        matches!(&self.page, Page::Search(page) if page.focus == SearchFocus::Input)
    }
}
