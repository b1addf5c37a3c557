use std::collections::VecDeque;
use std::fmt;

use crate::models::{Artist, ArtistKey};

const HISTORY_CAPACITY: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Search,
    Artist(ArtistKey),
    Charts,
    TopCharts,
}

impl Route {
    /// Entries shown in the navigation bar, in order.
    pub const NAV: [Route; 4] = [Route::Home, Route::Search, Route::Charts, Route::TopCharts];

    pub fn parse(path: &str) -> Option<Route> {
        let trimmed = path.trim();
        let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
        match trimmed {
            "" => Some(Route::Home),
            "/search" => Some(Route::Search),
            "/charts" => Some(Route::Charts),
            "/top-charts" => Some(Route::TopCharts),
            other => other
                .strip_prefix("/artist/")
                .filter(|id| !id.is_empty() && !id.contains('/'))
                .map(|id| Route::Artist(ArtistKey::by_mbid(id))),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Search => "/search".to_string(),
            Route::Artist(key) => format!("/artist/{}", key.mbid),
            Route::Charts => "/charts".to_string(),
            Route::TopCharts => "/top-charts".to_string(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Search => "Search",
            Route::Artist(_) => "Artist",
            Route::Charts => "Charts",
            Route::TopCharts => "Top Charts",
        }
    }

    /// Index into [`Route::NAV`]; artist pages belong to no tab.
    pub fn nav_index(&self) -> Option<usize> {
        Route::NAV.iter().position(|route| route == self)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// A route plus whatever the previous page handed over with it.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub route: Route,
    pub artist: Option<Artist>,
}

impl Location {
    pub fn new(route: Route) -> Self {
        Self {
            route,
            artist: None,
        }
    }

    /// Opens an artist page with the artist already in hand.
    pub fn artist(artist: Artist) -> Self {
        Self {
            route: Route::Artist(artist.key()),
            artist: Some(artist),
        }
    }
}

#[derive(Debug)]
pub struct Navigator {
    current: Location,
    history: VecDeque<Location>,
}

impl Navigator {
    pub fn new(start: Location) -> Self {
        Self {
            current: start,
            history: VecDeque::with_capacity(HISTORY_CAPACITY),
        }
    }

    pub fn current(&self) -> &Location {
        &self.current
    }

    /// Moves to `location`. Returns false when it is already current.
    pub fn push(&mut self, location: Location) -> bool {
        if location.route == self.current.route {
            return false;
        }
        if self.history.len() == HISTORY_CAPACITY {
            self.history.pop_front();
        }
        let previous = std::mem::replace(&mut self.current, location);
        self.history.push_back(previous);
        true
    }

    pub fn back(&mut self) -> Option<&Location> {
        let previous = self.history.pop_back()?;
        self.current = previous;
        Some(&self.current)
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }
}
