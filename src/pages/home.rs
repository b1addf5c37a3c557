use ratatui::widgets::ListState;

use super::move_selection;
use crate::navigation::Route;

pub struct Feature {
    pub title: &'static str,
    pub description: &'static str,
    pub route: Route,
}

pub static FEATURES: [Feature; 3] = [
    Feature {
        title: "Artist Search",
        description: "Find detailed information about your favorite artists, including biography, top tracks, and statistics.",
        route: Route::Search,
    },
    Feature {
        title: "Music Charts",
        description: "Explore charts of music trends, popularity metrics, and listening data.",
        route: Route::Charts,
    },
    Feature {
        title: "Global Rankings",
        description: "Discover the most popular artists, tracks, and genres worldwide.",
        route: Route::TopCharts,
    },
];

#[derive(Debug)]
pub struct HomePage {
    pub list: ListState,
}

impl Default for HomePage {
    fn default() -> Self {
        let mut list = ListState::default();
        list.select(Some(0));
        Self { list }
    }
}

impl HomePage {
    pub fn move_selection(&mut self, delta: isize) {
        move_selection(&mut self.list, FEATURES.len(), delta);
    }

    pub fn selected_route(&self) -> Option<Route> {
        self.list
            .selected()
            .and_then(|idx| FEATURES.get(idx))
            .map(|feature| feature.route.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_maps_to_routes() {
        let mut page = HomePage::default();
        assert_eq!(page.selected_route(), Some(Route::Search));
        page.move_selection(2);
        assert_eq!(page.selected_route(), Some(Route::TopCharts));
        page.move_selection(1);
        assert_eq!(page.selected_route(), Some(Route::TopCharts));
    }
}
