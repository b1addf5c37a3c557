use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{BarChart, Block, Borders, List, ListItem, Paragraph, Tabs, Wrap},
};

use crate::models::artist::PLACEHOLDER_IMAGE;
use crate::models::text::format_count;
use crate::models::{Artist, ChartPeriod, Tag, Track};
use crate::navigation::Route;
use crate::pages::RequestStatus;
use crate::pages::artist::ArtistPage;
use crate::pages::charts::{ChartsPage, SUMMARY_ROWS};
use crate::pages::home::{FEATURES, HomePage};
use crate::pages::search::{SearchFocus, SearchPage};
use crate::pages::top_charts::{ChartEntries, TopChartTab, TopChartsPage};

use super::{App, Page};

const BAR_WIDTH: u16 = 9;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(1),
        ])
        .split(frame.size());

    draw_nav(frame, app.route(), chunks[0]);

    match &mut app.page {
        Page::Home(page) => draw_home(frame, page, chunks[1]),
        Page::Search(page) => draw_search(frame, page, chunks[1]),
        Page::Artist(page) => draw_artist(frame, page, chunks[1]),
        Page::Charts(page) => draw_charts(frame, page, chunks[1]),
        Page::TopCharts(page) => draw_top_charts(frame, page, chunks[1]),
    }

    draw_footer(frame, app, chunks[2]);
}

fn draw_nav(frame: &mut Frame, route: &Route, area: Rect) {
    let titles: Vec<Line> = Route::NAV
        .iter()
        .enumerate()
        .map(|(idx, route)| Line::from(format!("{} {}", idx + 1, route.title())))
        .collect();

    let mut tabs = Tabs::new(titles).block(
        Block::default()
            .title("Music Statistics Dashboard")
            .borders(Borders::ALL),
    );
    // Artist pages sit outside the navigation bar.
    if let Some(idx) = route.nav_index() {
        tabs = tabs.select(idx).highlight_style(highlight_style());
    } else {
        tabs = tabs.highlight_style(Style::default());
    }

    frame.render_widget(tabs, area);
}

fn draw_home(frame: &mut Frame, page: &mut HomePage, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(3)])
        .split(area);

    let intro = Paragraph::new(vec![
        Line::from("Welcome to Music Stats").style(title_style()),
        Line::from("Explore music statistics, charts and artist insights powered by Last.fm."),
    ])
    .wrap(Wrap { trim: true });
    frame.render_widget(intro, chunks[0]);

    let items: Vec<ListItem> = FEATURES
        .iter()
        .map(|feature| {
            ListItem::new(vec![
                Line::from(feature.title).style(title_style()),
                Line::from(format!("   {}", feature.description)).style(dim_style()),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().title("Features").borders(Borders::ALL))
        .highlight_style(highlight_style())
        .highlight_symbol("▶ ");
    frame.render_stateful_widget(list, chunks[1], &mut page.list);
}

fn draw_search(frame: &mut Frame, page: &mut SearchPage, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let input = Paragraph::new(format!("> {}", page.input))
        .block(
            Block::default()
                .title("Search Artist")
                .borders(Borders::ALL)
                .border_style(focus_style(page.focus == SearchFocus::Input)),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(input, chunks[0]);

    if draw_status(frame, &page.status, "Searching...", chunks[1]) {
        return;
    }

    if page.shows_no_results() {
        let query = page.searched_query().unwrap_or_default();
        let message = Paragraph::new(format!("No artists found for \"{query}\""))
            .style(dim_style())
            .block(Block::default().title("Results").borders(Borders::ALL));
        frame.render_widget(message, chunks[1]);
        return;
    }

    let items: Vec<ListItem> = page
        .results
        .iter()
        .map(|artist| {
            let image = artist.thumbnail().unwrap_or(PLACEHOLDER_IMAGE).to_string();
            ListItem::new(vec![
                artist_line(artist),
                Line::from(format!("   {image}")).style(dim_style()),
            ])
        })
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .title("Results")
                .borders(Borders::ALL)
                .border_style(focus_style(page.focus == SearchFocus::Results)),
        )
        .highlight_style(highlight_style())
        .highlight_symbol("▶ ");
    frame.render_stateful_widget(list, chunks[1], &mut page.list);
}

fn draw_artist(frame: &mut Frame, page: &mut ArtistPage, area: Rect) {
    let loading = format!("Loading {}...", page.title());
    if draw_status(frame, &page.status, &loading, area) {
        return;
    }
    let Some(detail) = &page.detail else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(10)])
        .split(area);
    draw_artist_header(frame, &detail.artist, chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(columns[0]);

    let tracks: Vec<ListItem> = detail
        .top_tracks
        .iter()
        .enumerate()
        .map(|(idx, track)| {
            ListItem::new(Line::from(vec![
                Span::raw(format!("{:>2}. {}", idx + 1, track.name)),
                Span::styled(
                    format!("  {} plays", format_count(track.playcount)),
                    dim_style(),
                ),
            ]))
        })
        .collect();
    frame.render_widget(
        List::new(tracks).block(Block::default().title("Top Tracks").borders(Borders::ALL)),
        left[0],
    );

    let points: Vec<(String, u64)> = page
        .chart_points()
        .into_iter()
        .map(|(name, plays)| (bar_label(name), plays))
        .collect();
    draw_bar_chart(frame, "Top Tracks Play Count", &points, left[1]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(8)])
        .split(columns[1]);

    let bio = detail
        .artist
        .bio_text()
        .unwrap_or_else(|| "No biography available.".to_string());
    frame.render_widget(
        Paragraph::new(bio)
            .block(Block::default().title("Biography").borders(Borders::ALL))
            .wrap(Wrap { trim: true }),
        right[0],
    );

    let similar: Vec<ListItem> = detail
        .similar
        .iter()
        .map(|artist| {
            ListItem::new(Line::from(vec![
                Span::raw(artist.name.clone()),
                Span::styled(format!("  Match: {}%", artist.match_percent()), dim_style()),
            ]))
        })
        .collect();
    let list = List::new(similar)
        .block(Block::default().title("Similar Artists").borders(Borders::ALL))
        .highlight_style(highlight_style())
        .highlight_symbol("▶ ");
    frame.render_stateful_widget(list, right[1], &mut page.similar_list);
}

fn draw_artist_header(frame: &mut Frame, artist: &Artist, area: Rect) {
    let tags = if artist.tags.is_empty() {
        "-".to_string()
    } else {
        artist.tags.join(", ")
    };
    let lines = vec![
        Line::from(artist.name.clone()).style(title_style()),
        Line::from(format!(
            "Listeners: {}   Playcount: {}",
            format_count(artist.listeners),
            format_count(artist.playcount)
        )),
        Line::from(format!("Tags: {tags}")),
        Line::from(format!("Image: {}", artist.display_image())).style(dim_style()),
        Line::from(artist.url.clone()).style(dim_style()),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn draw_charts(frame: &mut Frame, page: &ChartsPage, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(10)])
        .split(area);

    draw_period_tabs(frame, &ChartPeriod::RECENT, page.period, chunks[0]);

    if draw_status(frame, &page.status, "Loading charts...", chunks[1]) {
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(rows[0]);

    let listeners: Vec<(String, u64)> = page
        .artists
        .iter()
        .map(|artist| (bar_label(&artist.name), artist.listeners))
        .collect();
    draw_bar_chart(frame, "Artist Listeners", &listeners, charts[0]);

    let plays: Vec<(String, u64)> = page
        .tracks
        .iter()
        .map(|track| (bar_label(&track.name), track.playcount))
        .collect();
    draw_bar_chart(frame, "Track Playcount", &plays, charts[1]);

    let reach: Vec<(String, u64)> = page
        .tags()
        .iter()
        .map(|tag| (bar_label(&tag.name), tag.reach))
        .collect();
    draw_bar_chart(frame, "Tag Reach", &reach, charts[2]);

    let summaries = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(rows[1]);

    let artists = page
        .artists
        .iter()
        .take(SUMMARY_ROWS)
        .map(|artist| ListItem::new(artist_line(artist)));
    frame.render_widget(
        List::new(artists).block(Block::default().title("Top 5 Artists").borders(Borders::ALL)),
        summaries[0],
    );
    let tracks = page
        .tracks
        .iter()
        .take(SUMMARY_ROWS)
        .map(|track| ListItem::new(track_line(track)));
    frame.render_widget(
        List::new(tracks).block(Block::default().title("Top 5 Tracks").borders(Borders::ALL)),
        summaries[1],
    );
    let tags = page
        .tags()
        .iter()
        .take(SUMMARY_ROWS)
        .map(|tag| ListItem::new(tag_line(tag)));
    frame.render_widget(
        List::new(tags).block(Block::default().title("Top 5 Tags").borders(Borders::ALL)),
        summaries[2],
    );
}

fn draw_top_charts(frame: &mut Frame, page: &mut TopChartsPage, area: Rect) {
    let show_period = page.tab.uses_period();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(if show_period { 3 } else { 0 }),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    let tabs = Tabs::new(TopChartTab::ALL.iter().map(|tab| tab.label()).collect::<Vec<_>>())
        .select(page.tab.index())
        .highlight_style(highlight_style())
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(tabs, chunks[0]);

    if show_period {
        draw_period_tabs(frame, &ChartPeriod::ALL, page.period, chunks[1]);
    }

    if draw_status(frame, &page.status, "Loading...", chunks[2]) {
        // loading or error view is showing
    } else if page.entries.is_empty() {
        frame.render_widget(
            Paragraph::new("No entries on this page.")
                .style(dim_style())
                .block(Block::default().title(page.tab.label()).borders(Borders::ALL)),
            chunks[2],
        );
    } else {
        let ranks: Vec<u64> = (0..page.entries.len()).map(|idx| page.rank(idx)).collect();
        let items: Vec<ListItem> = match &page.entries {
            ChartEntries::Artists(artists) => artists
                .iter()
                .zip(&ranks)
                .map(|(artist, rank)| ranked(*rank, artist_line(artist)))
                .collect(),
            ChartEntries::Tracks(tracks) => tracks
                .iter()
                .zip(&ranks)
                .map(|(track, rank)| ranked(*rank, track_line(track)))
                .collect(),
            ChartEntries::Tags(tags) => tags
                .iter()
                .zip(&ranks)
                .map(|(tag, rank)| ranked(*rank, tag_line(tag)))
                .collect(),
        };
        let list = List::new(items)
            .block(Block::default().title(page.tab.label()).borders(Borders::ALL))
            .highlight_style(highlight_style())
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(list, chunks[2], &mut page.list);
    }

    let total = page
        .total_pages
        .map(|total| format!(" of {total}"))
        .unwrap_or_default();
    let mut pager = vec![Span::raw(format!("Page {}{total}", page.page))];
    if page.has_previous() {
        pager.push(Span::styled("   p: previous", dim_style()));
    }
    if page.has_next() {
        pager.push(Span::styled("   n: next", dim_style()));
    }
    frame.render_widget(Paragraph::new(Line::from(pager)), chunks[3]);
}

fn draw_period_tabs(frame: &mut Frame, options: &[ChartPeriod], current: ChartPeriod, area: Rect) {
    let selected = options.iter().position(|period| *period == current).unwrap_or(0);
    let tabs = Tabs::new(options.iter().map(|period| period.label()).collect::<Vec<_>>())
        .select(selected)
        .highlight_style(highlight_style())
        .block(Block::default().title("Period").borders(Borders::ALL));
    frame.render_widget(tabs, area);
}

/// Renders the loading or error view in place of the content. Returns true when it did.
fn draw_status(frame: &mut Frame, status: &RequestStatus, loading: &str, area: Rect) -> bool {
    if status.is_loading() {
        frame.render_widget(
            Paragraph::new(loading.to_string())
                .style(dim_style())
                .block(Block::default().borders(Borders::ALL)),
            area,
        );
        return true;
    }
    if let Some(error) = status.error() {
        frame.render_widget(
            Paragraph::new(error)
                .style(Style::default().fg(Color::Red))
                .block(Block::default().title("Error").borders(Borders::ALL))
                .wrap(Wrap { trim: true }),
            area,
        );
        return true;
    }
    false
}

fn draw_bar_chart(frame: &mut Frame, title: &str, points: &[(String, u64)], area: Rect) {
    let data: Vec<(&str, u64)> = points
        .iter()
        .map(|(label, value)| (label.as_str(), *value))
        .collect();
    let chart = BarChart::default()
        .block(Block::default().title(title.to_string()).borders(Borders::ALL))
        .data(data.as_slice())
        .bar_width(BAR_WIDTH)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan));
    frame.render_widget(chart, area);
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let hints = match &app.page {
        Page::Home(_) => "↑↓ select • Enter open",
        Page::Search(page) if page.focus == SearchFocus::Input => {
            "Enter search • ↓ results • Esc clear"
        }
        Page::Search(_) => "↑↓ select • Enter open • / edit query",
        Page::Artist(_) => "↑↓ similar • Enter open • r reload",
        Page::Charts(_) => "←→ period • r reload",
        Page::TopCharts(_) => "←→ tab • [ ] period • n/p page • Enter open",
    };

    let back = if app.navigator.can_go_back() {
        " • Esc back"
    } else {
        ""
    };
    let mut spans = vec![Span::styled(
        format!("{hints} • Tab pages{back} • q quit"),
        Style::default().fg(Color::Gray),
    )];
    if let Some(entry) = app.latest_log() {
        spans.push(Span::styled(format!("   {entry}"), dim_style()));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn artist_line(artist: &Artist) -> Line<'static> {
    Line::from(vec![
        Span::raw(artist.name.clone()),
        Span::styled(
            format!("  {} listeners", format_count(artist.listeners)),
            dim_style(),
        ),
    ])
}

fn track_line(track: &Track) -> Line<'static> {
    Line::from(vec![
        Span::raw(track.label()),
        Span::styled(
            format!("  {} plays", format_count(track.playcount)),
            dim_style(),
        ),
    ])
}

fn tag_line(tag: &Tag) -> Line<'static> {
    Line::from(vec![
        Span::raw(tag.name.clone()),
        Span::styled(format!("  reach {}", format_count(tag.reach)), dim_style()),
    ])
}

fn ranked(rank: u64, line: Line<'static>) -> ListItem<'static> {
    let mut spans = vec![Span::styled(format!("{rank:>4}. "), dim_style())];
    spans.extend(line.spans);
    ListItem::new(Line::from(spans))
}

fn bar_label(name: &str) -> String {
    name.chars().take(BAR_WIDTH as usize).collect()
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

fn highlight_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

fn title_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ratatui::{Terminal, backend::TestBackend};
    use tokio::sync::mpsc;

    use super::*;
    use crate::api::mock::MockStatsApi;
    use crate::config::Limits;
    use crate::models::{ArtistDetail, ArtistKey};
    use crate::pages::search::SEARCH_ERROR;
    use crate::tui::AppController;

    fn app_showing(page: Page) -> App {
        let api = Arc::new(MockStatsApi::with_fixtures());
        let (tx, rx) = mpsc::unbounded_channel();
        let controller = AppController::new(api, Limits::default(), tx);
        let mut app = App::new(controller, rx, Route::Home);
        app.page = page;
        app
    }

    fn render(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).expect("terminal");
        terminal.draw(|frame| draw(frame, app)).expect("draw");
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn search_error_hides_results() {
        let mut page = SearchPage::default();
        page.input = "Cher".into();
        page.results = MockStatsApi::with_fixtures().artists;
        page.status.fail_now(SEARCH_ERROR);
        let screen = render(&mut app_showing(Page::Search(page)));

        assert!(screen.contains(SEARCH_ERROR));
        assert!(!screen.contains("Cher Lloyd"));
    }

    #[test]
    fn empty_search_names_the_sent_query() {
        let mut tickets = crate::app::TicketCounter::default();
        let mut page = SearchPage::default();
        page.input = "abba".into();
        let ticket = tickets.issue();
        page.begin(ticket);
        page.input = "abbax".into();
        page.apply_results(ticket, Vec::new());

        let screen = render(&mut app_showing(Page::Search(page)));
        assert!(screen.contains("No artists found for \"abba\""));
    }

    #[test]
    fn search_rows_show_listeners() {
        let mut page = SearchPage::default();
        page.results = MockStatsApi::with_fixtures().artists;
        let screen = render(&mut app_showing(Page::Search(page)));
        assert!(screen.contains("Cher Lloyd"));
        assert!(screen.contains("1,200,000 listeners"));
    }

    #[test]
    fn artist_page_shows_match_and_placeholder_image() {
        let fixtures = MockStatsApi::with_fixtures();
        let mut page = ArtistPage::new(ArtistKey::by_mbid("mbid-cher"), None);
        page.detail = Some(ArtistDetail {
            artist: fixtures.artists[0].clone(),
            top_tracks: fixtures.tracks.clone(),
            similar: fixtures.similar.clone(),
        });
        let screen = render(&mut app_showing(Page::Artist(page)));

        assert!(screen.contains("Match: 83%"));
        assert!(screen.contains("Listeners: 1,200,000"));
        assert!(screen.contains(PLACEHOLDER_IMAGE));
        assert!(screen.contains("Cher is an American singer."));
    }

    #[test]
    fn tag_tab_hides_period_selector() {
        let mut page = TopChartsPage::new(20);
        let screen = render(&mut app_showing(Page::TopCharts(TopChartsPage::new(20))));
        assert!(screen.contains("Period"));

        page.select_tab(TopChartTab::Tags);
        page.entries = ChartEntries::Tags(MockStatsApi::with_fixtures().tags);
        let screen = render(&mut app_showing(Page::TopCharts(page)));
        assert!(!screen.contains("Period"));
        assert!(screen.contains("1. rock"));
    }

    #[test]
    fn empty_chart_page_says_so() {
        let screen = render(&mut app_showing(Page::TopCharts(TopChartsPage::new(20))));
        assert!(screen.contains("No entries on this page."));
    }

    #[test]
    fn ranks_continue_on_later_pages() {
        let mut page = TopChartsPage::new(20);
        page.next_page();
        page.entries = ChartEntries::Artists(MockStatsApi::with_fixtures().artists);
        let screen = render(&mut app_showing(Page::TopCharts(page)));
        assert!(screen.contains("21. Cher"));
        assert!(screen.contains("22. Cher Lloyd"));
    }
}
