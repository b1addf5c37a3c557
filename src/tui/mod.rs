mod controller;
mod state;
mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::time::interval;

use crate::navigation::Route;
use crate::pages::search::SearchFocus;

pub use controller::AppController;
pub use state::{App, Page};

pub async fn run(mut app: App) -> Result<()> {
    app.bootstrap();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    let mut reader = EventStream::new();
    let mut ticker = interval(Duration::from_millis(200));

    loop {
        terminal.draw(|frame| ui::draw(frame, &mut app))?;

        tokio::select! {
            _ = ticker.tick() => {},
            maybe_event = reader.next() => {
                if let Some(Ok(event)) = maybe_event {
                    handle_event(&mut app, event);
                }
            }
            Some(message) = app.msg_rx.recv() => {
                app.handle_message(message);
            }
        }

        if app.should_quit {
            break;
        }
    }

    terminal.show_cursor()?;
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    Ok(())
}

fn handle_event(app: &mut App, event: Event) {
    if let Event::Key(key_event) = event {
        if key_event.kind != KeyEventKind::Release {
            handle_key_event(app, key_event);
        }
    }
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match key.code {
        KeyCode::Tab => return app.cycle_nav(1),
        KeyCode::BackTab => return app.cycle_nav(-1),
        _ => {}
    }

    if app.is_typing() {
        handle_search_input_keys(app, key);
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char(ch @ '1'..='4') => {
            let idx = ch as usize - '1' as usize;
            app.navigate(Route::NAV[idx].clone());
        }
        KeyCode::Esc | KeyCode::Backspace => app.go_back(),
        _ => match app.page {
            Page::Home(_) => handle_list_keys(app, key),
            Page::Search(_) => handle_search_result_keys(app, key),
            Page::Artist(_) => handle_artist_keys(app, key),
            Page::Charts(_) => handle_charts_keys(app, key),
            Page::TopCharts(_) => handle_top_chart_keys(app, key),
        },
    }
}

/// Up/Down/Enter on whichever list the page shows.
fn handle_list_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up => app.move_selection(-1),
        KeyCode::Down => app.move_selection(1),
        KeyCode::Enter => app.open_selected(),
        _ => {}
    }
}

fn handle_search_input_keys(app: &mut App, key: KeyEvent) {
    let Page::Search(page) = &mut app.page else {
        return;
    };
    match key.code {
        KeyCode::Enter => app.submit_search(),
        KeyCode::Backspace => page.pop_char(),
        KeyCode::Esc => {
            if page.input.is_empty() {
                app.go_back();
            } else {
                page.input.clear();
            }
        }
        KeyCode::Down => {
            if !page.results.is_empty() {
                page.focus = SearchFocus::Results;
            }
        }
        KeyCode::Char(ch) => {
            if !key.modifiers.contains(KeyModifiers::ALT)
                && !key.modifiers.contains(KeyModifiers::CONTROL)
            {
                page.push_char(ch);
            }
        }
        _ => {}
    }
}

fn handle_search_result_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('/') | KeyCode::Char('i') => {
            if let Page::Search(page) = &mut app.page {
                page.focus = SearchFocus::Input;
            }
        }
        KeyCode::Up => {
            let at_top = matches!(&app.page, Page::Search(page) if page.list.selected().is_none_or(|idx| idx == 0));
            if at_top {
                if let Page::Search(page) = &mut app.page {
                    page.focus = SearchFocus::Input;
                }
            } else {
                app.move_selection(-1);
            }
        }
        _ => handle_list_keys(app, key),
    }
}

fn handle_artist_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('r') => app.reload(),
        _ => handle_list_keys(app, key),
    }
}

fn handle_charts_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Left => app.cycle_chart_period(-1),
        KeyCode::Right => app.cycle_chart_period(1),
        KeyCode::Char('r') => app.reload(),
        _ => {}
    }
}

fn handle_top_chart_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Left => app.cycle_top_chart_tab(-1),
        KeyCode::Right => app.cycle_top_chart_tab(1),
        KeyCode::Char('[') => app.cycle_chart_period(-1),
        KeyCode::Char(']') => app.cycle_chart_period(1),
        KeyCode::Char('n') | KeyCode::PageDown => app.change_top_chart_page(true),
        KeyCode::Char('p') | KeyCode::PageUp => app.change_top_chart_page(false),
        KeyCode::Char('r') => app.reload(),
        _ => handle_list_keys(app, key),
    }
}
