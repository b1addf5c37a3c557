use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task;

use crate::api::{LastFmError, StatsApi};
use crate::app::{AppMessage, Ticket};
use crate::config::Limits;
use crate::models::{Artist, ArtistDetail, ArtistKey, ChartQuery, PageRequest};
use crate::pages::charts::{ChartsRequest, ChartsUpdate};
use crate::pages::top_charts::{ChartEntries, TopChartData, TopChartRequest, TopChartTab};

/// Issues API requests on background tasks and reports back over the message channel.
#[derive(Clone)]
pub struct AppController {
    api: Arc<dyn StatsApi>,
    limits: Limits,
    message_tx: UnboundedSender<AppMessage>,
}

impl AppController {
    pub fn new(
        api: Arc<dyn StatsApi>,
        limits: Limits,
        message_tx: UnboundedSender<AppMessage>,
    ) -> Self {
        Self {
            api,
            limits,
            message_tx,
        }
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    pub fn search_artists(&self, ticket: Ticket, query: String) {
        if query.trim().is_empty() {
            return;
        }

        let api = Arc::clone(&self.api);
        let limit = self.limits.search;
        let tx = self.message_tx.clone();
        task::spawn(async move {
            match api.search_artists(&query, limit).await {
                Ok(artists) => {
                    log::info!("Search '{query}' returned {} artists", artists.len());
                    let _ = tx.send(AppMessage::SearchResults { ticket, artists });
                }
                Err(err) => report_failure(&tx, ticket, "Artist search", err),
            }
        });
    }

    /// Loads the profile (unless `prefetched` already has it), top tracks and similar artists.
    pub fn load_artist(&self, ticket: Ticket, key: ArtistKey, prefetched: Option<Artist>) {
        let api = Arc::clone(&self.api);
        let limits = self.limits;
        let tx = self.message_tx.clone();
        task::spawn(async move {
            match fetch_artist(api.as_ref(), limits, key, prefetched).await {
                Ok(detail) => {
                    let _ = tx.send(AppMessage::ArtistLoaded { ticket, detail });
                }
                Err(err) => report_failure(&tx, ticket, "Artist details", err),
            }
        });
    }

    pub fn load_charts(&self, ticket: Ticket, request: ChartsRequest) {
        let api = Arc::clone(&self.api);
        let limit = self.limits.charts;
        let tx = self.message_tx.clone();
        task::spawn(async move {
            match fetch_charts(api.as_ref(), limit, request).await {
                Ok(update) => {
                    let _ = tx.send(AppMessage::ChartsLoaded { ticket, update });
                }
                Err(err) => report_failure(&tx, ticket, "Charts", err),
            }
        });
    }

    pub fn load_top_chart(&self, ticket: Ticket, request: TopChartRequest) {
        let api = Arc::clone(&self.api);
        let tx = self.message_tx.clone();
        task::spawn(async move {
            match fetch_top_chart(api.as_ref(), request).await {
                Ok(data) => {
                    let _ = tx.send(AppMessage::TopChartLoaded { ticket, data });
                }
                Err(err) => report_failure(&tx, ticket, "Top charts", err),
            }
        });
    }
}

async fn fetch_artist(
    api: &dyn StatsApi,
    limits: Limits,
    key: ArtistKey,
    prefetched: Option<Artist>,
) -> Result<ArtistDetail, LastFmError> {
    let artist = match prefetched {
        Some(artist) => artist,
        None => api.artist_info(&key).await?,
    };
    let key = key.merged_with(&artist);

    let (top_tracks, similar) = futures::try_join!(
        api.artist_top_tracks(&key, limits.top_tracks),
        api.artist_similar(&key, limits.similar),
    )?;

    Ok(ArtistDetail {
        artist,
        top_tracks,
        similar,
    })
}

async fn fetch_charts(
    api: &dyn StatsApi,
    limit: u32,
    request: ChartsRequest,
) -> Result<ChartsUpdate, LastFmError> {
    let query = ChartQuery {
        page: PageRequest::first(limit),
        period: request.period,
    };

    let (artists, tracks) = futures::try_join!(
        api.chart_top_artists(query),
        api.chart_top_tracks(query),
    )?;

    let tags = if request.include_tags {
        Some(api.chart_top_tags(PageRequest::first(limit)).await?.items)
    } else {
        None
    };

    Ok(ChartsUpdate {
        period: request.period,
        artists: artists.items,
        tracks: tracks.items,
        tags,
    })
}

async fn fetch_top_chart(
    api: &dyn StatsApi,
    request: TopChartRequest,
) -> Result<TopChartData, LastFmError> {
    let query = ChartQuery {
        page: request.page,
        period: request.period,
    };

    let data = match request.tab {
        TopChartTab::Artists => {
            let page = api.chart_top_artists(query).await?;
            TopChartData {
                total_pages: page.total_pages,
                entries: ChartEntries::Artists(page.items),
            }
        }
        TopChartTab::Tracks => {
            let page = api.chart_top_tracks(query).await?;
            TopChartData {
                total_pages: page.total_pages,
                entries: ChartEntries::Tracks(page.items),
            }
        }
        TopChartTab::Tags => {
            let page = api.chart_top_tags(request.page).await?;
            TopChartData {
                total_pages: page.total_pages,
                entries: ChartEntries::Tags(page.items),
            }
        }
    };
    Ok(data)
}

fn report_failure(
    tx: &UnboundedSender<AppMessage>,
    ticket: Ticket,
    context: &str,
    err: LastFmError,
) {
    log::error!("{context} request failed: {err}");
    let _ = tx.send(AppMessage::RequestFailed {
        ticket,
        reason: format!("{context} request failed: {err}"),
    });
}
