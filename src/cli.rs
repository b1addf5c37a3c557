use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "harmonic-stats")]
#[command(version)]
#[command(about = "Terminal dashboard for Last.fm artist stats and charts", long_about = None)]
pub struct Args {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Last.fm API key (overrides config)
    #[arg(long, env = "LASTFM_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// API base URL (overrides config)
    #[arg(long, env = "LASTFM_API_BASE_URL")]
    pub base_url: Option<String>,

    /// Page to open on start, e.g. "/charts" or "/artist/<mbid>"
    #[arg(short, long, default_value = "/")]
    pub route: String,

    /// Log level: error, warn, info, debug or trace
    #[arg(long)]
    pub log_level: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_route_and_overrides() {
        let args = Args::try_parse_from([
            "harmonic-stats",
            "--route",
            "/top-charts",
            "--base-url",
            "http://localhost:8080/",
        ])
        .unwrap();
        assert_eq!(args.route, "/top-charts");
        assert_eq!(args.base_url.as_deref(), Some("http://localhost:8080/"));
    }
}
