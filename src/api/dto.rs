//! Wire shapes of the Last.fm JSON API and their mapping into view models.
//!
//! The API is loose about types: counts arrive as strings, one-element lists
//! arrive as bare objects and empty sections arrive as `""`. The helpers here
//! absorb all of that so the models never see it.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

use crate::models::{
    Artist, ArtistRef, Image, ImageSize, Paged, SimilarArtist, Tag, Track,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Integer(u64),
    Float(f64),
    Text(String),
}

impl TextOrNumber {
    fn as_count(&self) -> u64 {
        match self {
            TextOrNumber::Integer(value) => *value,
            TextOrNumber::Float(value) if *value > 0.0 => *value as u64,
            TextOrNumber::Float(_) => 0,
            TextOrNumber::Text(value) => {
                let value = value.trim();
                value
                    .parse::<u64>()
                    .ok()
                    .or_else(|| value.parse::<f64>().ok().filter(|v| *v > 0.0).map(|v| v as u64))
                    .unwrap_or(0)
            }
        }
    }

    fn as_score(&self) -> f64 {
        let raw = match self {
            TextOrNumber::Integer(value) => *value as f64,
            TextOrNumber::Float(value) => *value,
            TextOrNumber::Text(value) => value.trim().parse::<f64>().unwrap_or(0.0),
        };
        if raw.is_finite() {
            raw.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<TextOrNumber>::deserialize(deserializer)?;
    Ok(value.map(|v| v.as_count()).unwrap_or(0))
}

fn score<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<TextOrNumber>::deserialize(deserializer)?;
    Ok(value.map(|v| v.as_score()).unwrap_or(0.0))
}

/// Accepts an array, a single object, or anything else (treated as empty).
fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany<T> {
        Many(Vec<T>),
        One(T),
        Other(IgnoredAny),
    }

    Ok(match OneOrMany::<T>::deserialize(deserializer)? {
        OneOrMany::Many(items) => items,
        OneOrMany::One(item) => vec![item],
        OneOrMany::Other(_) => Vec::new(),
    })
}

/// Falls back to `T::default()` when the section has an unexpected shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Maybe<T> {
        Value(T),
        Other(IgnoredAny),
    }

    Ok(match Maybe::<T>::deserialize(deserializer)? {
        Maybe::Value(value) => value,
        Maybe::Other(_) => T::default(),
    })
}

/// Body of a failed call; Last.fm sends these with 200 as well as 4xx.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: u32,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ImageItem {
    #[serde(rename = "#text")]
    url: String,
    size: String,
}

impl From<ImageItem> for Image {
    fn from(item: ImageItem) -> Self {
        Self {
            url: item.url,
            size: ImageSize::parse(&item.size),
        }
    }
}

fn images(items: Vec<ImageItem>) -> Vec<Image> {
    items.into_iter().map(Image::from).collect()
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct PageAttr {
    #[serde(deserialize_with = "count")]
    page: u64,
    #[serde(rename = "totalPages", deserialize_with = "count")]
    total_pages: u64,
}

impl PageAttr {
    fn into_paged<T>(self, items: Vec<T>) -> Paged<T> {
        Paged {
            items,
            page: u32::try_from(self.page.max(1)).unwrap_or(u32::MAX),
            total_pages: (self.total_pages > 0)
                .then(|| u32::try_from(self.total_pages).unwrap_or(u32::MAX)),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ArtistItem {
    name: String,
    mbid: String,
    url: String,
    #[serde(deserialize_with = "list")]
    image: Vec<ImageItem>,
    #[serde(deserialize_with = "count")]
    listeners: u64,
    #[serde(deserialize_with = "count")]
    playcount: u64,
}

impl From<ArtistItem> for Artist {
    fn from(item: ArtistItem) -> Self {
        Self {
            mbid: item.mbid,
            name: item.name,
            url: item.url,
            images: images(item.image),
            listeners: item.listeners,
            playcount: item.playcount,
            bio_summary: None,
            tags: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct StatsItem {
    #[serde(deserialize_with = "count")]
    listeners: u64,
    #[serde(deserialize_with = "count")]
    playcount: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct TagRef {
    name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct TagRefs {
    #[serde(deserialize_with = "list")]
    tag: Vec<TagRef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct BioItem {
    summary: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ArtistInfoItem {
    name: String,
    mbid: String,
    url: String,
    #[serde(deserialize_with = "list")]
    image: Vec<ImageItem>,
    #[serde(deserialize_with = "lenient")]
    stats: StatsItem,
    #[serde(deserialize_with = "lenient")]
    tags: TagRefs,
    #[serde(deserialize_with = "lenient")]
    bio: BioItem,
}

impl From<ArtistInfoItem> for Artist {
    fn from(item: ArtistInfoItem) -> Self {
        Self {
            mbid: item.mbid,
            name: item.name,
            url: item.url,
            images: images(item.image),
            listeners: item.stats.listeners,
            playcount: item.stats.playcount,
            bio_summary: item.bio.summary.filter(|summary| !summary.trim().is_empty()),
            tags: item
                .tags
                .tag
                .into_iter()
                .map(|tag| tag.name)
                .filter(|name| !name.is_empty())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ArtistRefItem {
    name: String,
    mbid: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct TrackItem {
    name: String,
    url: String,
    #[serde(deserialize_with = "count")]
    playcount: u64,
    #[serde(deserialize_with = "count")]
    listeners: u64,
    #[serde(deserialize_with = "lenient")]
    artist: ArtistRefItem,
}

impl From<TrackItem> for Track {
    fn from(item: TrackItem) -> Self {
        Self {
            name: item.name,
            url: item.url,
            playcount: item.playcount,
            listeners: item.listeners,
            artist: ArtistRef {
                name: item.artist.name,
                mbid: item.artist.mbid,
            },
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct SimilarItem {
    name: String,
    mbid: String,
    url: String,
    #[serde(deserialize_with = "list")]
    image: Vec<ImageItem>,
    #[serde(rename = "match", deserialize_with = "score")]
    match_score: f64,
}

impl From<SimilarItem> for SimilarArtist {
    fn from(item: SimilarItem) -> Self {
        Self {
            mbid: item.mbid,
            name: item.name,
            url: item.url,
            images: images(item.image),
            match_score: item.match_score,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct TagItem {
    name: String,
    url: String,
    #[serde(deserialize_with = "count")]
    reach: u64,
    #[serde(deserialize_with = "count")]
    taggings: u64,
}

impl From<TagItem> for Tag {
    fn from(item: TagItem) -> Self {
        Self {
            name: item.name,
            url: item.url,
            reach: item.reach,
            taggings: item.taggings,
        }
    }
}

// Envelopes, one per method.

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ArtistMatches {
    #[serde(deserialize_with = "list")]
    artist: Vec<ArtistItem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchResults {
    #[serde(deserialize_with = "lenient")]
    artistmatches: ArtistMatches,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    #[serde(deserialize_with = "lenient")]
    results: SearchResults,
}

impl SearchResponse {
    pub fn into_artists(self) -> Vec<Artist> {
        self.results
            .artistmatches
            .artist
            .into_iter()
            .map(Artist::from)
            .collect()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ArtistInfoResponse {
    artist: Option<ArtistInfoItem>,
}

impl ArtistInfoResponse {
    pub fn into_artist(self) -> Option<Artist> {
        self.artist.map(Artist::from)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TrackList {
    #[serde(deserialize_with = "list")]
    track: Vec<TrackItem>,
    #[serde(rename = "@attr", deserialize_with = "lenient")]
    attr: PageAttr,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TopTracksResponse {
    #[serde(deserialize_with = "lenient")]
    toptracks: TrackList,
}

impl TopTracksResponse {
    pub fn into_tracks(self) -> Vec<Track> {
        self.toptracks.track.into_iter().map(Track::from).collect()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SimilarList {
    #[serde(deserialize_with = "list")]
    artist: Vec<SimilarItem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SimilarResponse {
    #[serde(deserialize_with = "lenient")]
    similarartists: SimilarList,
}

impl SimilarResponse {
    pub fn into_similar(self) -> Vec<SimilarArtist> {
        self.similarartists
            .artist
            .into_iter()
            .map(SimilarArtist::from)
            .collect()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ArtistList {
    #[serde(deserialize_with = "list")]
    artist: Vec<ArtistItem>,
    #[serde(rename = "@attr", deserialize_with = "lenient")]
    attr: PageAttr,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChartArtistsResponse {
    #[serde(deserialize_with = "lenient")]
    artists: ArtistList,
}

impl ChartArtistsResponse {
    pub fn into_paged(self) -> Paged<Artist> {
        let ArtistList { artist, attr } = self.artists;
        attr.into_paged(artist.into_iter().map(Artist::from).collect())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChartTracksResponse {
    #[serde(deserialize_with = "lenient")]
    tracks: TrackList,
}

impl ChartTracksResponse {
    pub fn into_paged(self) -> Paged<Track> {
        let TrackList { track, attr } = self.tracks;
        attr.into_paged(track.into_iter().map(Track::from).collect())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TagList {
    #[serde(deserialize_with = "list")]
    tag: Vec<TagItem>,
    #[serde(rename = "@attr", deserialize_with = "lenient")]
    attr: PageAttr,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChartTagsResponse {
    #[serde(deserialize_with = "lenient")]
    tags: TagList,
}

impl ChartTagsResponse {
    pub fn into_paged(self) -> Paged<Tag> {
        let TagList { tag, attr } = self.tags;
        attr.into_paged(tag.into_iter().map(Tag::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_maps_string_counts_and_images() {
        let body = r##"{
            "results": {
                "opensearch:totalResults": "2",
                "artistmatches": {
                    "artist": [
                        {
                            "name": "Cher",
                            "listeners": "1284612",
                            "mbid": "bfcc6d75-a6a5-4bc6-8282-47aec8531818",
                            "url": "https://www.last.fm/music/Cher",
                            "image": [
                                {"#text": "https://img/s.png", "size": "small"},
                                {"#text": "https://img/m.png", "size": "medium"}
                            ]
                        },
                        {"name": "Cher Lloyd", "listeners": "312", "mbid": "", "url": "u"}
                    ]
                }
            }
        }"##;
        let artists = serde_json::from_str::<SearchResponse>(body)
            .unwrap()
            .into_artists();

        assert_eq!(artists.len(), 2);
        assert_eq!(artists[0].listeners, 1_284_612);
        assert_eq!(artists[0].thumbnail(), Some("https://img/m.png"));
        assert!(artists[1].mbid.is_empty());
    }

    #[test]
    fn artist_info_reads_stats_tags_and_bio() {
        let body = r#"{
            "artist": {
                "name": "Cher",
                "mbid": "abc",
                "url": "https://www.last.fm/music/Cher",
                "image": [],
                "stats": {"listeners": "100", "playcount": "2500"},
                "tags": {"tag": {"name": "pop", "url": "x"}},
                "bio": {"summary": "Singer <a href=\"x\">Read more</a>"}
            }
        }"#;
        let artist = serde_json::from_str::<ArtistInfoResponse>(body)
            .unwrap()
            .into_artist()
            .unwrap();

        assert_eq!(artist.listeners, 100);
        assert_eq!(artist.playcount, 2500);
        assert_eq!(artist.tags, vec!["pop".to_string()]);
        assert_eq!(artist.bio_text().as_deref(), Some("Singer Read more"));
    }

    #[test]
    fn empty_string_sections_become_empty() {
        let body = r#"{
            "artist": {"name": "Nobody", "stats": "", "tags": "", "bio": ""}
        }"#;
        let artist = serde_json::from_str::<ArtistInfoResponse>(body)
            .unwrap()
            .into_artist()
            .unwrap();
        assert!(artist.tags.is_empty());
        assert_eq!(artist.listeners, 0);
        assert!(artist.bio_summary.is_none());
    }

    #[test]
    fn similar_match_accepts_strings_and_numbers() {
        let body = r#"{
            "similarartists": {
                "artist": [
                    {"name": "A", "match": "0.42"},
                    {"name": "B", "match": 1},
                    {"name": "C", "match": "garbage"}
                ]
            }
        }"#;
        let similar = serde_json::from_str::<SimilarResponse>(body)
            .unwrap()
            .into_similar();
        let scores: Vec<f64> = similar.iter().map(|s| s.match_score).collect();
        assert_eq!(scores, vec![0.42, 1.0, 0.0]);
    }

    #[test]
    fn chart_pages_carry_attr() {
        let body = r#"{
            "tracks": {
                "track": [
                    {"name": "Song", "playcount": "99", "listeners": "10",
                     "url": "u", "artist": {"name": "Band", "mbid": ""}}
                ],
                "@attr": {"page": "3", "perPage": "20", "totalPages": "500", "total": "10000"}
            }
        }"#;
        let page = serde_json::from_str::<ChartTracksResponse>(body)
            .unwrap()
            .into_paged();
        assert_eq!(page.page, 3);
        assert_eq!(page.total_pages, Some(500));
        assert_eq!(page.items[0].artist.name, "Band");
        assert_eq!(page.items[0].playcount, 99);
    }

    #[test]
    fn missing_sections_decode_to_empty_lists() {
        let tags = serde_json::from_str::<ChartTagsResponse>("{}")
            .unwrap()
            .into_paged();
        assert!(tags.items.is_empty());
        assert_eq!(tags.page, 1);
        assert_eq!(tags.total_pages, None);

        let tracks = serde_json::from_str::<TopTracksResponse>(r#"{"toptracks": ""}"#)
            .unwrap()
            .into_tracks();
        assert!(tracks.is_empty());
    }

    #[test]
    fn error_body_parses() {
        let body = r#"{"error": 6, "message": "The artist you supplied could not be found", "links": []}"#;
        let err = serde_json::from_str::<ApiErrorBody>(body).unwrap();
        assert_eq!(err.error, 6);
    }
}
