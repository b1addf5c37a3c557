use super::text;
use super::track::Track;

pub const PLACEHOLDER_IMAGE: &str = "https://placehold.co/400x400?text=No+Image";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageSize {
    Small,
    Medium,
    Large,
    ExtraLarge,
    Mega,
    #[default]
    Unknown,
}

impl ImageSize {
    pub fn parse(value: &str) -> Self {
        match value {
            "small" => ImageSize::Small,
            "medium" => ImageSize::Medium,
            "large" => ImageSize::Large,
            "extralarge" => ImageSize::ExtraLarge,
            "mega" => ImageSize::Mega,
            _ => ImageSize::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Image {
    pub url: String,
    pub size: ImageSize,
}

/// Returns the URL of the image with the requested size class, if it has one.
pub fn image_of_size(images: &[Image], size: ImageSize) -> Option<&str> {
    images
        .iter()
        .find(|image| image.size == size && !image.url.is_empty())
        .map(|image| image.url.as_str())
}

/// The API lists images smallest first; the last non-empty entry wins.
pub fn largest_image(images: &[Image]) -> Option<&str> {
    images
        .iter()
        .rev()
        .find(|image| !image.url.is_empty())
        .map(|image| image.url.as_str())
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Artist {
    pub mbid: String,
    pub name: String,
    pub url: String,
    pub images: Vec<Image>,
    pub listeners: u64,
    pub playcount: u64,
    pub bio_summary: Option<String>,
    pub tags: Vec<String>,
}

impl Artist {
    pub fn key(&self) -> ArtistKey {
        ArtistKey {
            mbid: self.mbid.clone(),
            name: self.name.clone(),
        }
    }

    pub fn display_image(&self) -> &str {
        largest_image(&self.images).unwrap_or(PLACEHOLDER_IMAGE)
    }

    pub fn thumbnail(&self) -> Option<&str> {
        image_of_size(&self.images, ImageSize::Medium)
    }

    /// Biography with markup removed, or `None` when the API sent nothing usable.
    pub fn bio_text(&self) -> Option<String> {
        self.bio_summary
            .as_deref()
            .map(text::strip_markup)
            .filter(|bio| !bio.is_empty())
    }

}

/// Identifies an artist for the `artist.*` methods. Either part may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArtistKey {
    pub mbid: String,
    pub name: String,
}

impl ArtistKey {
    pub fn by_mbid(mbid: impl Into<String>) -> Self {
        Self {
            mbid: mbid.into(),
            name: String::new(),
        }
    }

    #[cfg(test)]
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            mbid: String::new(),
            name: name.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.mbid.trim().is_empty() && self.name.trim().is_empty()
    }

    /// Fills in whichever half is missing from a freshly fetched profile.
    pub fn merged_with(&self, artist: &Artist) -> Self {
        Self {
            mbid: if self.mbid.is_empty() {
                artist.mbid.clone()
            } else {
                self.mbid.clone()
            },
            name: if self.name.is_empty() {
                artist.name.clone()
            } else {
                self.name.clone()
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SimilarArtist {
    pub mbid: String,
    pub name: String,
    pub url: String,
    pub images: Vec<Image>,
    pub match_score: f64,
}

impl SimilarArtist {
    pub fn match_percent(&self) -> u32 {
        (self.match_score.clamp(0.0, 1.0) * 100.0).round() as u32
    }

    pub fn key(&self) -> ArtistKey {
        ArtistKey {
            mbid: self.mbid.clone(),
            name: self.name.clone(),
        }
    }
}

/// Everything the artist page renders, delivered as one unit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArtistDetail {
    pub artist: Artist,
    pub top_tracks: Vec<Track>,
    pub similar: Vec<SimilarArtist>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(url: &str, size: &str) -> Image {
        Image {
            url: url.to_string(),
            size: ImageSize::parse(size),
        }
    }

    #[test]
    fn largest_image_skips_trailing_blanks() {
        let images = vec![
            image("s.png", "small"),
            image("l.png", "large"),
            image("", "mega"),
        ];
        assert_eq!(largest_image(&images), Some("l.png"));
    }

    #[test]
    fn display_image_falls_back_to_placeholder() {
        let artist = Artist::default();
        assert_eq!(artist.display_image(), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn match_percent_rounds_and_clamps() {
        let mut similar = SimilarArtist {
            match_score: 0.876,
            ..Default::default()
        };
        assert_eq!(similar.match_percent(), 88);
        similar.match_score = 1.7;
        assert_eq!(similar.match_percent(), 100);
    }

    #[test]
    fn merged_key_keeps_explicit_parts() {
        let key = ArtistKey::by_mbid("abc");
        let artist = Artist {
            mbid: "other".into(),
            name: "Cher".into(),
            ..Default::default()
        };
        let merged = key.merged_with(&artist);
        assert_eq!(merged.mbid, "abc");
        assert_eq!(merged.name, "Cher");
    }
}
