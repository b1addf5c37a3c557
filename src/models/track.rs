/// The artist a track belongs to, as embedded in track payloads.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArtistRef {
    pub name: String,
    pub mbid: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Track {
    pub name: String,
    pub url: String,
    pub playcount: u64,
    pub listeners: u64,
    pub artist: ArtistRef,
}

impl Track {
    pub fn label(&self) -> String {
        if self.artist.name.is_empty() {
            self.name.clone()
        } else {
            format!("{} - {}", self.artist.name, self.name)
        }
    }
}
