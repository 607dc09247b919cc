use serde::{Deserialize, Serialize};

/// A single catalog row.
///
/// Name, artist and genre are optional because the source table may carry
/// empty cells; a missing field serializes as JSON null and never matches a
/// search query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Song {
    pub track_id: String,
    #[serde(default)]
    pub track_name: Option<String>,
    #[serde(default)]
    pub artist_name: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
}

impl Song {
    #[inline]
    #[must_use]
    pub fn new(track_id: impl Into<String>) -> Self {
        Self {
            track_id: track_id.into(),
            track_name: None,
            artist_name: None,
            genre: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_track_name(mut self, name: impl Into<String>) -> Self {
        self.track_name = Some(name.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_artist_name(mut self, name: impl Into<String>) -> Self {
        self.artist_name = Some(name.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }
}
