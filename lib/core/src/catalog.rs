use crate::{Error, FeatureMatrix, Result, Song, Vector};
use ahash::AHashMap;
use serde::Serialize;

/// One catalog row: a song together with its feature vector.
///
/// Embedding both in one record is what keeps the metadata and the feature
/// matrix aligned; there is no second collection to drift out of sync.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub song: Song,
    pub features: Vector,
}

/// The in-memory song catalog: loaded once at startup, immutable afterwards.
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    by_id: AHashMap<String, usize>,
}

/// One page of the catalog listing
#[derive(Debug, Clone, Serialize)]
pub struct SongPage {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
    pub songs: Vec<Song>,
}

impl Catalog {
    /// Combine a song table and its feature matrix into one aligned store.
    ///
    /// Fails unless both have the same row count. Duplicate `track_id`s keep
    /// the first row for id lookup; later rows still appear in listings.
    pub fn new(songs: Vec<Song>, features: FeatureMatrix) -> Result<Self> {
        if songs.len() != features.rows() {
            return Err(Error::RowCountMismatch {
                songs: songs.len(),
                rows: features.rows(),
            });
        }

        let mut by_id = AHashMap::with_capacity(songs.len());
        let entries: Vec<CatalogEntry> = songs
            .into_iter()
            .enumerate()
            .map(|(row, song)| {
                by_id.entry(song.track_id.clone()).or_insert(row);
                CatalogEntry {
                    features: Vector::from_slice(features.row(row)),
                    song,
                }
            })
            .collect();

        Ok(Self { entries, by_id })
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Feature dimension, 0 for an empty catalog
    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.entries.first().map(|e| e.features.dim()).unwrap_or(0)
    }

    #[inline]
    #[must_use]
    pub fn get(&self, row: usize) -> Option<&CatalogEntry> {
        self.entries.get(row)
    }

    /// Row position of a track id, if present
    #[inline]
    #[must_use]
    pub fn row_of(&self, track_id: &str) -> Option<usize> {
        self.by_id.get(track_id).copied()
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, track_id: &str) -> bool {
        self.by_id.contains_key(track_id)
    }

    /// Songs in catalog order
    pub fn songs(&self) -> impl Iterator<Item = &Song> {
        self.entries.iter().map(|e| &e.song)
    }

    /// Paginate the catalog.
    ///
    /// `page` is 1-based; slicing is clipped to the catalog bounds, so an
    /// out-of-range page yields an empty `songs` list rather than an error.
    /// Callers validate `page >= 1` and `limit in [1, 100]` at the boundary.
    #[must_use]
    pub fn page(&self, page: usize, limit: usize) -> SongPage {
        let total = self.entries.len();
        let total_pages = total.div_ceil(limit.max(1));
        let start = (page.saturating_sub(1)).saturating_mul(limit).min(total);

        let songs = self.entries[start..]
            .iter()
            .take(limit)
            .map(|e| e.song.clone())
            .collect();

        SongPage {
            page,
            limit,
            total,
            total_pages,
            songs,
        }
    }

    /// Case-insensitive substring search over track and artist names.
    ///
    /// Preserves catalog order; missing fields never match.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Song> {
        let needle = query.to_lowercase();
        self.entries
            .iter()
            .map(|e| &e.song)
            .filter(|song| {
                field_matches(song.track_name.as_deref(), &needle)
                    || field_matches(song.artist_name.as_deref(), &needle)
            })
            .collect()
    }
}

#[inline]
fn field_matches(field: Option<&str>, needle: &str) -> bool {
    field
        .map(|v| v.to_lowercase().contains(needle))
        .unwrap_or(false)
}
