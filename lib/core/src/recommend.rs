use crate::{BallTree, Catalog};
use ahash::AHashSet;
use ordered_float::OrderedFloat;
use serde::Serialize;
use std::sync::Arc;

/// Extra candidates requested beyond `top_n` on every neighbor query.
///
/// Seeds and already-accepted tracks get filtered out of each seed's result
/// window, so we over-fetch to keep up to `top_n` genuinely new candidates in
/// play. This is a tuning heuristic, not a guarantee: under heavy dedup
/// pressure (many seeds with overlapping neighborhoods) the output may still
/// fall short of `top_n`, which is normal behavior.
pub const OVERFETCH_MARGIN: usize = 10;

/// A single ranked recommendation
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Recommendation {
    pub track_id: String,
    pub track_name: Option<String>,
    pub artist_name: Option<String>,
    pub genre: Option<String>,
    /// Euclidean feature distance, rounded to 4 decimals
    pub distance: f64,
    /// `(1 - distance) * 100`, rounded to 1 decimal
    pub similarity: f64,
}

/// Maps seed tracks to ranked nearest neighbors.
///
/// Holds the catalog and the neighbor index behind `Arc`s; both are loaded
/// once at startup and shared read-only across all requests.
pub struct RecommendationEngine {
    catalog: Arc<Catalog>,
    index: Arc<BallTree>,
}

impl RecommendationEngine {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, index: Arc<BallTree>) -> Self {
        Self { catalog, index }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Recommend up to `top_n` tracks similar to the given seeds.
    ///
    /// Seeds absent from the catalog are ignored; with no valid seed at all
    /// the result is empty, which the API layer reports as not-found. No seed
    /// id ever appears in the output and no track is recommended twice.
    /// Output is sorted ascending by distance, stable for ties.
    #[must_use]
    pub fn recommend(&self, seed_ids: &[String], top_n: usize) -> Vec<Recommendation> {
        // Normalize to valid, de-duplicated catalog rows, preserving order
        let mut seed_rows: Vec<usize> = Vec::with_capacity(seed_ids.len());
        let mut seen: AHashSet<&str> = AHashSet::with_capacity(seed_ids.len() + top_n);
        for id in seed_ids {
            if let Some(row) = self.catalog.row_of(id) {
                if seen.insert(self.track_id_at(row)) {
                    seed_rows.push(row);
                }
            }
        }

        if seed_rows.is_empty() || top_n == 0 {
            return Vec::new();
        }

        let k = top_n.saturating_add(OVERFETCH_MARGIN);
        let mut out: Vec<Recommendation> = Vec::with_capacity(top_n);

        'seeds: for &seed_row in &seed_rows {
            let Some(seed) = self.catalog.get(seed_row) else {
                continue;
            };
            // Per-seed results come back distance-ascending; the seed itself
            // shows up at distance zero and is skipped via the seen set.
            for (row, dist) in self.index.nearest(seed.features.as_slice(), k) {
                let Some(candidate) = self.catalog.get(row) else {
                    continue;
                };
                if !seen.insert(self.track_id_at(row)) {
                    continue;
                }

                let distance = round_to(f64::from(dist), 4);
                out.push(Recommendation {
                    track_id: candidate.song.track_id.clone(),
                    track_name: candidate.song.track_name.clone(),
                    artist_name: candidate.song.artist_name.clone(),
                    genre: candidate.song.genre.clone(),
                    distance,
                    similarity: round_to((1.0 - distance) * 100.0, 1),
                });

                if out.len() >= top_n {
                    break 'seeds;
                }
            }
        }

        // Per-seed order is ascending already; merge across seeds
        out.sort_by_key(|r| OrderedFloat(r.distance));
        out
    }

    #[inline]
    fn track_id_at(&self, row: usize) -> &str {
        self.catalog
            .get(row)
            .map(|e| e.song.track_id.as_str())
            .unwrap_or("")
    }
}

#[inline]
fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}
