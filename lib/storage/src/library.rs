use crate::artifacts::{load_catalog, load_features, load_model};
use std::path::Path;
use std::sync::Arc;
use trackx_core::{BallTree, Catalog, Error, RecommendationEngine, Result};

/// Catalog table file name inside the data directory
pub const CATALOG_FILE: &str = "songs.csv";
/// Feature matrix artifact file name
pub const FEATURES_FILE: &str = "features.bin";
/// Neighbor-model artifact file name
pub const MODEL_FILE: &str = "knn.model";

/// Everything the server shares across requests: the catalog and the
/// recommendation engine over it.
///
/// Loaded once before the server accepts traffic; any load failure is fatal
/// to startup. Immutable afterwards, so requests share it via `Arc` with no
/// locking.
pub struct Library {
    catalog: Arc<Catalog>,
    engine: RecommendationEngine,
}

impl Library {
    /// Load and validate all three artifacts from `data_dir`.
    pub fn load<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let dir = data_dir.as_ref();

        let songs = load_catalog(dir.join(CATALOG_FILE))?;
        let features = load_features(dir.join(FEATURES_FILE))?;
        let index = load_model(dir.join(MODEL_FILE))?;

        let catalog = Arc::new(Catalog::new(songs, features)?);
        Self::from_parts(catalog, Arc::new(index))
    }

    /// Assemble from already-built parts, enforcing the alignment invariant
    /// between the catalog and the neighbor index.
    pub fn from_parts(catalog: Arc<Catalog>, index: Arc<BallTree>) -> Result<Self> {
        if index.len() != catalog.len() {
            return Err(Error::IndexSizeMismatch {
                catalog: catalog.len(),
                index: index.len(),
            });
        }
        if !catalog.is_empty() && index.dim() != catalog.dim() {
            return Err(Error::InvalidDimension {
                expected: catalog.dim(),
                actual: index.dim(),
            });
        }

        Ok(Self {
            engine: RecommendationEngine::new(catalog.clone(), index),
            catalog,
        })
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn engine(&self) -> &RecommendationEngine {
        &self.engine
    }
}
