use std::path::Path;
use trackx_core::{BallTree, Error, FeatureMatrix, Result, Song};

/// Read the catalog table from a CSV file with a
/// `track_id,track_name,artist_name,genre` header. Empty cells become `None`.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<Song>> {
    let mut reader =
        csv::Reader::from_path(path.as_ref()).map_err(|e| Error::CatalogLoad(e.to_string()))?;

    let mut songs = Vec::new();
    for record in reader.deserialize() {
        let song: Song = record.map_err(|e| Error::CatalogLoad(e.to_string()))?;
        songs.push(song);
    }
    Ok(songs)
}

/// Write the catalog table, for offline artifact production and tests.
pub fn save_catalog<P: AsRef<Path>>(path: P, songs: &[Song]) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path.as_ref()).map_err(|e| Error::CatalogLoad(e.to_string()))?;
    for song in songs {
        writer
            .serialize(song)
            .map_err(|e| Error::CatalogLoad(e.to_string()))?;
    }
    writer
        .flush()
        .map_err(|e| Error::CatalogLoad(e.to_string()))?;
    Ok(())
}

/// Read the bincode-encoded feature matrix artifact.
pub fn load_features<P: AsRef<Path>>(path: P) -> Result<FeatureMatrix> {
    let data = std::fs::read(path.as_ref())?;
    bincode::deserialize(&data).map_err(|e| Error::Serialization(e.to_string()))
}

/// Write the feature matrix artifact (temp file + atomic rename).
pub fn save_features<P: AsRef<Path>>(path: P, matrix: &FeatureMatrix) -> Result<()> {
    write_bincode(path.as_ref(), matrix)
}

/// Read the bincode-encoded neighbor-model artifact.
pub fn load_model<P: AsRef<Path>>(path: P) -> Result<BallTree> {
    let data = std::fs::read(path.as_ref())?;
    bincode::deserialize(&data).map_err(|e| Error::ModelArtifact(e.to_string()))
}

/// Write the neighbor-model artifact (temp file + atomic rename).
pub fn save_model<P: AsRef<Path>>(path: P, tree: &BallTree) -> Result<()> {
    write_bincode(path.as_ref(), tree)
}

fn write_bincode<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let data = bincode::serialize(value).map_err(|e| Error::Serialization(e.to_string()))?;
    let temp_file = path.with_extension("tmp");
    std::fs::write(&temp_file, &data)?;
    std::fs::rename(&temp_file, path)?;
    Ok(())
}
