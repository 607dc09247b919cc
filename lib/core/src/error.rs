use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid vector dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    #[error("Catalog misaligned: {songs} songs but {rows} feature rows")]
    RowCountMismatch { songs: usize, rows: usize },

    #[error("Neighbor index misaligned: catalog has {catalog} rows, index has {index}")]
    IndexSizeMismatch { catalog: usize, index: usize },

    #[error("Catalog load error: {0}")]
    CatalogLoad(String),

    #[error("Model artifact error: {0}")]
    ModelArtifact(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}
