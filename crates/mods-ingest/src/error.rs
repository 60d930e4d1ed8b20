use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("dataset has no recognizable id column")]
    MissingIdColumn,
    #[error("control row {row} is past the end of the dataset ({total} rows)")]
    ControlRowOutOfRange { row: usize, total: usize },
}
