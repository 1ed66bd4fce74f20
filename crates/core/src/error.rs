#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid error code table: {0}")]
    InvalidCodeTable(String),

    #[error("Invalid page size: {0} (must be at least 1)")]
    InvalidPageSize(i64),
}
