use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("stress item position {0} is outside 1..=10")]
    InvalidItemPosition(usize),

    #[error("stress item {position}: stored value {value} is outside [0, 4]")]
    InvalidItemValue { position: usize, value: u8 },

    #[error("{factor}: value {value} is outside [{min}, {max}]")]
    InvalidFactorValue {
        factor: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    #[error("File type '{extension}' not supported. Allowed types: {allowed}")]
    UnsupportedFileType { extension: String, allowed: String },

    #[error("File size ({size_mb:.1} MB) exceeds maximum allowed size (16 MB)")]
    FileTooLarge { size_mb: f64 },

    #[error("manual report text is empty")]
    EmptyReport,

    #[error("report I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Whether this error came from a local upload check (type, size, empty text).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CoreError::UnsupportedFileType { .. }
                | CoreError::FileTooLarge { .. }
                | CoreError::EmptyReport
        )
    }
}
