use follicle_core::error::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InstrumentError {
    #[error("question {position}: selection {selected} is not one of the 5 response options")]
    InvalidSelection { position: usize, selected: u8 },

    #[error("{0} is not a yes/no question")]
    NotBinary(&'static str),

    #[error(transparent)]
    Core(#[from] CoreError),
}
