use follicle_core::error::CoreError;
use follicle_instruments::error::InstrumentError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("not ready for analysis: answer at least one stress question or attach a medical report")]
    NotReady,

    #[error(transparent)]
    Instrument(#[from] InstrumentError),

    #[error(transparent)]
    Core(#[from] CoreError),
}
