use crate::codec::CodecError;
use crate::script::ScriptError;
use crate::surface::SurfaceError;
use thiserror::Error;

pub type AppResult<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    Script(#[from] ScriptError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("usage: {0}")]
    Usage(String),
}
