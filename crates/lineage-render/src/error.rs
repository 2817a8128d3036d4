use lineage_yaml::EncodeError;
use thiserror::Error;

/// Why a document could not be rendered.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error("encoder panicked: {0}")]
    Panicked(String),
}
