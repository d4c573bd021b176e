use sirius_types::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AccountError {
    #[error(transparent)]
    Model(#[from] ModelError),
}
