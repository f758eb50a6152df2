use thiserror::Error;

use crate::matrix::builder::MatrixError;
use crate::registry::store::RegistryError;

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Matrix(#[from] MatrixError),
}
