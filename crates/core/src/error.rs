use thiserror::Error;

use crate::model::ThemeError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Theme(#[from] ThemeError),
}
