use thiserror::Error;

use crate::filter::ParseDifficultyError;
use crate::model::{IdentityError, ParseKeyError};
use crate::session::SessionStateError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Identity(#[from] IdentityError),
    #[error(transparent)]
    Key(#[from] ParseKeyError),
    #[error(transparent)]
    Difficulty(#[from] ParseDifficultyError),
    #[error(transparent)]
    Session(#[from] SessionStateError),
}
