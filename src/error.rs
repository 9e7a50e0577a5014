use thiserror::Error;

use crate::button::ButtonState;

#[derive(Error, Debug)]
pub enum Error {
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("text rasterization failed: {0}")]
    TextRender(String),

    #[error("no clip rectangle for button state {0:?}")]
    MissingClip(ButtonState),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;
