use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Engine refused to create a canvas for the offered surface.
///
/// The view keeps an invalid handle after this; later frame and scene calls are
/// dropped until a new surface arrives.
#[derive(Debug, Error)]
#[error("render engine could not create a canvas")]
pub struct CreationError {
    #[source]
    source: BoxError,
}

impl CreationError {
    pub fn new(source: impl Into<BoxError>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn into_source(self) -> BoxError {
        self.source
    }
}
