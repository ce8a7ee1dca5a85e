use thiserror::Error;

/// Errors that abort a document render.
#[derive(Debug, Error)]
pub enum Error {
    /// The output sink failed; partial output is not rolled back.
    #[error("failed to write output: {0}")]
    Write(#[from] std::io::Error),

    /// A render routine gave up on a block.
    #[error("failed to render @{id}: {message}")]
    Render { id: String, message: String },

    /// A serialized comment AST could not be read or written.
    #[error("invalid comment AST: {0}")]
    Ast(#[from] serde_json::Error),
}

impl Error {
    pub fn render(id: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Render {
            id: id.into(),
            message: message.into(),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
