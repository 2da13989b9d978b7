pub type BoxofficeResult<T> = Result<T, BoxofficeError>;

#[derive(thiserror::Error, Debug)]
pub enum BoxofficeError {
    /// The request completed but the server answered with a non-success status.
    #[error("HTTP error {status} {status_text} from '{url}'")]
    Http {
        url: String,
        status: u16,
        status_text: String,
        body: String,
    },

    /// The request could not complete (DNS, refused connection, TLS, truncated body).
    #[error("network error: {0}")]
    Network(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("layout error: {0}")]
    Layout(String),

    #[error("render error: {0}")]
    Render(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BoxofficeError {
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// HTTP status carried by an [`BoxofficeError::Http`] failure.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
