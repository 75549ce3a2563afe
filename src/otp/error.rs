use thiserror::Error;

/// Everything that can go wrong while talking to the OTP service
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OtpError {
    /// Input rejected before any request was made
    #[error("{0}")]
    Validation(String),

    /// Connection refused, DNS failure or timeout
    #[error("Unable to connect to server. Please check if the server is running.")]
    Unreachable,

    /// The request went out but the exchange itself failed
    #[error("{0}")]
    Transport(String),

    /// The server answered and said no
    #[error("{message}")]
    Rejected {
        status: Option<u16>,
        message: String,
    },
}

impl OtpError {
    pub(crate) fn validation(message: &str) -> Self {
        OtpError::Validation(message.to_string())
    }

    /// Short title for the toast that reports this error
    pub fn title(&self) -> &'static str {
        match self {
            OtpError::Validation(_) => "Invalid Input",
            OtpError::Unreachable | OtpError::Transport(_) => "Connection Problem",
            OtpError::Rejected { .. } => "Request Failed",
        }
    }
}

impl From<reqwest::Error> for OtpError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            OtpError::Unreachable
        } else {
            OtpError::Transport(e.to_string())
        }
    }
}
