use std::fmt;
use std::path::PathBuf;

use pdfdesk_core::{Msg, OperationKind, OperationResult, RequestId, TransportFailure};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ProgressTick {
        generation: u64,
    },
    ProgressSettled {
        generation: u64,
    },
    Response {
        request_id: RequestId,
        kind: OperationKind,
        outcome: Result<OperationResult, TransportError>,
    },
    DownloadFinished {
        filename: String,
        result: Result<PathBuf, DownloadError>,
    },
}

impl EngineEvent {
    /// Translate into the core message that carries the same information.
    pub fn into_msg(self) -> Msg {
        match self {
            EngineEvent::ProgressTick { generation } => Msg::ProgressTick { generation },
            EngineEvent::ProgressSettled { generation } => Msg::ProgressSettled { generation },
            EngineEvent::Response {
                request_id,
                kind,
                outcome,
            } => Msg::ResponseArrived {
                request_id,
                kind,
                outcome: outcome.map_err(|err| TransportFailure::new(err.to_string())),
            },
            EngineEvent::DownloadFinished { filename, result } => Msg::DownloadFinished {
                filename,
                result: result.map_err(|err| err.to_string()),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct TransportError {
    pub kind: FailureKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    Network,
    Timeout,
    HttpStatus(u16),
    MalformedResponse,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    FileRead,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::MalformedResponse => write!(f, "malformed response"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::FileRead => write!(f, "could not read input file"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DownloadError {
    #[error("retrieval failed: {0}")]
    Transport(#[from] TransportError),
    #[error("could not save artifact: {0}")]
    Persist(String),
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to build service client: {0}")]
    Service(#[from] TransportError),
}
