/// Interpreted service response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OperationResult {
    pub success: bool,
    pub message: Option<String>,
    pub filename: Option<String>,
    pub filenames: Option<Vec<String>>,
    pub preview: Option<String>,
    pub error: Option<String>,
}

/// Artifacts a successful result asks the client to retrieve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artifacts {
    None,
    One(String),
    Many(Vec<String>),
}

impl OperationResult {
    pub fn succeeded(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn failed(error: Option<String>) -> Self {
        Self {
            success: false,
            error,
            ..Self::default()
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn with_filenames(mut self, filenames: Vec<String>) -> Self {
        self.filenames = Some(filenames);
        self
    }

    pub fn with_preview(mut self, preview: impl Into<String>) -> Self {
        self.preview = Some(preview.into());
        self
    }

    /// `filenames` wins when a response carries both.
    pub fn artifacts(&self) -> Artifacts {
        if !self.success {
            return Artifacts::None;
        }
        match (&self.filename, &self.filenames) {
            (_, Some(names)) if !names.is_empty() => Artifacts::Many(names.clone()),
            (Some(name), _) if !name.is_empty() => Artifacts::One(name.clone()),
            _ => Artifacts::None,
        }
    }
}

/// Network or parse failure, carried as a description so the core stays IO-free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportFailure {
    pub description: String,
}

impl TransportFailure {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

pub type SubmissionOutcome = Result<OperationResult, TransportFailure>;
