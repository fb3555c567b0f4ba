use crate::{OperationKind, OperationResult, TransportFailure, ValidationError};

/// Shown for a failed response that carries no `error` text.
pub const GENERIC_REQUEST_ERROR: &str = "Error processing request";
/// Prefixed to transport failure descriptions.
pub const TRANSPORT_ERROR_PREFIX: &str = "Request failed";
/// Height of the text preview pane.
pub const PREVIEW_VISIBLE_LINES: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Request,
    Transport,
}

/// What the result area currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResultPanel {
    #[default]
    Hidden,
    Success {
        kind: OperationKind,
        message: String,
        preview: Option<PreviewPane>,
    },
    Error {
        kind: OperationKind,
        category: ErrorCategory,
        message: String,
    },
}

impl ResultPanel {
    pub fn message(&self) -> Option<&str> {
        match self {
            ResultPanel::Hidden => None,
            ResultPanel::Success { message, .. } | ResultPanel::Error { message, .. } => {
                Some(message)
            }
        }
    }
}

/// Bounded-height, scrollable view over preview text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewPane {
    lines: Vec<String>,
    scroll: usize,
}

impl PreviewPane {
    pub fn new(text: &str) -> Self {
        Self {
            lines: text.lines().map(ToOwned::to_owned).collect(),
            scroll: 0,
        }
    }

    pub fn total_lines(&self) -> usize {
        self.lines.len()
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll
    }

    pub fn visible_lines(&self) -> &[String] {
        let end = (self.scroll + PREVIEW_VISIBLE_LINES).min(self.lines.len());
        &self.lines[self.scroll..end]
    }

    /// Returns `true` when the offset moved.
    pub fn scroll_by(&mut self, delta: isize) -> bool {
        let max = self.lines.len().saturating_sub(PREVIEW_VISIBLE_LINES);
        let next = self.scroll.saturating_add_signed(delta).min(max);
        let moved = next != self.scroll;
        self.scroll = next;
        moved
    }
}

pub fn present_result(kind: OperationKind, result: &OperationResult) -> ResultPanel {
    if !result.success {
        return ResultPanel::Error {
            kind,
            category: ErrorCategory::Request,
            message: non_blank(result.error.as_deref())
                .unwrap_or(GENERIC_REQUEST_ERROR)
                .to_string(),
        };
    }

    let message = non_blank(result.message.as_deref())
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| format!("{kind} completed"));
    let preview = match kind {
        OperationKind::Extract => result.preview.as_deref().map(PreviewPane::new),
        _ => None,
    };
    ResultPanel::Success {
        kind,
        message,
        preview,
    }
}

pub fn present_validation_error(kind: OperationKind, error: &ValidationError) -> ResultPanel {
    ResultPanel::Error {
        kind,
        category: ErrorCategory::Validation,
        message: error.to_string(),
    }
}

pub fn present_transport_failure(kind: OperationKind, failure: &TransportFailure) -> ResultPanel {
    ResultPanel::Error {
        kind,
        category: ErrorCategory::Transport,
        message: format!("{TRANSPORT_ERROR_PREFIX}: {}", failure.description),
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_result_without_error_uses_generic_text() {
        let panel = present_result(OperationKind::Rotate, &OperationResult::failed(None));
        assert_eq!(panel.message(), Some(GENERIC_REQUEST_ERROR));
    }

    #[test]
    fn preview_only_for_extract() {
        let result = OperationResult::succeeded("done").with_preview("page one");
        match present_result(OperationKind::Extract, &result) {
            ResultPanel::Success { preview, .. } => {
                assert_eq!(preview.unwrap().visible_lines(), ["page one".to_string()]);
            }
            other => panic!("unexpected panel {other:?}"),
        }
        match present_result(OperationKind::Merge, &result) {
            ResultPanel::Success { preview, .. } => assert!(preview.is_none()),
            other => panic!("unexpected panel {other:?}"),
        }
    }

    #[test]
    fn preview_scroll_is_bounded() {
        let text: String = (0..40).map(|i| format!("line {i}\n")).collect();
        let mut pane = PreviewPane::new(&text);
        assert_eq!(pane.visible_lines().len(), PREVIEW_VISIBLE_LINES);
        assert!(!pane.scroll_by(-3));
        assert!(pane.scroll_by(100));
        assert_eq!(pane.scroll_offset(), 40 - PREVIEW_VISIBLE_LINES);
        assert_eq!(pane.visible_lines().last().map(String::as_str), Some("line 39"));
    }

    #[test]
    fn transport_failure_keeps_description() {
        let panel = present_transport_failure(
            OperationKind::Split,
            &TransportFailure::new("connection refused"),
        );
        assert_eq!(panel.message(), Some("Request failed: connection refused"));
    }
}
