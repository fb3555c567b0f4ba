use crate::form::{
    output_name_or, DEFAULT_COVER_OUTPUT, DEFAULT_MERGE_OUTPUT, DEFAULT_ROTATE_OUTPUT,
    DEFAULT_WATERMARK_OUTPUT,
};
use crate::{
    CoverLetterFields, FileHandle, FileSelectionStore, OperationForms, OperationKind,
    OperationRequest, Slot,
};

/// Fewest files a merge accepts.
pub const MIN_MERGE_FILES: usize = 2;
/// Largest request body the service accepts.
pub const MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("select at least {required} PDF files to merge ({selected} selected)")]
    NotEnoughFiles { required: usize, selected: usize },
    #[error("select a PDF file for {kind}")]
    MissingFile { kind: OperationKind },
    #[error("{field} is required")]
    EmptyField { field: &'static str },
    #[error("pages per file must be a whole number of at least 1, got {value:?}")]
    InvalidPagesPerFile { value: String },
    #[error("selected files total {total} bytes, above the {limit} byte upload limit")]
    UploadTooLarge { total: u64, limit: u64 },
}

/// Gather the current inputs for `kind` and validate them locally.
///
/// Nothing here touches the network; an `Err` means no request is sent.
pub fn gather_request(
    kind: OperationKind,
    store: &FileSelectionStore,
    forms: &OperationForms,
) -> Result<OperationRequest, ValidationError> {
    let request = match kind {
        OperationKind::Merge => {
            let selection = store.selection(Slot::MergeFiles);
            if selection.len() < MIN_MERGE_FILES {
                return Err(ValidationError::NotEnoughFiles {
                    required: MIN_MERGE_FILES,
                    selected: selection.len(),
                });
            }
            OperationRequest::Merge {
                files: selection.handles().to_vec(),
                output_name: output_name_or(&forms.merge_output_name, DEFAULT_MERGE_OUTPUT),
            }
        }
        OperationKind::Watermark => {
            let file = single_file(store, kind)?;
            ensure_present(&forms.watermark_text, "watermark text")?;
            OperationRequest::Watermark {
                file,
                watermark_text: forms.watermark_text.clone(),
                output_name: output_name_or(
                    &forms.watermark_output_name,
                    DEFAULT_WATERMARK_OUTPUT,
                ),
            }
        }
        OperationKind::Extract => OperationRequest::Extract {
            file: single_file(store, kind)?,
        },
        OperationKind::Split => {
            let file = single_file(store, kind)?;
            let pages_per_file = parse_pages_per_file(&forms.pages_per_file)?;
            OperationRequest::Split {
                file,
                pages_per_file,
            }
        }
        OperationKind::Rotate => OperationRequest::Rotate {
            file: single_file(store, kind)?,
            angle: forms.rotate_angle,
            output_name: output_name_or(&forms.rotate_output_name, DEFAULT_ROTATE_OUTPUT),
        },
        OperationKind::CoverLetter => OperationRequest::CoverLetter(CoverLetterFields {
            name: required(&forms.cover_name, "name")?,
            position: required(&forms.cover_position, "position")?,
            company: required(&forms.cover_company, "company")?,
            email: optional(&forms.cover_email),
            phone: optional(&forms.cover_phone),
            output_name: output_name_or(&forms.cover_output_name, DEFAULT_COVER_OUTPUT),
        }),
    };

    let total = request.upload_size();
    if total > MAX_UPLOAD_BYTES {
        return Err(ValidationError::UploadTooLarge {
            total,
            limit: MAX_UPLOAD_BYTES,
        });
    }
    Ok(request)
}

fn single_file(store: &FileSelectionStore, kind: OperationKind) -> Result<FileHandle, ValidationError> {
    kind.slot()
        .and_then(|slot| store.selection(slot).first().cloned())
        .ok_or(ValidationError::MissingFile { kind })
}

// Whitespace-only values count as empty.
fn ensure_present(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    Ok(())
}

fn required(value: &str, field: &'static str) -> Result<String, ValidationError> {
    ensure_present(value, field)?;
    Ok(value.trim().to_string())
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn parse_pages_per_file(value: &str) -> Result<u32, ValidationError> {
    match value.trim().parse::<u32>() {
        Ok(pages) if pages >= 1 => Ok(pages),
        _ => Err(ValidationError::InvalidPagesPerFile {
            value: value.to_string(),
        }),
    }
}
