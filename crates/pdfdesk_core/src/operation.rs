use std::fmt;

use crate::{FileHandle, Slot};

/// Monotonic identifier assigned to each submission.
pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OperationKind {
    Merge,
    Watermark,
    Extract,
    Split,
    Rotate,
    CoverLetter,
}

impl OperationKind {
    pub const ALL: [OperationKind; 6] = [
        OperationKind::Merge,
        OperationKind::Watermark,
        OperationKind::Extract,
        OperationKind::Split,
        OperationKind::Rotate,
        OperationKind::CoverLetter,
    ];

    pub fn endpoint(self) -> &'static str {
        match self {
            OperationKind::Merge => "/api/merge",
            OperationKind::Watermark => "/api/watermark",
            OperationKind::Extract => "/api/extract",
            OperationKind::Split => "/api/split",
            OperationKind::Rotate => "/api/rotate",
            OperationKind::CoverLetter => "/api/cover-letter",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OperationKind::Merge => "merge",
            OperationKind::Watermark => "watermark",
            OperationKind::Extract => "extract",
            OperationKind::Split => "split",
            OperationKind::Rotate => "rotate",
            OperationKind::CoverLetter => "cover-letter",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(label))
    }

    /// Input slot read by this kind; `None` for the metadata-only kind.
    pub fn slot(self) -> Option<Slot> {
        match self {
            OperationKind::Merge => Some(Slot::MergeFiles),
            OperationKind::Watermark => Some(Slot::WatermarkFile),
            OperationKind::Extract => Some(Slot::ExtractFile),
            OperationKind::Split => Some(Slot::SplitFile),
            OperationKind::Rotate => Some(Slot::RotateFile),
            OperationKind::CoverLetter => None,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Clockwise page rotation accepted by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationAngle {
    #[default]
    Deg90,
    Deg180,
    Deg270,
}

impl RotationAngle {
    pub fn degrees(self) -> u16 {
        match self {
            RotationAngle::Deg90 => 90,
            RotationAngle::Deg180 => 180,
            RotationAngle::Deg270 => 270,
        }
    }

    pub fn from_degrees(degrees: u16) -> Option<Self> {
        match degrees {
            90 => Some(RotationAngle::Deg90),
            180 => Some(RotationAngle::Deg180),
            270 => Some(RotationAngle::Deg270),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverLetterFields {
    pub name: String,
    pub position: String,
    pub company: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub output_name: String,
}

/// One submission, built fresh from the current selections and form fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationRequest {
    Merge {
        files: Vec<FileHandle>,
        output_name: String,
    },
    Watermark {
        file: FileHandle,
        watermark_text: String,
        output_name: String,
    },
    Extract {
        file: FileHandle,
    },
    Split {
        file: FileHandle,
        pages_per_file: u32,
    },
    Rotate {
        file: FileHandle,
        angle: RotationAngle,
        output_name: String,
    },
    CoverLetter(CoverLetterFields),
}

impl OperationRequest {
    pub fn kind(&self) -> OperationKind {
        match self {
            OperationRequest::Merge { .. } => OperationKind::Merge,
            OperationRequest::Watermark { .. } => OperationKind::Watermark,
            OperationRequest::Extract { .. } => OperationKind::Extract,
            OperationRequest::Split { .. } => OperationKind::Split,
            OperationRequest::Rotate { .. } => OperationKind::Rotate,
            OperationRequest::CoverLetter(_) => OperationKind::CoverLetter,
        }
    }

    pub fn endpoint(&self) -> &'static str {
        self.kind().endpoint()
    }

    /// Whether the request goes out as a multipart form.
    pub fn is_multipart(&self) -> bool {
        !matches!(self, OperationRequest::CoverLetter(_))
    }

    /// File parts as `(form field, handle)` in submission order.
    pub fn file_parts(&self) -> Vec<(&'static str, &FileHandle)> {
        match self {
            OperationRequest::Merge { files, .. } => {
                files.iter().map(|file| ("files", file)).collect()
            }
            OperationRequest::Watermark { file, .. }
            | OperationRequest::Extract { file }
            | OperationRequest::Split { file, .. }
            | OperationRequest::Rotate { file, .. } => vec![("file", file)],
            OperationRequest::CoverLetter(_) => Vec::new(),
        }
    }

    /// Text parts as `(form field, value)`.
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            OperationRequest::Merge { output_name, .. } => {
                vec![("output_name", output_name.clone())]
            }
            OperationRequest::Watermark {
                watermark_text,
                output_name,
                ..
            } => vec![
                ("watermark_text", watermark_text.clone()),
                ("output_name", output_name.clone()),
            ],
            OperationRequest::Extract { .. } => Vec::new(),
            OperationRequest::Split { pages_per_file, .. } => {
                vec![("pages_per_file", pages_per_file.to_string())]
            }
            OperationRequest::Rotate {
                angle, output_name, ..
            } => vec![
                ("angle", angle.degrees().to_string()),
                ("output_name", output_name.clone()),
            ],
            OperationRequest::CoverLetter(fields) => {
                let mut out = vec![
                    ("name", fields.name.clone()),
                    ("position", fields.position.clone()),
                    ("company", fields.company.clone()),
                ];
                if let Some(email) = &fields.email {
                    out.push(("email", email.clone()));
                }
                if let Some(phone) = &fields.phone {
                    out.push(("phone", phone.clone()));
                }
                out.push(("output_name", fields.output_name.clone()));
                out
            }
        }
    }

    pub fn upload_size(&self) -> u64 {
        self.file_parts()
            .into_iter()
            .map(|(_, file)| file.size())
            .sum()
    }
}
