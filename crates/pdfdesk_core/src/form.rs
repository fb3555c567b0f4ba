use crate::RotationAngle;

/// Editable text fields of the operation forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    MergeOutputName,
    WatermarkText,
    WatermarkOutputName,
    PagesPerFile,
    RotateOutputName,
    CoverName,
    CoverPosition,
    CoverCompany,
    CoverEmail,
    CoverPhone,
    CoverOutputName,
}

impl FormField {
    pub const ALL: [FormField; 11] = [
        FormField::MergeOutputName,
        FormField::WatermarkText,
        FormField::WatermarkOutputName,
        FormField::PagesPerFile,
        FormField::RotateOutputName,
        FormField::CoverName,
        FormField::CoverPosition,
        FormField::CoverCompany,
        FormField::CoverEmail,
        FormField::CoverPhone,
        FormField::CoverOutputName,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::MergeOutputName => "merge.output_name",
            FormField::WatermarkText => "watermark.text",
            FormField::WatermarkOutputName => "watermark.output_name",
            FormField::PagesPerFile => "split.pages_per_file",
            FormField::RotateOutputName => "rotate.output_name",
            FormField::CoverName => "cover.name",
            FormField::CoverPosition => "cover.position",
            FormField::CoverCompany => "cover.company",
            FormField::CoverEmail => "cover.email",
            FormField::CoverPhone => "cover.phone",
            FormField::CoverOutputName => "cover.output_name",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.label().eq_ignore_ascii_case(label))
    }
}

pub(crate) const DEFAULT_MERGE_OUTPUT: &str = "merged.pdf";
pub(crate) const DEFAULT_WATERMARK_OUTPUT: &str = "watermarked.pdf";
pub(crate) const DEFAULT_ROTATE_OUTPUT: &str = "rotated.pdf";
pub(crate) const DEFAULT_COVER_OUTPUT: &str = "cover_letter.pdf";

/// Current values of every operation form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationForms {
    pub merge_output_name: String,
    pub watermark_text: String,
    pub watermark_output_name: String,
    /// Kept as typed text; parsed during validation.
    pub pages_per_file: String,
    pub rotate_angle: RotationAngle,
    pub rotate_output_name: String,
    pub cover_name: String,
    pub cover_position: String,
    pub cover_company: String,
    pub cover_email: String,
    pub cover_phone: String,
    pub cover_output_name: String,
}

impl Default for OperationForms {
    fn default() -> Self {
        Self {
            merge_output_name: DEFAULT_MERGE_OUTPUT.to_string(),
            watermark_text: String::new(),
            watermark_output_name: DEFAULT_WATERMARK_OUTPUT.to_string(),
            pages_per_file: "1".to_string(),
            rotate_angle: RotationAngle::default(),
            rotate_output_name: DEFAULT_ROTATE_OUTPUT.to_string(),
            cover_name: String::new(),
            cover_position: String::new(),
            cover_company: String::new(),
            cover_email: String::new(),
            cover_phone: String::new(),
            cover_output_name: DEFAULT_COVER_OUTPUT.to_string(),
        }
    }
}

impl OperationForms {
    pub fn set(&mut self, field: FormField, value: String) {
        *self.slot_mut(field) = value;
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::MergeOutputName => &self.merge_output_name,
            FormField::WatermarkText => &self.watermark_text,
            FormField::WatermarkOutputName => &self.watermark_output_name,
            FormField::PagesPerFile => &self.pages_per_file,
            FormField::RotateOutputName => &self.rotate_output_name,
            FormField::CoverName => &self.cover_name,
            FormField::CoverPosition => &self.cover_position,
            FormField::CoverCompany => &self.cover_company,
            FormField::CoverEmail => &self.cover_email,
            FormField::CoverPhone => &self.cover_phone,
            FormField::CoverOutputName => &self.cover_output_name,
        }
    }

    fn slot_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::MergeOutputName => &mut self.merge_output_name,
            FormField::WatermarkText => &mut self.watermark_text,
            FormField::WatermarkOutputName => &mut self.watermark_output_name,
            FormField::PagesPerFile => &mut self.pages_per_file,
            FormField::RotateOutputName => &mut self.rotate_output_name,
            FormField::CoverName => &mut self.cover_name,
            FormField::CoverPosition => &mut self.cover_position,
            FormField::CoverCompany => &mut self.cover_company,
            FormField::CoverEmail => &mut self.cover_email,
            FormField::CoverPhone => &mut self.cover_phone,
            FormField::CoverOutputName => &mut self.cover_output_name,
        }
    }
}

/// Blank output names fall back to the operation's default.
pub(crate) fn output_name_or(value: &str, default: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}
