use crate::error::UploadError;
use reqwest::multipart::{Form, Part};
use std::path::{Path, PathBuf};

pub const EXCEL_FIELD: &str = "excel";
pub const TEMPLATE_FIELD: &str = "template";

/// Current values of the upload form, as edited in the window.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub excel: Option<PathBuf>,
    pub template: Option<PathBuf>,
}

impl FormState {
    /// Freeze the current field values into a payload for one submission.
    pub fn snapshot(&self) -> FormPayload {
        let fields = [(EXCEL_FIELD, &self.excel), (TEMPLATE_FIELD, &self.template)]
            .into_iter()
            .filter_map(|(name, path)| {
                path.as_ref().map(|path| FormField {
                    name: name.to_string(),
                    path: path.clone(),
                })
            })
            .collect();
        FormPayload { fields }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub path: PathBuf,
}

/// Immutable snapshot of the form taken when the user submits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPayload {
    fields: Vec<FormField>,
}

impl FormPayload {
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Read every selected file and encode the payload as multipart form data.
    pub async fn into_multipart(self) -> Result<Form, UploadError> {
        let mut form = Form::new();
        for field in self.fields {
            let bytes = tokio::fs::read(&field.path)
                .await
                .map_err(|source| UploadError::ReadFile {
                    path: field.path.clone(),
                    source,
                })?;
            let part = Part::bytes(bytes)
                .file_name(file_name(&field.path))
                .mime_str(content_type_for(&field.path))?;
            form = form.part(field.name, part);
        }
        Ok(form)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Content type a browser would label the file with, keyed on its extension.
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "xls" => "application/vnd.ms-excel",
        "csv" => "text/csv",
        _ => "application/octet-stream",
    }
}
