//! Product File Data

use thiserror::Error;

use crate::domain::{files::records::ProductFileUuid, products::records::ProductUuid};

pub const MAX_FILE_NAME_LENGTH: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileValidationError {
    #[error("file name must be between 1 and 255 characters")]
    NameLength,

    #[error("file name must not contain path separators or control characters")]
    NameCharacters,
}

/// New Product File Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProductFile {
    pub uuid: ProductFileUuid,
    pub file_name: String,
    pub file_size: Option<u64>,
    pub file_type: Option<String>,
    pub is_preview: bool,
}

impl NewProductFile {
    /// Trim the name and content type and check the name is a bare file name.
    ///
    /// # Errors
    ///
    /// Returns [`FileValidationError`] when the name is empty, too long, or
    /// could escape the product's storage prefix.
    pub fn validated(self) -> Result<Self, FileValidationError> {
        let file_name = self.file_name.trim().to_string();

        if file_name.is_empty() || file_name.chars().count() > MAX_FILE_NAME_LENGTH {
            return Err(FileValidationError::NameLength);
        }

        if file_name == "."
            || file_name == ".."
            || file_name
                .chars()
                .any(|c| c == '/' || c == '\\' || c.is_control())
        {
            return Err(FileValidationError::NameCharacters);
        }

        let file_type = self
            .file_type
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        Ok(Self {
            file_name,
            file_type,
            ..self
        })
    }

    /// Object-store key for this file under `product`.
    #[must_use]
    pub fn storage_path(&self, product: ProductUuid) -> String {
        format!("products/{product}/{}-{}", self.uuid, self.file_name)
    }
}
