//! Product File Responses

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_app::domain::files::records::ProductFileRecord;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductFileResponse {
    pub uuid: Uuid,

    pub product_uuid: Uuid,

    pub file_name: String,

    /// Object-store key the file's bytes are uploaded to
    pub file_path: String,

    /// Size in bytes, when known
    pub file_size: Option<u64>,

    /// Media type, e.g. `application/zip`
    pub file_type: Option<String>,

    /// Whether the file is sample content
    pub is_preview: bool,

    pub created_at: String,
}

impl From<ProductFileRecord> for ProductFileResponse {
    fn from(file: ProductFileRecord) -> Self {
        Self {
            uuid: file.uuid.into_uuid(),
            product_uuid: file.product_uuid.into_uuid(),
            file_name: file.file_name,
            file_path: file.file_path,
            file_size: file.file_size,
            file_type: file.file_type,
            is_preview: file.is_preview,
            created_at: file.created_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductFilesResponse {
    pub files: Vec<ProductFileResponse>,
}

impl FromIterator<ProductFileRecord> for ProductFilesResponse {
    fn from_iter<I: IntoIterator<Item = ProductFileRecord>>(records: I) -> Self {
        Self {
            files: records.into_iter().map(Into::into).collect(),
        }
    }
}
