//! Product File Records

use jiff::Timestamp;

use crate::{domain::products::records::ProductUuid, uuids::TypedUuid};

/// Product File UUID
pub type ProductFileUuid = TypedUuid<ProductFileRecord>;

/// Product File Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFileRecord {
    pub uuid: ProductFileUuid,
    pub product_uuid: ProductUuid,
    pub file_name: String,

    /// Object-store key, assigned by the server.
    pub file_path: String,
    pub file_size: Option<u64>,
    pub file_type: Option<String>,

    /// Sample content shown before purchase.
    pub is_preview: bool,
    pub created_at: Timestamp,
}
