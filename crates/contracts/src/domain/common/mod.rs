pub mod de;
pub mod erp_document;

pub use erp_document::ErpDocument;
