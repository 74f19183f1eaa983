//! Shared HTTP plumbing: error envelope and request extractors

pub mod api_error;
pub mod id_path;
pub mod validated_json;

pub use api_error::{ApiError, ErrorBody, ErrorResponse};
pub use id_path::IdPath;
pub use validated_json::{ValidatedJson, ValidatedJsonRejection};
