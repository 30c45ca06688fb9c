//! Extractors that reject bad input with a JSON [`ErrorResponse`](crate::ErrorResponse).

pub mod id_path;
pub mod query_params;
pub mod validated_json;

pub use id_path::IdPath;
pub use query_params::QueryParams;
pub use validated_json::ValidatedJson;
