pub mod json_body;
pub mod query_params;
pub mod record_id;

pub use json_body::JsonBody;
pub use query_params::QueryParams;
pub use record_id::RecordId;
