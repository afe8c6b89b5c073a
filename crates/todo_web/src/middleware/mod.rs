pub mod request_log;

pub use request_log::{extract_request_id, RequestId, RequestLog};
