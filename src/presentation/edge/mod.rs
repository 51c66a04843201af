mod api_error;
mod edge_handler;
mod fields;

pub use api_error::{ApiError, ErrorResponse};
pub use edge_handler::{EdgeHandler, edge_route, serve_edge};
pub use fields::{parse_id, present};
