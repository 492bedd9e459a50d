pub mod errors;
pub mod state;

pub use errors::{ok, ApiError, ApiResult};
pub use state::AppState;
