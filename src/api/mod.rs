//! REST API module.
//!
//! Contains all API routes and handlers following the mobile client contract.

mod reports;
mod status;

pub use reports::*;
pub use status::*;

use crate::errors::AppError;

/// Response type for handlers: a JSON-serializable success or an [`AppError`].
pub type ApiResult<T> = Result<T, AppError>;
