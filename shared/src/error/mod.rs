//! Error system shared by the booking crates
//!
//! - [`ErrorCode`]: stable numeric codes for every failure the client reports
//! - [`ErrorCategory`]: classification of codes by range
//! - [`AppError`]: error with code, message and optional details
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::required("title");
//! assert_eq!(err.code, ErrorCode::RequiredField);
//! ```

mod category;
mod codes;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult};
