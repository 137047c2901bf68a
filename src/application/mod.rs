//! Application layer: services and use cases
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod assets;
pub mod error;
pub mod error_ext;
pub mod services;
pub mod view;

pub use assets::{photo_url, PhotoResolver};
pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use view::ViewState;
