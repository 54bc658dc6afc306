mod auth;
pub mod client;
mod payments;
pub mod refresh;
pub mod session;
pub mod types;
pub mod upload;
mod videos;

pub use client::*;
pub use refresh::RefreshCoordinator;
pub use session::{ObserverId, Session, SessionStore};
pub use types::*;
pub use upload::{validate_upload, ProgressCallback, UploadFile, UploadRejection};

#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod test_support;
