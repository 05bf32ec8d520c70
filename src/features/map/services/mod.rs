pub mod credential_store;
pub mod filter_service;
pub mod gallery_service;
pub mod linker_service;
mod viewport_service;

pub use credential_store::{CredentialStore, FileCredentialStore};
pub use viewport_service::ViewportService;
