// Registry API client for the module listing
pub mod client;
pub mod retry;

// Re-export common types
pub use client::{ListingClient, ListingError};
pub use retry::RetryConfig;
