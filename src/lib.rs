//! Purrr.love SDK for Rust.
//!
//! A typed client for the Purrr.love virtual cat platform API.
//!
//! # What This SDK Provides
//!
//! - High-level typed client: [`PurrrClient`]
//! - Low-level request executor: [`Executor`]
//! - Strong domain models for cats, trading offers, shows, API keys and more
//! - A closed error taxonomy: [`PurrrError`] / [`ErrorKind`]
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use purrr_love_sdk::{ClientConfig, PurrrClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), purrr_love_sdk::PurrrError> {
//!     let client = PurrrClient::new(ClientConfig::default().with_api_key("your-api-key"))?;
//!
//!     for cat in client.get_cats(50, 0).await? {
//!         println!("{} the {} ({})", cat.name, cat.breed, cat.mood);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Common Tasks
//!
//! ## Create a Cat and Play With It
//!
//! ```rust,no_run
//! use purrr_love_sdk::{CatBreed, GameType, NewCat, PersonalityType, PurrrClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), purrr_love_sdk::PurrrError> {
//!     let client = PurrrClient::from_env()?;
//!
//!     let new_cat = NewCat::new("Whiskers", "cat", PersonalityType::Playful)
//!         .breed(CatBreed::Bengal);
//!     let cat = client.create_cat(&new_cat).await?;
//!     let result = client.play_with_cat(cat.id, GameType::LaserPointer, 10).await?;
//!     println!("play result: {result}");
//!     Ok(())
//! }
//! ```
//!
//! ## Raw Requests
//!
//! Endpoints without a typed wrapper go through the executor directly:
//!
//! ```rust,no_run
//! use purrr_love_sdk::{Executor, ClientConfig, Method, QueryParams};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), purrr_love_sdk::PurrrError> {
//!     let executor = Executor::new(ClientConfig::from_env())?;
//!     let query = QueryParams::new().push("timeframe", "7d");
//!     let envelope = executor
//!         .execute(Method::Get, "/api/v1/cats/7/health", None, Some(&query))
//!         .await?;
//!     println!("{}", envelope.into_payload());
//!     Ok(())
//! }
//! ```
//!
//! # Logging
//!
//! This crate emits debug-level logs through the [`log`](https://docs.rs/log/) facade
//! for every request and client call. Configure any compatible logger in your binary,
//! then set `RUST_LOG=debug` to inspect request flow. API keys are never logged.
//!
//! # Errors
//!
//! All fallible operations return [`PurrrError`]. Every call yields either a decoded
//! payload or exactly one error:
//!
//! - `401` is always [`PurrrError::Authentication`]
//! - `429` is [`PurrrError::RateLimit`] with a `retry_after` hint (default 60 seconds)
//! - any other failed status is [`PurrrError::Api`]; [`PurrrError::into_specific`]
//!   maps it onto the status-specific variant
//! - transport failures are [`PurrrError::Network`]
//!
//! The SDK never retries. [`PurrrError::is_retryable`] tells callers which errors
//! are worth retrying.
pub mod client;
pub mod config;
pub mod errors;
pub mod executor;
pub mod models;

// Re-export primary types for convenience.
pub use client::PurrrClient;
pub use config::ClientConfig;
pub use errors::{classify, Details, ErrorKind, PurrrError};
pub use executor::{Executor, Method, QueryParams, ResponseEnvelope};
pub use models::*;
