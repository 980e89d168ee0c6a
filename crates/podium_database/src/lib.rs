//! PostgreSQL persistence for speaker records.
//!
//! # Features
//!
//! - Diesel schema and row models for the `speakers` table
//! - [`PostgresSpeakerRepository`], an r2d2-pooled `SpeakerRepository`
//! - Embedded migrations
//!
//! The image column is stored exactly as `ImageReference::to_stored` renders
//! it and re-classified on every read.
//!
//! # Example
//!
//! ```rust,ignore
//! use podium_database::{establish_pool, PostgresSpeakerRepository};
//! use podium_interface::{SpeakerFilter, SpeakerRepository};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let repo = PostgresSpeakerRepository::new(establish_pool()?);
//! let speakers = repo.list(SpeakerFilter::activity(3)).await?;
//! # Ok(())
//! # }
//! ```

mod connection;
mod models;
mod speaker_repository;

pub mod schema;

pub use connection::{establish_pool, run_migrations, PgPool};
pub use models::{SpeakerColumns, SpeakerRow};
pub use speaker_repository::PostgresSpeakerRepository;
