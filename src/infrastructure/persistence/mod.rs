//! PostgreSQL repository implementations.
//!
//! Queries are prepared statements built with SQLx and decoded through
//! `FromRow`, so the crate compiles without a live database.
//!
//! # Repositories
//!
//! - [`PgMappingRepository`] - URL mapping storage, lookup and click counting

pub mod pg_mapping_repository;

pub use pg_mapping_repository::PgMappingRepository;
