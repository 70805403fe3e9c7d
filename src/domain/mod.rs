//! Domain layer: entities, repository contracts and click processing.
//!
//! - [`entities`] - The [`entities::UrlMapping`] data model
//! - [`repositories`] - Storage trait implemented by the infrastructure layer
//! - [`click_event`] - Click tracking event model
//! - [`click_worker`] - Asynchronous click counter worker
//!
//! # Click Processing Flow
//!
//! 1. [`crate::application::services::RedirectService::resolve`] finds the mapping
//! 2. A [`click_event::ClickEvent`] is pushed to a bounded channel
//! 3. [`click_worker::run_click_worker`] applies the increment with retry logic
//! 4. The counter is bumped atomically via [`repositories::MappingRepository`]

pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod repositories;
