#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # OLASimple Core
//!
//! Kit/sample id derivation and batch scheduling for the OLASimple diagnostic
//! workflow.
//!
//! ## Overview
//!
//! The lab-operations host owns the operator UI, persistence, and job
//! execution. This crate owns the deterministic parts: which samples belong to
//! which kit, and when enough pending operations exist to dispatch a batch.
//!
//! ## Module Organization
//!
//! - [`kit_ids`] - Kit/sample id codec, sample alias assignment, id propagation
//! - [`scheduling`] - Batch scheduler and kit resolution policies
//! - [`store`] - Host collaborator traits and in-memory implementations
//! - [`validation`] - Sample and package scan validation with retries
//! - [`models`] - Operation snapshots, statuses, identifiers
//! - [`config`] - Configuration loading and validation
//! - [`error`] - Structured error handling
//! - [`logging`] - Structured logging initialization and macros
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use olasimple_core::config::ConfigManager;
//! use olasimple_core::models::{Operation, OperationId, OperationTypeId};
//! use olasimple_core::scheduling::BatchScheduler;
//! use olasimple_core::store::{InMemoryJobDispatcher, InMemoryOperationStore};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = ConfigManager::load()?;
//! let store = Arc::new(InMemoryOperationStore::new());
//! let dispatcher = Arc::new(InMemoryJobDispatcher::new(Arc::clone(&store)));
//! let scheduler = BatchScheduler::new(manager.shared(), store, dispatcher);
//!
//! let op = Operation::new(OperationId(1), OperationTypeId(10)).with_kit("003");
//! let outcome = scheduler.schedule_same_kit_ops(op).await?;
//! println!("{outcome:?}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod kit_ids;
pub mod logging;
pub mod models;
pub mod scheduling;
pub mod store;
pub mod validation;

pub use config::{ConfigManager, OlaConfig};
pub use error::{AnnotationKind, OlaError, OlaResult};
pub use kit_ids::KitIdCodec;
pub use scheduling::{BatchScheduler, SchedulingOutcome};
