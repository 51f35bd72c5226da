//! Telos Neural - Deterministic neural-metrics assessment engine
//!
//! Neural turns raw behavioral wellness events into six neural metrics through a
//! deterministic pipeline: input validation → metric calculation → pathway
//! mapping → vulnerability detection → tiered recommendations.
//!
//! ## Modules
//!
//! - **Assessment**: The stateless scoring engine
//! - **History / Store**: Rolling per-user event history and persistence interfaces
//! - **Service**: Per-user submissions, assessment log and progress tracking

pub mod assessment;
pub mod config;
pub mod error;
pub mod history;
pub mod service;
pub mod store;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use assessment::{assess, assess_json, AssessmentReport, Assessor, RawAssessmentInput};
pub use config::AssessmentConfig;
pub use error::AssessmentError;
pub use history::EventHistory;
pub use service::{NeuralService, ProgressReport};
pub use store::{AssessmentRecord, AssessmentStore, EventStore, MemoryStore};

/// Neural version reported by the CLI and FFI
pub const NEURAL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name reported by the CLI
pub const PRODUCER_NAME: &str = "telos-neural";
