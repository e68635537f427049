//! layerforge Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the layerforge
//! solution scaffolder, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         layerforge-cli (CLI)            │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │            (ScaffoldService)            │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │  Driven: Toolchain, Filesystem, Progress│
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   layerforge-adapters (Infrastructure)  │
//! │ (DotnetToolchain, LocalFilesystem, etc) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (ScaffoldRequest, Layer, ScaffoldPlan)  │
//! │         No External Dependencies        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use layerforge_core::{application::ScaffoldService, domain::ScaffoldRequest};
//!
//! // 1. Describe the solution
//! let request = ScaffoldRequest::builder()
//!     .solution("Shop")
//!     .project("Shop")
//!     .infrastructure(true)
//!     .build()
//!     .unwrap();
//!
//! // 2. Use application service (with injected adapters)
//! let service = ScaffoldService::new(toolchain, filesystem);
//! service.scaffold(&request, "./output").unwrap();
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ScaffoldReport, ScaffoldService,
        ports::{Filesystem, ProgressReporter, ProjectToolchain},
    };
    pub use crate::domain::{
        Layer, LayerSet, Project, ProjectKind, ProjectName, ReferencePlan, ScaffoldPlan,
        ScaffoldRequest, SolutionName, Step,
    };
    pub use crate::error::{LayerforgeError, LayerforgeResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
