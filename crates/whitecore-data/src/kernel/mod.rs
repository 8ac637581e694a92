//! # WhiteCore Kernel
//!
//! The `kernel` module hosts the process-level pieces the data service runs
//! inside of.
//!
//! ## Key Responsibilities & Components:
//!
//! - **Application Lifecycle**: [`Application`](bootstrap::Application) owns
//!   the configuration and the module registry, and drives components through
//!   initialize, start and shutdown.
//! - **Service Location**: the [`KernelComponent`](component::KernelComponent)
//!   trait and the [`ModuleRegistry`](component::ModuleRegistry) through which
//!   components and plugins request shared infrastructure.
//! - **Simulation Base**: [`SimulationBase`](simulation::SimulationBase) supplies
//!   the default data directory used by file-based storage connectors.
//! - **Constants** and **Error Handling** (`constants`, `error`).
pub mod bootstrap;
pub mod component;
pub mod constants;
pub mod error;
pub mod simulation;

pub use bootstrap::Application;
pub use component::{KernelComponent, KernelContext, ModuleRegistry};
pub use error::{Error, Result};
pub use simulation::SimulationBase;
