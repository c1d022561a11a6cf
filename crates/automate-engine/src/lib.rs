//! Automate Engine -- configuration, the reload queue, and the group
//! scheduler.
//!
//! The host drives an [`AutomationEngine`] with three calls:
//!
//! - [`AutomationEngine::on_tile_changed`] whenever a placement or removal
//!   touches a location.
//! - [`AutomationEngine::update`] once per host tick; every
//!   `automation_interval` ticks it rebuilds queued locations and processes
//!   every group.
//! - [`AutomationEngine::reset`] at day start or when automation is turned
//!   off.
//!
//! ```rust,ignore
//! let registry = Arc::new(HookRegistry::new());
//! automate_machines::register_standard(&registry);
//! let mut engine = AutomationEngine::new(AutomateConfig::load(path)?, registry);
//! for tick in 0.. {
//!     engine.update(&world, tick);
//! }
//! ```

pub mod config;
pub mod engine;
pub mod reload_queue;

pub use config::{AutomateConfig, ConfigError, Format};
pub use engine::{AutomationEngine, CycleReport};
pub use reload_queue::ReloadQueue;
