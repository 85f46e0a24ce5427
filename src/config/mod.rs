//! Policy configuration for the split engine.
//!
//! This module loads the apportionment policy (rounding default, leave
//! crediting and per-expense-type defaults) from YAML.
//!
//! # Example
//!
//! ```no_run
//! use split_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config").unwrap();
//! println!("Home leave threshold: {}", config.policy().leave.home_threshold_days);
//! ```

mod loader;
mod types;

pub use loader::{ConfigLoader, POLICY_FILE_NAME};
pub use types::{
    AirConditionerPolicy, ElectricityPolicy, HostPolicy, LeavePolicy, PolicyConfig,
    RoundingPolicy, WaterPolicy,
};
