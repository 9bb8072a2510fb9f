pub mod arbiter;
pub mod config;
pub mod error;
pub mod packet;
pub mod simulation;
pub mod sink;
pub mod stats;
pub mod switch;
pub mod traffic;
pub mod voq;

pub use arbiter::{Arbiter, SchedulerKind};
pub use config::SwitchConfig;
pub use error::{ConfigError, SwitchError};
pub use packet::{Arrival, Packet, PriorityClass};
pub use switch::{Match, Switch};
