pub mod clock;
pub mod config;
pub mod error;
pub mod types;

pub use clock::{FrameTime, SimulationClock};
pub use config::{HoldGroundTriggers, SettingsCatalog, SpeciesSettings};
pub use error::{Result, WildlifeError};
pub use types::{ActorClass, ActorId, Disposition, Species, TargetRef};
