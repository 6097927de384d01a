pub mod artifact;
pub mod month;
pub mod observation;
pub mod phenomenon;

pub use artifact::{LinearScaler, LogisticModel, ProbabilityModel, ScalingTransform, StandardScaler};
pub use month::Month;
pub use observation::{ClimateVariable, Observation};
pub use phenomenon::{Phenomenon, PhenomenonModel};
