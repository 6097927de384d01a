pub mod artifact_reader;
pub mod observation_reader;

pub use artifact_reader::{ArtifactReader, ArtifactSpec};
pub use observation_reader::{LoadReport, ObservationReader};
