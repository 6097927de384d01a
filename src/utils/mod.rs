pub mod constants;
pub mod coordinates;
pub mod numeric;
pub mod progress;

pub use constants::*;
pub use coordinates::{parse_coordinate, validate_coordinates};
pub use numeric::{mean, round_to};
pub use progress::ProgressReporter;
