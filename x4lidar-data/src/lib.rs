pub mod snapshot;

pub use snapshot::{RotationSnapshot, DEGREES_PER_ROTATION};
