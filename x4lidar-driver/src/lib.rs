mod accumulator;
mod constants;
mod error;
mod frame;
mod numeric;
mod packet;
mod serial;
mod session;
mod time;

pub use crate::error::X4LidarError;
pub use crate::serial::{SerialTransport, Transport};
pub use crate::session::{ScanConfig, ScanSession, SnapshotStream};
