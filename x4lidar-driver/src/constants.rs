pub(crate) const FRAME_MARKER: [u8; 2] = [0xAA, 0x55];
// The marker read as a little-endian word; also the seed of the frame
// checksum.
pub(crate) const FRAME_MARKER_WORD: u16 = 0x55AA;
// Frame type, sample count, start angle (2), end angle (2), checksum (2).
pub(crate) const FRAME_HEADER_SIZE: usize = 8;
pub(crate) const FRAME_TYPE_POINT_CLOUD: u8 = 0x00;
// Header the sensor emits once when the measurement stream begins.
pub(crate) const STREAM_HEADER_SIZE: usize = 7;
pub(crate) const BAUD_RATE: u32 = 115_200;
pub(crate) const DEFAULT_CHUNK_SIZE: usize = 6000;
pub(crate) const N_READ_TRIALS: usize = 100;
