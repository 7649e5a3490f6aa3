use crate::accumulator::ScanAccumulator;
use crate::constants::{BAUD_RATE, DEFAULT_CHUNK_SIZE, STREAM_HEADER_SIZE};
use crate::error::X4LidarError;
use crate::frame::split_frames;
use crate::packet::{decode_frame, validate_frame};
use crate::serial::{SerialTransport, Transport};
use x4lidar_data::RotationSnapshot;

/// Caller-owned settings for one sensor session.
#[derive(Clone, Debug)]
pub struct ScanConfig {
    /// Serial device path such as `/dev/ttyUSB0`.
    pub port: String,
    /// Bytes pulled from the transport per snapshot cycle.
    pub chunk_size: usize,
    /// Value reported for a degree that received no samples in a cycle.
    pub no_value: i32,
}

impl ScanConfig {
    pub fn new(port: impl Into<String>) -> Self {
        ScanConfig {
            port: port.into(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            no_value: 0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum SessionState {
    Disconnected,
    Connected,
    Scanning,
}

/// Connect/scan/stop/disconnect lifecycle around the decode pipeline.
pub struct ScanSession {
    config: ScanConfig,
    transport: Option<Box<dyn Transport>>,
    state: SessionState,
}

impl ScanSession {
    pub fn new(config: ScanConfig) -> Self {
        ScanSession {
            config,
            transport: None,
            state: SessionState::Disconnected,
        }
    }

    /// Opens the serial port named in the config. A second call while
    /// connected is a no-op.
    pub fn connect(&mut self) -> Result<(), X4LidarError> {
        if self.state != SessionState::Disconnected {
            return Ok(());
        }
        let transport = SerialTransport::open(&self.config.port, BAUD_RATE)?;
        self.attach(Box::new(transport))
    }

    /// Connects over a caller-supplied transport instead of opening a
    /// serial port.
    pub fn connect_with(&mut self, transport: Box<dyn Transport>) -> Result<(), X4LidarError> {
        if self.state != SessionState::Disconnected {
            return Ok(());
        }
        self.attach(transport)
    }

    fn attach(&mut self, mut transport: Box<dyn Transport>) -> Result<(), X4LidarError> {
        if !transport.is_open() {
            return Err(serialport::Error::new(
                serialport::ErrorKind::NoDevice,
                "transport is not open",
            )
            .into());
        }
        transport.reset_input_buffer()?;
        self.transport = Some(transport);
        self.state = SessionState::Connected;
        log::debug!("session connected");
        Ok(())
    }

    /// Begins pulling snapshots. Stale input is flushed and the header the
    /// sensor emits at the start of its measurement stream is discarded,
    /// then the lazy snapshot iterator is handed back.
    ///
    /// Each pull reads `chunk_size` bytes and aggregates whatever frames
    /// they contain. The window is a byte count, not a rotation count, so
    /// a snapshot can cover slightly less or more than one full sweep.
    pub fn start_scanning(&mut self) -> Result<SnapshotStream<'_>, X4LidarError> {
        if self.state == SessionState::Disconnected {
            return Err(X4LidarError::NotConnected);
        }
        let transport = match self.transport.as_mut() {
            Some(transport) => transport,
            None => return Err(X4LidarError::NotConnected),
        };
        transport.reset_input_buffer()?;
        transport.read_bytes(STREAM_HEADER_SIZE)?;
        self.state = SessionState::Scanning;
        log::debug!("scan started, chunk size {}", self.config.chunk_size);
        Ok(SnapshotStream {
            session: self,
            carry: Vec::new(),
            accumulator: ScanAccumulator::new(),
            failed: false,
        })
    }

    /// Leaves the scanning state and flushes whatever the sensor kept
    /// sending. The snapshot stream borrows the session, so a stop can
    /// only be issued between pulls, never during one. Stopping while
    /// connected but not scanning does nothing.
    pub fn stop_scanning(&mut self) -> Result<(), X4LidarError> {
        let transport = match self.transport.as_mut() {
            Some(transport) => transport,
            None => return Err(X4LidarError::NotConnected),
        };
        if self.state == SessionState::Scanning {
            transport.reset_input_buffer()?;
            self.state = SessionState::Connected;
            log::debug!("scan stopped");
        }
        Ok(())
    }

    /// Stops any active scan and releases the transport.
    pub fn disconnect(&mut self) -> Result<(), X4LidarError> {
        if self.transport.is_none() {
            return Err(X4LidarError::NotConnected);
        }
        self.stop_scanning()?;
        if let Some(mut transport) = self.transport.take() {
            transport.close()?;
        }
        self.state = SessionState::Disconnected;
        log::debug!("session disconnected");
        Ok(())
    }

    pub fn is_connected(&self) -> bool {
        self.state != SessionState::Disconnected
    }

    pub fn is_scanning(&self) -> bool {
        self.state == SessionState::Scanning
    }
}

/// Lazy sequence of per-cycle snapshots. Each `next` blocks on one chunk
/// read and runs it through the whole decode pipeline. A transport fault
/// is yielded once, after which the stream is fused.
pub struct SnapshotStream<'a> {
    session: &'a mut ScanSession,
    carry: Vec<u8>,
    accumulator: ScanAccumulator,
    failed: bool,
}

impl Iterator for SnapshotStream<'_> {
    type Item = Result<RotationSnapshot, X4LidarError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.session.state != SessionState::Scanning {
            return None;
        }
        let transport = self.session.transport.as_mut()?;
        let chunk = match transport.read_bytes(self.session.config.chunk_size) {
            Ok(chunk) => chunk,
            Err(err) => {
                self.failed = true;
                return Some(Err(err));
            }
        };

        let (frames, carry) = split_frames(&chunk, &self.carry);
        self.carry = carry;

        let mut accepted = 0;
        for frame in &frames {
            if validate_frame(frame) {
                self.accumulator.accumulate(&decode_frame(frame));
                accepted += 1;
            }
        }
        log::trace!(
            "cycle: {} candidate frames, {} accepted, {} bytes carried",
            frames.len(),
            accepted,
            self.carry.len()
        );

        Some(Ok(self.accumulator.finalize(self.session.config.no_value)))
    }
}
