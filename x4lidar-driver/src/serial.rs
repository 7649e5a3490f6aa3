use crate::constants::N_READ_TRIALS;
use crate::error::X4LidarError;
use crate::time::sleep_ms;
use serialport::SerialPort;
use std::io::Read;
use std::time::Duration;

/// Byte-stream capability the session pulls from. The sensor streams
/// unsolicited, so the capability is read-only.
pub trait Transport {
    /// Blocks until `n` bytes are available and returns them.
    fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>, X4LidarError>;

    /// Drops any bytes the transport has already buffered.
    fn reset_input_buffer(&mut self) -> Result<(), X4LidarError>;

    fn is_open(&self) -> bool;

    fn close(&mut self) -> Result<(), X4LidarError>;
}

/// Serial link to the sensor.
pub struct SerialTransport {
    port: Option<Box<dyn SerialPort>>,
}

impl SerialTransport {
    pub fn open(path: &str, baud_rate: u32) -> Result<Self, X4LidarError> {
        let port = serialport::new(path, baud_rate)
            .timeout(Duration::from_millis(10))
            .open()?;
        log::info!("opened serial port {} at {} baud", path, baud_rate);
        Ok(SerialTransport { port: Some(port) })
    }

    /// Wraps an already-configured port.
    pub fn from_port(port: Box<dyn SerialPort>) -> Self {
        SerialTransport { port: Some(port) }
    }

    fn port_mut(&mut self) -> Result<&mut Box<dyn SerialPort>, X4LidarError> {
        self.port.as_mut().ok_or(X4LidarError::NotConnected)
    }
}

impl Transport for SerialTransport {
    fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>, X4LidarError> {
        let port = self.port_mut()?;
        let mut stalls = 0;
        let mut last_available = 0;
        loop {
            let available = port.bytes_to_read()? as usize;
            if available >= n {
                let mut data = vec![0; n];
                port.read_exact(data.as_mut_slice())?;
                return Ok(data);
            }
            // the counter only runs while no new bytes arrive
            if available > last_available {
                last_available = available;
                stalls = 0;
            } else {
                stalls += 1;
                if stalls >= N_READ_TRIALS {
                    return Err(X4LidarError::Timeout);
                }
            }
            sleep_ms(10);
        }
    }

    fn reset_input_buffer(&mut self) -> Result<(), X4LidarError> {
        self.port_mut()?.clear(serialport::ClearBuffer::Input)?;
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.port.is_some()
    }

    fn close(&mut self) -> Result<(), X4LidarError> {
        // dropping the handle releases the device
        self.port = None;
        Ok(())
    }
}
