use std::error::Error;
use std::fmt::Display;
use std::{fmt, io};

#[derive(Debug)]
pub enum X4LidarError {
    NotConnected,
    Connection(serialport::Error),
    Io(io::Error),
    Timeout,
}

impl fmt::Display for X4LidarError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            X4LidarError::NotConnected => write!(f, "Device is not connected."),
            X4LidarError::Connection(err) => {
                write!(f, "Serial port could not be used. Error: {}.", err)
            }
            X4LidarError::Io(err) => Display::fmt(&err, f),
            X4LidarError::Timeout => write!(f, "No data arrived from the sensor."),
        }
    }
}

impl Error for X4LidarError {}

impl From<io::Error> for X4LidarError {
    fn from(err: io::Error) -> Self {
        X4LidarError::Io(err)
    }
}

impl From<serialport::Error> for X4LidarError {
    fn from(err: serialport::Error) -> Self {
        X4LidarError::Connection(err)
    }
}
