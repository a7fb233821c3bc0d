use std::cmp;
use std::sync::Arc;

use super::core::*;
use super::errors::MemdevError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    Closed,
    Open,
}

/// One open/release lifecycle against the shared device. Sessions hold no
/// buffer state of their own: every session opened on the same
/// `DeviceService` observes the same buffer and scalar.
pub struct DeviceSession {
    service: Arc<DeviceService>,
    state: SessionState,
}

impl DeviceSession {
    pub fn new(service: Arc<DeviceService>) -> DeviceSession {
        DeviceSession {
            service,
            state: SessionState::Closed,
        }
    }

    #[inline]
    fn ensure_open(&self) -> Result<(), MemdevError> {
        match self.state {
            SessionState::Open => Ok(()),
            SessionState::Closed => Err(MemdevError::InvalidState(
                "operation on a session that is not open",
            )),
        }
    }

    /// Opens the session and rearms the read cursor. Opening a session that
    /// is already open is an error; a released session may be reopened.
    pub fn open(&mut self) -> Result<(), MemdevError> {
        if self.state == SessionState::Open {
            return Err(MemdevError::InvalidState("session already open"));
        }
        self.service.write_state(|dev| {
            dev.read_exhausted = false;
        })?;
        self.state = SessionState::Open;
        Ok(())
    }

    /// Transfers the valid buffer contents into `dest` and returns the byte
    /// count. The full contents move on the first read regardless of how
    /// much the caller asked for; once exhausted, returns 0 until the next
    /// open. A destination too small for the transfer is a `TransferFault`.
    pub fn read(&mut self, dest: &mut [u8]) -> Result<usize, MemdevError> {
        self.ensure_open()?;
        self.service.write_state(|dev| {
            if dev.read_exhausted {
                return Ok(0);
            }
            if dest.len() < dev.len {
                return Err(MemdevError::TransferFault(format!(
                    "destination holds {} bytes, transfer needs {}",
                    dest.len(),
                    dev.len
                )));
            }
            dest[..dev.len].copy_from_slice(&dev.buffer[..dev.len]);
            if dev.len > 0 {
                dev.read_exhausted = true;
            }
            Ok(dev.len)
        })?
    }

    /// Copies `data` into the buffer starting at offset 0, overwriting the
    /// previous contents, and returns the copied count. Data beyond
    /// `BUFFER_CAPACITY` is silently dropped; the count tells the caller how
    /// much actually landed.
    pub fn write(&mut self, data: &[u8]) -> Result<usize, MemdevError> {
        self.ensure_open()?;
        let n = cmp::min(data.len(), BUFFER_CAPACITY);
        self.service.write_state(|dev| {
            dev.buffer[..n].copy_from_slice(&data[..n]);
            dev.len = n;
            n
        })
    }

    /// Dispatches a control request against the device scalar.
    /// `IOCTL_WRITE_SCALAR` stores `*arg`; `IOCTL_READ_SCALAR` writes the
    /// scalar back through `arg`. Unrecognized codes are accepted silently,
    /// matching the permissive behavior of the original device.
    pub fn control(&mut self, request: u32, arg: &mut i32) -> Result<(), MemdevError> {
        self.ensure_open()?;
        match request {
            IOCTL_WRITE_SCALAR => {
                let v = *arg;
                self.service.write_state(|dev| {
                    dev.scalar = v;
                })
            }
            IOCTL_READ_SCALAR => {
                *arg = self.service.read_state(|dev| dev.scalar)?;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Closes the session. The buffer and scalar keep their contents for
    /// the next open.
    pub fn release(&mut self) -> Result<(), MemdevError> {
        self.ensure_open()?;
        self.state = SessionState::Closed;
        Ok(())
    }
}
