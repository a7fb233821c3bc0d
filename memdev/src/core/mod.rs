use std::sync::Mutex;

use serde_derive::{Deserialize, Serialize};

use super::errors::MemdevError;

/// Fixed size of the device buffer. The device never resizes it.
pub const BUFFER_CAPACITY: usize = 1024;

pub static DEVICE_NAME: &'static str = "dyn_testdev";

const IOCTL_MAGIC: u32 = b't' as u32;
const IOCTL_DIR_WRITE: u32 = 1;
const IOCTL_DIR_READ: u32 = 2;

#[inline]
const fn ioctl_code(dir: u32, nr: u32, size: u32) -> u32 {
    (dir << 30) | (size << 16) | (IOCTL_MAGIC << 8) | nr
}

/// Caller-to-device transfer of a 4-byte signed integer into the control
/// scalar. Encoding follows the host convention for `_IOW('t', 1, i32)`.
pub const IOCTL_WRITE_SCALAR: u32 = ioctl_code(IOCTL_DIR_WRITE, 1, 4);
/// Device-to-caller transfer of the control scalar, `_IOR('t', 2, i32)`.
pub const IOCTL_READ_SCALAR: u32 = ioctl_code(IOCTL_DIR_READ, 2, 4);

fn default_plain_param() -> i32 {
    1
}

fn default_observed_param() -> i32 {
    2
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    #[serde(default = "default_plain_param")]
    pub plain_param: i32,
    #[serde(default = "default_observed_param")]
    pub observed_param: i32,
}

impl Default for DeviceConfig {
    fn default() -> DeviceConfig {
        DeviceConfig {
            plain_param: default_plain_param(),
            observed_param: default_observed_param(),
        }
    }
}

/// Everything sessions share: the buffer, its read cursor flag, and the
/// control-channel scalar. Guarded as one unit so no operation can observe
/// another operation mid-mutation.
pub struct DeviceState {
    pub buffer: [u8; BUFFER_CAPACITY],
    /// Count of valid bytes, set by the most recent write.
    pub len: usize,
    /// Reset on every open; set after the first non-empty read of a session.
    pub read_exhausted: bool,
    /// Control-channel scalar. Not reset per session.
    pub scalar: i32,
}

impl DeviceState {
    fn new() -> DeviceState {
        DeviceState {
            buffer: [0u8; BUFFER_CAPACITY],
            len: 0,
            read_exhausted: false,
            scalar: 0,
        }
    }
}

/// The singleton device resource. Owns the shared state behind a single
/// exclusive lock; sessions run every operation through the closure
/// accessors so concurrent opens are linearized in lock order.
pub struct DeviceService {
    state: Mutex<DeviceState>,
}

impl DeviceService {
    pub fn new() -> DeviceService {
        DeviceService {
            state: Mutex::new(DeviceState::new()),
        }
    }

    pub fn write_state<R, F>(&self, f: F) -> Result<R, MemdevError>
    where
        F: FnOnce(&mut DeviceState) -> R,
    {
        let data = &mut self.state.lock()?;
        Ok(f(data))
    }

    pub fn read_state<R, F>(&self, f: F) -> Result<R, MemdevError>
    where
        F: FnOnce(&DeviceState) -> R,
    {
        let data = &self.state.lock()?;
        Ok(f(data))
    }
}
