//! Device placement for solver phases.
//!
//! Array backends that live on more than one compute context consult
//! [`Device::current`] to decide where an operation runs. The iteration engine
//! binds the solver's device for the duration of each phase with a
//! [`DeviceGuard`]; dropping the guard restores whatever binding was active
//! before, so early returns and `?` propagation cannot leak a binding.

use std::cell::Cell;
use std::fmt;
use std::marker::PhantomData;

thread_local! {
    static CURRENT: Cell<Device> = const { Cell::new(Device::Cpu) };
}

/// A compute context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Device {
    #[default]
    Cpu,
    Accelerator(usize),
}

impl Device {
    /// Device bound to the calling thread.
    pub fn current() -> Device {
        CURRENT.with(|c| c.get())
    }

    /// Bind `self` until the returned guard is dropped.
    #[must_use = "the device is unbound as soon as the guard is dropped"]
    pub fn enter(self) -> DeviceGuard {
        let previous = CURRENT.with(|c| c.replace(self));
        tracing::trace!(device = %self, previous = %previous, "enter device scope");
        DeviceGuard {
            previous,
            _not_send: PhantomData,
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Cpu => write!(f, "cpu"),
            Device::Accelerator(ordinal) => write!(f, "accel:{ordinal}"),
        }
    }
}

/// Scoped device binding. Not `Send`: the binding is per thread.
pub struct DeviceGuard {
    previous: Device,
    _not_send: PhantomData<*const ()>,
}

impl Drop for DeviceGuard {
    fn drop(&mut self) {
        CURRENT.with(|c| c.set(self.previous));
    }
}

/// Association between an array and the device holding it.
pub trait Placed {
    fn device(&self) -> Device;
}

impl<T> Placed for Vec<T> {
    fn device(&self) -> Device {
        Device::Cpu
    }
}
