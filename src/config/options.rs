//! API options shared by every iterative algorithm.
//!
//! This module provides the `AlgOptions` struct, used to override the
//! iteration ceiling, toggle progress reporting, and pin the device an
//! algorithm runs on. Unset fields fall back to each solver's own defaults.

use crate::device::Device;

/// Iteration ceiling, progress & placement.
#[derive(Debug, Clone, PartialEq)]
pub struct AlgOptions {
    /// Maximum number of iterations (solver default when `None`)
    pub max_iter: Option<usize>,

    /// Report progress through `TracingProgress`
    pub progress: bool,

    /// Device override (otherwise taken from the primary variable)
    pub device: Option<Device>,
}

impl Default for AlgOptions {
    fn default() -> Self {
        Self {
            max_iter: None,
            progress: true,
            device: None,
        }
    }
}

impl AlgOptions {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = Some(max_iter);
        self
    }
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }
    pub fn on_device(mut self, device: Device) -> Self {
        self.device = Some(device);
        self
    }
}
