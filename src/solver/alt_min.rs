//! Alternating minimization over two blocks.
//!
//! `min1` and `min2` each minimize the objective over their own block of
//! variables, which they capture and mutate themselves. Every update calls
//! `min1` then `min2`.

use crate::device::Device;
use crate::error::AlgError;
use crate::solver::{IterState, IterativeAlgorithm};

/// Block minimizer closure.
pub type BlockMin<'a> = Box<dyn FnMut() -> Result<(), AlgError> + 'a>;

pub struct AltMin<'a> {
    min1: BlockMin<'a>,
    min2: BlockMin<'a>,
    state: IterState,
}

impl<'a> AltMin<'a> {
    pub fn new<M1, M2>(min1: M1, min2: M2) -> Self
    where
        M1: FnMut() -> Result<(), AlgError> + 'a,
        M2: FnMut() -> Result<(), AlgError> + 'a,
    {
        Self {
            min1: Box::new(min1),
            min2: Box::new(min2),
            state: IterState::new(30, Device::Cpu),
        }
    }
}

impl<'a> IterativeAlgorithm for AltMin<'a> {
    fn name(&self) -> &'static str {
        "AltMin"
    }

    fn state(&self) -> &IterState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut IterState {
        &mut self.state
    }

    fn step(&mut self) -> Result<(), AlgError> {
        (self.min1)()?;
        (self.min2)()
    }
}
