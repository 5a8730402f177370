use derive_more::{Deref, From};

pub mod frame_stats;

/// Time that passed since the previous tick in seconds.
/// Supplied by the host loop once per tick.
#[derive(Default, Clone, Copy, Deref, From, Debug, PartialEq, PartialOrd)]
pub struct Delta(pub f32);

/// Current tick number. Will be reset to 0 on overflow.
#[derive(Default, Clone, Copy, Deref, From, Debug, PartialEq, Eq)]
pub struct Frame(pub u64);

impl Frame {
    pub fn advance(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }
}
