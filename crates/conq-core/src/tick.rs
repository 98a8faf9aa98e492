/// Per-tick simulation context handed to strategies and trace events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickContext {
    pub tick: u64,
    pub seed: u64,
}

impl TickContext {
    pub fn new(tick: u64, seed: u64) -> Self {
        Self { tick, seed }
    }

    /// The context for the following tick, keeping the seed.
    pub fn next(self) -> Self {
        Self {
            tick: self.tick.wrapping_add(1),
            seed: self.seed,
        }
    }
}
