//! Counter widget state

/// An integer that moves by one in either direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counter {
    value: i64,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self) {
        self.value = self.value.saturating_add(1);
    }

    /// Decrement by one. There is no floor, the value may go negative.
    pub fn decrement(&mut self) {
        self.value = self.value.saturating_sub(1);
    }

    pub fn value(&self) -> i64 {
        self.value
    }
}
