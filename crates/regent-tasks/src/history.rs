use std::collections::VecDeque;

/// Bounded record of progress fingerprints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressHistory {
    entries: VecDeque<String>,
}

impl ProgressHistory {
    pub const CAPACITY: usize = 10;
    const WINDOW: usize = 6;
    const PERIOD: usize = 3;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, fingerprint: String) {
        if self.entries.len() == Self::CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(fingerprint);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// True when the newest three fingerprints repeat the three before them. A constant
    /// fingerprint counts too: it is a cycle of period one.
    pub fn is_cycling(&self) -> bool {
        let n = self.entries.len();
        if n < Self::WINDOW {
            return false;
        }
        (0..Self::PERIOD).all(|i| self.entries[n - 1 - i] == self.entries[n - 1 - i - Self::PERIOD])
    }
}
