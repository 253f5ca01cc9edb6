use serde::{Deserialize, Serialize};

/// Two-tier flat payout. Several matched lines pay `multi_line` once,
/// not `single_line` per line.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Paytable {
    pub single_line: u64,
    pub multi_line: u64,
}

impl Paytable {
    pub fn simple_default() -> Self {
        Self {
            single_line: 50,
            multi_line: 150,
        }
    }

    pub fn payout(&self, matched_lines: usize) -> u64 {
        match matched_lines {
            0 => 0,
            1 => self.single_line,
            _ => self.multi_line,
        }
    }
}

impl Default for Paytable {
    fn default() -> Self {
        Self::simple_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_are_flat() {
        let table = Paytable::simple_default();
        assert_eq!(table.payout(0), 0);
        assert_eq!(table.payout(1), 50);
        assert_eq!(table.payout(2), 150);
        assert_eq!(table.payout(8), 150);
    }
}
