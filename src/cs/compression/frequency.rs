/// Occurrence counts of each byte value in a buffer.
///
/// Only bytes that occur at least once are reported. Iteration yields symbols
/// in the order they first appear in the buffer, which is the deterministic
/// tie-break order used by both prefix coders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [usize; 256],
    order: Vec<u8>,
    total: usize,
}

impl FrequencyTable {
    /// Count every byte of `data`.
    pub fn new(data: &[u8]) -> Self {
        let mut counts = [0usize; 256];
        let mut order = Vec::new();
        for &byte in data {
            let slot = &mut counts[byte as usize];
            if *slot == 0 {
                order.push(byte);
            }
            *slot += 1;
        }
        FrequencyTable {
            counts,
            order,
            total: data.len(),
        }
    }

    /// Occurrences of `symbol`, or `None` if it never occurs.
    pub fn get(&self, symbol: u8) -> Option<usize> {
        match self.counts[symbol as usize] {
            0 => None,
            count => Some(count),
        }
    }

    /// Number of bytes counted.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of distinct byte values.
    pub fn distinct(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Empirical probability `count / total`; zero for absent symbols.
    pub fn probability(&self, symbol: u8) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.counts[symbol as usize] as f64 / self.total as f64
    }

    /// `(symbol, count)` pairs in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, usize)> + '_ {
        self.order
            .iter()
            .map(move |&symbol| (symbol, self.counts[symbol as usize]))
    }
}
