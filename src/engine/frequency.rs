/// Per-byte occurrence counts over the full 256-value alphabet.
///
/// Zero-count entries exist in the table but are skipped by the tree
/// builder, so callers can hand over a freshly scanned table as-is.
#[derive(Debug, Clone)]
pub struct FrequencyTable {
    counts: [u64; 256],
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self { counts: [0; 256] }
    }

    /// Scan raw input and count every byte occurrence.
    pub fn scan(input: &[u8]) -> Self {
        let mut table = Self::new();
        for &byte in input {
            table.counts[byte as usize] += 1;
        }
        table
    }

    pub fn set(&mut self, symbol: u8, count: u64) {
        self.counts[symbol as usize] = count;
    }

    pub fn count(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Symbols with positive counts, in ascending symbol order.
    pub fn present_symbols(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &c)| c > 0)
            .map(|(s, &c)| (s as u8, c))
    }

    pub fn distinct_symbols(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<(u8, u64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (u8, u64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (symbol, count) in iter {
            table.counts[symbol as usize] += count;
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_counts_every_byte() {
        let table = FrequencyTable::scan(b"abracadabra");
        assert_eq!(table.count(b'a'), 5);
        assert_eq!(table.count(b'b'), 2);
        assert_eq!(table.count(b'r'), 2);
        assert_eq!(table.count(b'c'), 1);
        assert_eq!(table.count(b'd'), 1);
        assert_eq!(table.count(b'z'), 0);
        assert_eq!(table.total(), 11);
        assert_eq!(table.distinct_symbols(), 5);
    }

    #[test]
    fn present_symbols_ascend() {
        let table = FrequencyTable::scan(b"cba");
        let symbols: Vec<u8> = table.present_symbols().map(|(s, _)| s).collect();
        assert_eq!(symbols, vec![b'a', b'b', b'c']);
    }

    #[test]
    fn empty_input_is_empty_table() {
        let table = FrequencyTable::scan(b"");
        assert_eq!(table.distinct_symbols(), 0);
        assert_eq!(table.total(), 0);
    }
}
