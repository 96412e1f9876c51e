//! Occupancy and probe-length statistics.
//!
//! Available with the `stats` feature. Printing additionally requires `std`.

use alloc::vec::Vec;

/// Number of live entries per probe length.
///
/// Index `n` of [`counts`](Self::counts) is the number of entries a lookup
/// reaches after `n` probe steps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeHistogram {
    counts: Vec<usize>,
}

impl ProbeHistogram {
    pub(crate) fn new(counts: Vec<usize>) -> Self {
        Self { counts }
    }

    /// Entry counts indexed by probe length.
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Total number of entries in the histogram.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Longest probe length of any entry, or 0 for an empty table.
    pub fn max_probe_length(&self) -> usize {
        self.counts
            .iter()
            .rposition(|&count| count != 0)
            .unwrap_or(0)
    }

    /// Mean probe length, or 0 for an empty table.
    pub fn mean(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let weighted: usize = self
            .counts
            .iter()
            .enumerate()
            .map(|(length, &count)| length * count)
            .sum();
        weighted as f64 / total as f64
    }

    /// Pretty-prints the histogram as a horizontal bar chart on stdout.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        let max = self.counts.iter().copied().max().unwrap_or(0);
        if max == 0 {
            println!("probe histogram: empty");
            return;
        }

        let max_bar = 60usize;
        let total_units = max_bar * 8;
        println!(
            "probe histogram ({} entries, mean {:.3}):",
            self.total(),
            self.mean()
        );

        let make_bar = |count: usize| -> alloc::string::String {
            if count == 0 {
                return alloc::string::String::new();
            }
            let units = (count as u128 * total_units as u128).div_ceil(max as u128) as usize;
            let mut bar = "█".repeat(units / 8);
            let partial = match units % 8 {
                1 => Some('▏'),
                2 => Some('▎'),
                3 => Some('▍'),
                4 => Some('▌'),
                5 => Some('▋'),
                6 => Some('▊'),
                7 => Some('▉'),
                _ => None,
            };
            bar.extend(partial);
            bar
        };

        for (length, &count) in self.counts.iter().enumerate() {
            println!("{length:>3} | {} ({count})", make_bar(count));
        }
    }
}

/// Snapshot of a table's counters and memory use.
#[derive(Debug, Clone)]
pub struct DebugStats {
    /// Name of the collision-resolution policy.
    pub policy: &'static str,
    /// Entries reachable by lookup.
    pub live: usize,
    /// Slots touched since the last rebuild, tombstones included.
    pub occupied: usize,
    /// Slots holding a tombstone.
    pub tombstones: usize,
    /// Number of home slots.
    pub capacity: usize,
    /// Home slots, overflow area and terminator.
    pub total_slots: usize,
    /// Occupancy at which the next insertion rehashes.
    pub max_occupied: usize,
    /// Longest probe length of any live entry.
    pub max_probe_length: usize,
    /// `live / capacity`.
    pub load_factor: f64,
    /// `occupied / capacity`.
    pub occupied_factor: f64,
    /// Bytes held by the bucket array.
    pub total_bytes: usize,
}

impl DebugStats {
    /// Pretty-prints the statistics on stdout.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== {} bucket table ===", self.policy);
        println!(
            "Live: {}/{} ({:.2}% load factor)",
            self.live,
            self.capacity,
            self.load_factor * 100.0
        );
        println!(
            "Occupied: {}/{} ({:.2}%, {} tombstones)",
            self.occupied,
            self.max_occupied,
            self.occupied_factor * 100.0,
            self.tombstones
        );
        println!("Longest probe: {}", self.max_probe_length);
        println!(
            "Total Allocated: {} bytes over {} slots",
            self.total_bytes, self.total_slots
        );
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn empty_histogram() {
        let hist = ProbeHistogram::default();
        assert_eq!(hist.max_probe_length(), 0);
        assert_eq!(hist.total(), 0);
        assert_eq!(hist.mean(), 0.0);
    }

    #[test]
    fn histogram_summary() {
        let hist = ProbeHistogram::new(vec![6, 3, 0, 1, 0]);
        assert_eq!(hist.counts(), &[6, 3, 0, 1, 0]);
        assert_eq!(hist.max_probe_length(), 3);
        assert_eq!(hist.total(), 10);
        assert!((hist.mean() - 0.6).abs() < 1e-9);
    }
}
