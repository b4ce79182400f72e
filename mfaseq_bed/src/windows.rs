use std::{
    collections::{hash_map::Entry, HashMap},
    sync::Arc,
};

pub type Contig = Arc<str>;

/// Paired counts for one window.  Start and end are kept as they appeared
/// in the input so they can be written back unchanged
#[derive(Debug, Clone, PartialEq)]
pub struct WindowPair {
    pub start: String,
    pub end: String,
    pub start_pos: i64,
    pub end_pos: i64,
    pub val_e: i64,
    pub val_g: i64,
}

impl WindowPair {
    pub fn width(&self) -> i64 {
        self.end_pos - self.start_pos
    }
}

/// Windows for one chromosome keyed on start coordinate
#[derive(Debug)]
pub struct ChromWindows {
    name: Contig,
    windows: HashMap<i64, WindowPair>,
}

impl ChromWindows {
    fn new(name: Contig) -> Self {
        Self {
            name,
            windows: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Windows in ascending order of start coordinate
    pub fn sorted_windows(&self) -> Vec<&WindowPair> {
        let mut v: Vec<_> = self.windows.values().collect();
        v.sort_unstable_by_key(|w| w.start_pos);
        v
    }
}

/// Per chromosome window map plus the global count sums for both inputs.
/// Chromosomes are kept in the order they were first seen
#[derive(Debug, Default)]
pub struct WindowMap {
    chroms: Vec<ChromWindows>,
    index: HashMap<Contig, usize>,
    sum_e: i64,
    sum_g: i64,
    rows: usize,
}

impl WindowMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a window, accumulating its counts into the global sums.
    /// A window with the same chromosome and start as an earlier one replaces it
    pub fn insert(&mut self, chrom: &str, w: WindowPair) {
        self.sum_e += w.val_e;
        self.sum_g += w.val_g;
        self.rows += 1;
        let ix = match self.index.entry(Arc::from(chrom)) {
            Entry::Occupied(e) => *e.get(),
            Entry::Vacant(e) => {
                trace!("Adding chromosome {}", chrom);
                let ix = self.chroms.len();
                self.chroms.push(ChromWindows::new(e.key().clone()));
                e.insert(ix);
                ix
            }
        };
        if let Some(old) = self.chroms[ix].windows.insert(w.start_pos, w) {
            warn!(
                "Duplicate window {}:{}-{} replaced",
                chrom, old.start, old.end
            );
        }
    }

    pub fn chromosomes(&self) -> &[ChromWindows] {
        &self.chroms
    }

    pub fn sum_e(&self) -> i64 {
        self.sum_e
    }

    pub fn sum_g(&self) -> i64 {
        self.sum_g
    }

    /// Number of row pairs read (including any replaced duplicates)
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Global scale applied to the second input: 1 if normalization is off,
    /// otherwise sum_e / sum_g
    pub fn norm_factor(&self, normalize: bool) -> anyhow::Result<f64> {
        if !normalize {
            Ok(1.0)
        } else if self.sum_g == 0 {
            Err(anyhow!(
                "There is a problem calculating the normalization factor: division by zero (sum of counts in second file is 0)"
            ))
        } else {
            Ok(self.sum_e as f64 / self.sum_g as f64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn win(start: i64, end: i64, val_e: i64, val_g: i64) -> WindowPair {
        WindowPair {
            start: start.to_string(),
            end: end.to_string(),
            start_pos: start,
            end_pos: end,
            val_e,
            val_g,
        }
    }

    #[test]
    fn first_seen_chromosome_order() {
        let mut m = WindowMap::new();
        m.insert("chr2", win(0, 100, 1, 1));
        m.insert("chr1", win(0, 100, 1, 1));
        m.insert("chr2", win(100, 200, 1, 1));
        let names: Vec<_> = m.chromosomes().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["chr2", "chr1"]);
        assert_eq!(m.chromosomes()[0].len(), 2);
    }

    #[test]
    fn windows_sorted_by_start() {
        let mut m = WindowMap::new();
        for s in [500, 0, 1000, 200] {
            m.insert("chr1", win(s, s + 100, 1, 1));
        }
        let starts: Vec<_> = m.chromosomes()[0]
            .sorted_windows()
            .iter()
            .map(|w| w.start_pos)
            .collect();
        assert_eq!(starts, vec![0, 200, 500, 1000]);
    }

    #[test]
    fn factor_from_global_sums() {
        let mut m = WindowMap::new();
        m.insert("chr1", win(0, 100, 30, 10));
        m.insert("chr1", win(100, 200, 10, 10));
        assert_eq!(m.norm_factor(false).unwrap(), 1.0);
        assert_eq!(m.norm_factor(true).unwrap(), 2.0);

        // Same sums, different windows
        let mut m2 = WindowMap::new();
        m2.insert("chr1", win(0, 100, 1, 19));
        m2.insert("chr1", win(100, 200, 39, 1));
        assert_eq!(m2.norm_factor(true).unwrap(), m.norm_factor(true).unwrap());
    }

    #[test]
    fn zero_denominator_sum() {
        let mut m = WindowMap::new();
        m.insert("chr1", win(0, 100, 5, 0));
        assert!(m.norm_factor(true).is_err());
        assert_eq!(m.norm_factor(false).unwrap(), 1.0);
    }

    #[test]
    fn duplicate_window_still_counts_in_sums() {
        let mut m = WindowMap::new();
        m.insert("chr1", win(0, 100, 5, 1));
        m.insert("chr1", win(0, 100, 7, 2));
        assert_eq!(m.chromosomes()[0].len(), 1);
        assert_eq!(m.sum_e(), 12);
        assert_eq!(m.sum_g(), 3);
        assert_eq!(m.rows(), 2);
        assert_eq!(m.chromosomes()[0].sorted_windows()[0].val_e, 7);
    }
}
