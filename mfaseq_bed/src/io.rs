use std::{io::BufRead, path::Path};

use anyhow::Context;
use compress_io::compress::CompressIo;
use utils::{get_next_line, is_blank};

use crate::windows::{WindowMap, WindowPair};

/// One row of a binned count file: chromosome, start, end, count
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalRecord {
    pub chrom: String,
    pub start: String,
    pub end: String,
    pub start_pos: i64,
    pub end_pos: i64,
    pub count: i64,
}

impl IntervalRecord {
    /// Compare chromosome, start and end as written in the input
    pub fn same_window(&self, other: &Self) -> bool {
        self.chrom == other.chrom && self.start == other.start && self.end == other.end
    }

    fn coords(&self) -> String {
        format!("{}\t{}\t{}", self.chrom, self.start, self.end)
    }
}

/// Reads interval records from a tab separated file, skipping blank lines
pub struct IntervalReader<R: BufRead> {
    rdr: R,
    name: String,
    buf: String,
    line: usize,
}

impl IntervalReader<Box<dyn BufRead>> {
    pub fn open(p: &Path) -> anyhow::Result<Self> {
        trace!("Opening count file {} for reading", p.display());
        let rdr = CompressIo::new()
            .path(p)
            .bufreader()
            .with_context(|| format!("Cannot open file {}", p.display()))?;
        Ok(Self::new(Box::new(rdr), p.display().to_string()))
    }
}

impl<R: BufRead> IntervalReader<R> {
    pub fn new(rdr: R, name: String) -> Self {
        Self {
            rdr,
            name,
            buf: String::new(),
            line: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn next_record(&mut self) -> anyhow::Result<Option<IntervalRecord>> {
        loop {
            let (name, line) = (&self.name, self.line);
            let fields = match get_next_line(&mut self.rdr, &mut self.buf)
                .with_context(|| format!("Error after reading {} lines from {}", line, name))?
            {
                Some(f) => f,
                None => return Ok(None),
            };
            self.line += 1;
            if is_blank(&fields) {
                continue;
            }
            return parse_record(&fields)
                .with_context(|| format!("{}:{} Malformed row", self.name, self.line))
                .map(Some);
        }
    }
}

fn parse_record(fields: &[&str]) -> anyhow::Result<IntervalRecord> {
    if fields.len() != 4 {
        return Err(anyhow!(
            "Expected 4 tab separated columns, found {}",
            fields.len()
        ));
    }
    let start_pos = fields[1]
        .parse::<i64>()
        .with_context(|| format!("Error reading start coordinate '{}'", fields[1]))?;
    let end_pos = fields[2]
        .parse::<i64>()
        .with_context(|| format!("Error reading end coordinate '{}'", fields[2]))?;
    let z = fields[3]
        .parse::<f64>()
        .with_context(|| format!("Error reading count '{}'", fields[3]))?;
    if !z.is_finite() {
        return Err(anyhow!("Count '{}' is not a finite number", fields[3]));
    }
    Ok(IntervalRecord {
        chrom: fields[0].to_owned(),
        start: fields[1].to_owned(),
        end: fields[2].to_owned(),
        start_pos,
        end_pos,
        // Counts are truncated to integers on input
        count: z.trunc() as i64,
    })
}

/// Read both count files in lockstep, checking that every row refers to the
/// same window, and build the window map with global sums
pub fn read_paired<R1: BufRead, R2: BufRead>(
    rdr_e: &mut IntervalReader<R1>,
    rdr_g: &mut IntervalReader<R2>,
) -> anyhow::Result<WindowMap> {
    debug!(
        "Reading paired counts from {} and {}",
        rdr_e.name(),
        rdr_g.name()
    );
    let mut map = WindowMap::new();
    let mut row = 0;
    loop {
        let e = rdr_e.next_record()?;
        let g = rdr_g.next_record()?;
        let (e, g) = match (e, g) {
            (None, None) => break,
            (Some(e), Some(g)) => (e, g),
            (Some(e), None) => {
                return Err(anyhow!(
                    "There is a mismatch between {} and {} at line {}: {} has ended\nFile1:{}\nFile2:<end of file>",
                    rdr_e.name(),
                    rdr_g.name(),
                    row + 1,
                    rdr_g.name(),
                    e.coords()
                ))
            }
            (None, Some(g)) => {
                return Err(anyhow!(
                    "There is a mismatch between {} and {} at line {}: {} has ended\nFile1:<end of file>\nFile2:{}",
                    rdr_e.name(),
                    rdr_g.name(),
                    row + 1,
                    rdr_e.name(),
                    g.coords()
                ))
            }
        };
        row += 1;
        if !e.same_window(&g) {
            return Err(anyhow!(
                "There is a mismatch between {} and {} at line {}\nFile1:{}\nFile2:{}",
                rdr_e.name(),
                rdr_g.name(),
                row,
                e.coords(),
                g.coords()
            ));
        }
        map.insert(
            &e.chrom,
            WindowPair {
                start: e.start,
                end: e.end,
                start_pos: e.start_pos,
                end_pos: e.end_pos,
                val_e: e.count,
                val_g: g.count,
            },
        );
    }
    debug!(
        "Read {} rows; sum of counts {} / {}",
        row,
        map.sum_e(),
        map.sum_g()
    );
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader(s: &'static str, name: &str) -> IntervalReader<&'static [u8]> {
        IntervalReader::new(s.as_bytes(), name.to_owned())
    }

    #[test]
    fn record_parsing_truncates_counts() {
        let mut r = reader("chr1\t0\t100\t10.9\n\nchr1\t100\t200\t-0.5\n", "a");
        let rec = r.next_record().unwrap().unwrap();
        assert_eq!(rec.chrom, "chr1");
        assert_eq!((rec.start_pos, rec.end_pos, rec.count), (0, 100, 10));
        let rec = r.next_record().unwrap().unwrap();
        assert_eq!(rec.count, 0);
        assert!(r.next_record().unwrap().is_none());
    }

    #[test]
    fn malformed_rows() {
        let mut r = reader("chr1\t0\t100\n", "a");
        let e = r.next_record().unwrap_err();
        assert!(format!("{:#}", e).contains("a:1"));

        let mut r = reader("chr1\tzero\t100\t1\n", "a");
        assert!(r.next_record().is_err());

        let mut r = reader("chr1\t0\t100\tnan\n", "a");
        assert!(r.next_record().is_err());
    }

    #[test]
    fn paired_read_builds_sums() {
        let mut e = reader("chr1\t0\t100\t10\nchr1\t100\t200\t5\nchr2\t0\t100\t3.7\n", "e");
        let mut g = reader("chr1\t0\t100\t20\nchr1\t100\t200\t4\nchr2\t0\t100\t1\n", "g");
        let m = read_paired(&mut e, &mut g).unwrap();
        assert_eq!(m.sum_e(), 18);
        assert_eq!(m.sum_g(), 25);
        assert_eq!(m.rows(), 3);
        assert_eq!(m.chromosomes().len(), 2);
    }

    #[test]
    fn coordinate_mismatch_reports_row() {
        let mut e = reader("chr1\t0\t100\t10\nchr1\t100\t200\t5\n", "e");
        let mut g = reader("chr1\t0\t100\t20\nchr1\t100\t250\t4\n", "g");
        let msg = format!("{}", read_paired(&mut e, &mut g).unwrap_err());
        assert!(msg.contains("at line 2"));
        assert!(msg.contains("File1:chr1\t100\t200"));
        assert!(msg.contains("File2:chr1\t100\t250"));

        let mut e = reader("chr1\t0\t100\t10\n", "e");
        let mut g = reader("chr2\t0\t100\t20\n", "g");
        let msg = format!("{}", read_paired(&mut e, &mut g).unwrap_err());
        assert!(msg.contains("at line 1"));
    }

    #[test]
    fn unequal_lengths() {
        let mut e = reader("chr1\t0\t100\t10\nchr1\t100\t200\t5\n", "e");
        let mut g = reader("chr1\t0\t100\t20\n", "g");
        let msg = format!("{}", read_paired(&mut e, &mut g).unwrap_err());
        assert!(msg.contains("at line 2"));
        assert!(msg.contains("g has ended"));

        let mut e = reader("", "e");
        let mut g = reader("chr1\t0\t100\t20\n", "g");
        assert!(read_paired(&mut e, &mut g).is_err());
    }

    #[test]
    fn empty_inputs() {
        let mut e = reader("", "e");
        let mut g = reader("\n", "g");
        let m = read_paired(&mut e, &mut g).unwrap();
        assert_eq!(m.rows(), 0);
        assert!(m.chromosomes().is_empty());
    }
}
