use std::io::Write;

use anyhow::Context;

use crate::{config::OutputFormat, ratio::window_ratio, windows::WindowMap};

/// Write one ratio per window.  Chromosomes are output in the order they were
/// first seen, windows in order of start coordinate
pub fn write_ratios<W: Write>(
    map: &WindowMap,
    factor: f64,
    format: OutputFormat,
    wrt: &mut W,
) -> anyhow::Result<()> {
    for chrom in map.chromosomes() {
        let windows = chrom.sorted_windows();
        debug!(
            "Output {} windows for chromosome {}",
            chrom.len(),
            chrom.name()
        );
        if format == OutputFormat::Wig {
            // Window size is taken from the first window
            let window_size = windows.first().map(|w| w.width()).unwrap_or(0);
            debug!("Window size for {}: {}", chrom.name(), window_size);
            writeln!(
                wrt,
                "fixedStep  chrom={}  start=1  step={}  span={}",
                chrom.name(),
                window_size,
                window_size - 1
            )
            .with_context(|| "Error writing output")?;
        }
        for w in windows {
            let ratio = window_ratio(chrom.name(), w, factor)?;
            let res = match format {
                OutputFormat::Bed => writeln!(
                    wrt,
                    "{}\t{}\t{}\t{:.5}",
                    chrom.name(),
                    w.start,
                    w.end,
                    ratio
                ),
                OutputFormat::Wig => writeln!(wrt, "{:.5}", ratio),
            };
            res.with_context(|| "Error writing output")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::windows::WindowPair;

    fn add(m: &mut WindowMap, chrom: &str, start: i64, end: i64, val_e: i64, val_g: i64) {
        m.insert(
            chrom,
            WindowPair {
                start: start.to_string(),
                end: end.to_string(),
                start_pos: start,
                end_pos: end,
                val_e,
                val_g,
            },
        )
    }

    fn render(m: &WindowMap, factor: f64, format: OutputFormat) -> String {
        let mut out = Vec::new();
        write_ratios(m, factor, format, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn bed_output() {
        let mut m = WindowMap::new();
        add(&mut m, "chr1", 100, 200, 5, 4);
        add(&mut m, "chr1", 0, 100, 10, 20);
        assert_eq!(
            render(&m, 1.0, OutputFormat::Bed),
            "chr1\t0\t100\t0.50000\nchr1\t100\t200\t1.25000\n"
        );
    }

    #[test]
    fn wig_output() {
        let mut m = WindowMap::new();
        add(&mut m, "chr2", 0, 50, 1, 1);
        add(&mut m, "chr1", 50, 100, 4, 2);
        add(&mut m, "chr1", 0, 50, 0, 0);
        add(&mut m, "chr2", 50, 100, 3, 1);
        let s = render(&m, 1.0, OutputFormat::Wig);
        let lines: Vec<_> = s.lines().collect();
        assert_eq!(
            lines,
            vec![
                "fixedStep  chrom=chr2  start=1  step=50  span=49",
                "1.00000",
                "3.00000",
                "fixedStep  chrom=chr1  start=1  step=50  span=49",
                "1.00000",
                "2.00000",
            ]
        );
    }

    #[test]
    fn one_line_per_window() {
        let mut m = WindowMap::new();
        for (i, c) in ["chrA", "chrB", "chrC"].iter().enumerate() {
            for k in 0..(i as i64 + 2) {
                add(&mut m, c, k * 10, k * 10 + 10, k, 1);
            }
        }
        let bed = render(&m, 1.0, OutputFormat::Bed);
        assert_eq!(bed.lines().count(), m.rows());
        let wig = render(&m, 1.0, OutputFormat::Wig);
        assert_eq!(wig.lines().count(), m.rows() + 3);
    }

    #[test]
    fn ratio_failure_stops_output() {
        let mut m = WindowMap::new();
        add(&mut m, "chr1", 0, 100, 10, 20);
        let mut out = Vec::new();
        assert!(write_ratios(&m, 0.0, OutputFormat::Bed, &mut out).is_err());
        assert!(out.is_empty());
    }
}
