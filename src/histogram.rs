//! Equal-width histograms rendered as ASCII bars.

use crate::format;

pub const DEFAULT_BINS: usize = 10;

/// Upper bound on the bin count; one output line is printed per bin.
pub const MAX_BINS: usize = 10_000;

/// Length of the bar drawn for the fullest bin.
pub const BAR_WIDTH: usize = 24;

const LABEL_PRECISION: usize = 4;
const TICK: char = '#';

/// Counts over `bins` equal-width intervals spanning `[min, max]`.
///
/// Intervals are half-open except the last, which also holds `max`.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    edges: Vec<f64>,
    counts: Vec<usize>,
}

impl Histogram {
    /// Returns `None` for empty input or zero bins. `data` must be finite.
    pub fn compute(data: &[f64], bins: usize) -> Option<Histogram> {
        if data.is_empty() || bins == 0 {
            return None;
        }
        let lo = data.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let width = (hi - lo) / bins as f64;

        let mut counts = vec![0; bins];
        for &x in data {
            let index = if width > 0.0 {
                ((x - lo) / width).floor() as usize
            } else {
                0
            };
            counts[index.min(bins - 1)] += 1;
        }

        let mut edges: Vec<f64> = (0..bins).map(|i| lo + i as f64 * width).collect();
        edges.push(hi);

        Some(Histogram { edges, counts })
    }

    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// `bins + 1` interval boundaries, from `min` to `max`.
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Bar lengths scaled so the fullest bin gets `BAR_WIDTH` ticks.
    pub fn bar_lengths(&self) -> Vec<usize> {
        let counts = self.counts();
        let max_count = counts.iter().copied().max().unwrap_or(0);
        if max_count == 0 {
            return vec![0; counts.len()];
        }
        counts
            .iter()
            .map(|&count| (count as f64 / max_count as f64 * BAR_WIDTH as f64).round() as usize)
            .collect()
    }

    /// One `[lo,hi): ###` line per bin, labels padded to a common width.
    pub fn render(&self) -> String {
        let labels: Vec<String> = self
            .edges()
            .iter()
            .map(|&edge| format::general(edge, LABEL_PRECISION))
            .collect();
        let label_width = labels.iter().map(String::len).max().unwrap_or(0);
        let last = self.counts.len() - 1;

        self.bar_lengths()
            .into_iter()
            .enumerate()
            .map(|(i, length)| {
                let close = if i == last { ']' } else { ')' };
                let line = format!(
                    "[{:>w$},{:>w$}{}: {}",
                    labels[i],
                    labels[i + 1],
                    close,
                    TICK.to_string().repeat(length),
                    w = label_width
                );
                line.trim_end().to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_bin_holds_everything() {
        let hist = Histogram::compute(&[1.0, 2.0, 3.0, 4.0, 5.0], 1).unwrap();
        assert_eq!(hist.counts(), &[5]);
        assert_eq!(hist.edges(), &[1.0, 5.0]);
        assert_eq!(hist.render(), format!("[1,5]: {}", "#".repeat(BAR_WIDTH)));
    }

    #[test]
    fn maximum_lands_in_last_bin() {
        let hist = Histogram::compute(&[0.0, 1.0, 2.0, 3.0, 4.0, 10.0], 5).unwrap();
        assert_eq!(hist.counts(), &[2, 2, 1, 0, 1]);
    }

    #[test]
    fn values_on_an_edge_go_to_the_upper_bin() {
        let hist = Histogram::compute(&[1.0, 2.0, 3.0, 4.0], 2).unwrap();
        assert_eq!(hist.counts(), &[2, 2]);
        assert_eq!(hist.edges(), &[1.0, 2.5, 4.0]);
    }

    #[test]
    fn constant_input_fills_the_first_bin() {
        let hist = Histogram::compute(&[7.0, 7.0, 7.0], 3).unwrap();
        assert_eq!(hist.counts(), &[3, 0, 0]);
        assert_eq!(hist.counts().iter().sum::<usize>(), 3);
    }

    #[test]
    fn bars_are_proportional() {
        let hist = Histogram::compute(&[1.0, 2.0, 2.0, 2.0, 2.0], 2).unwrap();
        assert_eq!(hist.counts(), &[1, 4]);
        assert_eq!(hist.bar_lengths(), vec![6, BAR_WIDTH]);
    }

    #[test]
    fn labels_are_aligned() {
        let hist = Histogram::compute(&[1.0, 2.0, 3.0, 4.0], 2).unwrap();
        let expected = format!(
            "[  1,2.5): {bar}\n[2.5,  4]: {bar}",
            bar = "#".repeat(BAR_WIDTH)
        );
        assert_eq!(hist.render(), expected);
    }

    #[test]
    fn empty_bins_have_no_bar() {
        let hist = Histogram::compute(&[0.0, 3.0], 3).unwrap();
        let rendered = hist.render();
        let lines: Vec<&str> = rendered.lines().collect();
        let full = "#".repeat(BAR_WIDTH);
        assert_eq!(lines[0], format!("[0,1): {}", full));
        assert_eq!(lines[1], "[1,2):");
        assert_eq!(lines[2], format!("[2,3]: {}", full));
    }

    #[test]
    fn nothing_to_count() {
        assert_eq!(Histogram::compute(&[], 10), None);
        assert_eq!(Histogram::compute(&[1.0], 0), None);
    }
}
