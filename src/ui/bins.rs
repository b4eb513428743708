// ---------------------------------------------------------------------------
// Log-space histogram binning for the mass chart
// ---------------------------------------------------------------------------

/// One histogram bucket. Edges are in log10 units.
#[derive(Debug, Clone, PartialEq)]
pub struct LogBin {
    pub lo: f64,
    pub hi: f64,
    pub count: usize,
}

impl LogBin {
    pub fn center(&self) -> f64 {
        (self.lo + self.hi) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.hi - self.lo
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogHistogram {
    pub bins: Vec<LogBin>,
    /// Values that cannot sit on a log axis (zero or negative).
    pub non_positive: usize,
}

/// Bucket `values` into `n_bins` equal-width bins in log10 space, spanning
/// the smallest to the largest positive value.
pub fn log_histogram(values: &[f64], n_bins: usize) -> LogHistogram {
    let n_bins = n_bins.max(1);
    let logs: Vec<f64> = values
        .iter()
        .filter(|v| **v > 0.0)
        .map(|v| v.log10())
        .collect();
    let non_positive = values.len() - logs.len();

    if logs.is_empty() {
        return LogHistogram {
            bins: Vec::new(),
            non_positive,
        };
    }

    let min = logs.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = logs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    // All values equal: one unit-wide bin around them.
    if (max - min).abs() < f64::EPSILON {
        return LogHistogram {
            bins: vec![LogBin {
                lo: min - 0.5,
                hi: min + 0.5,
                count: logs.len(),
            }],
            non_positive,
        };
    }

    let width = (max - min) / n_bins as f64;
    let mut counts = vec![0usize; n_bins];
    for l in &logs {
        let idx = (((l - min) / width).floor() as usize).min(n_bins - 1);
        counts[idx] += 1;
    }

    let bins = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| LogBin {
            lo: min + i as f64 * width,
            hi: min + (i + 1) as f64 * width,
            count,
        })
        .collect();

    LogHistogram { bins, non_positive }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_cover_every_positive_value() {
        let values = [1.0, 10.0, 100.0, 1000.0, 5000.0, 1e6, 0.0, -3.0];
        let hist = log_histogram(&values, 6);
        assert_eq!(hist.bins.len(), 6);
        assert_eq!(hist.bins.iter().map(|b| b.count).sum::<usize>(), 6);
        assert_eq!(hist.non_positive, 2);
    }

    #[test]
    fn bins_are_contiguous_and_span_the_data() {
        let hist = log_histogram(&[2.0, 30.0, 400.0, 5e5], 10);
        for pair in hist.bins.windows(2) {
            assert!((pair[0].hi - pair[1].lo).abs() < 1e-12);
        }
        assert!((hist.bins[0].lo - 2f64.log10()).abs() < 1e-12);
        assert!((hist.bins[9].hi - 5e5f64.log10()).abs() < 1e-9);
    }

    #[test]
    fn largest_value_lands_in_last_bin() {
        let hist = log_histogram(&[1.0, 1e4], 4);
        assert_eq!(hist.bins[0].count, 1);
        assert_eq!(hist.bins[3].count, 1);
    }

    #[test]
    fn identical_values_get_one_bin() {
        let hist = log_histogram(&[100.0, 100.0, 100.0], 40);
        assert_eq!(hist.bins.len(), 1);
        assert_eq!(hist.bins[0].count, 3);
        assert!((hist.bins[0].center() - 2.0).abs() < 1e-12);
        assert!((hist.bins[0].width() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn no_positive_values_gives_no_bins() {
        let hist = log_histogram(&[0.0, 0.0], 10);
        assert!(hist.bins.is_empty());
        assert_eq!(hist.non_positive, 2);
    }
}
