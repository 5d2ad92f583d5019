use std::f64::consts::PI;

/// Bin count used by the distribution charts.
pub const DEFAULT_BINS: usize = 20;

/// Number of points sampled along the density curve.
const KDE_GRID_POINTS: usize = 200;

/// One histogram bucket covering `[start, end)`; the last bucket also holds `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl Bin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Equal-width histogram with a kernel density curve scaled to counts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Histogram {
    pub bins: Vec<Bin>,
    /// `[x, y]` points of the density curve. Empty when it cannot be estimated.
    pub density: Vec<[f64; 2]>,
}

impl Histogram {
    /// Bucket the finite `values` into `bins` equal-width bins spanning the data.
    pub fn from_values(values: &[f64], bins: usize) -> Self {
        let values: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if values.is_empty() {
            return Histogram::default();
        }
        let n_bins = bins.max(1);

        let (mut lo, mut hi) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }
        let width = (hi - lo) / n_bins as f64;

        let mut counts = vec![0usize; n_bins];
        for &v in &values {
            let idx = (((v - lo) / width) as usize).min(n_bins - 1);
            counts[idx] += 1;
        }

        let bins: Vec<Bin> = counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| Bin {
                start: lo + i as f64 * width,
                end: if i + 1 == n_bins { hi } else { lo + (i + 1) as f64 * width },
                count,
            })
            .collect();

        let density = gaussian_kde(&values, width);
        Histogram { bins, density }
    }

    /// Total number of values bucketed.
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }
}

/// Gaussian KDE with Scott's bandwidth, evaluated over the data range and
/// scaled by `n * bin_width` so it overlays a count histogram.
fn gaussian_kde(values: &[f64], bin_width: f64) -> Vec<[f64; 2]> {
    let n = values.len();
    if n < 2 {
        return Vec::new();
    }
    let nf = n as f64;
    let mean = values.iter().sum::<f64>() / nf;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (nf - 1.0);
    let std_dev = variance.sqrt();
    if std_dev <= 0.0 || !std_dev.is_finite() {
        return Vec::new();
    }

    let bandwidth = std_dev * nf.powf(-0.2);
    let norm = 1.0 / (nf * bandwidth * (2.0 * PI).sqrt());
    let scale = nf * bin_width;

    let (lo, hi) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let step = (hi - lo) / (KDE_GRID_POINTS - 1) as f64;

    (0..KDE_GRID_POINTS)
        .map(|i| {
            let x = lo + i as f64 * step;
            let density: f64 = values
                .iter()
                .map(|&v| {
                    let z = (x - v) / bandwidth;
                    (-0.5 * z * z).exp()
                })
                .sum::<f64>()
                * norm;
            [x, density * scale]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_has_no_bins() {
        let h = Histogram::from_values(&[], DEFAULT_BINS);
        assert!(h.is_empty());
        assert!(h.density.is_empty());
        assert_eq!(h.total(), 0);
    }

    #[test]
    fn counts_cover_every_finite_value() {
        let values: Vec<f64> = (0..101).map(|i| i as f64).chain([f64::NAN]).collect();
        let h = Histogram::from_values(&values, DEFAULT_BINS);
        assert_eq!(h.bins.len(), DEFAULT_BINS);
        assert_eq!(h.total(), 101);
        assert_eq!(h.bins[0].start, 0.0);
        assert_eq!(h.bins[DEFAULT_BINS - 1].end, 100.0);
        // The maximum lands in the last, right-closed bin.
        assert_eq!(h.bins[DEFAULT_BINS - 1].count, 6);
    }

    #[test]
    fn negative_values_are_bucketed() {
        let h = Histogram::from_values(&[-3.0, 9.0, 9.0], 4);
        assert_eq!(h.bins[0].start, -3.0);
        assert_eq!(h.bins[0].count, 1);
        assert_eq!(h.bins[3].count, 2);
    }

    #[test]
    fn single_value_spans_unit_width() {
        let h = Histogram::from_values(&[5.0, 5.0], 20);
        assert_eq!(h.bins[0].start, 4.5);
        assert_eq!(h.bins[19].end, 5.5);
        assert_eq!(h.total(), 2);
        // No spread, no density curve.
        assert!(h.density.is_empty());
    }

    #[test]
    fn density_curve_spans_data_range() {
        let values: Vec<f64> = (0..50).map(|i| (i % 10) as f64).collect();
        let h = Histogram::from_values(&values, 10);
        assert_eq!(h.density.len(), KDE_GRID_POINTS);
        assert_eq!(h.density[0][0], 0.0);
        assert!((h.density[KDE_GRID_POINTS - 1][0] - 9.0).abs() < 1e-9);
        assert!(h.density.iter().all(|p| p[1] > 0.0));
    }

    #[test]
    fn density_curve_is_scaled_to_counts() {
        // A tight cluster well inside the range, so little mass falls off the ends.
        let values: Vec<f64> = (0..48)
            .map(|i| 45.0 + (i % 10) as f64)
            .chain([0.0, 100.0])
            .collect();
        let h = Histogram::from_values(&values, 10);
        let bin_width = h.bins[0].width();
        assert_eq!(bin_width, 10.0);

        let step = h.density[1][0] - h.density[0][0];
        let area: f64 = h.density.iter().map(|p| p[1] * step).sum();
        let expected = values.len() as f64 * bin_width;
        assert!((area / expected - 1.0).abs() < 0.05, "area {area} vs {expected}");
    }
}
