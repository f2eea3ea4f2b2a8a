//! Static chart datasets and the geometry derived from them

use std::f64::consts::TAU;

/// A labelled value in a static dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataPoint {
    pub name: &'static str,
    pub value: u64,
}

const fn point(name: &'static str, value: u64) -> DataPoint {
    DataPoint { name, value }
}

/// Monthly values plotted by the line chart
pub const MONTHLY_VALUES: &[DataPoint] = &[
    point("Jan", 400),
    point("Feb", 300),
    point("Mar", 600),
    point("Apr", 800),
    point("May", 500),
    point("Jun", 700),
];

/// Shares plotted by the pie chart
pub const GROUP_SHARES: &[DataPoint] = &[
    point("Group A", 400),
    point("Group B", 300),
    point("Group C", 300),
    point("Group D", 200),
];

/// `(index, value)` pairs for a line chart
pub fn line_points(data: &[DataPoint]) -> Vec<(f64, f64)> {
    data.iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.value as f64))
        .collect()
}

/// Y axis upper bound: the maximum rounded up to the next hundred
pub fn value_ceiling(data: &[DataPoint]) -> f64 {
    let max = data.iter().map(|p| p.value).max().unwrap_or(0);
    (max.div_ceil(100).max(1) * 100) as f64
}

/// One sector of a pie chart
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub name: &'static str,
    pub value: u64,
    pub fraction: f64,
    /// Start angle in radians, counter-clockwise from the positive x axis
    pub start: f64,
    pub sweep: f64,
}

impl PieSlice {
    pub fn contains_angle(&self, angle: f64) -> bool {
        angle >= self.start && angle < self.start + self.sweep
    }

    pub fn percent(&self) -> f64 {
        self.fraction * 100.0
    }
}

/// Split the full circle proportionally to each value.
///
/// Zero-valued entries produce no slice; an all-zero dataset produces none.
pub fn pie_slices(data: &[DataPoint]) -> Vec<PieSlice> {
    let total: u64 = data.iter().map(|p| p.value).sum();
    if total == 0 {
        return Vec::new();
    }

    let mut start = 0.0;
    data.iter()
        .filter(|p| p.value > 0)
        .map(|p| {
            let fraction = p.value as f64 / total as f64;
            let sweep = fraction * TAU;
            let slice = PieSlice {
                name: p.name,
                value: p.value,
                fraction,
                start,
                sweep,
            };
            start += sweep;
            slice
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_points() {
        let points = line_points(MONTHLY_VALUES);
        assert_eq!(points.len(), 6);
        assert_eq!(points[0], (0.0, 400.0));
        assert_eq!(points[3], (3.0, 800.0));
    }

    #[test]
    fn test_value_ceiling() {
        assert_eq!(value_ceiling(MONTHLY_VALUES), 800.0);
        assert_eq!(value_ceiling(&[point("x", 801)]), 900.0);
        assert_eq!(value_ceiling(&[]), 100.0);
    }

    #[test]
    fn test_pie_fractions_cover_circle() {
        let slices = pie_slices(GROUP_SHARES);
        assert_eq!(slices.len(), 4);

        let total: f64 = slices.iter().map(|s| s.fraction).sum();
        assert!((total - 1.0).abs() < 1e-9);

        let last = slices.last().unwrap();
        assert!((last.start + last.sweep - TAU).abs() < 1e-9);
        assert!((slices[0].percent() - 33.333).abs() < 0.01);
    }

    #[test]
    fn test_pie_slices_are_contiguous() {
        let slices = pie_slices(GROUP_SHARES);
        for pair in slices.windows(2) {
            assert!((pair[0].start + pair[0].sweep - pair[1].start).abs() < 1e-9);
        }
        assert!(slices[1].contains_angle(slices[1].start));
        assert!(!slices[1].contains_angle(slices[0].start));
    }

    #[test]
    fn test_pie_skips_zero_values() {
        assert!(pie_slices(&[point("a", 0), point("b", 0)]).is_empty());

        let slices = pie_slices(&[point("a", 0), point("b", 5)]);
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].fraction, 1.0);
    }
}
