use std::cmp::Ordering;

/// Single-pass mean and variance (Welford's algorithm) plus min and max.
#[derive(Debug, Clone, Copy)]
pub struct Moments {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl Moments {
    pub fn new() -> Moments {
        Moments {
            count: 0,
            mean: 0.0,
            m2: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    pub fn from_values(data: &[f64]) -> Moments {
        let mut moments = Moments::new();
        for &value in data {
            moments.add(value);
        }
        moments
    }

    pub fn add(&mut self, value: f64) {
        self.count += 1;
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }

        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn mean(&self) -> Option<f64> {
        (!self.is_empty()).then_some(self.mean)
    }

    pub fn min(&self) -> Option<f64> {
        (!self.is_empty()).then_some(self.min)
    }

    pub fn max(&self) -> Option<f64> {
        (!self.is_empty()).then_some(self.max)
    }

    /// Divides by `n`.
    pub fn population_variance(&self) -> Option<f64> {
        (!self.is_empty()).then(|| self.m2 / self.count as f64)
    }

    /// Divides by `n - 1`; a single value has zero variance.
    pub fn sample_variance(&self) -> Option<f64> {
        match self.count {
            0 => None,
            1 => Some(0.0),
            n => Some(self.m2 / (n - 1) as f64),
        }
    }
}

/// Middle value of `data`, averaging the two middle values for even counts.
///
/// Sorts `data` in place.
pub fn median(data: &mut [f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    data.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let mid = data.len() / 2;
    if data.len() % 2 == 0 {
        Some((data[mid - 1] + data[mid]) / 2.0)
    } else {
        Some(data[mid])
    }
}

pub fn sum(data: &[f64]) -> f64 {
    data.iter().sum()
}

pub fn product(data: &[f64]) -> f64 {
    data.iter().product()
}

/// The report printed by `summary`.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub size: usize,
    pub min: f64,
    pub mean: f64,
    pub median: f64,
    pub max: f64,
    pub variance: f64,
    pub std_dev: f64,
}

impl Summary {
    pub const HEADER: &'static str = "size\tmin\tmean\tmedian\tmax\tvariance\tstd_dev";

    pub fn compute(data: &[f64]) -> Option<Summary> {
        let moments = Moments::from_values(data);
        let variance = moments.population_variance()?;
        let median = median(&mut data.to_vec())?;

        Some(Summary {
            size: data.len(),
            min: moments.min()?,
            mean: moments.mean()?,
            median,
            max: moments.max()?,
            variance,
            std_dev: variance.sqrt(),
        })
    }

    /// Tab-separated values, two decimals for everything but `size`.
    pub fn row(&self) -> String {
        format!(
            "{}\t{:.2}\t{:.2}\t{:.2}\t{:.2}\t{:.2}\t{:.2}",
            self.size, self.min, self.mean, self.median, self.max, self.variance, self.std_dev
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn summary_of_one_to_five() {
        let summary = Summary::compute(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(summary.size, 5);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 5.0);
        assert!((summary.mean - 3.0).abs() < 1e-12);
        assert_eq!(summary.median, 3.0);
        assert!((summary.variance - 2.0).abs() < 1e-12);
        assert_eq!(summary.row(), "5\t1.00\t3.00\t3.00\t5.00\t2.00\t1.41");
    }

    #[test]
    fn summary_of_nothing() {
        assert_eq!(Summary::compute(&[]), None);
    }

    #[test]
    fn median_odd_and_even() {
        assert_eq!(median(&mut [1.0, 2.0, 3.0, 4.0]), Some(2.5));
        assert_eq!(median(&mut [5.0, 1.0, 3.0]), Some(3.0));
        assert_eq!(median(&mut [7.0]), Some(7.0));
        assert_eq!(median(&mut []), None);
    }

    #[test]
    fn sums_and_products() {
        assert_eq!(sum(&[]), 0.0);
        assert_eq!(sum(&[1.0, 2.0, 3.0]), 6.0);
        assert_eq!(product(&[]), 1.0);
        assert_eq!(product(&[2.0, 3.0, 4.0]), 24.0);
    }

    #[test]
    fn population_and_sample_variance() {
        let moments = Moments::from_values(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((moments.mean().unwrap() - 5.0).abs() < 1e-12);
        assert!((moments.population_variance().unwrap() - 4.0).abs() < 1e-12);
        assert!((moments.sample_variance().unwrap() - 32.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn single_value_has_no_spread() {
        let moments = Moments::from_values(&[42.0]);
        assert_eq!(moments.sample_variance(), Some(0.0));
        assert_eq!(moments.population_variance(), Some(0.0));
        assert_eq!(moments.min(), Some(42.0));
        assert_eq!(moments.max(), Some(42.0));
    }

    #[test]
    fn empty_moments() {
        let moments = Moments::new();
        assert!(moments.is_empty());
        assert_eq!(moments.mean(), None);
        assert_eq!(moments.sample_variance(), None);
    }

    #[test]
    fn large_offsets_stay_stable() {
        let data: Vec<f64> = (0..1000).map(|i| 1e12 + i as f64).collect();
        let moments = Moments::from_values(&data);
        assert!((moments.mean().unwrap() - (1e12 + 499.5)).abs() < 1e-2);
        let variance = moments.population_variance().unwrap();
        assert!((variance - 83333.25).abs() / 83333.25 < 1e-4);
    }

    proptest! {
        #[test]
        fn mean_lies_between_min_and_max(data in prop::collection::vec(-1e9f64..1e9, 1..200)) {
            let moments = Moments::from_values(&data);
            let (min, mean, max) = (
                moments.min().unwrap(),
                moments.mean().unwrap(),
                moments.max().unwrap(),
            );
            let slack = 1e-9 * max.abs().max(min.abs()).max(1.0);
            prop_assert!(min - slack <= mean && mean <= max + slack);
        }

        #[test]
        fn median_lies_between_min_and_max(data in prop::collection::vec(-1e9f64..1e9, 1..200)) {
            let summary = Summary::compute(&data).unwrap();
            prop_assert!(summary.min <= summary.median && summary.median <= summary.max);
            prop_assert!(summary.variance >= 0.0);
        }
    }
}
