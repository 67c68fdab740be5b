use num::Float;

/// Evenly spaced samples over a closed interval, like numpy.linspace.
pub struct Linspace<F> {
    start: F,
    stop: F,
    step: F,
    index: usize,
    len: usize,
}

impl<F: Float> Linspace<F> {
    pub fn new(min: F, max: F, n: usize) -> Self {
        let step = if n > 1 {
            let num_steps = F::from(n - 1).unwrap_or_else(F::infinity);
            (max - min) / num_steps
        } else {
            F::zero()
        };
        Linspace {
            start: min,
            stop: max,
            step,
            index: 0,
            len: n,
        }
    }
}

impl<F: Float> Iterator for Linspace<F> {
    type Item = F;

    #[inline]
    fn next(&mut self) -> Option<F> {
        if self.index >= self.len {
            return None;
        }

        let i = self.index;
        self.index += 1;

        // numpy pins the endpoint so rounding in step * i can't overshoot or undershoot it
        if self.len > 1 && i == self.len - 1 {
            return Some(self.stop);
        }

        let offset = F::from(i).map_or(F::zero(), |i| self.step * i);
        Some(self.start + offset)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len - self.index;
        (n, Some(n))
    }
}

impl<F: Float> ExactSizeIterator for Linspace<F> {}

#[test]
fn test_linspace() {
    let grid: Vec<f64> = Linspace::new(0., 1., 5).collect();

    assert_eq!(grid, vec![0., 0.25, 0.5, 0.75, 1.]);

    let grid: Vec<f64> = Linspace::new(0., 10., 1001).collect();

    assert_eq!(grid.len(), 1001);
    assert_eq!(grid[0], 0.);
    assert_eq!(grid[1000], 10.);
}

#[test]
fn test_linspace_short() {
    assert_eq!(Linspace::new(2.0f64, 3., 1).collect::<Vec<_>>(), vec![2.]);
    assert!(Linspace::new(2.0f64, 3., 0).next().is_none());
    assert_eq!(Linspace::new(4.0f64, 4., 3).collect::<Vec<_>>(), vec![4., 4., 4.]);
}
