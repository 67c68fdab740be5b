use num::Float;

/// Similar to numpy.interp for a single sample, over knots already sorted by x.
///
/// Fewer than two knots describe no curve at all and evaluate to zero. Outside
/// the knot range the curve is clamped to the nearest end. A zero-width segment
/// evaluates to the mean of its two heights.
pub(crate) fn interp<F: Float>(x: F, knots: &[(F, F)]) -> F {
    let [(x_first, y_first), .., (x_last, y_last)] = knots else {
        return F::zero();
    };

    // Base cases
    if x <= *x_first {
        return *y_first;
    }
    if x >= *x_last {
        return *y_last;
    }

    for pair in knots.windows(2) {
        let (x1, y1) = pair[0];
        let (x2, y2) = pair[1];

        if x1 <= x && x <= x2 {
            let dx = x2 - x1;

            if dx == F::zero() {
                return (y1 + y2) / (F::one() + F::one());
            }

            return y1 + (y2 - y1) * (x - x1) / dx;
        }
    }

    // Only reachable for NaN, which fails every comparison above
    F::zero()
}

/// Stable sort by x, so knots sharing an x keep the order they were given in.
/// NaN x-coordinates sort last.
pub(crate) fn sort_knots<F: Float>(knots: &mut [(F, F)]) {
    knots.sort_by(|(a, _), (b, _)| a.partial_cmp(b).unwrap_or_else(|| a.is_nan().cmp(&b.is_nan())));
}

#[test]
fn test_interp() {
    use approx::assert_relative_eq;

    let knots = [(1., 3.), (2., 2.), (3., 0.)];
    let x = [0., 1., 1.5, 2.72, 3.24];
    let y: Vec<f64> = x.iter().map(|x| interp(*x, &knots)).collect();

    assert_eq!(&y[..3], &[3., 3., 2.5]);
    assert_relative_eq!(y[3], 0.56, epsilon = 1e-12);
    assert_eq!(y[4], 0.);

    let knots = [(0., 0.), (1., 2.), (2., 5.), (3., 3.), (4.5, 2.)];

    assert_eq!(interp(2.5, &knots), 4.);
    assert_eq!(interp(-1., &knots), 0.);
    assert_eq!(interp(7.5, &knots), 2.);
}

#[test]
fn test_interp_degenerate() {
    assert_eq!(interp(3., &[]), 0.);
    assert_eq!(interp(3., &[(3., 0.7)]), 0.);
    assert_eq!(interp(f64::NAN, &[(0., 1.), (1., 0.)]), 0.);
}

#[test]
fn test_sort_knots_is_stable() {
    let mut knots = [(10., 1.), (5., 0.8), (0., 0.), (5., 0.2)];

    sort_knots(&mut knots);

    assert_eq!(knots, [(0., 0.), (5., 0.8), (5., 0.2), (10., 1.)]);
}

#[test]
fn test_sort_knots_nan_last() {
    let mut knots: Vec<(f64, f64)> = (0..64)
        .map(|i| if i % 3 == 0 { (f64::NAN, 0.5) } else { (f64::from(64 - i), 1.) })
        .collect();

    sort_knots(&mut knots);

    let finite = knots.iter().take_while(|(x, _)| !x.is_nan()).count();

    assert_eq!(finite, 42);
    assert!(knots[..finite].windows(2).all(|w| w[0].0 <= w[1].0));
    assert!(knots[finite..].iter().all(|(x, _)| x.is_nan()));
}
