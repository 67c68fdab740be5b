use num::Float;

/// Mamdani implication: bounds a consequence's membership function by the
/// activation level of its rule.
pub fn clip<F: Float>(activation: F, membership: impl IntoIterator<Item = F>) -> impl Iterator<Item = F> {
    membership.into_iter().map(move |m| F::min(activation, m))
}

/// Fuzzy union (max production link). Folds `membership` into `aggregate` pointwise.
pub fn union_into<F: Float>(aggregate: &mut [F], membership: impl IntoIterator<Item = F>) {
    for (agg, m) in aggregate.iter_mut().zip(membership) {
        *agg = F::max(*agg, m);
    }
}

/// Middle of maximum defuzzification.
///
/// Finds every universe point whose membership is within `tolerance` of the peak and
/// returns the midpoint between the first and the last of them. A curve that is empty
/// or never rises above zero defuzzificates to zero.
pub fn middle_of_maximum<F: Float>(universe: &[F], membership: &[F], tolerance: F) -> F {
    let Some(peak) = membership.iter().copied().reduce(F::max) else {
        return F::zero();
    };

    if peak == F::zero() {
        return F::zero();
    }

    let mut plateau = universe
        .iter()
        .copied()
        .zip(membership.iter().copied())
        .filter_map(|(u, m)| if (m - peak).abs() <= tolerance { Some(u) } else { None });

    let Some(first) = plateau.next() else {
        return F::zero();
    };
    let last = plateau.last().unwrap_or(first);

    (first + last) / (F::one() + F::one())
}

#[test]
fn test_clip() {
    let clipped: Vec<f64> = clip(0.5, [0., 0.25, 0.5, 0.75, 1.]).collect();

    assert_eq!(clipped, vec![0., 0.25, 0.5, 0.5, 0.5]);
}

#[test]
fn test_union_into() {
    let mut agg = vec![0., 0.3, 0.6, 0.2];

    union_into(&mut agg, [0.5, 0.1, 0.7, 0.2]);

    assert_eq!(agg, vec![0.5, 0.3, 0.7, 0.2]);
}

#[test]
fn test_middle_of_maximum() {
    let universe = [0., 1., 2., 3., 4., 5.];

    assert_eq!(middle_of_maximum(&universe, &[0., 0.2, 0.6, 0.6, 0.6, 0.1], 1e-6), 3.);
    assert_eq!(middle_of_maximum(&universe, &[0., 0.9, 0., 0., 0., 0.], 1e-6), 1.);
    // Two separate peaks: only the outermost maxima count
    assert_eq!(middle_of_maximum(&universe, &[0.4, 0.1, 0., 0., 0.1, 0.4], 1e-6), 2.5);
    assert_eq!(middle_of_maximum(&universe, &[0.; 6], 1e-6), 0.);
    assert_eq!(middle_of_maximum::<f64>(&[], &[], 1e-6), 0.);
}

#[test]
fn test_middle_of_maximum_tolerance() {
    let universe = [0., 1., 2., 3.];
    let membership = [0.5, 0.5 - 1e-7, 0.5 - 1e-3, 0.];

    assert_eq!(middle_of_maximum(&universe, &membership, 1e-6), 0.5);
    assert_eq!(middle_of_maximum(&universe, &membership, 1e-2), 1.);
    assert_eq!(middle_of_maximum(&universe, &membership, 0.), 0.);
}
