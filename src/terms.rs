use serde::Deserialize;

use crate::math::{interp, sort_knots};

/// A named, piecewise-linear membership function.
///
/// Knots are kept sorted by x (stable, so duplicates keep their given order).
/// Heights are expected to lie in `[0, 1]` but this is not checked.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "FuzzySetDocument")]
pub struct FuzzySet {
    id: String,
    points: Vec<(f64, f64)>,
}

#[derive(Deserialize)]
struct FuzzySetDocument {
    id: String,
    points: Vec<(f64, f64)>,
}

impl From<FuzzySetDocument> for FuzzySet {
    fn from(doc: FuzzySetDocument) -> Self {
        FuzzySet::new(doc.id, doc.points)
    }
}

impl FuzzySet {
    pub fn new(id: impl Into<String>, mut points: Vec<(f64, f64)>) -> Self {
        sort_knots(&mut points);

        Self { id: id.into(), points }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The knots, sorted by x
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Membership degree of `value` in this set. Sets with fewer than two knots
    /// have zero membership everywhere.
    pub fn degree(&self, value: f64) -> f64 {
        interp(value, &self.points)
    }
}

#[test]
fn test_degree_on_slope() {
    let cold = FuzzySet::new("cold", vec![(0., 1.), (10., 1.), (20., 0.)]);

    assert_eq!(cold.degree(15.), 0.5);
    assert_eq!(cold.degree(5.), 1.);
    assert_eq!(cold.degree(-40.), 1.);
    assert_eq!(cold.degree(40.), 0.);
}

#[test]
fn test_degree_sorts_knots() {
    let cold = FuzzySet::new("cold", vec![(20., 0.), (0., 1.), (10., 1.)]);

    assert_eq!(cold.points(), &[(0., 1.), (10., 1.), (20., 0.)]);
    assert_eq!(cold.degree(15.), 0.5);
}

#[test]
fn test_degree_duplicate_x() {
    let step = FuzzySet::new("step", vec![(0., 0.), (5., 0.2), (5., 0.8), (10., 1.)]);

    // The first segment ending at x = 5 brackets it
    assert_eq!(step.degree(5.), 0.2);
    assert_eq!(step.degree(7.5), 0.9);
}

#[test]
fn test_degree_too_few_points() {
    assert_eq!(FuzzySet::new("empty", Vec::new()).degree(1.), 0.);
    assert_eq!(FuzzySet::new("single", vec![(1., 1.)]).degree(1.), 0.);
}

#[test]
fn test_deserialize() {
    let set: FuzzySet = serde_json::from_str(r#"{"id": "warm", "points": [[25, 0], [15, 0], [20, 1]]}"#).unwrap();

    assert_eq!(set.id(), "warm");
    assert_eq!(set.points(), &[(15., 0.), (20., 1.), (25., 0.)]);
}

#[test]
fn test_degree_nan_knots() {
    let set = FuzzySet::new(
        "noisy",
        vec![(0., 0.), (f64::NAN, 0.5), (10., 1.), (f64::NAN, 0.3), (5., 0.5)],
    );

    assert_eq!(&set.points()[..3], &[(0., 0.), (5., 0.5), (10., 1.)]);
    assert!(set.points()[3..].iter().all(|(x, _)| x.is_nan()));
    assert_eq!(set.degree(-1.), 0.);
    assert_eq!(set.degree(2.5), 0.25);
    assert_eq!(set.degree(7.5), 0.75);
}
