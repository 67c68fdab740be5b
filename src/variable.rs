use std::collections::HashMap;

use serde::Deserialize;
use tracing::trace;

use crate::config::{ConfigError, Result};
use crate::terms::FuzzySet;

/// Membership degree of a crisp value in every term of a variable, keyed by term id
pub type Degrees = HashMap<String, f64>;

/// A named quantity, such as temperature, described by its fuzzy terms.
///
/// Terms iterate in the order they were added. When two terms share an id, lookups
/// by id resolve to the first of them.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(from = "Vec<FuzzySet>")]
pub struct LinguisticVariable {
    terms: Vec<FuzzySet>,
    index: HashMap<String, usize>,
}

impl From<Vec<FuzzySet>> for LinguisticVariable {
    fn from(terms: Vec<FuzzySet>) -> Self {
        let mut this = Self::with_capacity(terms.len());

        for term in terms {
            this.insert(term);
        }

        this
    }
}

impl LinguisticVariable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            terms: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    pub fn with_term(mut self, id: impl Into<String>, points: Vec<(f64, f64)>) -> Self {
        self.insert(FuzzySet::new(id, points));
        self
    }

    pub fn insert(&mut self, term: FuzzySet) {
        self.index.entry(term.id().to_owned()).or_insert(self.terms.len());
        self.terms.push(term);
    }

    pub fn get(&self, id: &str) -> Option<&FuzzySet> {
        match self.index.get(id) {
            Some(i) => Some(&self.terms[*i]),
            None => None,
        }
    }

    pub fn terms(&self) -> impl Iterator<Item = &FuzzySet> {
        self.terms.iter()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Smallest and largest knot x over all terms, or `None` if no term has any knots
    pub fn universe_bounds(&self) -> Option<(f64, f64)> {
        self.terms
            .iter()
            .flat_map(|term| term.points().iter().map(|(x, _)| *x))
            .fold(None, |bounds, x| match bounds {
                None => Some((x, x)),
                Some((min, max)) => Some((f64::min(min, x), f64::max(max, x))),
            })
    }

    /// Fuzzificate a crisp value against every term
    pub fn fuzzify(&self, value: f64) -> Degrees {
        let mut degrees = HashMap::with_capacity(self.terms.len());

        for term in &self.terms {
            let degree = term.degree(value);

            trace!(term = term.id(), value, degree, "fuzzified");
            degrees.insert(term.id().to_owned(), degree);
        }

        degrees
    }
}

/// A configuration document holding linguistic variables by name
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct Variables(HashMap<String, LinguisticVariable>);

impl Variables {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    pub fn insert(&mut self, name: impl Into<String>, variable: LinguisticVariable) {
        self.0.insert(name.into(), variable);
    }

    pub fn get(&self, name: &str) -> Result<&LinguisticVariable> {
        self.0
            .get(name)
            .ok_or_else(|| ConfigError::MissingVariable(name.to_owned()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

#[test]
fn test_fuzzify() {
    let temperature = LinguisticVariable::new()
        .with_term("cold", vec![(0., 1.), (10., 1.), (20., 0.)])
        .with_term("warm", vec![(10., 0.), (20., 1.), (30., 0.)])
        .with_term("broken", vec![(10., 1.)]);

    let degrees = temperature.fuzzify(15.);

    assert_eq!(degrees.len(), 3);
    assert_eq!(degrees["cold"], 0.5);
    assert_eq!(degrees["warm"], 0.5);
    assert_eq!(degrees["broken"], 0.);
}

#[test]
fn test_lookup_first_duplicate_wins() {
    let heat = LinguisticVariable::new()
        .with_term("on", vec![(0., 0.), (10., 1.)])
        .with_term("on", vec![(0., 1.), (10., 0.)]);

    assert_eq!(heat.len(), 2);
    assert_eq!(heat.get("on").map(|t| t.degree(10.)), Some(1.));
    assert!(heat.get("off").is_none());
}

#[test]
fn test_universe_bounds() {
    let heat = LinguisticVariable::new()
        .with_term("low", vec![(2., 1.), (5., 0.)])
        .with_term("single", vec![(-3., 1.)])
        .with_term("high", vec![(5., 0.), (12., 1.)]);

    assert_eq!(heat.universe_bounds(), Some((-3., 12.)));
    assert_eq!(LinguisticVariable::new().universe_bounds(), None);
    assert_eq!(
        LinguisticVariable::new().with_term("none", Vec::new()).universe_bounds(),
        None
    );
}

#[test]
fn test_variables_lookup() {
    let mut vars = Variables::new();

    vars.insert("temperature", LinguisticVariable::new());

    assert!(vars.get("temperature").is_ok());
    assert!(matches!(vars.get("pressure"), Err(ConfigError::MissingVariable(name)) if name == "pressure"));
}
