use serde::Deserialize;
use tracing::debug;

use crate::variable::Degrees;

/// A rule base: each rule maps an input term onto an output term.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct Rules(pub(crate) Vec<Rule>);

impl Rules {
    pub fn new() -> Self {
        Rules(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Rules(Vec::with_capacity(capacity))
    }

    /// "If input is `premise` then output is `consequence`"
    pub fn add(&mut self, premise: impl Into<String>, consequence: impl Into<String>) {
        self.0.push(Rule {
            premise: premise.into(),
            consequence: consequence.into(),
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Activation level of every rule, in rule order. A premise naming a term that was
    /// not fuzzified gives the rule zero activation.
    pub fn activate(&self, degrees: &Degrees) -> Vec<f64> {
        self.0
            .iter()
            .map(|rule| match degrees.get(&rule.premise) {
                Some(degree) => *degree,
                None => {
                    debug!(premise = %rule.premise, "unknown premise term, rule not activated");
                    0.
                },
            })
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "(String, String)")]
pub struct Rule {
    pub(crate) premise: String,
    pub(crate) consequence: String,
}

impl From<(String, String)> for Rule {
    fn from((premise, consequence): (String, String)) -> Self {
        Rule { premise, consequence }
    }
}

impl Rule {
    pub fn premise(&self) -> &str {
        &self.premise
    }

    pub fn consequence(&self) -> &str {
        &self.consequence
    }
}

#[test]
fn test_activate() {
    let mut rules = Rules::new();

    rules.add("cold", "heat_on");
    rules.add("hot", "heat_off");
    rules.add("freezing", "heat_max");

    let degrees = Degrees::from([("cold".to_owned(), 0.8), ("hot".to_owned(), 0.)]);

    assert_eq!(rules.activate(&degrees), vec![0.8, 0., 0.]);
    assert!(Rules::new().activate(&degrees).is_empty());
}

#[test]
fn test_deserialize() {
    let rules: Rules = serde_json::from_str(r#"[["cold", "heat_on"], ["hot", "heat_off"]]"#).unwrap();

    assert_eq!(rules.len(), 2);
    assert_eq!(rules.iter().nth(1).map(Rule::consequence), Some("heat_off"));
}
