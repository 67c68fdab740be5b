use rayon::prelude::*;
use tracing::{debug, trace};

use crate::config::{InferenceConfig, DEFAULT_UNIVERSE};
use crate::linspace::Linspace;
use crate::ops::{clip, middle_of_maximum, union_into};
use crate::outputs::Outputs;
use crate::rules::Rules;
use crate::variable::LinguisticVariable;

/// Single input, single output Mamdani inference: min implication, max aggregation
/// and middle of maximum defuzzification.
#[derive(Clone, Copy, Debug, Default)]
pub struct MamdaniInference {
    config: InferenceConfig,
}

impl MamdaniInference {
    pub fn new(config: InferenceConfig) -> Self {
        Self { config }
    }

    pub fn with_resolution(resolution: usize) -> Self {
        Self::new(InferenceConfig {
            resolution,
            ..InferenceConfig::default()
        })
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// The discretized output universe, spanning every knot of every output term.
    pub fn universe(&self, output: &LinguisticVariable) -> Vec<f64> {
        let (min_u, max_u) = output.universe_bounds().unwrap_or(DEFAULT_UNIVERSE);

        debug!(min_u, max_u, resolution = self.config.resolution, "output universe");

        Linspace::new(min_u, max_u, self.config.resolution).collect()
    }

    pub fn eval(&self, input_value: f64, input: &LinguisticVariable, output: &LinguisticVariable, rules: &Rules) -> Outputs {
        let universe = self.universe(output);

        // Fuzzificate the crisp input
        let degrees = input.fuzzify(input_value);

        // Rule activation
        let activations = rules.activate(&degrees);

        debug!(input_value, ?activations, "rules activated");

        // Implication and aggregation
        let aggregated_membership = aggregate(&activations, rules, output, &universe);

        // Defuzzificate
        let crisp = self.defuzzify(&universe, &aggregated_membership);

        debug!(input_value, crisp, "inferred");

        Outputs::new(degrees, activations, universe, aggregated_membership, crisp)
    }

    /// Evaluates many crisp inputs against the same configuration, in parallel.
    /// Results are in input order.
    pub fn eval_many(
        &self,
        input_values: &[f64],
        input: &LinguisticVariable,
        output: &LinguisticVariable,
        rules: &Rules,
    ) -> Vec<f64> {
        input_values
            .par_iter()
            .map(|value| self.eval(*value, input, output, rules).crisp())
            .collect()
    }

    pub fn defuzzify(&self, universe: &[f64], aggregated_membership: &[f64]) -> f64 {
        middle_of_maximum(universe, aggregated_membership, self.config.tolerance)
    }
}

/// Clips each rule's consequence at its activation level and takes the pointwise
/// maximum over all rules. Rules that did not fire, or whose consequence is not an
/// output term, contribute nothing.
pub fn aggregate(activations: &[f64], rules: &Rules, output: &LinguisticVariable, universe: &[f64]) -> Vec<f64> {
    let mut aggregated = vec![0.; universe.len()];

    for (activation, rule) in activations.iter().copied().zip(rules.iter()) {
        let Some(consequence) = output.get(rule.consequence()) else {
            debug!(consequence = rule.consequence(), "unknown consequence term, rule skipped");
            continue;
        };

        if activation == 0. {
            trace!(premise = rule.premise(), "rule did not fire");
            continue;
        }

        let membership = universe.iter().map(|u| consequence.degree(*u));

        union_into(&mut aggregated, clip(activation, membership));
    }

    aggregated
}

/// Crisp output of the rule base for `input_value`, sampling the output universe at
/// `resolution` points.
pub fn infer(
    input_value: f64,
    input: &LinguisticVariable,
    output: &LinguisticVariable,
    rules: &Rules,
    resolution: usize,
) -> f64 {
    MamdaniInference::with_resolution(resolution)
        .eval(input_value, input, output, rules)
        .crisp()
}

#[cfg(test)]
fn heating() -> (LinguisticVariable, LinguisticVariable) {
    let temperature = LinguisticVariable::new()
        .with_term("cold", vec![(0., 1.), (10., 1.), (20., 0.)])
        .with_term("hot", vec![(10., 0.), (20., 1.), (30., 1.)]);
    let heat = LinguisticVariable::new()
        .with_term("heat_on", vec![(0., 0.), (5., 1.), (10., 0.)])
        .with_term("heat_off", vec![(0., 1.), (2., 0.)]);

    (temperature, heat)
}

#[test]
fn test_clipped_consequence() {
    use approx::assert_relative_eq;

    let (temperature, heat) = heating();
    let mut rules = Rules::new();

    rules.add("cold", "heat_on");

    let outputs = MamdaniInference::default().eval(12., &temperature, &heat, &rules);

    assert_eq!(outputs.activations(), &[0.8]);
    assert_eq!(outputs.universe().len(), 1001);

    let heat_on = heat.get("heat_on").unwrap();

    for (u, m) in outputs.universe().iter().zip(outputs.aggregated_membership()) {
        assert_eq!(*m, f64::min(0.8, heat_on.degree(*u)));
    }

    let peak = outputs.aggregated_membership().iter().copied().fold(0., f64::max);

    assert_eq!(peak, 0.8);
    // Plateau spans [4, 6]
    assert_relative_eq!(outputs.crisp(), 5., epsilon = 1e-9);
}

#[test]
fn test_plateau_midpoint_is_not_the_apex() {
    use approx::assert_relative_eq;

    let temperature = LinguisticVariable::new().with_term("cool", vec![(0., 1.), (10., 0.)]);
    let heat = LinguisticVariable::new().with_term("heat_on", vec![(0., 0.), (2., 1.), (10., 0.)]);
    let mut rules = Rules::new();

    rules.add("cool", "heat_on");

    // Activation 0.5 clips the triangle to a plateau over [1, 6]
    let crisp = infer(5., &temperature, &heat, &rules, 1001);

    assert_relative_eq!(crisp, 3.5, epsilon = 1e-9);
}

#[test]
fn test_max_aggregation() {
    use approx::assert_relative_eq;

    let (temperature, heat) = heating();
    let mut rules = Rules::new();

    rules.add("cold", "heat_on");
    rules.add("hot", "heat_off");

    // cold = 0.9, hot = 0.1: heat_on dominates
    let outputs = MamdaniInference::default().eval(11., &temperature, &heat, &rules);

    assert_relative_eq!(outputs.activations()[0], 0.9, epsilon = 1e-12);
    assert_relative_eq!(outputs.activations()[1], 0.1, epsilon = 1e-12);
    assert_relative_eq!(outputs.crisp(), 5., epsilon = 1e-9);

    // Fully hot: only heat_off fires, its peak sits at the left edge
    let crisp = MamdaniInference::default().eval(25., &temperature, &heat, &rules).crisp();

    assert_eq!(crisp, 0.);
}

#[test]
fn test_no_rules_fire() {
    let (temperature, heat) = heating();

    assert_eq!(infer(12., &temperature, &heat, &Rules::new(), 1001), 0.);

    let mut rules = Rules::new();

    rules.add("freezing", "heat_on");

    let outputs = MamdaniInference::default().eval(12., &temperature, &heat, &rules);

    assert_eq!(outputs.activations(), &[0.]);
    assert!(outputs.aggregated_membership().iter().all(|m| *m == 0.));
    assert_eq!(outputs.crisp(), 0.);
}

#[test]
fn test_unknown_consequence_contributes_nothing() {
    let (temperature, heat) = heating();
    let mut rules = Rules::new();

    rules.add("cold", "heat_on");

    let without = MamdaniInference::default().eval(12., &temperature, &heat, &rules);

    rules.add("cold", "heat_turbo");

    let with = MamdaniInference::default().eval(12., &temperature, &heat, &rules);

    assert_eq!(with.activations(), &[0.8, 0.8]);
    assert_eq!(with.aggregated_membership(), without.aggregated_membership());
    assert_eq!(with.crisp(), without.crisp());
}

#[test]
fn test_default_universe() {
    let temperature = LinguisticVariable::new().with_term("cold", vec![(0., 1.), (10., 0.)]);
    let heat = LinguisticVariable::new().with_term("heat_on", Vec::new());
    let inference = MamdaniInference::with_resolution(11);
    let universe = inference.universe(&heat);

    assert_eq!(universe.len(), 11);
    assert_eq!(universe[0], 0.);
    assert_eq!(universe[10], 10.);

    let mut rules = Rules::new();

    rules.add("cold", "heat_on");

    // The consequence has no knots so its membership is zero everywhere
    assert_eq!(inference.eval(0., &temperature, &heat, &rules).crisp(), 0.);
}

#[test]
fn test_degenerate_resolution() {
    let (temperature, heat) = heating();
    let mut rules = Rules::new();

    rules.add("cold", "heat_on");

    assert_eq!(infer(12., &temperature, &heat, &rules, 0), 0.);

    // A single sample sits on the lower bound, where heat_on is zero
    assert_eq!(infer(12., &temperature, &heat, &rules, 1), 0.);
}

#[test]
fn test_eval_many() {
    let (temperature, heat) = heating();
    let mut rules = Rules::new();

    rules.add("cold", "heat_on");
    rules.add("hot", "heat_off");

    let inputs: Vec<f64> = (0..40).map(|t| t as f64).collect();
    let inference = MamdaniInference::default();
    let batch = inference.eval_many(&inputs, &temperature, &heat, &rules);
    let serial: Vec<f64> = inputs
        .iter()
        .map(|t| inference.eval(*t, &temperature, &heat, &rules).crisp())
        .collect();

    assert_eq!(batch, serial);
}

#[cfg(test)]
mod proptests {
    use proptest::prelude::*;

    use super::*;
    use crate::terms::FuzzySet;

    fn knots() -> impl Strategy<Value = Vec<(f64, f64)>> {
        prop::collection::vec((-100.0..100.0f64, 0.0..=1.0f64), 2..8)
    }

    fn distinct_knots() -> impl Strategy<Value = Vec<(f64, f64)>> {
        (
            prop::collection::btree_set(-1000i32..1000, 2..8),
            prop::collection::vec(0.0..=1.0f64, 8),
        )
            .prop_map(|(xs, ys)| xs.into_iter().map(|x| f64::from(x) / 10.).zip(ys).collect())
    }

    proptest! {
        #[test]
        fn degree_is_clamped_outside_the_knots(points in knots(), offset in 0.001..1000.0f64) {
            let set = FuzzySet::new("term", points);
            let (x_first, y_first) = set.points()[0];
            let (x_last, y_last) = set.points()[set.points().len() - 1];

            prop_assert_eq!(set.degree(x_first - offset), y_first);
            prop_assert_eq!(set.degree(x_last + offset), y_last);
        }

        #[test]
        fn degree_stays_within_knot_heights(points in knots(), t in 0.0..=1.0f64) {
            let set = FuzzySet::new("term", points);
            let (x_first, _) = set.points()[0];
            let (x_last, _) = set.points()[set.points().len() - 1];
            let x = x_first + (x_last - x_first) * t;
            let degree = set.degree(x);
            let lo = set.points().iter().map(|(_, y)| *y).fold(f64::INFINITY, f64::min);
            let hi = set.points().iter().map(|(_, y)| *y).fold(f64::NEG_INFINITY, f64::max);

            prop_assert!(lo - 1e-12 <= degree && degree <= hi + 1e-12);
        }

        #[test]
        fn degree_is_linear_between_knots(points in distinct_knots()) {
            let set = FuzzySet::new("term", points);

            for (x, y) in set.points() {
                prop_assert!((set.degree(*x) - y).abs() <= 1e-12);
            }

            for pair in set.points().windows(2) {
                let (x1, y1) = pair[0];
                let (x2, y2) = pair[1];

                prop_assert!((set.degree((x1 + x2) / 2.) - (y1 + y2) / 2.).abs() <= 1e-12);
            }
        }

        #[test]
        fn zero_curve_defuzzificates_to_zero(min_u in -50.0..50.0f64, width in 0.0..50.0f64, n in 0usize..200) {
            let universe: Vec<f64> = Linspace::new(min_u, min_u + width, n).collect();
            let membership = vec![0.; n];

            prop_assert_eq!(MamdaniInference::default().defuzzify(&universe, &membership), 0.);
        }

        #[test]
        fn single_peak_defuzzificates_to_its_point(n in 1usize..300, k in 0usize..300, height in 0.01..=1.0f64) {
            let k = k % n;
            let universe: Vec<f64> = Linspace::new(-5., 5., n).collect();
            let mut membership = vec![0.; n];

            membership[k] = height;

            prop_assert_eq!(MamdaniInference::default().defuzzify(&universe, &membership), universe[k]);
        }

        #[test]
        fn inference_is_deterministic(input_value in -10.0..40.0f64) {
            let (temperature, heat) = heating();
            let mut rules = Rules::new();

            rules.add("cold", "heat_on");
            rules.add("hot", "heat_off");

            let first = infer(input_value, &temperature, &heat, &rules, 1001);
            let second = infer(input_value, &temperature, &heat, &rules, 1001);

            prop_assert_eq!(first.to_bits(), second.to_bits());
        }
    }
}
