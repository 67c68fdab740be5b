//! Mamdani fuzzy inference for single input, single output controllers.
//!
//! A crisp input is fuzzificated against the terms of an input
//! [`LinguisticVariable`], every rule is activated by the degree of its premise
//! term, each consequence is clipped at its rule's activation and the clipped
//! curves are merged by pointwise maximum. The resulting membership function is
//! defuzzificated with the middle of maximum method.
//!
//! ```
//! use fuzzy_control::{infer, LinguisticVariable, Rules};
//!
//! let temperature = LinguisticVariable::new()
//!     .with_term("cold", vec![(0., 1.), (10., 1.), (20., 0.)])
//!     .with_term("hot", vec![(10., 0.), (20., 1.)]);
//! let heating = LinguisticVariable::new()
//!     .with_term("heat_on", vec![(0., 0.), (5., 1.), (10., 0.)])
//!     .with_term("heat_off", vec![(0., 1.), (2., 0.)]);
//! let mut rules = Rules::new();
//!
//! rules.add("cold", "heat_on");
//! rules.add("hot", "heat_off");
//!
//! let control = infer(12., &temperature, &heating, &rules, 1001);
//!
//! assert!((control - 5.).abs() < 1e-9);
//! ```

mod config;
mod inference;
mod linspace;
mod math;
pub mod ops;
mod outputs;
mod rules;
mod terms;
mod variable;

pub use config::{ConfigError, InferenceConfig, Result, DEFAULT_RESOLUTION, DEFAULT_TOLERANCE, DEFAULT_UNIVERSE};
pub use inference::{aggregate, infer, MamdaniInference};
pub use linspace::Linspace;
pub use outputs::Outputs;
pub use rules::{Rule, Rules};
pub use terms::FuzzySet;
pub use variable::{Degrees, LinguisticVariable, Variables};
