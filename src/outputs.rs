use crate::variable::Degrees;

/// Every intermediate stage of one inference, down to the crisp output.
#[derive(Clone, Debug)]
pub struct Outputs {
    degrees: Degrees,
    activations: Vec<f64>,
    universe: Vec<f64>,
    aggregated_membership: Vec<f64>,
    crisp: f64,
}

impl Outputs {
    pub(crate) fn new(
        degrees: Degrees,
        activations: Vec<f64>,
        universe: Vec<f64>,
        aggregated_membership: Vec<f64>,
        crisp: f64,
    ) -> Self {
        Self {
            degrees,
            activations,
            universe,
            aggregated_membership,
            crisp,
        }
    }

    /// Input term degrees
    pub fn degrees(&self) -> &Degrees {
        &self.degrees
    }

    /// Activation level per rule, in rule order
    pub fn activations(&self) -> &[f64] {
        &self.activations
    }

    /// Discretized output universe
    pub fn universe(&self) -> &[f64] {
        &self.universe
    }

    /// Aggregated output membership, aligned with `universe`
    pub fn aggregated_membership(&self) -> &[f64] {
        &self.aggregated_membership
    }

    pub fn crisp(&self) -> f64 {
        self.crisp
    }
}
