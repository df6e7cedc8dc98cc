use crate::reference::{EconomyRules, QualificationRules, ReferenceData};
use crate::utils::SimRng;

/// Read-only reference data and the session's random source, passed to every
/// career operation.
pub struct CareerContext<'c> {
    pub reference: &'c ReferenceData,
    pub rng: &'c mut SimRng,
}

impl<'c> CareerContext<'c> {
    pub fn new(reference: &'c ReferenceData, rng: &'c mut SimRng) -> Self {
        CareerContext { reference, rng }
    }

    pub fn rules(&self) -> &'c EconomyRules {
        &self.reference.rules
    }

    pub fn qualifications(&self) -> &'c QualificationRules {
        &self.reference.qualifications
    }
}
