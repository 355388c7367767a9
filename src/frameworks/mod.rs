use crate::config::Config;
use crate::core::DealRecord;
use crate::core::report::FrameworkAssessment;
use anyhow::Result;

pub mod bant;
pub mod meddpicc;
pub mod signals;

/// A qualification framework: detects whether a deal carries its data block
/// and classifies that block on its scale.
pub trait Framework {
    fn name(&self) -> &'static str;
    fn is_enabled(&self, cfg: &Config) -> bool;
    fn detect(&self, deal: &DealRecord) -> bool;
    fn assess(&self, deal: &DealRecord, cfg: &Config) -> Result<FrameworkAssessment>;
}

pub fn all_frameworks() -> Vec<Box<dyn Framework>> {
    vec![
        Box::new(bant::BantFramework),
        Box::new(meddpicc::MeddpiccFramework),
        Box::new(signals::SignalsFramework),
    ]
}
