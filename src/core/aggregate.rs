use crate::core::classify::{ClassifiedScore, Scale, ScoreError, classify};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq)]
pub struct Dimension {
    pub name: String,
    pub value: f64,
    pub max: f64,
}

impl Dimension {
    pub fn new(name: impl Into<String>, value: f64, max: f64) -> Self {
        Self {
            name: name.into(),
            value,
            max,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionScore {
    pub name: String,
    pub value: f64,
    pub max: f64,
    pub score: ClassifiedScore,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateScore {
    pub total: f64,
    pub total_max: f64,
    pub per_dimension: Vec<DimensionScore>,
    pub overall: ClassifiedScore,
}

/// Sums dimensions into raw totals and classifies both the overall and each
/// dimension on `scale`. Totals are never clamped: a dimension over its own
/// max contributes its raw value, only its display percentage is capped.
pub fn aggregate(dimensions: &[Dimension], scale: &Scale) -> Result<AggregateScore, ScoreError> {
    if dimensions.is_empty() {
        return Err(ScoreError::NoDimensions);
    }

    let mut per_dimension = Vec::with_capacity(dimensions.len());
    let mut total = 0.0;
    let mut total_max = 0.0;

    for dimension in dimensions {
        let score = classify(dimension.value, dimension.max, scale)?;
        total += dimension.value;
        total_max += dimension.max;
        per_dimension.push(DimensionScore {
            name: dimension.name.clone(),
            value: dimension.value,
            max: dimension.max,
            score,
        });
    }

    let overall = classify(total, total_max, scale)?;

    Ok(AggregateScore {
        total,
        total_max,
        per_dimension,
        overall,
    })
}
