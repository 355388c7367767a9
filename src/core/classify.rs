use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoreError {
    #[error("max must be a positive finite number, got {0}")]
    InvalidMax(f64),
    #[error("value must be finite, got {0}")]
    NonFiniteValue(f64),
    #[error("tolerance must be a non-negative finite number, got {0}")]
    InvalidTolerance(f64),
    #[error("at least one dimension is required")]
    NoDimensions,
    #[error("scale `{0}` has no bands")]
    EmptyScale(String),
}

/// One row of a threshold table: any percentage at or above `min` that no
/// stronger band claimed lands here. `color` is an opaque display token the
/// presentation layer resolves.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Band {
    pub min: f64,
    pub label: String,
    pub color: String,
}

impl Band {
    pub fn new(min: f64, label: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            min,
            label: label.into(),
            color: color.into(),
        }
    }
}

/// An ordered threshold table. Bands are kept sorted strongest-first so
/// classification is a first-match scan, whatever order the config listed
/// them in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scale {
    pub name: String,
    bands: Vec<Band>,
}

impl Scale {
    pub fn new(name: impl Into<String>, mut bands: Vec<Band>) -> Result<Self, ScoreError> {
        let name = name.into();
        if bands.is_empty() {
            return Err(ScoreError::EmptyScale(name));
        }

        bands.sort_by(|a, b| b.min.total_cmp(&a.min));
        Ok(Self { name, bands })
    }

    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    fn band_for(&self, percentage: f64) -> (usize, &Band) {
        self.bands
            .iter()
            .enumerate()
            .find(|(_, band)| percentage >= band.min)
            .unwrap_or((self.bands.len() - 1, &self.bands[self.bands.len() - 1]))
    }
}

/// A raw value mapped onto a scale: clamped display percentage, the matched
/// band's label and color token, and the band's position in the table
/// (0 = strongest).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedScore {
    pub percentage: f64,
    pub label: String,
    pub color: String,
    pub rank: usize,
}

pub fn classify(value: f64, max: f64, scale: &Scale) -> Result<ClassifiedScore, ScoreError> {
    if !max.is_finite() || max <= 0.0 {
        return Err(ScoreError::InvalidMax(max));
    }
    if !value.is_finite() {
        return Err(ScoreError::NonFiniteValue(value));
    }

    let percentage = (value / max * 100.0).clamp(0.0, 100.0);
    let (rank, band) = scale.band_for(percentage);

    Ok(ClassifiedScore {
        percentage,
        label: band.label.clone(),
        color: band.color.clone(),
        rank,
    })
}

/// Velocity deltas use a three-way up/stable/down bucket rather than a
/// percentage table: a delta within `tolerance` of zero reads as stable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendReading {
    pub delta: f64,
    pub direction: String,
    pub color: String,
}

pub fn trend(delta: f64, tolerance: f64) -> Result<TrendReading, ScoreError> {
    if !delta.is_finite() {
        return Err(ScoreError::NonFiniteValue(delta));
    }
    if !tolerance.is_finite() || tolerance < 0.0 {
        return Err(ScoreError::InvalidTolerance(tolerance));
    }

    let (direction, color) = if delta > tolerance {
        ("up", "green")
    } else if delta < -tolerance {
        ("down", "red")
    } else {
        ("stable", "blue")
    };

    Ok(TrendReading {
        delta,
        direction: direction.to_string(),
        color: color.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quality() -> Scale {
        Scale::new(
            "quality",
            vec![
                Band::new(90.0, "excellent", "green"),
                Band::new(70.0, "good", "cyan"),
                Band::new(50.0, "fair", "yellow"),
                Band::new(0.0, "poor", "red"),
            ],
        )
        .unwrap()
    }

    fn intent() -> Scale {
        Scale::new(
            "intent",
            vec![
                Band::new(80.0, "hot", "magenta"),
                Band::new(60.0, "warm", "yellow"),
                Band::new(40.0, "engaged", "cyan"),
                Band::new(20.0, "aware", "blue"),
                Band::new(0.0, "cold", "white"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn percentage_stays_clamped() {
        let scale = quality();
        for value in [-50.0, -1.0, 0.0, 12.5, 25.0, 99.9, 100.0, 250.0] {
            let score = classify(value, 25.0, &scale).unwrap();
            assert!(score.percentage >= 0.0 && score.percentage <= 100.0);
        }
    }

    #[test]
    fn full_marks_are_excellent() {
        let score = classify(25.0, 25.0, &quality()).unwrap();
        assert_eq!(score.percentage, 100.0);
        assert_eq!(score.label, "excellent");
        assert_eq!(score.rank, 0);
    }

    #[test]
    fn zero_is_poor() {
        let score = classify(0.0, 25.0, &quality()).unwrap();
        assert_eq!(score.percentage, 0.0);
        assert_eq!(score.label, "poor");
    }

    #[test]
    fn percentage_is_monotonic_in_value() {
        let scale = quality();
        let max = 40.0;
        let mut previous = f64::NEG_INFINITY;
        for value in [-10.0, 0.0, 4.0, 19.9, 20.0, 36.0, 39.9, 40.0, 55.0] {
            let score = classify(value, max, &scale).unwrap();
            assert!(score.percentage >= previous);
            previous = score.percentage;
        }
    }

    #[test]
    fn band_boundaries_are_inclusive_lower_bounds() {
        let scale = quality();
        let max = 200.0;
        assert_eq!(classify(0.9 * max, max, &scale).unwrap().label, "excellent");
        assert_eq!(classify(0.899 * max, max, &scale).unwrap().label, "good");
        assert_eq!(classify(0.7 * max, max, &scale).unwrap().label, "good");
        assert_eq!(classify(0.5 * max, max, &scale).unwrap().label, "fair");
        assert_eq!(classify(0.499 * max, max, &scale).unwrap().label, "poor");
    }

    #[test]
    fn rejects_non_positive_or_non_finite_max() {
        let scale = quality();
        assert_eq!(
            classify(10.0, 0.0, &scale),
            Err(ScoreError::InvalidMax(0.0))
        );
        assert_eq!(
            classify(10.0, -5.0, &scale),
            Err(ScoreError::InvalidMax(-5.0))
        );
        assert!(matches!(
            classify(10.0, f64::NAN, &scale),
            Err(ScoreError::InvalidMax(_))
        ));
        assert!(matches!(
            classify(10.0, f64::INFINITY, &scale),
            Err(ScoreError::InvalidMax(_))
        ));
    }

    #[test]
    fn rejects_non_finite_value() {
        let scale = quality();
        assert!(matches!(
            classify(f64::NAN, 25.0, &scale),
            Err(ScoreError::NonFiniteValue(_))
        ));
        assert!(matches!(
            classify(f64::NEG_INFINITY, 25.0, &scale),
            Err(ScoreError::NonFiniteValue(_))
        ));
    }

    #[test]
    fn classification_is_idempotent() {
        let scale = quality();
        let first = classify(17.3, 25.0, &scale).unwrap();
        let second = classify(17.3, 25.0, &scale).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn intent_scale_buckets_signal_strengths() {
        let scale = intent();
        assert_eq!(classify(4.2, 5.0, &scale).unwrap().label, "hot");
        assert_eq!(classify(4.0, 5.0, &scale).unwrap().label, "hot");
        assert_eq!(classify(3.0, 5.0, &scale).unwrap().label, "warm");
        assert_eq!(classify(2.0, 5.0, &scale).unwrap().label, "engaged");
        assert_eq!(classify(1.0, 5.0, &scale).unwrap().label, "aware");
        assert_eq!(classify(0.5, 5.0, &scale).unwrap().label, "cold");
    }

    #[test]
    fn bands_are_normalized_strongest_first() {
        let scale = Scale::new(
            "shuffled",
            vec![
                Band::new(0.0, "low", "red"),
                Band::new(80.0, "high", "green"),
                Band::new(40.0, "mid", "yellow"),
            ],
        )
        .unwrap();
        assert_eq!(scale.bands()[0].label, "high");
        assert_eq!(classify(9.0, 10.0, &scale).unwrap().label, "high");
        assert_eq!(classify(5.0, 10.0, &scale).unwrap().label, "mid");
    }

    #[test]
    fn falls_back_to_weakest_band_below_every_min() {
        let scale = Scale::new(
            "floored",
            vec![Band::new(50.0, "ok", "green"), Band::new(25.0, "low", "red")],
        )
        .unwrap();
        let score = classify(1.0, 100.0, &scale).unwrap();
        assert_eq!(score.label, "low");
        assert_eq!(score.rank, 1);
    }

    #[test]
    fn empty_scale_is_rejected() {
        assert_eq!(
            Scale::new("empty", Vec::new()),
            Err(ScoreError::EmptyScale("empty".to_string()))
        );
    }

    #[test]
    fn trend_buckets_by_sign_and_tolerance() {
        assert_eq!(trend(3.0, 1.0).unwrap().direction, "up");
        assert_eq!(trend(-3.0, 1.0).unwrap().direction, "down");
        assert_eq!(trend(0.5, 1.0).unwrap().direction, "stable");
        assert_eq!(trend(-1.0, 1.0).unwrap().direction, "stable");
        assert!(matches!(
            trend(f64::NAN, 1.0),
            Err(ScoreError::NonFiniteValue(_))
        ));
        assert!(matches!(
            trend(1.0, -0.5),
            Err(ScoreError::InvalidTolerance(_))
        ));
    }
}
