use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Maximum points each factor can contribute to the composite score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FactorWeights {
    pub vaccination: f64,
    pub health_records: f64,
    pub appointments: f64,
    pub care_consistency: f64,
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self {
            vaccination: 40.0,
            health_records: 30.0,
            appointments: 20.0,
            care_consistency: 10.0,
        }
    }
}

/// Minimum rounded score for each status band. Anything below `needs_attention` is Poor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BandThresholds {
    pub excellent: u8,
    pub good: u8,
    pub fair: u8,
    pub needs_attention: u8,
}

impl Default for BandThresholds {
    fn default() -> Self {
        Self {
            excellent: 85,
            good: 70,
            fair: 55,
            needs_attention: 40,
        }
    }
}

/// Sub-score levels at which the explanatory factor strings change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FactorThresholds {
    pub vaccinations_up_to_date: f64,
    pub vaccinations_partial: f64,
    pub health_regular: f64,
    pub health_partial: f64,
    pub appointments_scheduled: f64,
}

impl Default for FactorThresholds {
    fn default() -> Self {
        Self {
            vaccinations_up_to_date: 35.0,
            vaccinations_partial: 20.0,
            health_regular: 25.0,
            health_partial: 15.0,
            appointments_scheduled: 15.0,
        }
    }
}

/// Tunable scoring policy. Defaults reproduce the 40/30/20/10 weighting and the
/// 85/70/55/40 banding; deployments override individual values through `Config`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoringPolicy {
    pub weights: FactorWeights,
    pub bands: BandThresholds,
    pub factors: FactorThresholds,
    /// Recent health records needed for full health-record credit.
    pub health_records_for_full_credit: f64,
    /// Upcoming appointments needed for full appointment credit.
    pub appointments_for_full_credit: f64,
    /// Points per record toward the care-consistency factor.
    pub care_points_per_record: f64,
    /// How far back a health record still counts as recent.
    pub recent_health_months: u32,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

impl ScoringPolicy {
    pub fn standard() -> Self {
        Self {
            weights: FactorWeights::default(),
            bands: BandThresholds::default(),
            factors: FactorThresholds::default(),
            health_records_for_full_credit: 2.0,
            appointments_for_full_credit: 1.0,
            care_points_per_record: 2.0,
            recent_health_months: 6,
        }
    }

    /// Rejects policies that could push the composite score outside [0, 100]
    /// or make the banding ambiguous.
    pub fn validate(&self) -> Result<()> {
        let w = &self.weights;
        let weights = [
            ("vaccination", w.vaccination),
            ("health_records", w.health_records),
            ("appointments", w.appointments),
            ("care_consistency", w.care_consistency),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                bail!("Weight '{name}' must be a non-negative number, got {value}");
            }
        }
        let total: f64 = weights.iter().map(|(_, v)| v).sum();
        if total > 100.0 {
            bail!("Factor weights must sum to at most 100, got {total}");
        }

        let b = &self.bands;
        if b.excellent > 100 {
            bail!("Band thresholds must be within 0..=100");
        }
        if !(b.excellent > b.good && b.good > b.fair && b.fair > b.needs_attention) {
            bail!(
                "Band thresholds must be strictly descending, got {}/{}/{}/{}",
                b.excellent,
                b.good,
                b.fair,
                b.needs_attention
            );
        }

        if self.health_records_for_full_credit <= 0.0 || self.appointments_for_full_credit <= 0.0
        {
            bail!("Full-credit counts must be positive");
        }
        Ok(())
    }
}
