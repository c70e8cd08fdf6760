use crate::category::{
    BuildingType, CompletionAdminCategory, ConstructionMethod, GroundImprovementLevel,
    PreConstructionCategory, ScenarioPreset, SiteCondition, StructureType,
};
use crate::error::EstimateError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Multipliers one scenario preset applies to the three scaled stage groups.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PresetFactors {
    pub pre: f64,
    pub construction: f64,
    pub admin: f64,
}

impl PresetFactors {
    pub const NEUTRAL: PresetFactors = PresetFactors {
        pre: 1.0,
        construction: 1.0,
        admin: 1.0,
    };
}

/// How "full" ground improvement is priced: a flat table value, or days
/// proportional to site area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum FullImprovementPolicy {
    Flat,
    AreaProportional { reference_area: f64, rate: f64 },
}

/// Externalizable form of the rate tables: a flat mapping per axis with
/// numeric leaf values. Malformed or incomplete axes are rejected when the
/// config is turned into [`RateTables`], not at first lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTableConfig {
    pub presets: HashMap<String, PresetFactors>,
    pub pre_construction: HashMap<String, f64>,
    pub ground_improvement: HashMap<String, f64>,
    pub full_improvement: FullImprovementPolicy,
    pub site_condition: HashMap<String, f64>,
    pub structural_rate: HashMap<String, f64>,
    pub method_factor: HashMap<String, f64>,
    pub basement_rate: HashMap<String, f64>,
    pub wall_base: f64,
    pub wall_per_floor: f64,
    pub overlap_fraction: f64,
    pub finish_base_rate: f64,
    pub finish_factor: HashMap<String, f64>,
    pub finish_overlap_fraction: f64,
    pub finish_minimum: i64,
    pub completion_admin: HashMap<String, f64>,
}

impl Default for RateTableConfig {
    fn default() -> Self {
        let presets = HashMap::from([
            (
                "conservative".to_string(),
                PresetFactors {
                    pre: 1.2,
                    construction: 1.15,
                    admin: 1.2,
                },
            ),
            ("normal".to_string(), PresetFactors::NEUTRAL),
            (
                "optimistic".to_string(),
                PresetFactors {
                    pre: 0.9,
                    construction: 0.9,
                    admin: 0.9,
                },
            ),
        ]);

        Self {
            presets,
            pre_construction: string_map(&[
                ("general", 120.0),
                ("near_transit", 210.0),
                ("large_public_review", 270.0),
                ("environmental_review", 330.0),
            ]),
            ground_improvement: string_map(&[
                ("none", 0.0),
                ("partial", 45.0),
                ("full", 90.0),
                ("special", 120.0),
            ]),
            full_improvement: FullImprovementPolicy::AreaProportional {
                reference_area: 1000.0,
                rate: 90.0,
            },
            site_condition: string_map(&[
                ("vacant", 0.0),
                ("demolition_required", 30.0),
                ("old_foundation_removal", 60.0),
            ]),
            structural_rate: string_map(&[
                ("RC", 20.0),
                ("SRC", 22.0),
                ("SS", 18.0),
                ("SC", 19.0),
            ]),
            method_factor: string_map(&[
                ("forward", 1.0),
                ("reverse", 1.15),
                ("double_forward", 0.95),
            ]),
            basement_rate: string_map(&[
                ("forward", 45.0),
                ("reverse", 60.0),
                ("double_forward", 45.0),
            ]),
            wall_base: 30.0,
            wall_per_floor: 15.0,
            overlap_fraction: 0.7,
            finish_base_rate: 12.0,
            finish_factor: string_map(&[
                ("residential", 1.0),
                ("office", 1.1),
                ("mall", 1.35),
                ("hospital", 1.55),
                ("factory", 0.9),
            ]),
            finish_overlap_fraction: 0.25,
            finish_minimum: 90,
            completion_admin: string_map(&[
                ("normal", 60.0),
                ("complex", 100.0),
                ("phased", 120.0),
            ]),
        }
    }
}

fn string_map(entries: &[(&str, f64)]) -> HashMap<String, f64> {
    entries
        .iter()
        .map(|(key, value)| (key.to_string(), *value))
        .collect()
}

/// Read-only lookup surface for every categorical axis. Built once, then
/// shared freely; nothing here mutates after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTables {
    config: RateTableConfig,
}

impl Default for RateTables {
    fn default() -> Self {
        // The built-in tables are complete by construction.
        Self {
            config: RateTableConfig::default(),
        }
    }
}

impl RateTables {
    /// Builds validated tables from an externalized config. Every declared
    /// category must have an entry on its axis; absence fails here, at load
    /// time, never at first use.
    pub fn from_config(config: RateTableConfig) -> Result<Self, EstimateError> {
        for preset in ScenarioPreset::ALL {
            if !config.presets.contains_key(preset.as_str()) {
                return Err(missing_entry("presets", preset.as_str()));
            }
        }
        require_keys(
            "pre_construction",
            &config.pre_construction,
            PreConstructionCategory::ALL.map(|v| v.as_str()),
        )?;
        require_keys(
            "ground_improvement",
            &config.ground_improvement,
            GroundImprovementLevel::ALL.map(|v| v.as_str()),
        )?;
        require_keys(
            "site_condition",
            &config.site_condition,
            SiteCondition::ALL.map(|v| v.as_str()),
        )?;
        require_keys(
            "structural_rate",
            &config.structural_rate,
            StructureType::ALL.map(|v| v.as_str()),
        )?;
        require_keys(
            "method_factor",
            &config.method_factor,
            ConstructionMethod::ALL.map(|v| v.as_str()),
        )?;
        require_keys(
            "basement_rate",
            &config.basement_rate,
            ConstructionMethod::ALL.map(|v| v.as_str()),
        )?;
        require_keys(
            "finish_factor",
            &config.finish_factor,
            BuildingType::ALL.map(|v| v.as_str()),
        )?;
        require_keys(
            "completion_admin",
            &config.completion_admin,
            CompletionAdminCategory::ALL.map(|v| v.as_str()),
        )?;

        if !(0.0..=1.0).contains(&config.overlap_fraction) {
            return Err(EstimateError::config(
                "overlap_fraction",
                format!("{} is outside 0..=1", config.overlap_fraction),
            ));
        }
        if !(0.0..=1.0).contains(&config.finish_overlap_fraction) {
            return Err(EstimateError::config(
                "finish_overlap_fraction",
                format!("{} is outside 0..=1", config.finish_overlap_fraction),
            ));
        }
        if config.finish_minimum < 0 {
            return Err(EstimateError::config(
                "finish_minimum",
                format!("{} is negative", config.finish_minimum),
            ));
        }
        if let FullImprovementPolicy::AreaProportional {
            reference_area,
            rate,
        } = config.full_improvement
        {
            if reference_area <= 0.0 || !reference_area.is_finite() {
                return Err(EstimateError::config(
                    "full_improvement",
                    format!("reference_area {reference_area} must be positive"),
                ));
            }
            if rate < 0.0 || !rate.is_finite() {
                return Err(EstimateError::config(
                    "full_improvement",
                    format!("rate {rate} must be non-negative"),
                ));
            }
        }

        Ok(Self { config })
    }

    pub fn config(&self) -> &RateTableConfig {
        &self.config
    }

    pub fn preset(&self, preset: ScenarioPreset) -> Result<PresetFactors, EstimateError> {
        self.config
            .presets
            .get(preset.as_str())
            .copied()
            .ok_or_else(|| EstimateError::unknown_category("presets", preset.as_str()))
    }

    pub fn pre_construction_days(
        &self,
        category: PreConstructionCategory,
    ) -> Result<f64, EstimateError> {
        axis_lookup(
            &self.config.pre_construction,
            "pre_construction",
            category.as_str(),
        )
    }

    pub fn ground_improvement_days(
        &self,
        level: GroundImprovementLevel,
    ) -> Result<f64, EstimateError> {
        axis_lookup(
            &self.config.ground_improvement,
            "ground_improvement",
            level.as_str(),
        )
    }

    pub fn full_improvement_policy(&self) -> FullImprovementPolicy {
        self.config.full_improvement
    }

    pub fn site_condition_days(&self, condition: SiteCondition) -> Result<f64, EstimateError> {
        axis_lookup(
            &self.config.site_condition,
            "site_condition",
            condition.as_str(),
        )
    }

    pub fn structural_rate(&self, structure: StructureType) -> Result<f64, EstimateError> {
        axis_lookup(
            &self.config.structural_rate,
            "structural_rate",
            structure.as_str(),
        )
    }

    pub fn method_factor(&self, method: ConstructionMethod) -> Result<f64, EstimateError> {
        axis_lookup(&self.config.method_factor, "method_factor", method.as_str())
    }

    pub fn basement_rate(&self, method: ConstructionMethod) -> Result<f64, EstimateError> {
        axis_lookup(&self.config.basement_rate, "basement_rate", method.as_str())
    }

    pub fn wall_base(&self) -> f64 {
        self.config.wall_base
    }

    pub fn wall_per_floor(&self) -> f64 {
        self.config.wall_per_floor
    }

    pub fn overlap_fraction(&self) -> f64 {
        self.config.overlap_fraction
    }

    pub fn finish_base_rate(&self) -> f64 {
        self.config.finish_base_rate
    }

    pub fn finish_factor(&self, building: BuildingType) -> Result<f64, EstimateError> {
        axis_lookup(&self.config.finish_factor, "finish_factor", building.as_str())
    }

    pub fn finish_overlap_fraction(&self) -> f64 {
        self.config.finish_overlap_fraction
    }

    pub fn finish_minimum(&self) -> i64 {
        self.config.finish_minimum
    }

    pub fn completion_admin_days(
        &self,
        category: CompletionAdminCategory,
    ) -> Result<f64, EstimateError> {
        axis_lookup(
            &self.config.completion_admin,
            "completion_admin",
            category.as_str(),
        )
    }
}

fn axis_lookup(
    map: &HashMap<String, f64>,
    axis: &'static str,
    key: &str,
) -> Result<f64, EstimateError> {
    map.get(key)
        .copied()
        .ok_or_else(|| EstimateError::unknown_category(axis, key))
}

fn missing_entry(axis: &'static str, key: &str) -> EstimateError {
    EstimateError::config(axis, format!("missing entry '{key}'"))
}

fn require_keys<const N: usize>(
    axis: &'static str,
    map: &HashMap<String, f64>,
    keys: [&str; N],
) -> Result<(), EstimateError> {
    for key in keys {
        if !map.contains_key(key) {
            return Err(missing_entry(axis, key));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_accepted() {
        let tables = RateTables::from_config(RateTableConfig::default()).unwrap();
        assert_eq!(tables, RateTables::default());
    }

    #[test]
    fn lookup_surfaces_axis_and_key_when_entry_is_absent() {
        // Bypass from_config to exercise the defensive lookup path.
        let mut config = RateTableConfig::default();
        config.structural_rate.remove("SRC");
        let tables = RateTables { config };

        let err = tables.structural_rate(StructureType::Src).unwrap_err();
        assert_eq!(
            err,
            EstimateError::unknown_category("structural_rate", "SRC")
        );
    }

    #[test]
    fn incomplete_axis_is_rejected_at_load_time() {
        let mut config = RateTableConfig::default();
        config.completion_admin.remove("phased");
        let err = RateTables::from_config(config).unwrap_err();
        match err {
            EstimateError::Config { axis, message } => {
                assert_eq!(axis, "completion_admin");
                assert!(message.contains("phased"));
            }
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn out_of_range_fraction_is_rejected() {
        let mut config = RateTableConfig::default();
        config.overlap_fraction = 1.3;
        assert!(RateTables::from_config(config).is_err());
    }
}
