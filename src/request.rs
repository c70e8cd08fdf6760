use crate::category::{
    BuildingType, CompletionAdminCategory, ConstructionMethod, ExcavationSupport,
    GroundImprovementLevel, PreConstructionCategory, ScenarioPreset, SiteCondition, StructureType,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One estimation request. Decoded once at the boundary into closed enums;
/// the engine never re-inspects raw labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateRequest {
    #[serde(default)]
    pub preset: ScenarioPreset,
    pub building_type: BuildingType,
    pub structure_type: StructureType,
    pub construction_method: ConstructionMethod,
    pub pre_construction_category: PreConstructionCategory,
    pub ground_improvement_level: GroundImprovementLevel,
    pub site_condition: SiteCondition,
    #[serde(default = "default_excavation_support")]
    pub excavation_support: ExcavationSupport,
    pub completion_admin_category: CompletionAdminCategory,
    pub floors_above: i64,
    pub floors_below: i64,
    pub site_area: f64,
    /// Anchor for calendar projection; when absent the result carries no end
    /// date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default = "default_true")]
    pub exclude_non_working_day: bool,
    #[serde(default = "default_true")]
    pub exclude_holiday_block: bool,
}

fn default_excavation_support() -> ExcavationSupport {
    ExcavationSupport::OpenCut
}

fn default_true() -> bool {
    true
}

impl Default for EstimateRequest {
    fn default() -> Self {
        Self {
            preset: ScenarioPreset::Normal,
            building_type: BuildingType::Residential,
            structure_type: StructureType::Rc,
            construction_method: ConstructionMethod::Forward,
            pre_construction_category: PreConstructionCategory::General,
            ground_improvement_level: GroundImprovementLevel::None,
            site_condition: SiteCondition::Vacant,
            excavation_support: ExcavationSupport::OpenCut,
            completion_admin_category: CompletionAdminCategory::Normal,
            floors_above: 1,
            floors_below: 0,
            site_area: 1000.0,
            start_date: None,
            exclude_non_working_day: true,
            exclude_holiday_block: true,
        }
    }
}
