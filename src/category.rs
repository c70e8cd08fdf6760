use serde::{Deserialize, Serialize};

/// Risk posture applied to the three scaled stage groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioPreset {
    Conservative,
    #[default]
    Normal,
    Optimistic,
}

impl ScenarioPreset {
    pub const ALL: [ScenarioPreset; 3] = [
        ScenarioPreset::Conservative,
        ScenarioPreset::Normal,
        ScenarioPreset::Optimistic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioPreset::Conservative => "conservative",
            ScenarioPreset::Normal => "normal",
            ScenarioPreset::Optimistic => "optimistic",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingType {
    Residential,
    Office,
    Mall,
    Hospital,
    Factory,
}

impl BuildingType {
    pub const ALL: [BuildingType; 5] = [
        BuildingType::Residential,
        BuildingType::Office,
        BuildingType::Mall,
        BuildingType::Hospital,
        BuildingType::Factory,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BuildingType::Residential => "residential",
            BuildingType::Office => "office",
            BuildingType::Mall => "mall",
            BuildingType::Hospital => "hospital",
            BuildingType::Factory => "factory",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StructureType {
    #[serde(rename = "RC")]
    Rc,
    #[serde(rename = "SRC")]
    Src,
    #[serde(rename = "SS")]
    Ss,
    #[serde(rename = "SC")]
    Sc,
}

impl StructureType {
    pub const ALL: [StructureType; 4] = [
        StructureType::Rc,
        StructureType::Src,
        StructureType::Ss,
        StructureType::Sc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StructureType::Rc => "RC",
            StructureType::Src => "SRC",
            StructureType::Ss => "SS",
            StructureType::Sc => "SC",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstructionMethod {
    Forward,
    /// Top-down construction: below-grade and above-grade structural work
    /// proceed concurrently, which triggers the overlap deduction.
    Reverse,
    DoubleForward,
}

impl ConstructionMethod {
    pub const ALL: [ConstructionMethod; 3] = [
        ConstructionMethod::Forward,
        ConstructionMethod::Reverse,
        ConstructionMethod::DoubleForward,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConstructionMethod::Forward => "forward",
            ConstructionMethod::Reverse => "reverse",
            ConstructionMethod::DoubleForward => "double_forward",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreConstructionCategory {
    General,
    NearTransit,
    LargePublicReview,
    EnvironmentalReview,
}

impl PreConstructionCategory {
    pub const ALL: [PreConstructionCategory; 4] = [
        PreConstructionCategory::General,
        PreConstructionCategory::NearTransit,
        PreConstructionCategory::LargePublicReview,
        PreConstructionCategory::EnvironmentalReview,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PreConstructionCategory::General => "general",
            PreConstructionCategory::NearTransit => "near_transit",
            PreConstructionCategory::LargePublicReview => "large_public_review",
            PreConstructionCategory::EnvironmentalReview => "environmental_review",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroundImprovementLevel {
    None,
    Partial,
    Full,
    Special,
}

impl GroundImprovementLevel {
    pub const ALL: [GroundImprovementLevel; 4] = [
        GroundImprovementLevel::None,
        GroundImprovementLevel::Partial,
        GroundImprovementLevel::Full,
        GroundImprovementLevel::Special,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GroundImprovementLevel::None => "none",
            GroundImprovementLevel::Partial => "partial",
            GroundImprovementLevel::Full => "full",
            GroundImprovementLevel::Special => "special",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteCondition {
    Vacant,
    DemolitionRequired,
    OldFoundationRemoval,
}

impl SiteCondition {
    pub const ALL: [SiteCondition; 3] = [
        SiteCondition::Vacant,
        SiteCondition::DemolitionRequired,
        SiteCondition::OldFoundationRemoval,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SiteCondition::Vacant => "vacant",
            SiteCondition::DemolitionRequired => "demolition_required",
            SiteCondition::OldFoundationRemoval => "old_foundation_removal",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExcavationSupport {
    OpenCut,
    SheetPile,
    /// Diaphragm wall retaining system; adds the retaining-wall time on top
    /// of the per-floor basement rate.
    DiaphragmWall,
}

impl ExcavationSupport {
    pub const ALL: [ExcavationSupport; 3] = [
        ExcavationSupport::OpenCut,
        ExcavationSupport::SheetPile,
        ExcavationSupport::DiaphragmWall,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExcavationSupport::OpenCut => "open_cut",
            ExcavationSupport::SheetPile => "sheet_pile",
            ExcavationSupport::DiaphragmWall => "diaphragm_wall",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionAdminCategory {
    Normal,
    Complex,
    Phased,
}

impl CompletionAdminCategory {
    pub const ALL: [CompletionAdminCategory; 3] = [
        CompletionAdminCategory::Normal,
        CompletionAdminCategory::Complex,
        CompletionAdminCategory::Phased,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CompletionAdminCategory::Normal => "normal",
            CompletionAdminCategory::Complex => "complex",
            CompletionAdminCategory::Phased => "phased",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == key)
    }
}

/// Breakdown line identifiers, in the order they appear on the bid form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    PreConstruction,
    GroundImprovement,
    SitePreparation,
    BelowGradeStructure,
    AboveGradeStructure,
    OverlapDeduction,
    FinishWork,
    CompletionAdmin,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::PreConstruction => "pre_construction",
            Stage::GroundImprovement => "ground_improvement",
            Stage::SitePreparation => "site_preparation",
            Stage::BelowGradeStructure => "below_grade_structure",
            Stage::AboveGradeStructure => "above_grade_structure",
            Stage::OverlapDeduction => "overlap_deduction",
            Stage::FinishWork => "finish_work",
            Stage::CompletionAdmin => "completion_admin",
        }
    }

    /// Label used on the exported bid-form table.
    pub fn label(&self) -> &'static str {
        match self {
            Stage::PreConstruction => "前置作業",
            Stage::GroundImprovement => "地質改良",
            Stage::SitePreparation => "拆除整地",
            Stage::BelowGradeStructure => "地下結構",
            Stage::AboveGradeStructure => "地上結構",
            Stage::OverlapDeduction => "逆打重疊折減",
            Stage::FinishWork => "裝修機電",
            Stage::CompletionAdmin => "消檢 / 使用執照",
        }
    }
}
