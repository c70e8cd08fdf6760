pub mod calendar;
pub mod category;
pub mod error;
pub mod estimator;
pub mod export;
pub mod rates;
pub mod request;
pub(crate) mod request_validation;

pub use calendar::{
    HolidayPolicy, ProjectionSettings, ProjectionStrategy, SkipPolicy, WorkCalendar,
    project_end_date, working_day_surcharge,
};
pub use category::{
    BuildingType, CompletionAdminCategory, ConstructionMethod, ExcavationSupport,
    GroundImprovementLevel, PreConstructionCategory, ScenarioPreset, SiteCondition, Stage,
    StructureType,
};
pub use error::EstimateError;
pub use estimator::{Estimate, Estimator, StageLine, estimate};
pub use export::{
    ExportError, ExportResult, load_estimate_from_json, load_rate_tables_from_json,
    save_breakdown_to_csv, save_estimate_to_json, save_rate_config_to_json,
};
pub use rates::{FullImprovementPolicy, PresetFactors, RateTableConfig, RateTables};
pub use request::EstimateRequest;
