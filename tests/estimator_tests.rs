use chrono::{Duration, NaiveDate};
use tender_tool::{
    BuildingType, CompletionAdminCategory, ConstructionMethod, EstimateError, EstimateRequest,
    Estimator, ExcavationSupport, FullImprovementPolicy, GroundImprovementLevel,
    PreConstructionCategory, RateTableConfig, RateTables, ScenarioPreset, SiteCondition, Stage,
    StructureType, estimate,
};

fn tender_case() -> EstimateRequest {
    EstimateRequest {
        preset: ScenarioPreset::Conservative,
        building_type: BuildingType::Office,
        structure_type: StructureType::Src,
        construction_method: ConstructionMethod::Reverse,
        pre_construction_category: PreConstructionCategory::NearTransit,
        ground_improvement_level: GroundImprovementLevel::Partial,
        site_condition: SiteCondition::Vacant,
        excavation_support: ExcavationSupport::OpenCut,
        completion_admin_category: CompletionAdminCategory::Complex,
        floors_above: 15,
        floors_below: 3,
        site_area: 1000.0,
        start_date: None,
        exclude_non_working_day: true,
        exclude_holiday_block: true,
    }
}

#[test]
fn tender_case_matches_hand_computation() {
    let result = estimate(&tender_case()).unwrap();

    // pre 210*1.2, ground partial flat, basement 60*3, structure
    // 22*15*1.15*1.15, overlap -min(436, 180*0.7), finish clamped to the
    // 90-day floor, admin 100*1.2.
    assert_eq!(result.days_for(Stage::PreConstruction), Some(252));
    assert_eq!(result.days_for(Stage::GroundImprovement), Some(45));
    assert_eq!(result.days_for(Stage::SitePreparation), Some(0));
    assert_eq!(result.days_for(Stage::BelowGradeStructure), Some(180));
    assert_eq!(result.days_for(Stage::AboveGradeStructure), Some(436));
    assert_eq!(result.days_for(Stage::OverlapDeduction), Some(-126));
    assert_eq!(result.days_for(Stage::FinishWork), Some(90));
    assert_eq!(result.days_for(Stage::CompletionAdmin), Some(120));
    assert_eq!(result.total_days, 997);
    assert_eq!(result.end_date, None);
}

#[test]
fn total_is_exact_sum_of_breakdown_lines() {
    let result = estimate(&tender_case()).unwrap();
    let sum: i64 = result.breakdown.iter().map(|line| line.days).sum();
    assert_eq!(result.total_days, sum);
}

#[test]
fn projection_lands_strictly_after_plain_day_offset() {
    let mut request = tender_case();
    let start = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    request.start_date = Some(start);
    let result = estimate(&request).unwrap();
    let end = result.end_date.unwrap();
    assert!(end > start + Duration::days(result.total_days));
}

#[test]
fn identical_requests_yield_identical_results() {
    let mut request = tender_case();
    request.start_date = Some(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
    let first = estimate(&request).unwrap();
    let second = estimate(&request).unwrap();
    assert_eq!(first, second);
}

#[test]
fn overlap_deduction_is_negative_and_bounded() {
    let result = estimate(&tender_case()).unwrap();
    let deduction = result.days_for(Stage::OverlapDeduction).unwrap();
    let structure = result.days_for(Stage::AboveGradeStructure).unwrap();
    let basement = result.days_for(Stage::BelowGradeStructure).unwrap();
    let bound = structure.min((basement as f64 * 0.7).round() as i64);
    assert!(deduction < 0);
    assert!(deduction.abs() <= bound);
}

#[test]
fn non_reverse_methods_record_no_deduction() {
    for method in [ConstructionMethod::Forward, ConstructionMethod::DoubleForward] {
        let mut request = tender_case();
        request.construction_method = method;
        let result = estimate(&request).unwrap();
        assert_eq!(result.days_for(Stage::OverlapDeduction), None);
    }
}

#[test]
fn finish_work_respects_the_floor_minimum() {
    let mut request = EstimateRequest::default();
    request.floors_above = 1;
    request.start_date = None;
    let result = estimate(&request).unwrap();
    assert_eq!(result.days_for(Stage::FinishWork), Some(90));
}

#[test]
fn more_floors_never_shortens_the_project() {
    let mut previous = 0;
    for floors in 1..=30 {
        let mut request = tender_case();
        request.floors_above = floors;
        let total = estimate(&request).unwrap().total_days;
        assert!(
            total >= previous,
            "total dropped from {previous} to {total} at {floors} floors above"
        );
        previous = total;
    }

    let mut previous = 0;
    for floors in 0..=10 {
        let mut request = tender_case();
        request.floors_below = floors;
        let total = estimate(&request).unwrap().total_days;
        assert!(
            total >= previous,
            "total dropped from {previous} to {total} at {floors} floors below"
        );
        previous = total;
    }
}

#[test]
fn full_ground_improvement_scales_with_site_area_by_default() {
    let mut request = tender_case();
    request.ground_improvement_level = GroundImprovementLevel::Full;
    request.site_area = 2500.0;
    let result = estimate(&request).unwrap();
    // ceil(2500 / 1000 * 90)
    assert_eq!(result.days_for(Stage::GroundImprovement), Some(225));
}

#[test]
fn flat_full_ground_improvement_uses_the_table_value() {
    let mut config = RateTableConfig::default();
    config.full_improvement = FullImprovementPolicy::Flat;
    let estimator = Estimator::with_tables(RateTables::from_config(config).unwrap());

    let mut request = tender_case();
    request.ground_improvement_level = GroundImprovementLevel::Full;
    request.site_area = 2500.0;
    let result = estimator.estimate(&request).unwrap();
    assert_eq!(result.days_for(Stage::GroundImprovement), Some(90));
}

#[test]
fn site_condition_addends_are_applied() {
    let mut request = tender_case();
    request.site_condition = SiteCondition::DemolitionRequired;
    let result = estimate(&request).unwrap();
    assert_eq!(result.days_for(Stage::SitePreparation), Some(30));

    request.site_condition = SiteCondition::OldFoundationRemoval;
    let result = estimate(&request).unwrap();
    assert_eq!(result.days_for(Stage::SitePreparation), Some(60));
}

#[test]
fn diaphragm_wall_adds_retaining_time_below_grade() {
    let mut request = tender_case();
    request.construction_method = ConstructionMethod::Forward;
    request.excavation_support = ExcavationSupport::DiaphragmWall;
    let result = estimate(&request).unwrap();
    // 45*3 per-floor plus 30 + 15*3 for the wall
    assert_eq!(result.days_for(Stage::BelowGradeStructure), Some(210));
}

#[test]
fn numeric_domain_errors_are_surfaced() {
    let mut request = tender_case();
    request.floors_above = 0;
    assert!(matches!(
        estimate(&request),
        Err(EstimateError::InvalidInput {
            field: "floors_above",
            ..
        })
    ));

    let mut request = tender_case();
    request.floors_below = -2;
    assert!(estimate(&request).is_err());

    let mut request = tender_case();
    request.site_area = -10.0;
    assert!(matches!(
        estimate(&request),
        Err(EstimateError::InvalidInput {
            field: "site_area",
            ..
        })
    ));
}

#[test]
fn no_start_date_means_no_end_date() {
    let result = estimate(&tender_case()).unwrap();
    assert!(result.end_date.is_none());
}

#[test]
fn presets_scale_the_three_stage_groups_independently() {
    let mut request = tender_case();
    request.preset = ScenarioPreset::Normal;
    let normal = estimate(&request).unwrap();
    assert_eq!(normal.days_for(Stage::PreConstruction), Some(210));
    assert_eq!(normal.days_for(Stage::CompletionAdmin), Some(100));

    request.preset = ScenarioPreset::Optimistic;
    let optimistic = estimate(&request).unwrap();
    assert_eq!(optimistic.days_for(Stage::PreConstruction), Some(189));
    assert_eq!(optimistic.days_for(Stage::CompletionAdmin), Some(90));
    // Ground improvement and site prep are unscaled by presets.
    assert_eq!(
        optimistic.days_for(Stage::GroundImprovement),
        normal.days_for(Stage::GroundImprovement)
    );
}
