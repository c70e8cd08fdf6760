use crate::calendar::ProjectionSettings;
use crate::category::{ConstructionMethod, ExcavationSupport, GroundImprovementLevel, Stage};
use crate::error::EstimateError;
use crate::rates::{FullImprovementPolicy, RateTables};
use crate::request::EstimateRequest;
use crate::request_validation;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One line of the bid-form breakdown. The overlap deduction is the only
/// line that may carry a negative day count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageLine {
    pub stage: Stage,
    pub days: i64,
}

/// The result record: ordered breakdown, exact total, optional projected end
/// date. Produced fresh per call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub breakdown: Vec<StageLine>,
    pub total_days: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl Estimate {
    pub fn days_for(&self, stage: Stage) -> Option<i64> {
        self.breakdown
            .iter()
            .find(|line| line.stage == stage)
            .map(|line| line.days)
    }
}

/// Composition root: resolves each stage against the rate tables, applies
/// the method-specific adjustment rules, and optionally projects the total
/// onto the calendar.
#[derive(Debug, Clone, Default)]
pub struct Estimator {
    tables: RateTables,
    projection: ProjectionSettings,
}

impl Estimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tables(tables: RateTables) -> Self {
        Self {
            tables,
            projection: ProjectionSettings::default(),
        }
    }

    pub fn with_projection(mut self, projection: ProjectionSettings) -> Self {
        self.projection = projection;
        self
    }

    pub fn tables(&self) -> &RateTables {
        &self.tables
    }

    pub fn projection(&self) -> &ProjectionSettings {
        &self.projection
    }

    /// Runs the full stage pipeline. Each stage value is rounded to whole
    /// days before it is recorded, so the total is the exact sum of the
    /// recorded lines.
    pub fn estimate(&self, request: &EstimateRequest) -> Result<Estimate, EstimateError> {
        request_validation::validate_request(request)?;

        let preset = self.tables.preset(request.preset)?;

        let pre_days = round_days(
            self.tables
                .pre_construction_days(request.pre_construction_category)?
                * preset.pre,
        );

        let ground_days = self.ground_improvement_days(request)?;

        let site_prep_days = round_days(self.tables.site_condition_days(request.site_condition)?);

        let basement_days = self.below_grade_days(request)?;

        let structure_days = round_days(
            self.tables.structural_rate(request.structure_type)?
                * request.floors_above as f64
                * self.tables.method_factor(request.construction_method)?
                * preset.construction,
        );

        // The deduction can never exceed the shorter of the two concurrent
        // phases, and is recorded exactly once.
        let overlap_days = if request.construction_method == ConstructionMethod::Reverse {
            let basement_bound = round_days(basement_days as f64 * self.tables.overlap_fraction());
            Some(structure_days.min(basement_bound))
        } else {
            None
        };

        let finish_days = self.finish_days(request, structure_days)?;

        let admin_days = round_days(
            self.tables
                .completion_admin_days(request.completion_admin_category)?
                * preset.admin,
        );

        let mut breakdown = vec![
            StageLine {
                stage: Stage::PreConstruction,
                days: pre_days,
            },
            StageLine {
                stage: Stage::GroundImprovement,
                days: ground_days,
            },
            StageLine {
                stage: Stage::SitePreparation,
                days: site_prep_days,
            },
            StageLine {
                stage: Stage::BelowGradeStructure,
                days: basement_days,
            },
            StageLine {
                stage: Stage::AboveGradeStructure,
                days: structure_days,
            },
        ];
        if let Some(deduction) = overlap_days {
            breakdown.push(StageLine {
                stage: Stage::OverlapDeduction,
                days: -deduction,
            });
        }
        breakdown.push(StageLine {
            stage: Stage::FinishWork,
            days: finish_days,
        });
        breakdown.push(StageLine {
            stage: Stage::CompletionAdmin,
            days: admin_days,
        });

        let total_days: i64 = breakdown.iter().map(|line| line.days).sum();

        let end_date = match request.start_date {
            Some(start) => Some(self.projection.project(
                start,
                total_days,
                request.exclude_non_working_day,
                request.exclude_holiday_block,
            )?),
            None => None,
        };

        Ok(Estimate {
            breakdown,
            total_days,
            end_date,
        })
    }

    fn ground_improvement_days(&self, request: &EstimateRequest) -> Result<i64, EstimateError> {
        if request.ground_improvement_level == GroundImprovementLevel::Full {
            if let FullImprovementPolicy::AreaProportional {
                reference_area,
                rate,
            } = self.tables.full_improvement_policy()
            {
                return Ok((request.site_area / reference_area * rate).ceil() as i64);
            }
        }
        Ok(round_days(
            self.tables
                .ground_improvement_days(request.ground_improvement_level)?,
        ))
    }

    fn below_grade_days(&self, request: &EstimateRequest) -> Result<i64, EstimateError> {
        let mut days =
            self.tables.basement_rate(request.construction_method)? * request.floors_below as f64;
        if request.excavation_support == ExcavationSupport::DiaphragmWall {
            days += self.tables.wall_base()
                + self.tables.wall_per_floor() * request.floors_below as f64;
        }
        Ok(round_days(days))
    }

    fn finish_days(
        &self,
        request: &EstimateRequest,
        structure_days: i64,
    ) -> Result<i64, EstimateError> {
        // Concurrent fit-out starts mid-structure, hence the subtraction; the
        // floor keeps a minimum closeout period even under full overlap.
        let raw = request.floors_above as f64
            * self.tables.finish_base_rate()
            * self.tables.finish_factor(request.building_type)?
            - structure_days as f64 * self.tables.finish_overlap_fraction();
        Ok(round_days(raw).max(self.tables.finish_minimum()))
    }
}

/// Convenience entry point with the built-in tables and default projection
/// settings.
pub fn estimate(request: &EstimateRequest) -> Result<Estimate, EstimateError> {
    Estimator::new().estimate(request)
}

fn round_days(value: f64) -> i64 {
    value.round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::{BuildingType, StructureType};

    #[test]
    fn forward_method_records_no_overlap_line() {
        let mut request = EstimateRequest::default();
        request.start_date = None;
        let result = estimate(&request).unwrap();
        assert!(result.days_for(Stage::OverlapDeduction).is_none());
    }

    #[test]
    fn overlap_line_is_negative_for_reverse_method() {
        let mut request = EstimateRequest::default();
        request.construction_method = ConstructionMethod::Reverse;
        request.building_type = BuildingType::Office;
        request.structure_type = StructureType::Src;
        request.floors_above = 15;
        request.floors_below = 3;
        let result = estimate(&request).unwrap();
        let deduction = result.days_for(Stage::OverlapDeduction).unwrap();
        assert!(deduction < 0);
    }
}
