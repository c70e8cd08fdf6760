use crate::error::EstimateError;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Which weekdays count as non-working when the caller asks for them to be
/// skipped. The two variants are distinct policies, never reconciled: for
/// project lengths that are not a multiple of the work week they produce
/// different end dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipPolicy {
    #[default]
    Weekends,
    SundayOnly,
}

impl SkipPolicy {
    fn non_working_days(&self) -> HashSet<Weekday> {
        match self {
            SkipPolicy::Weekends => HashSet::from([Weekday::Sat, Weekday::Sun]),
            SkipPolicy::SundayOnly => HashSet::from([Weekday::Sun]),
        }
    }
}

/// Fixed annual holiday closure appended after the working-day walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum HolidayPolicy {
    None,
    /// One flat block regardless of project length. The default, matching
    /// the original bid tool's single new-year closure.
    FlatBlock { days: i64 },
    /// One occurrence per started project year, for multi-year projects.
    PerYearOccurrence { days: i64 },
}

impl Default for HolidayPolicy {
    fn default() -> Self {
        HolidayPolicy::FlatBlock { days: 10 }
    }
}

impl HolidayPolicy {
    /// Calendar days appended after the provisional end date.
    pub fn offset_for(&self, total_days: i64) -> i64 {
        match self {
            HolidayPolicy::None => 0,
            HolidayPolicy::FlatBlock { days } => *days,
            HolidayPolicy::PerYearOccurrence { days } => {
                let occurrences = (total_days + 364) / 365;
                occurrences * days
            }
        }
    }
}

/// How working days are converted into an end date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum ProjectionStrategy {
    /// Literal day-by-day walk over the calendar.
    DayWalk,
    /// Coarse additive correction: floor(total_days / skip_ratio) extra
    /// calendar days instead of a walk. skip_ratio 6.0 approximates a
    /// six-workday week.
    WorkweekSurcharge { skip_ratio: f64 },
}

impl Default for ProjectionStrategy {
    fn default() -> Self {
        ProjectionStrategy::DayWalk
    }
}

/// The three projection policy axes. Each variant the original calculators
/// disagreed on is a field value here, not a hard-coded branch.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectionSettings {
    pub skip_policy: SkipPolicy,
    pub holiday_policy: HolidayPolicy,
    pub strategy: ProjectionStrategy,
}

impl ProjectionSettings {
    pub fn project(
        &self,
        start: NaiveDate,
        total_days: i64,
        skip_non_working: bool,
        apply_holiday_block: bool,
    ) -> Result<NaiveDate, EstimateError> {
        let holiday = self.effective_holiday(apply_holiday_block);
        match self.strategy {
            ProjectionStrategy::DayWalk => self
                .calendar(skip_non_working)
                .project_end_date(start, total_days, holiday),
            ProjectionStrategy::WorkweekSurcharge { skip_ratio } => {
                if total_days < 0 {
                    return Err(negative_days(total_days));
                }
                let extra = if skip_non_working {
                    working_day_surcharge(total_days, skip_ratio)?
                } else {
                    0
                };
                Ok(start + Duration::days(total_days + extra + holiday.offset_for(total_days)))
            }
        }
    }

    /// Inverse of [`ProjectionSettings::project`]: removes the holiday
    /// offset, then walks the same number of qualifying days backward from
    /// the end date.
    pub fn project_back(
        &self,
        end: NaiveDate,
        total_days: i64,
        skip_non_working: bool,
        apply_holiday_block: bool,
    ) -> Result<NaiveDate, EstimateError> {
        let holiday = self.effective_holiday(apply_holiday_block);
        match self.strategy {
            ProjectionStrategy::DayWalk => self
                .calendar(skip_non_working)
                .project_start_date(end, total_days, holiday),
            ProjectionStrategy::WorkweekSurcharge { skip_ratio } => {
                if total_days < 0 {
                    return Err(negative_days(total_days));
                }
                let extra = if skip_non_working {
                    working_day_surcharge(total_days, skip_ratio)?
                } else {
                    0
                };
                Ok(end - Duration::days(total_days + extra + holiday.offset_for(total_days)))
            }
        }
    }

    fn effective_holiday(&self, apply_holiday_block: bool) -> HolidayPolicy {
        if apply_holiday_block {
            self.holiday_policy
        } else {
            HolidayPolicy::None
        }
    }

    fn calendar(&self, skip_non_working: bool) -> WorkCalendar {
        if skip_non_working {
            WorkCalendar::for_policy(self.skip_policy)
        } else {
            WorkCalendar::unrestricted()
        }
    }
}

/// Calendar-day classifier: a weekday skip set plus ad-hoc holiday dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkCalendar {
    non_working_days: HashSet<Weekday>,
    holidays: HashSet<NaiveDate>,
}

impl WorkCalendar {
    /// Every calendar day counts.
    pub fn unrestricted() -> Self {
        Self {
            non_working_days: HashSet::new(),
            holidays: HashSet::new(),
        }
    }

    pub fn for_policy(policy: SkipPolicy) -> Self {
        Self {
            non_working_days: policy.non_working_days(),
            holidays: HashSet::new(),
        }
    }

    pub fn custom<I, J>(non_working_days: I, holidays: J) -> Self
    where
        I: IntoIterator<Item = Weekday>,
        J: IntoIterator<Item = NaiveDate>,
    {
        Self {
            non_working_days: non_working_days.into_iter().collect(),
            holidays: holidays.into_iter().collect(),
        }
    }

    pub fn add_holiday(&mut self, date: NaiveDate) {
        self.holidays.insert(date);
    }

    pub fn add_holidays(&mut self, dates: &[NaiveDate]) {
        self.holidays.extend(dates);
    }

    pub fn is_workable(&self, date: NaiveDate) -> bool {
        !self.non_working_days.contains(&date.weekday()) && !self.holidays.contains(&date)
    }

    /// Walks forward from `start`, counting only workable days, until
    /// `total_days` have been counted; then appends the holiday offset as
    /// plain calendar days. The walk is capped at `total_days * 7` steps;
    /// hitting the cap means the skip configuration excludes essentially
    /// every day and fails with a projection error.
    pub fn project_end_date(
        &self,
        start: NaiveDate,
        total_days: i64,
        holiday: HolidayPolicy,
    ) -> Result<NaiveDate, EstimateError> {
        let provisional = self.walk(start, total_days, 1)?;
        Ok(provisional + Duration::days(holiday.offset_for(total_days)))
    }

    /// Inverse walk: removes the holiday offset from `end`, then counts
    /// `total_days` workable days backward.
    pub fn project_start_date(
        &self,
        end: NaiveDate,
        total_days: i64,
        holiday: HolidayPolicy,
    ) -> Result<NaiveDate, EstimateError> {
        let provisional = end - Duration::days(holiday.offset_for(total_days));
        self.walk(provisional, total_days, -1)
    }

    /// Counts workable days after `start` up to and including `end`, so that
    /// counting over a projected span recovers the day total exactly.
    pub fn count_working_days(&self, start: NaiveDate, end: NaiveDate) -> i64 {
        let mut count = 0;
        let mut current = start;
        while current < end {
            current += Duration::days(1);
            if self.is_workable(current) {
                count += 1;
            }
        }
        count
    }

    fn walk(
        &self,
        from: NaiveDate,
        total_days: i64,
        step: i64,
    ) -> Result<NaiveDate, EstimateError> {
        if total_days < 0 {
            return Err(negative_days(total_days));
        }
        let ceiling = total_days.saturating_mul(7);
        let mut current = from;
        let mut counted = 0i64;
        let mut steps = 0i64;
        while counted < total_days {
            if steps >= ceiling {
                return Err(EstimateError::Projection(format!(
                    "calendar walk exceeded {ceiling} steps after counting {counted} of \
                     {total_days} days; the skip configuration excludes too many days"
                )));
            }
            current += Duration::days(step);
            steps += 1;
            if self.is_workable(current) {
                counted += 1;
            }
        }
        Ok(current)
    }
}

/// Additive correction used by the surcharge strategy: how many extra
/// calendar days a run of `total_days` working days picks up when one day in
/// every `skip_ratio` is non-working.
pub fn working_day_surcharge(total_days: i64, skip_ratio: f64) -> Result<i64, EstimateError> {
    if total_days < 0 {
        return Err(negative_days(total_days));
    }
    if !skip_ratio.is_finite() || skip_ratio <= 0.0 {
        return Err(EstimateError::invalid_input(
            "skip_ratio",
            format!("{skip_ratio} (must be positive)"),
        ));
    }
    Ok((total_days as f64 / skip_ratio).floor() as i64)
}

/// Default-settings projection, the second of the two core entry points.
pub fn project_end_date(
    start: NaiveDate,
    total_days: i64,
    skip_non_working: bool,
    apply_holiday_block: bool,
) -> Result<NaiveDate, EstimateError> {
    ProjectionSettings::default().project(start, total_days, skip_non_working, apply_holiday_block)
}

fn negative_days(total_days: i64) -> EstimateError {
    EstimateError::invalid_input("total_days", format!("{total_days} (must be non-negative)"))
}
