use chrono::{NaiveDate, Weekday};
use tender_tool::{
    EstimateError, HolidayPolicy, ProjectionSettings, ProjectionStrategy, SkipPolicy, WorkCalendar,
    project_end_date, working_day_surcharge,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn zero_days_is_a_no_op_without_holidays() {
    let start = date(2025, 1, 6);
    assert_eq!(project_end_date(start, 0, true, false).unwrap(), start);
}

#[test]
fn zero_days_still_appends_the_holiday_block() {
    let start = date(2025, 1, 6);
    assert_eq!(
        project_end_date(start, 0, true, true).unwrap(),
        date(2025, 1, 16)
    );
}

#[test]
fn no_skips_no_holidays_is_a_plain_offset() {
    // Monday start, 30 calendar days.
    assert_eq!(
        project_end_date(date(2025, 1, 6), 30, false, false).unwrap(),
        date(2025, 2, 5)
    );
}

#[test]
fn weekend_skips_stretch_a_six_week_run() {
    // 30 working days at 5 per week is exactly 6 calendar weeks.
    assert_eq!(
        project_end_date(date(2025, 1, 6), 30, true, false).unwrap(),
        date(2025, 2, 17)
    );
}

#[test]
fn sunday_only_policy_finishes_earlier_than_weekends() {
    let settings = ProjectionSettings {
        skip_policy: SkipPolicy::SundayOnly,
        holiday_policy: HolidayPolicy::None,
        strategy: ProjectionStrategy::DayWalk,
    };
    let end = settings.project(date(2025, 1, 6), 30, true, false).unwrap();
    // 30 working days at 6 per week is exactly 5 calendar weeks.
    assert_eq!(end, date(2025, 2, 10));
    assert!(end < project_end_date(date(2025, 1, 6), 30, true, false).unwrap());
}

#[test]
fn flat_holiday_block_lands_after_the_walk() {
    assert_eq!(
        project_end_date(date(2025, 1, 6), 30, true, true).unwrap(),
        date(2025, 2, 27)
    );
}

#[test]
fn per_year_holiday_scales_with_started_years() {
    let policy = HolidayPolicy::PerYearOccurrence { days: 7 };
    assert_eq!(policy.offset_for(0), 0);
    assert_eq!(policy.offset_for(1), 7);
    assert_eq!(policy.offset_for(365), 7);
    assert_eq!(policy.offset_for(366), 14);
    assert_eq!(policy.offset_for(997), 21);
}

#[test]
fn surcharge_strategy_adds_a_flat_correction_instead_of_walking() {
    let settings = ProjectionSettings {
        skip_policy: SkipPolicy::Weekends,
        holiday_policy: HolidayPolicy::FlatBlock { days: 10 },
        strategy: ProjectionStrategy::WorkweekSurcharge { skip_ratio: 6.0 },
    };
    let start = date(2025, 1, 6);
    // 30 + floor(30 / 6) + 10
    assert_eq!(settings.project(start, 30, true, true).unwrap(), date(2025, 2, 20));
    // Without the skip flag the surcharge is dropped, the holiday stays.
    assert_eq!(settings.project(start, 30, false, true).unwrap(), date(2025, 2, 15));
}

#[test]
fn surcharge_is_floor_division() {
    assert_eq!(working_day_surcharge(30, 6.0).unwrap(), 5);
    assert_eq!(working_day_surcharge(29, 6.0).unwrap(), 4);
    assert_eq!(working_day_surcharge(0, 6.0).unwrap(), 0);
}

#[test]
fn surcharge_rejects_bad_inputs() {
    assert!(working_day_surcharge(-1, 6.0).is_err());
    assert!(working_day_surcharge(30, 0.0).is_err());
    assert!(working_day_surcharge(30, -2.5).is_err());
    assert!(working_day_surcharge(30, f64::NAN).is_err());
}

#[test]
fn negative_day_totals_are_rejected() {
    assert!(matches!(
        project_end_date(date(2025, 1, 6), -5, true, true),
        Err(EstimateError::InvalidInput {
            field: "total_days",
            ..
        })
    ));
}

#[test]
fn ad_hoc_holidays_are_stepped_over() {
    let calendar = WorkCalendar::custom(
        [Weekday::Sat, Weekday::Sun],
        [date(2025, 1, 8)],
    );
    let end = calendar
        .project_end_date(date(2025, 1, 6), 3, HolidayPolicy::None)
        .unwrap();
    assert_eq!(end, date(2025, 1, 10));
}

#[test]
fn counting_over_a_projected_span_recovers_the_total() {
    let calendar = WorkCalendar::for_policy(SkipPolicy::Weekends);
    let start = date(2025, 1, 6);
    let end = calendar
        .project_end_date(start, 30, HolidayPolicy::None)
        .unwrap();
    assert_eq!(calendar.count_working_days(start, end), 30);
}

#[test]
fn projecting_back_from_the_end_recovers_a_working_day_start() {
    let settings = ProjectionSettings::default();
    let start = date(2025, 3, 3); // Monday
    for total in [1, 5, 30, 997] {
        let end = settings.project(start, total, true, true).unwrap();
        assert_eq!(settings.project_back(end, total, true, true).unwrap(), start);
    }
}

#[test]
fn a_calendar_that_excludes_every_day_fails_instead_of_spinning() {
    let calendar = WorkCalendar::custom(
        [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ],
        [],
    );
    assert!(matches!(
        calendar.project_end_date(date(2025, 1, 6), 5, HolidayPolicy::None),
        Err(EstimateError::Projection(_))
    ));
}
