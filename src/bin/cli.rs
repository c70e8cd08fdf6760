use chrono::NaiveDate;
use std::io::{self, Write};
use tender_tool::{
    BuildingType, CompletionAdminCategory, ConstructionMethod, Estimate, EstimateRequest,
    Estimator, ExcavationSupport, GroundImprovementLevel, HolidayPolicy, PreConstructionCategory,
    ProjectionSettings, ProjectionStrategy, RateTables, ScenarioPreset, SiteCondition, SkipPolicy,
    StructureType, load_rate_tables_from_json, save_breakdown_to_csv, save_estimate_to_json,
    save_rate_config_to_json,
};

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  show                               Show current request and projection settings\n  set preset <conservative|normal|optimistic>\n  set building <residential|office|mall|hospital|factory>\n  set structure <RC|SRC|SS|SC>\n  set method <forward|reverse|double_forward>\n  set pre <general|near_transit|large_public_review|environmental_review>\n  set ground <none|partial|full|special>\n  set site <vacant|demolition_required|old_foundation_removal>\n  set support <open_cut|sheet_pile|diaphragm_wall>\n  set admin <normal|complex|phased>\n  set above <n>                      Floors above grade\n  set below <n>                      Floors below grade\n  set area <float>                   Site area\n  start <YYYY-MM-DD|none>            Projection anchor date\n  skip <on|off>                      Skip non-working days during projection\n  holiday <on|off>                   Apply the holiday block during projection\n  policy skip <weekends|sunday_only>\n  policy holiday <flat <days>|per_year <days>|none>\n  policy strategy <walk|surcharge <ratio>>\n  estimate                           Run the pipeline and show the breakdown\n  export <csv|json> <path>           Write the last estimate to disk\n  rates load <json_path>             Load rate tables from JSON (fail-fast)\n  rates save <json_path>             Save current rate tables to JSON\n  rates default                      Reset to the built-in tables\n  quit|exit                          Exit"
    );
}

fn render_breakdown(estimate: &Estimate) -> String {
    let mut width = "stage".len();
    for line in &estimate.breakdown {
        width = width.max(line.stage.as_str().len());
    }
    width = width.max("total".len());

    let sep = format!("+{}+{}+", "-".repeat(width + 2), "-".repeat(8));
    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    out.push_str(&format!("| {:<width$} | {:>6} |\n", "stage", "days"));
    out.push_str(&sep);
    out.push('\n');
    for line in &estimate.breakdown {
        out.push_str(&format!(
            "| {:<width$} | {:>6} |\n",
            line.stage.as_str(),
            line.days
        ));
    }
    out.push_str(&sep);
    out.push('\n');
    out.push_str(&format!(
        "| {:<width$} | {:>6} |\n",
        "total", estimate.total_days
    ));
    out.push_str(&sep);
    out.push('\n');
    if let Some(end) = estimate.end_date {
        out.push_str(&format!("projected end date: {end}\n"));
    }
    out
}

fn print_request(request: &EstimateRequest, projection: &ProjectionSettings) {
    println!("preset            : {}", request.preset.as_str());
    println!("building_type     : {}", request.building_type.as_str());
    println!("structure_type    : {}", request.structure_type.as_str());
    println!(
        "construction      : {}",
        request.construction_method.as_str()
    );
    println!(
        "pre_construction  : {}",
        request.pre_construction_category.as_str()
    );
    println!(
        "ground_improvement: {}",
        request.ground_improvement_level.as_str()
    );
    println!("site_condition    : {}", request.site_condition.as_str());
    println!(
        "excavation_support: {}",
        request.excavation_support.as_str()
    );
    println!(
        "completion_admin  : {}",
        request.completion_admin_category.as_str()
    );
    println!("floors_above      : {}", request.floors_above);
    println!("floors_below      : {}", request.floors_below);
    println!("site_area         : {}", request.site_area);
    match request.start_date {
        Some(date) => println!("start_date        : {date}"),
        None => println!("start_date        : (none)"),
    }
    println!("skip non-working  : {}", request.exclude_non_working_day);
    println!("holiday block     : {}", request.exclude_holiday_block);
    println!("skip policy       : {:?}", projection.skip_policy);
    println!("holiday policy    : {:?}", projection.holiday_policy);
    println!("strategy          : {:?}", projection.strategy);
}

fn parse_on_off(value: &str) -> Option<bool> {
    match value {
        "on" => Some(true),
        "off" => Some(false),
        _ => None,
    }
}

fn main() {
    let mut request = EstimateRequest::default();
    let mut projection = ProjectionSettings::default();
    let mut tables = RateTables::default();
    let mut last: Option<Estimate> = None;

    println!("Tender Duration Tool (CLI) - type 'help' for commands\n");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        if stdin.read_line(&mut line).is_err() {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "show" => print_request(&request, &projection),
            "set" => {
                let field = parts.next();
                let value = parts.next();
                match (field, value) {
                    (Some(field), Some(value)) => {
                        let applied = match field {
                            "preset" => ScenarioPreset::from_key(value)
                                .map(|v| request.preset = v)
                                .is_some(),
                            "building" => BuildingType::from_key(value)
                                .map(|v| request.building_type = v)
                                .is_some(),
                            "structure" => StructureType::from_key(value)
                                .map(|v| request.structure_type = v)
                                .is_some(),
                            "method" => ConstructionMethod::from_key(value)
                                .map(|v| request.construction_method = v)
                                .is_some(),
                            "pre" => PreConstructionCategory::from_key(value)
                                .map(|v| request.pre_construction_category = v)
                                .is_some(),
                            "ground" => GroundImprovementLevel::from_key(value)
                                .map(|v| request.ground_improvement_level = v)
                                .is_some(),
                            "site" => SiteCondition::from_key(value)
                                .map(|v| request.site_condition = v)
                                .is_some(),
                            "support" => ExcavationSupport::from_key(value)
                                .map(|v| request.excavation_support = v)
                                .is_some(),
                            "admin" => CompletionAdminCategory::from_key(value)
                                .map(|v| request.completion_admin_category = v)
                                .is_some(),
                            "above" => match value.parse::<i64>() {
                                Ok(v) => {
                                    request.floors_above = v;
                                    true
                                }
                                Err(_) => false,
                            },
                            "below" => match value.parse::<i64>() {
                                Ok(v) => {
                                    request.floors_below = v;
                                    true
                                }
                                Err(_) => false,
                            },
                            "area" => match value.parse::<f64>() {
                                Ok(v) => {
                                    request.site_area = v;
                                    true
                                }
                                Err(_) => false,
                            },
                            _ => {
                                println!("Unknown field '{field}'. Type 'help'.");
                                continue;
                            }
                        };
                        if applied {
                            println!("{field} set.");
                        } else {
                            println!("Invalid value '{value}' for '{field}'.");
                        }
                    }
                    _ => println!("Usage: set <field> <value>"),
                }
            }
            "start" => match parts.next() {
                Some("none") => {
                    request.start_date = None;
                    println!("start_date cleared.");
                }
                Some(date_s) => match NaiveDate::parse_from_str(date_s, "%Y-%m-%d") {
                    Ok(date) => {
                        request.start_date = Some(date);
                        println!("start_date set.");
                    }
                    Err(_) => println!("Invalid date (YYYY-MM-DD)"),
                },
                None => println!("Usage: start <YYYY-MM-DD|none>"),
            },
            "skip" => match parts.next().and_then(parse_on_off) {
                Some(flag) => {
                    request.exclude_non_working_day = flag;
                    println!("skip non-working days: {flag}");
                }
                None => println!("Usage: skip <on|off>"),
            },
            "holiday" => match parts.next().and_then(parse_on_off) {
                Some(flag) => {
                    request.exclude_holiday_block = flag;
                    println!("holiday block: {flag}");
                }
                None => println!("Usage: holiday <on|off>"),
            },
            "policy" => match parts.next() {
                Some("skip") => match parts.next() {
                    Some("weekends") => {
                        projection.skip_policy = SkipPolicy::Weekends;
                        println!("skip policy: weekends");
                    }
                    Some("sunday_only") => {
                        projection.skip_policy = SkipPolicy::SundayOnly;
                        println!("skip policy: sunday_only");
                    }
                    _ => println!("Usage: policy skip <weekends|sunday_only>"),
                },
                Some("holiday") => match parts.next() {
                    Some("none") => {
                        projection.holiday_policy = HolidayPolicy::None;
                        println!("holiday policy: none");
                    }
                    Some("flat") => match parts.next().and_then(|v| v.parse::<i64>().ok()) {
                        Some(days) if days >= 0 => {
                            projection.holiday_policy = HolidayPolicy::FlatBlock { days };
                            println!("holiday policy: flat {days}");
                        }
                        _ => println!("Usage: policy holiday flat <days>"),
                    },
                    Some("per_year") => match parts.next().and_then(|v| v.parse::<i64>().ok()) {
                        Some(days) if days >= 0 => {
                            projection.holiday_policy = HolidayPolicy::PerYearOccurrence { days };
                            println!("holiday policy: per_year {days}");
                        }
                        _ => println!("Usage: policy holiday per_year <days>"),
                    },
                    _ => println!("Usage: policy holiday <flat <days>|per_year <days>|none>"),
                },
                Some("strategy") => match parts.next() {
                    Some("walk") => {
                        projection.strategy = ProjectionStrategy::DayWalk;
                        println!("strategy: day walk");
                    }
                    Some("surcharge") => match parts.next().and_then(|v| v.parse::<f64>().ok()) {
                        Some(ratio) if ratio > 0.0 => {
                            projection.strategy =
                                ProjectionStrategy::WorkweekSurcharge { skip_ratio: ratio };
                            println!("strategy: surcharge (ratio {ratio})");
                        }
                        _ => println!("Usage: policy strategy surcharge <ratio>"),
                    },
                    _ => println!("Usage: policy strategy <walk|surcharge <ratio>>"),
                },
                _ => println!("Usage: policy <skip|holiday|strategy> ..."),
            },
            "estimate" => {
                let estimator =
                    Estimator::with_tables(tables.clone()).with_projection(projection);
                match estimator.estimate(&request) {
                    Ok(result) => {
                        println!("{}", render_breakdown(&result));
                        last = Some(result);
                    }
                    Err(e) => println!("Estimate error: {e}"),
                }
            }
            "export" => {
                let fmt = parts.next();
                let path = parts.next();
                let Some(result) = last.as_ref() else {
                    println!("No estimate yet. Run 'estimate' first.");
                    continue;
                };
                match (fmt, path) {
                    (Some("csv"), Some(path)) => match save_breakdown_to_csv(result, path) {
                        Ok(_) => println!("Breakdown saved to {path}."),
                        Err(e) => println!("Error saving breakdown: {e}"),
                    },
                    (Some("json"), Some(path)) => match save_estimate_to_json(result, path) {
                        Ok(_) => println!("Estimate saved to {path}."),
                        Err(e) => println!("Error saving estimate: {e}"),
                    },
                    _ => println!("Usage: export <csv|json> <path>"),
                }
            }
            "rates" => match parts.next() {
                Some("load") => match parts.next() {
                    Some(path) => match load_rate_tables_from_json(path) {
                        Ok(loaded) => {
                            tables = loaded;
                            println!("Rate tables loaded from {path}.");
                        }
                        Err(e) => println!("Error loading rate tables: {e}"),
                    },
                    None => println!("Usage: rates load <json_path>"),
                },
                Some("save") => match parts.next() {
                    Some(path) => match save_rate_config_to_json(tables.config(), path) {
                        Ok(_) => println!("Rate tables saved to {path}."),
                        Err(e) => println!("Error saving rate tables: {e}"),
                    },
                    None => println!("Usage: rates save <json_path>"),
                },
                Some("default") => {
                    tables = RateTables::default();
                    println!("Rate tables reset to the built-in values.");
                }
                _ => println!("Usage: rates load|save <json_path> | rates default"),
            },
            _ => {
                println!("Unknown command. Type 'help'.");
            }
        }
    }
}
