/// Maps raw positional telemetry into the fixed lane-role labels. Two tiers:
/// the individual position wins when recognized; otherwise the team position
/// is used, with a BOTTOM special case, and any other value is title-cased
/// verbatim. The fallback tier is heuristic and can misclassify; both tiers
/// are pinned by tests because downstream breakdowns key on these labels.
pub fn normalize_role(individual_position: &str, team_position: &str) -> String {
    match individual_position {
        "UTILITY" => return "Support".to_string(),
        "BOTTOM" => return "ADC".to_string(),
        "JUNGLE" => return "Jungle".to_string(),
        "MIDDLE" => return "Mid".to_string(),
        "TOP" => return "Top".to_string(),
        _ => {}
    }

    if team_position == "BOTTOM" {
        let label = if individual_position == "UTILITY" {
            "Support"
        } else {
            "ADC"
        };
        return label.to_string();
    }

    title_case(team_position)
}

fn title_case(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}
