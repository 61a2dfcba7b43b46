use chrono::{DateTime, Utc};

use crate::model::{Kpi, Objective, Perspective, Plan, StrategicOption, SwotType};

fn has_text(value: &Option<String>) -> bool {
    value
        .as_deref()
        .map(|text| !text.trim().is_empty())
        .unwrap_or(false)
}

pub fn format_datetime(dt: DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M").to_string()
}

pub fn swot_heading(kind: SwotType) -> &'static str {
    match kind {
        SwotType::Strength => "Strengths",
        SwotType::Weakness => "Weaknesses",
        SwotType::Opportunity => "Opportunities",
        SwotType::Threat => "Threats",
    }
}

pub fn perspective_heading(perspective: Perspective) -> &'static str {
    match perspective {
        Perspective::Financial => "Financial",
        Perspective::Customer => "Customer",
        Perspective::Internal => "Internal Processes",
        Perspective::Learning => "Learning & Growth",
    }
}

/// One row of `plan list`; `*` marks the current plan.
pub fn format_plan_row(plan: &Plan, current: bool) -> String {
    format!(
        "{} {:<36} {:<9} {:<16} {}",
        if current { "*" } else { " " },
        plan.id,
        plan.status,
        format_datetime(plan.updated_at),
        plan.name
    )
}

fn collapse_heading(text: &str) -> String {
    let normalized = text.replace("\r\n", "\n");
    let parts: Vec<&str> = normalized
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();
    if parts.is_empty() {
        "(untitled)".to_string()
    } else {
        parts.join(" / ")
    }
}

fn push_line(lines: &mut Vec<String>, indent: usize, text: &str) {
    let mut line = " ".repeat(indent);
    line.push_str(text);
    lines.push(line);
}

fn push_quote(lines: &mut Vec<String>, text: &str) {
    let normalized = text.replace("\r\n", "\n");
    for line in normalized.lines() {
        if line.is_empty() {
            lines.push(">".to_string());
        } else {
            lines.push(format!("> {line}"));
        }
    }
}

fn push_option(lines: &mut Vec<String>, option: &StrategicOption) {
    push_line(
        lines,
        0,
        &format!(
            "- **{}** *({}, id: {})*",
            collapse_heading(&option.name),
            option.category,
            option.id
        ),
    );
    if !option.description.trim().is_empty() {
        push_line(lines, 2, &option.description);
    }
    push_line(
        lines,
        2,
        &format!(
            "- Feasibility: {}/10, Impact: {}/10, Priority: {}, Status: {}",
            option.feasibility, option.impact, option.priority, option.status
        ),
    );
    let related = [
        ("Strengths", &option.related_strengths),
        ("Weaknesses", &option.related_weaknesses),
        ("Opportunities", &option.related_opportunities),
        ("Threats", &option.related_threats),
    ];
    for (label, ids) in related {
        if !ids.is_empty() {
            push_line(lines, 2, &format!("- {label}: {}", ids.join(", ")));
        }
    }
}

fn push_kpi(lines: &mut Vec<String>, kpi: &Kpi) {
    let unit = if kpi.unit.is_empty() {
        String::new()
    } else {
        format!(" {}", kpi.unit)
    };
    push_line(
        lines,
        2,
        &format!(
            "- KPI **{}**: {} / {}{} ({}, {}) *(id: {})*",
            kpi.name, kpi.current, kpi.target, unit, kpi.frequency, kpi.status, kpi.id
        ),
    );
    for point in &kpi.data_points {
        let notes = point
            .notes
            .as_deref()
            .filter(|notes| !notes.trim().is_empty())
            .map(|notes| format!(" ({notes})"))
            .unwrap_or_default();
        push_line(
            lines,
            4,
            &format!("- {}: {}{}", point.date, point.value, notes),
        );
    }
}

fn push_objective(lines: &mut Vec<String>, objective: &Objective) {
    push_line(
        lines,
        0,
        &format!(
            "- **{}** *({}, id: {})*",
            collapse_heading(&objective.name),
            objective.status,
            objective.id
        ),
    );
    if !objective.description.trim().is_empty() {
        push_line(lines, 2, &objective.description);
    }
    if has_text(&objective.owner) {
        push_line(
            lines,
            2,
            &format!("- Owner: {}", objective.owner.as_deref().unwrap_or("")),
        );
    }
    if let (Some(start), Some(target)) = (objective.start_date, objective.target_date) {
        push_line(lines, 2, &format!("- Window: {start} to {target}"));
    }
    for kpi in &objective.kpis {
        push_kpi(lines, kpi);
    }
}

/// Markdown report of a whole plan, grouped SWOT first and then by BSC perspective.
pub fn format_plan_markdown(plan: &Plan, current: bool) -> String {
    let mut lines = Vec::new();
    push_line(
        &mut lines,
        0,
        &format!("# Plan: {}", collapse_heading(&plan.name)),
    );
    lines.push(String::new());
    push_line(
        &mut lines,
        0,
        &format!("- **Current:** `{}`", if current { "true" } else { "false" }),
    );
    push_line(&mut lines, 0, &format!("- **Plan ID:** `{}`", plan.id));
    push_line(&mut lines, 0, &format!("- **Status:** `{}`", plan.status));
    if !plan.organization.trim().is_empty() {
        push_line(
            &mut lines,
            0,
            &format!("- **Organization:** {}", plan.organization),
        );
    }
    push_line(
        &mut lines,
        0,
        &format!(
            "- **Timeframe:** {} to {}",
            plan.timeframe.start, plan.timeframe.end
        ),
    );
    if has_text(&plan.created_by) {
        push_line(
            &mut lines,
            0,
            &format!("- **Created by:** {}", plan.created_by.as_deref().unwrap_or("")),
        );
    }
    push_line(
        &mut lines,
        0,
        &format!("- **Created:** {}", format_datetime(plan.created_at)),
    );
    push_line(
        &mut lines,
        0,
        &format!("- **Updated:** {}", format_datetime(plan.updated_at)),
    );

    for (title, text) in [
        ("Description", &plan.description),
        ("Vision", &plan.vision),
        ("Mission", &plan.mission),
    ] {
        if text.trim().is_empty() {
            continue;
        }
        lines.push(String::new());
        push_line(&mut lines, 0, &format!("## {title}"));
        lines.push(String::new());
        push_quote(&mut lines, text);
    }

    if !plan.values.is_empty() {
        lines.push(String::new());
        push_line(&mut lines, 0, "## Values");
        lines.push(String::new());
        for value in &plan.values {
            push_line(&mut lines, 0, &format!("- {value}"));
        }
    }

    lines.push(String::new());
    push_line(&mut lines, 0, "## SWOT");
    for kind in SwotType::ALL.iter().copied() {
        lines.push(String::new());
        push_line(&mut lines, 0, &format!("### {}", swot_heading(kind)));
        lines.push(String::new());
        let items: Vec<_> = plan.swot_items_of(kind).collect();
        if items.is_empty() {
            push_line(&mut lines, 0, "*None*");
            continue;
        }
        for item in items {
            let mut tags = Vec::new();
            if let Some(priority) = item.priority {
                tags.push(priority.to_string());
            }
            if let Some(category) = item.category.as_deref().filter(|c| !c.trim().is_empty()) {
                tags.push(category.to_string());
            }
            tags.push(format!("id: {}", item.id));
            push_line(
                &mut lines,
                0,
                &format!("- {} *({})*", item.content, tags.join(", ")),
            );
        }
    }

    lines.push(String::new());
    push_line(&mut lines, 0, "## Strategic Options");
    lines.push(String::new());
    if plan.strategic_options.is_empty() {
        push_line(&mut lines, 0, "*None*");
    }
    for option in &plan.strategic_options {
        push_option(&mut lines, option);
    }

    lines.push(String::new());
    push_line(&mut lines, 0, "## Objectives");
    for perspective in Perspective::ALL.iter().copied() {
        let objectives: Vec<_> = plan
            .objectives
            .iter()
            .filter(|objective| objective.perspective == perspective)
            .collect();
        if objectives.is_empty() {
            continue;
        }
        lines.push(String::new());
        push_line(
            &mut lines,
            0,
            &format!("### {}", perspective_heading(perspective)),
        );
        lines.push(String::new());
        for objective in objectives {
            push_objective(&mut lines, objective);
        }
    }

    lines.push(String::new());
    push_line(&mut lines, 0, "## Action Plans");
    lines.push(String::new());
    if plan.paps.is_empty() {
        push_line(&mut lines, 0, "*None*");
    }
    for pap in &plan.paps {
        push_line(
            &mut lines,
            0,
            &format!(
                "- **{}** *({}, objective: {}, id: {})*",
                collapse_heading(&pap.name),
                pap.status,
                pap.objective_id,
                pap.id
            ),
        );
        if !pap.description.trim().is_empty() {
            push_line(&mut lines, 2, &pap.description);
        }
        push_line(
            &mut lines,
            2,
            &format!(
                "- Budget: {:.2} / {:.2} {}",
                pap.budget.spent, pap.budget.allocated, pap.budget.currency
            ),
        );
        for activity in &pap.activities {
            push_line(
                &mut lines,
                2,
                &format!(
                    "- Activity {} ({}, {:.0}%): {} to {}",
                    activity.name,
                    activity.status,
                    activity.progress,
                    activity.start_date,
                    activity.end_date
                ),
            );
        }
        for resource in &pap.resources {
            push_line(
                &mut lines,
                2,
                &format!(
                    "- Resource {} ({}): {}",
                    resource.name, resource.kind, resource.quantity
                ),
            );
        }
        for risk in &pap.risks {
            push_line(
                &mut lines,
                2,
                &format!(
                    "- Risk: {} (likelihood {}, impact {})",
                    risk.description, risk.likelihood, risk.impact
                ),
            );
        }
    }

    lines.join("\n").trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::model::{Activity, ActivityStatus, PapInput, Resource, ResourceType, Risk, RiskLevel};
    use crate::sample::sample_plan;

    #[test]
    fn markdown_groups_swot_by_quadrant() {
        let plan = sample_plan();
        let markdown = format_plan_markdown(&plan, true);
        assert!(markdown.starts_with("# Plan: Sample Strategic Plan 2025-2027"));
        assert!(markdown.contains("- **Current:** `true`"));
        let strengths = markdown.find("### Strengths").expect("strengths");
        let threats = markdown.find("### Threats").expect("threats");
        assert!(strengths < threats);
        assert!(markdown.contains("Limited digital transformation capabilities"));
        assert!(!markdown.contains("### Learning & Growth"));
        assert!(markdown.contains("- KPI **Net Promoter Score**: 58 / 70 score"));
    }

    #[test]
    fn empty_sections_say_none() {
        let mut plan = sample_plan();
        plan.swot_items.clear();
        plan.strategic_options.clear();
        let markdown = format_plan_markdown(&plan, false);
        assert!(markdown.contains("### Opportunities\n\n*None*"));
        assert!(markdown.contains("## Strategic Options\n\n*None*"));
        assert!(markdown.contains("## Action Plans\n\n*None*"));
    }

    #[test]
    fn plan_row_marks_current() {
        let plan = sample_plan();
        assert!(format_plan_row(&plan, true).starts_with("* "));
        assert!(format_plan_row(&plan, false).starts_with("  "));
        assert!(format_plan_row(&plan, false).ends_with(&plan.name));
    }

    #[test]
    fn action_plan_details_are_listed() {
        let mut plan = sample_plan();
        let mut pap = PapInput::new("o1", "Billing migration").into_pap("pap-1".to_string());
        pap.budget.allocated = 1000.0;
        pap.budget.spent = 250.5;
        pap.activities.push(Activity {
            id: "act-1".to_string(),
            name: "Data migration".to_string(),
            description: String::new(),
            start_date: NaiveDate::from_ymd_opt(2025, 2, 1).expect("date"),
            end_date: NaiveDate::from_ymd_opt(2025, 6, 30).expect("date"),
            status: ActivityStatus::InProgress,
            progress: 40.0,
            assigned_to: None,
            dependencies: None,
        });
        pap.resources.push(Resource {
            id: "res-1".to_string(),
            kind: ResourceType::Human,
            name: "Data engineers".to_string(),
            quantity: "2 FTE".to_string(),
            notes: None,
        });
        pap.risks.push(Risk {
            id: "risk-1".to_string(),
            description: "Cutover slips".to_string(),
            likelihood: RiskLevel::Medium,
            impact: RiskLevel::High,
            mitigation: String::new(),
        });
        plan.paps.push(pap);

        let markdown = format_plan_markdown(&plan, false);
        assert!(markdown.contains("- **Billing migration** *(planning, objective: o1, id: pap-1)*"));
        assert!(markdown.contains("  - Budget: 250.50 / 1000.00 USD"));
        assert!(markdown.contains("  - Activity Data migration (in-progress, 40%): 2025-02-01 to 2025-06-30"));
        assert!(markdown.contains("  - Resource Data engineers (human): 2 FTE"));
        assert!(markdown.contains("  - Risk: Cutover slips (likelihood medium, impact high)"));
    }
}
