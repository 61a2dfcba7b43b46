use chrono::{NaiveDate, Utc};

use crate::id::generate_id;
use crate::model::{
    KpiFrequency, KpiInput, KpiStatus, ObjectiveInput, ObjectiveStatus, OptionCategory,
    OptionStatus, Perspective, Plan, PlanStatus, Priority, StrategicOptionInput, SwotItemInput,
    SwotType, Timeframe,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

fn swot(kind: SwotType, content: &str, category: &str, priority: Priority) -> SwotItemInput {
    SwotItemInput {
        category: Some(category.to_string()),
        priority: Some(priority),
        ..SwotItemInput::new(kind, content)
    }
}

fn kpi(
    name: &str,
    description: &str,
    (target, current, unit): (&str, &str, &str),
    frequency: KpiFrequency,
    status: KpiStatus,
) -> KpiInput {
    KpiInput {
        description: description.to_string(),
        current: current.to_string(),
        unit: unit.to_string(),
        frequency,
        status,
        ..KpiInput::new(name, target)
    }
}

/// A fully populated plan used to seed an empty store on first run.
pub fn sample_plan() -> Plan {
    let now = Utc::now();

    let swot_items: Vec<_> = [
        swot(
            SwotType::Strength,
            "Strong brand reputation and customer loyalty",
            "Market Position",
            Priority::High,
        ),
        swot(
            SwotType::Strength,
            "Experienced leadership team with deep industry knowledge",
            "Human Resources",
            Priority::High,
        ),
        swot(
            SwotType::Weakness,
            "Limited digital transformation capabilities",
            "Technology",
            Priority::High,
        ),
        swot(
            SwotType::Opportunity,
            "Growing demand for sustainable and eco-friendly products",
            "Market Trends",
            Priority::High,
        ),
        swot(
            SwotType::Threat,
            "Increasing competition from new market entrants",
            "Competitive Landscape",
            Priority::Medium,
        ),
    ]
    .into_iter()
    .map(|input| input.into_item(generate_id()))
    .collect();

    let option = StrategicOptionInput {
        description: "Accelerate digital capabilities to improve customer experience and operational efficiency".to_string(),
        related_strengths: vec![swot_items[0].id.clone(), swot_items[1].id.clone()],
        related_weaknesses: vec![swot_items[2].id.clone()],
        feasibility: 8,
        impact: 9,
        priority: Priority::High,
        status: OptionStatus::Approved,
        ..StrategicOptionInput::new("Digital Transformation Initiative", OptionCategory::So)
    }
    .into_option(generate_id());

    let objective_specs = [
        (
            Perspective::Financial,
            "Increase Revenue Growth",
            "Achieve 15% year-over-year revenue growth through market expansion and new product lines",
            kpi(
                "Revenue Growth Rate",
                "Year-over-year revenue growth percentage",
                ("15%", "8%", "%"),
                KpiFrequency::Quarterly,
                KpiStatus::AtRisk,
            ),
        ),
        (
            Perspective::Customer,
            "Enhance Customer Satisfaction",
            "Improve customer satisfaction scores through better service and product quality",
            kpi(
                "Net Promoter Score",
                "Customer loyalty and satisfaction metric",
                ("70", "58", "score"),
                KpiFrequency::Monthly,
                KpiStatus::OnTrack,
            ),
        ),
    ];

    let objectives = objective_specs
        .into_iter()
        .map(|(perspective, name, description, kpi)| {
            let mut objective = ObjectiveInput {
                description: description.to_string(),
                strategic_option_ids: vec![option.id.clone()],
                status: ObjectiveStatus::InProgress,
                start_date: Some(date(2025, 1, 1)),
                target_date: Some(date(2025, 12, 31)),
                ..ObjectiveInput::new(perspective, name)
            }
            .into_objective(generate_id());
            let objective_id = objective.id.clone();
            objective.kpis.push(kpi.into_kpi(generate_id(), objective_id));
            objective
        })
        .collect();

    Plan {
        id: generate_id(),
        name: "Sample Strategic Plan 2025-2027".to_string(),
        description: "Three-year strategic plan for organizational growth and digital transformation".to_string(),
        organization: "Sample Organization".to_string(),
        timeframe: Timeframe {
            start: date(2025, 1, 1),
            end: date(2027, 12, 31),
        },
        vision: "To be the leading provider of innovative solutions in our industry".to_string(),
        mission: "We deliver exceptional value to our customers through innovation, quality, and outstanding service".to_string(),
        values: ["Innovation", "Integrity", "Customer Focus", "Excellence", "Sustainability"]
            .into_iter()
            .map(String::from)
            .collect(),
        swot_items,
        strategic_options: vec![option],
        objectives,
        paps: Vec::new(),
        status: PlanStatus::Active,
        created_at: now,
        updated_at: now,
        created_by: None,
    }
}
