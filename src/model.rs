use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

macro_rules! string_enum {
    ($name:ident, $label:literal { $($variant:ident => $text:literal),+ $(,)? }) => {
        #[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = AppError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|candidate| candidate.as_str() == value)
                    .ok_or_else(|| {
                        let allowed = Self::ALL
                            .iter()
                            .map(|candidate| candidate.as_str())
                            .collect::<Vec<_>>()
                            .join(", ");
                        AppError::InvalidInput(format!(
                            "unknown {} '{value}' (expected one of: {allowed})",
                            $label
                        ))
                    })
            }
        }
    };
}

string_enum!(PlanStatus, "plan status" {
    Draft => "draft",
    Active => "active",
    Completed => "completed",
    Archived => "archived",
});

string_enum!(SwotType, "swot type" {
    Strength => "strength",
    Weakness => "weakness",
    Opportunity => "opportunity",
    Threat => "threat",
});

string_enum!(Priority, "priority" {
    High => "high",
    Medium => "medium",
    Low => "low",
});

// SWOT quadrant combinations: strength/opportunity, strength/threat, ...
string_enum!(OptionCategory, "option category" {
    So => "SO",
    St => "ST",
    Wo => "WO",
    Wt => "WT",
});

string_enum!(OptionStatus, "option status" {
    Proposed => "proposed",
    Approved => "approved",
    InProgress => "in-progress",
    Completed => "completed",
    Rejected => "rejected",
});

string_enum!(KpiFrequency, "kpi frequency" {
    Daily => "daily",
    Weekly => "weekly",
    Monthly => "monthly",
    Quarterly => "quarterly",
    Yearly => "yearly",
});

string_enum!(KpiStatus, "kpi status" {
    OnTrack => "on-track",
    AtRisk => "at-risk",
    OffTrack => "off-track",
    Achieved => "achieved",
});

string_enum!(Perspective, "perspective" {
    Financial => "financial",
    Customer => "customer",
    Internal => "internal",
    Learning => "learning",
});

string_enum!(ObjectiveStatus, "objective status" {
    NotStarted => "not-started",
    InProgress => "in-progress",
    Completed => "completed",
    OnHold => "on-hold",
});

string_enum!(PapStatus, "action plan status" {
    Planning => "planning",
    Approved => "approved",
    InProgress => "in-progress",
    Completed => "completed",
    OnHold => "on-hold",
});

string_enum!(ActivityStatus, "activity status" {
    NotStarted => "not-started",
    InProgress => "in-progress",
    Completed => "completed",
    Delayed => "delayed",
});

string_enum!(ResourceType, "resource type" {
    Human => "human",
    Financial => "financial",
    Material => "material",
    Technological => "technological",
});

string_enum!(RiskLevel, "risk level" {
    Low => "low",
    Medium => "medium",
    High => "high",
});

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Timeframe {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwotItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: SwotType,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategicOption {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: OptionCategory,
    #[serde(default)]
    pub related_strengths: Vec<String>,
    #[serde(default)]
    pub related_weaknesses: Vec<String>,
    #[serde(default)]
    pub related_opportunities: Vec<String>,
    #[serde(default)]
    pub related_threats: Vec<String>,
    /// Nominally 1-10.
    pub feasibility: i32,
    /// Nominally 1-10.
    pub impact: i32,
    pub priority: Priority,
    pub status: OptionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub date: NaiveDate,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpi {
    pub id: String,
    /// Always the id of the objective holding this KPI. Stored for consumers
    /// that see a KPI out of context; only the KPI operations write it.
    pub objective_id: String,
    pub name: String,
    pub description: String,
    pub target: String,
    pub current: String,
    pub unit: String,
    pub frequency: KpiFrequency,
    pub status: KpiStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default)]
    pub data_points: Vec<DataPoint>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Objective {
    pub id: String,
    pub perspective: Perspective,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub strategic_option_ids: Vec<String>,
    #[serde(default)]
    pub kpis: Vec<Kpi>,
    pub status: ObjectiveStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub name: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: ActivityStatus,
    pub progress: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub allocated: f64,
    pub spent: f64,
    pub currency: String,
}

impl Default for Budget {
    fn default() -> Self {
        Self {
            allocated: 0.0,
            spent: 0.0,
            currency: "USD".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ResourceType,
    pub name: String,
    pub quantity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Risk {
    pub id: String,
    pub description: String,
    pub likelihood: RiskLevel,
    pub impact: RiskLevel,
    pub mitigation: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pap {
    pub id: String,
    /// Objective this action plan implements. Not checked for existence.
    pub objective_id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub activities: Vec<Activity>,
    pub budget: Budget,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub risks: Vec<Risk>,
    pub status: PapStatus,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: String,
    pub name: String,
    pub description: String,
    pub organization: String,
    pub timeframe: Timeframe,
    pub vision: String,
    pub mission: String,
    #[serde(default)]
    pub values: Vec<String>,
    #[serde(default)]
    pub swot_items: Vec<SwotItem>,
    #[serde(default)]
    pub strategic_options: Vec<StrategicOption>,
    #[serde(default)]
    pub objectives: Vec<Objective>,
    #[serde(default)]
    pub paps: Vec<Pap>,
    pub status: PlanStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

impl Plan {
    pub fn objective(&self, id: &str) -> Option<&Objective> {
        self.objectives.iter().find(|objective| objective.id == id)
    }

    pub fn swot_items_of(&self, kind: SwotType) -> impl Iterator<Item = &SwotItem> {
        self.swot_items.iter().filter(move |item| item.kind == kind)
    }

    /// JSON has no NaN or infinity: serde_json writes them as `null`, which
    /// then fails to read back as `f64`.
    pub fn has_only_finite_numbers(&self) -> bool {
        let data_points = self
            .objectives
            .iter()
            .flat_map(|objective| &objective.kpis)
            .flat_map(|kpi| &kpi.data_points)
            .map(|point| point.value);
        let paps = self.paps.iter().flat_map(|pap| {
            [pap.budget.allocated, pap.budget.spent]
                .into_iter()
                .chain(pap.activities.iter().map(|activity| activity.progress))
        });
        data_points.chain(paps).all(f64::is_finite)
    }

    /// Replaces every non-finite number with zero. Returns how many were replaced.
    pub fn zero_non_finite_numbers(&mut self) -> usize {
        fn zero(value: &mut f64) -> usize {
            if value.is_finite() {
                0
            } else {
                *value = 0.0;
                1
            }
        }
        let mut replaced = 0;
        for objective in &mut self.objectives {
            for kpi in &mut objective.kpis {
                for point in &mut kpi.data_points {
                    replaced += zero(&mut point.value);
                }
            }
        }
        for pap in &mut self.paps {
            replaced += zero(&mut pap.budget.allocated);
            replaced += zero(&mut pap.budget.spent);
            for activity in &mut pap.activities {
                replaced += zero(&mut activity.progress);
            }
        }
        replaced
    }

    pub fn apply(&mut self, changes: PlanChanges) {
        let PlanChanges {
            name,
            description,
            organization,
            timeframe,
            vision,
            mission,
            values,
            status,
            created_by,
            swot_items,
            strategic_options,
            objectives,
            paps,
        } = changes;
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(organization) = organization {
            self.organization = organization;
        }
        if let Some(timeframe) = timeframe {
            self.timeframe = timeframe;
        }
        if let Some(vision) = vision {
            self.vision = vision;
        }
        if let Some(mission) = mission {
            self.mission = mission;
        }
        if let Some(values) = values {
            self.values = values;
        }
        if let Some(status) = status {
            self.status = status;
        }
        if let Some(created_by) = created_by {
            self.created_by = Some(created_by);
        }
        if let Some(swot_items) = swot_items {
            self.swot_items = swot_items;
        }
        if let Some(strategic_options) = strategic_options {
            self.strategic_options = strategic_options;
        }
        if let Some(objectives) = objectives {
            self.objectives = objectives;
        }
        if let Some(paps) = paps {
            self.paps = paps;
        }
    }
}

/// Explicit fields for a new plan; anything left `None` takes its default.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDraft {
    pub name: Option<String>,
    pub description: Option<String>,
    pub organization: Option<String>,
    pub timeframe: Option<Timeframe>,
    pub vision: Option<String>,
    pub mission: Option<String>,
    pub values: Option<Vec<String>>,
    pub status: Option<PlanStatus>,
    pub created_by: Option<String>,
    pub swot_items: Option<Vec<SwotItem>>,
    pub strategic_options: Option<Vec<StrategicOption>>,
    pub objectives: Option<Vec<Objective>>,
    pub paps: Option<Vec<Pap>>,
}

impl PlanDraft {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub organization: Option<String>,
    pub timeframe: Option<Timeframe>,
    pub vision: Option<String>,
    pub mission: Option<String>,
    pub values: Option<Vec<String>>,
    pub status: Option<PlanStatus>,
    pub created_by: Option<String>,
    pub swot_items: Option<Vec<SwotItem>>,
    pub strategic_options: Option<Vec<StrategicOption>>,
    pub objectives: Option<Vec<Objective>>,
    pub paps: Option<Vec<Pap>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwotItemInput {
    #[serde(rename = "type")]
    pub kind: SwotType,
    pub content: String,
    pub category: Option<String>,
    pub priority: Option<Priority>,
    pub notes: Option<String>,
}

impl SwotItemInput {
    pub fn new(kind: SwotType, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            category: None,
            priority: None,
            notes: None,
        }
    }

    pub fn into_item(self, id: String) -> SwotItem {
        SwotItem {
            id,
            kind: self.kind,
            content: self.content,
            category: self.category,
            priority: self.priority,
            notes: self.notes,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwotItemChanges {
    #[serde(rename = "type")]
    pub kind: Option<SwotType>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub priority: Option<Priority>,
    pub notes: Option<String>,
}

impl SwotItem {
    pub fn apply(&mut self, changes: SwotItemChanges) {
        if let Some(kind) = changes.kind {
            self.kind = kind;
        }
        if let Some(content) = changes.content {
            self.content = content;
        }
        if let Some(category) = changes.category {
            self.category = Some(category);
        }
        if let Some(priority) = changes.priority {
            self.priority = Some(priority);
        }
        if let Some(notes) = changes.notes {
            self.notes = Some(notes);
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategicOptionInput {
    pub name: String,
    pub description: String,
    pub category: OptionCategory,
    pub related_strengths: Vec<String>,
    pub related_weaknesses: Vec<String>,
    pub related_opportunities: Vec<String>,
    pub related_threats: Vec<String>,
    pub feasibility: i32,
    pub impact: i32,
    pub priority: Priority,
    pub status: OptionStatus,
    pub notes: Option<String>,
}

impl StrategicOptionInput {
    pub fn new(name: impl Into<String>, category: OptionCategory) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            category,
            related_strengths: Vec::new(),
            related_weaknesses: Vec::new(),
            related_opportunities: Vec::new(),
            related_threats: Vec::new(),
            feasibility: 5,
            impact: 5,
            priority: Priority::Medium,
            status: OptionStatus::Proposed,
            notes: None,
        }
    }

    pub fn into_option(self, id: String) -> StrategicOption {
        StrategicOption {
            id,
            name: self.name,
            description: self.description,
            category: self.category,
            related_strengths: self.related_strengths,
            related_weaknesses: self.related_weaknesses,
            related_opportunities: self.related_opportunities,
            related_threats: self.related_threats,
            feasibility: self.feasibility,
            impact: self.impact,
            priority: self.priority,
            status: self.status,
            notes: self.notes,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategicOptionChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<OptionCategory>,
    pub related_strengths: Option<Vec<String>>,
    pub related_weaknesses: Option<Vec<String>>,
    pub related_opportunities: Option<Vec<String>>,
    pub related_threats: Option<Vec<String>>,
    pub feasibility: Option<i32>,
    pub impact: Option<i32>,
    pub priority: Option<Priority>,
    pub status: Option<OptionStatus>,
    pub notes: Option<String>,
}

impl StrategicOption {
    pub fn apply(&mut self, changes: StrategicOptionChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(category) = changes.category {
            self.category = category;
        }
        if let Some(ids) = changes.related_strengths {
            self.related_strengths = ids;
        }
        if let Some(ids) = changes.related_weaknesses {
            self.related_weaknesses = ids;
        }
        if let Some(ids) = changes.related_opportunities {
            self.related_opportunities = ids;
        }
        if let Some(ids) = changes.related_threats {
            self.related_threats = ids;
        }
        if let Some(feasibility) = changes.feasibility {
            self.feasibility = feasibility;
        }
        if let Some(impact) = changes.impact {
            self.impact = impact;
        }
        if let Some(priority) = changes.priority {
            self.priority = priority;
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        if let Some(notes) = changes.notes {
            self.notes = Some(notes);
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiInput {
    pub name: String,
    pub description: String,
    pub target: String,
    pub current: String,
    pub unit: String,
    pub frequency: KpiFrequency,
    pub status: KpiStatus,
    pub owner: Option<String>,
    pub data_points: Vec<DataPoint>,
}

impl KpiInput {
    pub fn new(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            target: target.into(),
            current: String::new(),
            unit: String::new(),
            frequency: KpiFrequency::Monthly,
            status: KpiStatus::OnTrack,
            owner: None,
            data_points: Vec::new(),
        }
    }

    pub fn into_kpi(self, id: String, objective_id: String) -> Kpi {
        Kpi {
            id,
            objective_id,
            name: self.name,
            description: self.description,
            target: self.target,
            current: self.current,
            unit: self.unit,
            frequency: self.frequency,
            status: self.status,
            owner: self.owner,
            data_points: self.data_points,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub target: Option<String>,
    pub current: Option<String>,
    pub unit: Option<String>,
    pub frequency: Option<KpiFrequency>,
    pub status: Option<KpiStatus>,
    pub owner: Option<String>,
    pub data_points: Option<Vec<DataPoint>>,
}

impl Kpi {
    pub fn apply(&mut self, changes: KpiChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(target) = changes.target {
            self.target = target;
        }
        if let Some(current) = changes.current {
            self.current = current;
        }
        if let Some(unit) = changes.unit {
            self.unit = unit;
        }
        if let Some(frequency) = changes.frequency {
            self.frequency = frequency;
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        if let Some(owner) = changes.owner {
            self.owner = Some(owner);
        }
        if let Some(data_points) = changes.data_points {
            self.data_points = data_points;
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectiveInput {
    pub perspective: Perspective,
    pub name: String,
    pub description: String,
    pub strategic_option_ids: Vec<String>,
    pub status: ObjectiveStatus,
    pub owner: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub target_date: Option<NaiveDate>,
}

impl ObjectiveInput {
    pub fn new(perspective: Perspective, name: impl Into<String>) -> Self {
        Self {
            perspective,
            name: name.into(),
            description: String::new(),
            strategic_option_ids: Vec::new(),
            status: ObjectiveStatus::NotStarted,
            owner: None,
            start_date: None,
            target_date: None,
        }
    }

    /// New objectives always start without KPIs.
    pub fn into_objective(self, id: String) -> Objective {
        Objective {
            id,
            perspective: self.perspective,
            name: self.name,
            description: self.description,
            strategic_option_ids: self.strategic_option_ids,
            kpis: Vec::new(),
            status: self.status,
            owner: self.owner,
            start_date: self.start_date,
            target_date: self.target_date,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectiveChanges {
    pub perspective: Option<Perspective>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub strategic_option_ids: Option<Vec<String>>,
    pub status: Option<ObjectiveStatus>,
    pub owner: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub target_date: Option<NaiveDate>,
}

impl Objective {
    pub fn kpi(&self, id: &str) -> Option<&Kpi> {
        self.kpis.iter().find(|kpi| kpi.id == id)
    }

    pub fn apply(&mut self, changes: ObjectiveChanges) {
        if let Some(perspective) = changes.perspective {
            self.perspective = perspective;
        }
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(ids) = changes.strategic_option_ids {
            self.strategic_option_ids = ids;
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        if let Some(owner) = changes.owner {
            self.owner = Some(owner);
        }
        if let Some(start_date) = changes.start_date {
            self.start_date = Some(start_date);
        }
        if let Some(target_date) = changes.target_date {
            self.target_date = Some(target_date);
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PapInput {
    pub objective_id: String,
    pub name: String,
    pub description: String,
    pub activities: Vec<Activity>,
    pub budget: Budget,
    pub resources: Vec<Resource>,
    pub risks: Vec<Risk>,
    pub status: PapStatus,
}

impl PapInput {
    pub fn new(objective_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            objective_id: objective_id.into(),
            name: name.into(),
            description: String::new(),
            activities: Vec::new(),
            budget: Budget::default(),
            resources: Vec::new(),
            risks: Vec::new(),
            status: PapStatus::Planning,
        }
    }

    pub fn into_pap(self, id: String) -> Pap {
        Pap {
            id,
            objective_id: self.objective_id,
            name: self.name,
            description: self.description,
            activities: self.activities,
            budget: self.budget,
            resources: self.resources,
            risks: self.risks,
            status: self.status,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PapChanges {
    pub objective_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub activities: Option<Vec<Activity>>,
    pub budget: Option<Budget>,
    pub resources: Option<Vec<Resource>>,
    pub risks: Option<Vec<Risk>>,
    pub status: Option<PapStatus>,
}

impl Pap {
    pub fn apply(&mut self, changes: PapChanges) {
        if let Some(objective_id) = changes.objective_id {
            self.objective_id = objective_id;
        }
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(activities) = changes.activities {
            self.activities = activities;
        }
        if let Some(budget) = changes.budget {
            self.budget = budget;
        }
        if let Some(resources) = changes.resources {
            self.resources = resources;
        }
        if let Some(risks) = changes.risks {
            self.risks = risks;
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
    }
}
