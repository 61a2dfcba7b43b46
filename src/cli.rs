use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "stratplan",
    version,
    about = "Manage strategic plans: SWOT, strategic options, BSC objectives, KPIs and action plans"
)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Directory holding the plan database (default: $STRATPLAN_HOME or ~/.stratplan)"
    )]
    pub data_dir: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        value_name = "NAME",
        help = "Identity recorded as the creator of new plans"
    )]
    pub author: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(subcommand)]
    Plan(PlanCommand),
    #[command(subcommand)]
    Swot(SwotCommand),
    #[command(name = "option", subcommand)]
    StrategicOption(OptionCommand),
    #[command(subcommand)]
    Objective(ObjectiveCommand),
    #[command(subcommand)]
    Kpi(KpiCommand),
    #[command(subcommand)]
    Pap(PapCommand),
}

#[derive(Subcommand, Debug)]
pub enum PlanCommand {
    List,
    Show(PlanShow),
    Create(PlanCreate),
    Use(PlanUse),
    Update(PlanUpdate),
    Delete(PlanDelete),
    Export(PlanExport),
}

#[derive(Subcommand, Debug)]
pub enum SwotCommand {
    Add(SwotAdd),
    List,
    Remove(SwotRemove),
}

#[derive(Subcommand, Debug)]
pub enum OptionCommand {
    Add(OptionAdd),
    Remove(OptionRemove),
}

#[derive(Subcommand, Debug)]
pub enum ObjectiveCommand {
    Add(ObjectiveAdd),
    Remove(ObjectiveRemove),
}

#[derive(Subcommand, Debug)]
pub enum KpiCommand {
    Add(KpiAdd),
    Record(KpiRecord),
    Remove(KpiRemove),
}

#[derive(Subcommand, Debug)]
pub enum PapCommand {
    Add(PapAdd),
    Remove(PapRemove),
}

#[derive(Args, Debug)]
pub struct PlanShow {
    #[arg(help = "Plan to print (default: the current plan)")]
    pub id: Option<String>,
}

#[derive(Args, Debug)]
pub struct PlanCreate {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub organization: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Args, Debug)]
pub struct PlanUse {
    pub id: String,
}

#[derive(Args, Debug)]
pub struct PlanUpdate {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub vision: Option<String>,
    #[arg(long)]
    pub mission: Option<String>,
    #[arg(long, value_enum)]
    pub status: Option<PlanStatusArg>,
    #[arg(
        long = "value",
        value_name = "VALUE",
        help = "Replace the plan's core values (repeatable)"
    )]
    pub values: Vec<String>,
}

#[derive(Args, Debug)]
pub struct PlanDelete {
    pub id: String,
}

#[derive(Args, Debug)]
pub struct PlanExport {
    pub path: PathBuf,
}

#[derive(Args, Debug)]
pub struct SwotAdd {
    #[arg(value_enum)]
    pub kind: SwotTypeArg,
    pub content: String,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long, value_enum)]
    pub priority: Option<PriorityArg>,
}

#[derive(Args, Debug)]
pub struct SwotRemove {
    pub id: String,
}

#[derive(Args, Debug)]
pub struct OptionAdd {
    pub name: String,
    #[arg(long, value_enum, ignore_case = true)]
    pub category: OptionCategoryArg,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long = "strength", value_name = "ID")]
    pub strengths: Vec<String>,
    #[arg(long = "weakness", value_name = "ID")]
    pub weaknesses: Vec<String>,
    #[arg(long = "opportunity", value_name = "ID")]
    pub opportunities: Vec<String>,
    #[arg(long = "threat", value_name = "ID")]
    pub threats: Vec<String>,
    #[arg(long, value_name = "N", help = "Feasibility score, 1-10")]
    pub feasibility: Option<i32>,
    #[arg(long, value_name = "N", help = "Impact score, 1-10")]
    pub impact: Option<i32>,
}

#[derive(Args, Debug)]
pub struct OptionRemove {
    pub id: String,
}

#[derive(Args, Debug)]
pub struct ObjectiveAdd {
    #[arg(value_enum)]
    pub perspective: PerspectiveArg,
    pub name: String,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long = "option", value_name = "ID")]
    pub options: Vec<String>,
}

#[derive(Args, Debug)]
pub struct ObjectiveRemove {
    pub id: String,
}

#[derive(Args, Debug)]
pub struct KpiAdd {
    pub objective_id: String,
    pub name: String,
    #[arg(long)]
    pub target: String,
    #[arg(long)]
    pub current: Option<String>,
    #[arg(long)]
    pub unit: Option<String>,
    #[arg(long, value_enum)]
    pub frequency: Option<KpiFrequencyArg>,
}

#[derive(Args, Debug)]
pub struct KpiRecord {
    pub objective_id: String,
    pub kpi_id: String,
    #[arg(allow_negative_numbers = true)]
    pub value: f64,
    #[arg(long, value_name = "YYYY-MM-DD", help = "Measurement date (default: today)")]
    pub date: Option<NaiveDate>,
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Args, Debug)]
pub struct KpiRemove {
    pub objective_id: String,
    pub kpi_id: String,
}

#[derive(Args, Debug)]
pub struct PapAdd {
    pub objective_id: String,
    pub name: String,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long, value_name = "AMOUNT", help = "Allocated budget")]
    pub budget: Option<f64>,
    #[arg(long)]
    pub currency: Option<String>,
}

#[derive(Args, Debug)]
pub struct PapRemove {
    pub id: String,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum PlanStatusArg {
    Draft,
    Active,
    Completed,
    Archived,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum SwotTypeArg {
    Strength,
    Weakness,
    Opportunity,
    Threat,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum PriorityArg {
    High,
    Medium,
    Low,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum OptionCategoryArg {
    #[value(name = "SO")]
    So,
    #[value(name = "ST")]
    St,
    #[value(name = "WO")]
    Wo,
    #[value(name = "WT")]
    Wt,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum PerspectiveArg {
    Financial,
    Customer,
    Internal,
    Learning,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum KpiFrequencyArg {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}
