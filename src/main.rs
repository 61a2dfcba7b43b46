mod cli;

use std::fs;
use std::sync::Arc;

use chrono::Utc;
use clap::Parser;

use stratplan::config::Config;
use stratplan::connectivity::NetworkStatus;
use stratplan::db::{self, SqliteBlobStore};
use stratplan::error::AppError;
use stratplan::logging;
use stratplan::model::{
    Budget, DataPoint, KpiFrequency, KpiInput, ObjectiveInput, OptionCategory, PapInput,
    Perspective, Plan, PlanChanges, PlanDraft, PlanStatus, Priority, StrategicOptionInput,
    SwotItemInput, SwotType,
};
use stratplan::repository::PlanRepository;
use stratplan::store::PlanStore;
use stratplan::util::{format_plan_markdown, format_plan_row, swot_heading};

use crate::cli::{
    Cli, Command, KpiAdd, KpiCommand, KpiFrequencyArg, KpiRecord, KpiRemove, ObjectiveAdd,
    ObjectiveCommand, OptionAdd, OptionCategoryArg, OptionCommand, PapAdd, PapCommand,
    PerspectiveArg, PlanCommand, PlanCreate, PlanExport, PlanShow, PlanStatusArg, PlanUpdate,
    PriorityArg, SwotAdd, SwotCommand, SwotTypeArg,
};

#[tokio::main]
async fn main() {
    logging::init();
    if let Err(err) = run().await {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    let Cli {
        data_dir,
        author,
        command,
    } = Cli::parse();

    let config = Config::resolve(data_dir, author)?;
    let db_path = config.db_path();
    db::ensure_parent_dir(&db_path)?;
    let mut lock = db::open_lock(&db_path)?;
    let _guard = lock.write()?;

    let backend = SqliteBlobStore::open(&db_path).await?;
    let network = NetworkStatus::from_config(&config);
    let mut repo = PlanRepository::new(PlanStore::new(Arc::new(backend)), network.subscribe())
        .with_author(config.author.clone());
    repo.initialize().await;

    let result = match command {
        Command::Plan(command) => handle_plan(&mut repo, command),
        Command::Swot(command) => handle_swot(&mut repo, command),
        Command::StrategicOption(command) => handle_option(&mut repo, command),
        Command::Objective(command) => handle_objective(&mut repo, command),
        Command::Kpi(command) => handle_kpi(&mut repo, command),
        Command::Pap(command) => handle_pap(&mut repo, command),
    };

    // Saves run in the background; wait for them before the lock is released.
    repo.flush().await;
    result
}

fn handle_plan(repo: &mut PlanRepository, command: PlanCommand) -> Result<(), AppError> {
    match command {
        PlanCommand::List => {
            handle_plan_list(repo);
            Ok(())
        }
        PlanCommand::Show(args) => handle_plan_show(repo, args),
        PlanCommand::Create(args) => handle_plan_create(repo, args),
        PlanCommand::Use(args) => {
            require_plan(repo, &args.id)?;
            repo.set_current_plan(Some(&args.id));
            println!("Current plan ID: {}", args.id);
            Ok(())
        }
        PlanCommand::Update(args) => handle_plan_update(repo, args),
        PlanCommand::Delete(args) => {
            if !repo.delete_plan(&args.id) {
                return Err(AppError::NotFound(format!("plan id {}", args.id)));
            }
            println!("Plan ID: {} removed.", args.id);
            Ok(())
        }
        PlanCommand::Export(args) => handle_plan_export(repo, args),
    }
}

fn handle_plan_list(repo: &PlanRepository) {
    if repo.plans().is_empty() {
        println!("No plans found.");
        return;
    }
    println!(
        "  {:<36} {:<9} {:<16} {}",
        "ID", "STATUS", "UPDATED", "NAME"
    );
    let current = repo.current_plan_id();
    for plan in repo.plans() {
        println!("{}", format_plan_row(plan, current == Some(plan.id.as_str())));
    }
}

fn handle_plan_show(repo: &PlanRepository, args: PlanShow) -> Result<(), AppError> {
    let plan = match args.id {
        Some(id) => require_plan(repo, &id)?,
        None => repo.current_plan().ok_or_else(no_current_plan)?,
    };
    println!("{}", serde_json::to_string_pretty(plan)?);
    Ok(())
}

fn handle_plan_create(repo: &mut PlanRepository, args: PlanCreate) -> Result<(), AppError> {
    if let Some(name) = &args.name {
        require_non_empty("plan name", name)?;
    }
    let plan = repo.create_plan(PlanDraft {
        name: args.name,
        organization: args.organization,
        description: args.description,
        ..Default::default()
    });
    println!("Created plan ID: {}", plan.id);
    Ok(())
}

fn handle_plan_update(repo: &mut PlanRepository, args: PlanUpdate) -> Result<(), AppError> {
    let PlanUpdate {
        name,
        vision,
        mission,
        status,
        values,
    } = args;
    if name.is_none() && vision.is_none() && mission.is_none() && status.is_none() && values.is_empty()
    {
        return Err(AppError::InvalidInput(
            "plan update requires at least one of --name, --vision, --mission, --status, --value"
                .to_string(),
        ));
    }
    if let Some(name) = &name {
        require_non_empty("plan name", name)?;
    }
    let plan_id = require_current(repo)?;
    repo.update_plan(PlanChanges {
        name,
        vision,
        mission,
        status: status.map(plan_status_from_arg),
        values: (!values.is_empty()).then_some(values),
        ..Default::default()
    });
    println!("Updated plan ID: {plan_id}.");
    Ok(())
}

fn handle_plan_export(repo: &PlanRepository, args: PlanExport) -> Result<(), AppError> {
    let plan = repo.current_plan().ok_or_else(no_current_plan)?;
    db::ensure_parent_dir(&args.path)?;
    fs::write(&args.path, format_plan_markdown(plan, true))?;
    println!("Exported plan ID: {} to {}", plan.id, args.path.display());
    Ok(())
}

fn handle_swot(repo: &mut PlanRepository, command: SwotCommand) -> Result<(), AppError> {
    match command {
        SwotCommand::Add(args) => handle_swot_add(repo, args),
        SwotCommand::List => {
            let plan = repo.current_plan().ok_or_else(no_current_plan)?;
            print_swot_list(plan);
            Ok(())
        }
        SwotCommand::Remove(args) => {
            require_current(repo)?;
            if !repo.remove_swot_item(&args.id) {
                return Err(AppError::NotFound(format!("SWOT item id {}", args.id)));
            }
            println!("SWOT item ID: {} removed.", args.id);
            Ok(())
        }
    }
}

fn handle_swot_add(repo: &mut PlanRepository, args: SwotAdd) -> Result<(), AppError> {
    require_non_empty("SWOT content", &args.content)?;
    require_current(repo)?;
    let item = repo
        .add_swot_item(SwotItemInput {
            category: args.category,
            priority: args.priority.map(priority_from_arg),
            ..SwotItemInput::new(swot_type_from_arg(args.kind), args.content)
        })
        .ok_or_else(no_current_plan)?;
    println!("Created SWOT item ID: {}", item.id);
    Ok(())
}

fn print_swot_list(plan: &Plan) {
    if plan.swot_items.is_empty() {
        println!("No SWOT items found.");
        return;
    }
    let mut first = true;
    for kind in SwotType::ALL.iter().copied() {
        let items: Vec<_> = plan.swot_items_of(kind).collect();
        if items.is_empty() {
            continue;
        }
        if !first {
            println!();
        }
        first = false;
        println!("{}:", swot_heading(kind));
        for item in items {
            let priority = item
                .priority
                .map(|priority| priority.to_string())
                .unwrap_or_else(|| "-".to_string());
            println!("- [{priority}] {} (id {})", item.content, item.id);
        }
    }
}

fn handle_option(repo: &mut PlanRepository, command: OptionCommand) -> Result<(), AppError> {
    match command {
        OptionCommand::Add(args) => handle_option_add(repo, args),
        OptionCommand::Remove(args) => {
            require_current(repo)?;
            if !repo.remove_strategic_option(&args.id) {
                return Err(AppError::NotFound(format!("option id {}", args.id)));
            }
            println!("Option ID: {} removed.", args.id);
            Ok(())
        }
    }
}

fn handle_option_add(repo: &mut PlanRepository, args: OptionAdd) -> Result<(), AppError> {
    require_non_empty("option name", &args.name)?;
    for (label, score) in [("feasibility", args.feasibility), ("impact", args.impact)] {
        if let Some(score) = score {
            if !(1..=10).contains(&score) {
                return Err(AppError::InvalidInput(format!(
                    "{label} must be between 1 and 10, got {score}"
                )));
            }
        }
    }
    require_current(repo)?;
    let defaults =
        StrategicOptionInput::new(args.name, option_category_from_arg(args.category));
    let option = repo
        .add_strategic_option(StrategicOptionInput {
            description: args.description.unwrap_or_default(),
            related_strengths: args.strengths,
            related_weaknesses: args.weaknesses,
            related_opportunities: args.opportunities,
            related_threats: args.threats,
            feasibility: args.feasibility.unwrap_or(defaults.feasibility),
            impact: args.impact.unwrap_or(defaults.impact),
            ..defaults
        })
        .ok_or_else(no_current_plan)?;
    println!("Created option ID: {}", option.id);
    Ok(())
}

fn handle_objective(repo: &mut PlanRepository, command: ObjectiveCommand) -> Result<(), AppError> {
    match command {
        ObjectiveCommand::Add(args) => handle_objective_add(repo, args),
        ObjectiveCommand::Remove(args) => {
            require_current(repo)?;
            if !repo.remove_objective(&args.id) {
                return Err(AppError::NotFound(format!("objective id {}", args.id)));
            }
            println!("Objective ID: {} removed.", args.id);
            Ok(())
        }
    }
}

fn handle_objective_add(repo: &mut PlanRepository, args: ObjectiveAdd) -> Result<(), AppError> {
    require_non_empty("objective name", &args.name)?;
    require_current(repo)?;
    let objective = repo
        .add_objective(ObjectiveInput {
            description: args.description.unwrap_or_default(),
            strategic_option_ids: args.options,
            ..ObjectiveInput::new(perspective_from_arg(args.perspective), args.name)
        })
        .ok_or_else(no_current_plan)?;
    println!("Created objective ID: {}", objective.id);
    Ok(())
}

fn handle_kpi(repo: &mut PlanRepository, command: KpiCommand) -> Result<(), AppError> {
    match command {
        KpiCommand::Add(args) => handle_kpi_add(repo, args),
        KpiCommand::Record(args) => handle_kpi_record(repo, args),
        KpiCommand::Remove(args) => handle_kpi_remove(repo, args),
    }
}

fn handle_kpi_add(repo: &mut PlanRepository, args: KpiAdd) -> Result<(), AppError> {
    require_non_empty("KPI name", &args.name)?;
    require_non_empty("KPI target", &args.target)?;
    require_current(repo)?;
    let defaults = KpiInput::new(args.name, args.target);
    let kpi = repo
        .add_kpi(
            &args.objective_id,
            KpiInput {
                current: args.current.unwrap_or_default(),
                unit: args.unit.unwrap_or_default(),
                frequency: args
                    .frequency
                    .map(kpi_frequency_from_arg)
                    .unwrap_or(defaults.frequency),
                ..defaults
            },
        )
        .ok_or_else(|| AppError::NotFound(format!("objective id {}", args.objective_id)))?;
    println!("Created KPI ID: {}", kpi.id);
    Ok(())
}

fn handle_kpi_record(repo: &mut PlanRepository, args: KpiRecord) -> Result<(), AppError> {
    if !args.value.is_finite() {
        return Err(AppError::InvalidInput(format!(
            "value must be a finite number, got {}",
            args.value
        )));
    }
    require_current(repo)?;
    let recorded = repo.add_kpi_data_point(
        &args.objective_id,
        &args.kpi_id,
        DataPoint {
            date: args.date.unwrap_or_else(|| Utc::now().date_naive()),
            value: args.value,
            notes: args.notes,
        },
    );
    if !recorded {
        return Err(kpi_not_found(&args.objective_id, &args.kpi_id));
    }
    println!("Recorded {} for KPI ID: {}", args.value, args.kpi_id);
    Ok(())
}

fn handle_kpi_remove(repo: &mut PlanRepository, args: KpiRemove) -> Result<(), AppError> {
    require_current(repo)?;
    if !repo.remove_kpi(&args.objective_id, &args.kpi_id) {
        return Err(kpi_not_found(&args.objective_id, &args.kpi_id));
    }
    println!("KPI ID: {} removed.", args.kpi_id);
    Ok(())
}

fn handle_pap(repo: &mut PlanRepository, command: PapCommand) -> Result<(), AppError> {
    match command {
        PapCommand::Add(args) => handle_pap_add(repo, args),
        PapCommand::Remove(args) => {
            require_current(repo)?;
            if !repo.remove_pap(&args.id) {
                return Err(AppError::NotFound(format!("action plan id {}", args.id)));
            }
            println!("Action plan ID: {} removed.", args.id);
            Ok(())
        }
    }
}

fn handle_pap_add(repo: &mut PlanRepository, args: PapAdd) -> Result<(), AppError> {
    require_non_empty("action plan name", &args.name)?;
    if let Some(budget) = args.budget {
        if !budget.is_finite() || budget < 0.0 {
            return Err(AppError::InvalidInput(format!(
                "budget must be a non-negative amount, got {budget}"
            )));
        }
    }
    require_current(repo)?;
    let pap = repo
        .add_pap(PapInput {
            description: args.description.unwrap_or_default(),
            budget: Budget {
                allocated: args.budget.unwrap_or(0.0),
                currency: args.currency.unwrap_or_else(|| Budget::default().currency),
                ..Budget::default()
            },
            ..PapInput::new(args.objective_id, args.name)
        })
        .ok_or_else(no_current_plan)?;
    println!("Created action plan ID: {}", pap.id);
    Ok(())
}

fn no_current_plan() -> AppError {
    AppError::InvalidInput(
        "no current plan; select one with `plan use <ID>` or start one with `plan create`"
            .to_string(),
    )
}

fn kpi_not_found(objective_id: &str, kpi_id: &str) -> AppError {
    AppError::NotFound(format!("KPI id {kpi_id} in objective {objective_id}"))
}

fn require_current(repo: &PlanRepository) -> Result<String, AppError> {
    repo.current_plan_id()
        .map(str::to_string)
        .ok_or_else(no_current_plan)
}

fn require_plan<'a>(repo: &'a PlanRepository, id: &str) -> Result<&'a Plan, AppError> {
    repo.plans()
        .iter()
        .find(|plan| plan.id == id)
        .ok_or_else(|| AppError::NotFound(format!("plan id {id}")))
}

fn require_non_empty(label: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::InvalidInput(format!("{label} cannot be empty")));
    }
    Ok(())
}

fn plan_status_from_arg(arg: PlanStatusArg) -> PlanStatus {
    match arg {
        PlanStatusArg::Draft => PlanStatus::Draft,
        PlanStatusArg::Active => PlanStatus::Active,
        PlanStatusArg::Completed => PlanStatus::Completed,
        PlanStatusArg::Archived => PlanStatus::Archived,
    }
}

fn swot_type_from_arg(arg: SwotTypeArg) -> SwotType {
    match arg {
        SwotTypeArg::Strength => SwotType::Strength,
        SwotTypeArg::Weakness => SwotType::Weakness,
        SwotTypeArg::Opportunity => SwotType::Opportunity,
        SwotTypeArg::Threat => SwotType::Threat,
    }
}

fn priority_from_arg(arg: PriorityArg) -> Priority {
    match arg {
        PriorityArg::High => Priority::High,
        PriorityArg::Medium => Priority::Medium,
        PriorityArg::Low => Priority::Low,
    }
}

fn option_category_from_arg(arg: OptionCategoryArg) -> OptionCategory {
    match arg {
        OptionCategoryArg::So => OptionCategory::So,
        OptionCategoryArg::St => OptionCategory::St,
        OptionCategoryArg::Wo => OptionCategory::Wo,
        OptionCategoryArg::Wt => OptionCategory::Wt,
    }
}

fn perspective_from_arg(arg: PerspectiveArg) -> Perspective {
    match arg {
        PerspectiveArg::Financial => Perspective::Financial,
        PerspectiveArg::Customer => Perspective::Customer,
        PerspectiveArg::Internal => Perspective::Internal,
        PerspectiveArg::Learning => Perspective::Learning,
    }
}

fn kpi_frequency_from_arg(arg: KpiFrequencyArg) -> KpiFrequency {
    match arg {
        KpiFrequencyArg::Daily => KpiFrequency::Daily,
        KpiFrequencyArg::Weekly => KpiFrequency::Weekly,
        KpiFrequencyArg::Monthly => KpiFrequency::Monthly,
        KpiFrequencyArg::Quarterly => KpiFrequency::Quarterly,
        KpiFrequencyArg::Yearly => KpiFrequency::Yearly,
    }
}
