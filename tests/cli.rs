use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use serde_json::Value;
use tempfile::TempDir;
use url::Url;

const STORAGE_KEY: &str = "strategic-planner-pro";

fn bin_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_stratplan"))
}

fn run_cmd_with_author(dir: &Path, author: Option<&str>, args: &[&str]) -> Output {
    let mut cmd = Command::new(bin_path());
    cmd.arg("--data-dir").arg(dir);
    if let Some(author) = author {
        cmd.arg("--author").arg(author);
    }
    cmd.args(args)
        .env_remove("STRATPLAN_HOME")
        .env_remove("STRATPLAN_AUTHOR")
        .env_remove("STRATPLAN_OFFLINE")
        .env_remove("STRATPLAN_LOG");
    cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
    cmd.output().expect("run command")
}

fn run_cmd(dir: &TempDir, args: &[&str]) -> Output {
    run_cmd_with_author(dir.path(), None, args)
}

fn output_stdout(output: Output) -> String {
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout utf8")
}

fn output_stderr(output: Output) -> String {
    assert!(!output.status.success(), "command unexpectedly succeeded");
    assert_eq!(output.status.code(), Some(1));
    String::from_utf8(output.stderr).expect("stderr utf8")
}

fn parse_created_id(stdout: &str, kind: &str) -> String {
    let prefix = format!("Created {kind} ID: ");
    stdout
        .trim()
        .strip_prefix(&prefix)
        .unwrap_or_else(|| panic!("unexpected output: {stdout}"))
        .trim()
        .to_string()
}

fn create_plan(dir: &TempDir, name: &str) -> String {
    let stdout = output_stdout(run_cmd(dir, &["plan", "create", "--name", name]));
    parse_created_id(&stdout, "plan")
}

fn show_plan(dir: &TempDir) -> Value {
    let stdout = output_stdout(run_cmd(dir, &["plan", "show"]));
    serde_json::from_str(&stdout).expect("plan json")
}

fn add_objective(dir: &TempDir, perspective: &str, name: &str) -> String {
    let stdout = output_stdout(run_cmd(dir, &["objective", "add", perspective, name]));
    parse_created_id(&stdout, "objective")
}

async fn open_db(dir: &TempDir) -> DatabaseConnection {
    let db_path = dir.path().join("stratplan.db");
    let mut url = Url::from_file_path(&db_path).expect("db path");
    url.set_query(Some("mode=rwc"));
    let sqlite_url = url.as_str().replacen("file://", "sqlite://", 1);
    Database::connect(&sqlite_url).await.expect("connect db")
}

async fn stored_blob(dir: &TempDir) -> Value {
    let db = open_db(dir).await;
    let row = db
        .query_one(Statement::from_string(
            DatabaseBackend::Sqlite,
            format!("SELECT value FROM blobs WHERE key = '{STORAGE_KEY}';"),
        ))
        .await
        .expect("query blob")
        .expect("blob row");
    let raw: String = row.try_get("", "value").expect("value column");
    serde_json::from_str(&raw).expect("blob json")
}

#[test]
fn first_run_seeds_sample_plan() {
    let dir = TempDir::new().expect("temp dir");
    let stdout = output_stdout(run_cmd(&dir, &["plan", "list"]));
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines.len(), 2, "stdout: {stdout}");
    assert!(lines[0].contains("NAME"));
    assert!(lines[1].starts_with("* "));
    assert!(lines[1].ends_with("Sample Strategic Plan 2025-2027"));

    let plan = show_plan(&dir);
    assert_eq!(plan["status"], "active");
    assert_eq!(plan["swotItems"].as_array().expect("swot").len(), 5);
    assert_eq!(plan["objectives"].as_array().expect("objectives").len(), 2);
}

#[test]
fn sample_is_seeded_only_once() {
    let dir = TempDir::new().expect("temp dir");
    let first = show_plan(&dir);
    let second = show_plan(&dir);
    assert_eq!(first["id"], second["id"]);
    assert_eq!(first, second);
}

#[test]
fn create_then_populate() {
    let dir = TempDir::new().expect("temp dir");
    let plan_id = create_plan(&dir, "Acme FY26");

    let stdout = output_stdout(run_cmd(
        &dir,
        &["swot", "add", "strength", "X", "--priority", "high"],
    ));
    let item_id = parse_created_id(&stdout, "SWOT item");

    let plan = show_plan(&dir);
    assert_eq!(plan["id"], plan_id.as_str());
    assert_eq!(plan["name"], "Acme FY26");
    assert_eq!(plan["status"], "draft");
    let items = plan["swotItems"].as_array().expect("swot items");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], item_id.as_str());
    assert_eq!(items[0]["type"], "strength");
    assert_eq!(items[0]["content"], "X");
    assert_eq!(items[0]["priority"], "high");

    let stdout = output_stdout(run_cmd(&dir, &["plan", "list"]));
    assert_eq!(stdout.lines().count(), 3);
    let current = stdout
        .lines()
        .find(|line| line.starts_with("* "))
        .expect("current row");
    assert!(current.contains(&plan_id));
}

#[test]
fn author_flag_sets_created_by() {
    let dir = TempDir::new().expect("temp dir");
    let stdout = output_stdout(run_cmd_with_author(
        dir.path(),
        Some("ada@example.com"),
        &["plan", "create"],
    ));
    parse_created_id(&stdout, "plan");
    let plan = show_plan(&dir);
    assert_eq!(plan["createdBy"], "ada@example.com");
    assert_eq!(plan["name"], "New Strategic Plan");
}

#[test]
fn swot_list_groups_by_quadrant() {
    let dir = TempDir::new().expect("temp dir");
    create_plan(&dir, "Acme");
    output_stdout(run_cmd(&dir, &["swot", "add", "threat", "New entrants"]));
    output_stdout(run_cmd(&dir, &["swot", "add", "strength", "Loyal customers"]));

    let stdout = output_stdout(run_cmd(&dir, &["swot", "list"]));
    let strengths = stdout.find("Strengths:").expect("strengths");
    let threats = stdout.find("Threats:").expect("threats");
    assert!(strengths < threats, "stdout: {stdout}");
    assert!(!stdout.contains("Weaknesses:"));
    assert!(stdout.contains("- [-] New entrants"));
}

#[test]
fn swot_remove_keeps_option_reference() {
    let dir = TempDir::new().expect("temp dir");
    create_plan(&dir, "Acme");
    let strength = parse_created_id(
        &output_stdout(run_cmd(&dir, &["swot", "add", "strength", "Brand"])),
        "SWOT item",
    );
    let option = parse_created_id(
        &output_stdout(run_cmd(
            &dir,
            &[
                "option", "add", "Expand", "--category", "SO", "--strength", &strength,
                "--feasibility", "8",
            ],
        )),
        "option",
    );

    let stdout = output_stdout(run_cmd(&dir, &["swot", "remove", &strength]));
    assert_eq!(stdout.trim(), format!("SWOT item ID: {strength} removed."));

    let plan = show_plan(&dir);
    assert!(plan["swotItems"].as_array().expect("items").is_empty());
    let options = plan["strategicOptions"].as_array().expect("options");
    assert_eq!(options[0]["id"], option.as_str());
    assert_eq!(options[0]["category"], "SO");
    assert_eq!(options[0]["feasibility"], 8);
    assert_eq!(options[0]["impact"], 5);
    assert_eq!(options[0]["relatedStrengths"][0], strength.as_str());
}

#[test]
fn option_scores_are_validated() {
    let dir = TempDir::new().expect("temp dir");
    create_plan(&dir, "Acme");
    let stderr = output_stderr(run_cmd(
        &dir,
        &["option", "add", "Bold", "--category", "WT", "--impact", "11"],
    ));
    assert!(stderr.starts_with("Error: "), "stderr: {stderr}");
    assert!(stderr.contains("impact must be between 1 and 10"));
    assert!(show_plan(&dir)["strategicOptions"]
        .as_array()
        .expect("options")
        .is_empty());
}

#[test]
fn kpi_lifecycle() {
    let dir = TempDir::new().expect("temp dir");
    create_plan(&dir, "Acme");
    let objective = add_objective(&dir, "customer", "Delight customers");
    let first = parse_created_id(
        &output_stdout(run_cmd(
            &dir,
            &["kpi", "add", &objective, "NPS", "--target", "70", "--unit", "score"],
        )),
        "KPI",
    );
    let second = parse_created_id(
        &output_stdout(run_cmd(
            &dir,
            &[
                "kpi", "add", &objective, "Churn", "--target", "5", "--frequency", "quarterly",
            ],
        )),
        "KPI",
    );

    output_stdout(run_cmd(
        &dir,
        &["kpi", "record", &objective, &first, "58", "--date", "2025-01-31"],
    ));
    output_stdout(run_cmd(
        &dir,
        &["kpi", "record", &objective, &first, "61.5", "--notes", "after survey"],
    ));

    let plan = show_plan(&dir);
    let kpis = plan["objectives"][0]["kpis"].as_array().expect("kpis");
    assert_eq!(kpis.len(), 2);
    assert_eq!(kpis[0]["objectiveId"], objective.as_str());
    assert_eq!(kpis[1]["frequency"], "quarterly");
    assert_eq!(kpis[0]["frequency"], "monthly");
    let points = kpis[0]["dataPoints"].as_array().expect("points");
    assert_eq!(points.len(), 2);
    assert_eq!(points[0]["date"], "2025-01-31");
    assert_eq!(points[0]["value"], 58.0);
    assert_eq!(points[1]["notes"], "after survey");

    let stdout = output_stdout(run_cmd(&dir, &["kpi", "remove", &objective, &first]));
    assert_eq!(stdout.trim(), format!("KPI ID: {first} removed."));
    let plan = show_plan(&dir);
    let kpis = plan["objectives"][0]["kpis"].as_array().expect("kpis");
    assert_eq!(kpis.len(), 1);
    assert_eq!(kpis[0]["id"], second.as_str());
    assert_eq!(plan["objectives"][0]["name"], "Delight customers");
}

#[test]
fn kpi_record_rejects_non_finite_values() {
    let dir = TempDir::new().expect("temp dir");
    let plan_id = create_plan(&dir, "Acme");
    let objective = add_objective(&dir, "financial", "Grow revenue");
    let kpi = parse_created_id(
        &output_stdout(run_cmd(&dir, &["kpi", "add", &objective, "ARR", "--target", "2M"])),
        "KPI",
    );

    for value in ["NaN", "inf"] {
        let stderr = output_stderr(run_cmd(&dir, &["kpi", "record", &objective, &kpi, value]));
        assert!(stderr.contains("value must be a finite number"), "stderr: {stderr}");
    }

    let plan = show_plan(&dir);
    assert_eq!(plan["id"], plan_id.as_str());
    assert_eq!(plan["name"], "Acme");
    let points = plan["objectives"][0]["kpis"][0]["dataPoints"]
        .as_array()
        .expect("points");
    assert!(points.is_empty());
}

#[test]
fn kpi_on_unknown_objective_fails() {
    let dir = TempDir::new().expect("temp dir");
    create_plan(&dir, "Acme");
    let stderr = output_stderr(run_cmd(
        &dir,
        &["kpi", "add", "missing", "NPS", "--target", "70"],
    ));
    assert!(stderr.contains("Not found: objective id missing"), "stderr: {stderr}");
}

#[test]
fn removing_objective_keeps_action_plans() {
    let dir = TempDir::new().expect("temp dir");
    create_plan(&dir, "Acme");
    let objective = add_objective(&dir, "financial", "Grow revenue");
    let pap = parse_created_id(
        &output_stdout(run_cmd(
            &dir,
            &[
                "pap", "add", &objective, "Launch line", "--budget", "25000", "--currency",
                "EUR",
            ],
        )),
        "action plan",
    );

    let stdout = output_stdout(run_cmd(&dir, &["objective", "remove", &objective]));
    assert_eq!(stdout.trim(), format!("Objective ID: {objective} removed."));

    let plan = show_plan(&dir);
    assert!(plan["objectives"].as_array().expect("objectives").is_empty());
    let paps = plan["paps"].as_array().expect("paps");
    assert_eq!(paps[0]["id"], pap.as_str());
    assert_eq!(paps[0]["objectiveId"], objective.as_str());
    assert_eq!(paps[0]["budget"]["allocated"], 25000.0);
    assert_eq!(paps[0]["budget"]["currency"], "EUR");
    assert_eq!(paps[0]["status"], "planning");

    let stdout = output_stdout(run_cmd(&dir, &["pap", "remove", &pap]));
    assert_eq!(stdout.trim(), format!("Action plan ID: {pap} removed."));
}

#[test]
fn pap_add_defaults_to_empty_usd_budget() {
    let dir = TempDir::new().expect("temp dir");
    create_plan(&dir, "Acme");
    let objective = add_objective(&dir, "internal", "Lean ops");
    output_stdout(run_cmd(&dir, &["pap", "add", &objective, "Audit"]));

    let plan = show_plan(&dir);
    let budget = &plan["paps"][0]["budget"];
    assert_eq!(budget["allocated"], 0.0);
    assert_eq!(budget["spent"], 0.0);
    assert_eq!(budget["currency"], "USD");
}

#[test]
fn plan_update_merges_fields() {
    let dir = TempDir::new().expect("temp dir");
    let plan_id = create_plan(&dir, "Acme");
    let before = show_plan(&dir);
    let stdout = output_stdout(run_cmd(
        &dir,
        &[
            "plan", "update", "--vision", "Lead the market", "--status", "active", "--value",
            "Grit", "--value", "Candor",
        ],
    ));
    assert_eq!(stdout.trim(), format!("Updated plan ID: {plan_id}."));

    let after = show_plan(&dir);
    assert_eq!(after["name"], "Acme");
    assert_eq!(after["vision"], "Lead the market");
    assert_eq!(after["status"], "active");
    assert_eq!(after["values"], serde_json::json!(["Grit", "Candor"]));
    assert_eq!(after["createdAt"], before["createdAt"]);
    assert_ne!(after["updatedAt"], before["updatedAt"]);
}

#[test]
fn plan_update_requires_a_field() {
    let dir = TempDir::new().expect("temp dir");
    let stderr = output_stderr(run_cmd(&dir, &["plan", "update"]));
    assert!(stderr.contains("plan update requires at least one of"));
}

#[test]
fn deleting_current_plan_requires_reselection() {
    let dir = TempDir::new().expect("temp dir");
    let sample_id = show_plan(&dir)["id"].as_str().expect("id").to_string();
    let plan_id = create_plan(&dir, "Doomed");

    let stdout = output_stdout(run_cmd(&dir, &["plan", "delete", &plan_id]));
    assert_eq!(stdout.trim(), format!("Plan ID: {plan_id} removed."));

    let stderr = output_stderr(run_cmd(&dir, &["swot", "add", "threat", "Outage"]));
    assert!(stderr.contains("no current plan"), "stderr: {stderr}");
    let stderr = output_stderr(run_cmd(&dir, &["plan", "show"]));
    assert!(stderr.contains("no current plan"));

    output_stdout(run_cmd(&dir, &["plan", "use", &sample_id]));
    assert_eq!(show_plan(&dir)["id"], sample_id.as_str());
}

#[test]
fn unknown_ids_are_reported() {
    let dir = TempDir::new().expect("temp dir");
    let stderr = output_stderr(run_cmd(&dir, &["plan", "use", "nope"]));
    assert!(stderr.contains("Not found: plan id nope"));
    let stderr = output_stderr(run_cmd(&dir, &["plan", "delete", "nope"]));
    assert!(stderr.contains("Not found: plan id nope"));
    let stderr = output_stderr(run_cmd(&dir, &["swot", "remove", "nope"]));
    assert!(stderr.contains("Not found: SWOT item id nope"));
    let stderr = output_stderr(run_cmd(&dir, &["pap", "remove", "nope"]));
    assert!(stderr.contains("Not found: action plan id nope"));
}

#[test]
fn plan_show_by_id_does_not_switch() {
    let dir = TempDir::new().expect("temp dir");
    let sample_id = show_plan(&dir)["id"].as_str().expect("id").to_string();
    let plan_id = create_plan(&dir, "Other");

    let stdout = output_stdout(run_cmd(&dir, &["plan", "show", &sample_id]));
    let shown: Value = serde_json::from_str(&stdout).expect("json");
    assert_eq!(shown["id"], sample_id.as_str());
    assert_eq!(show_plan(&dir)["id"], plan_id.as_str());
}

#[test]
fn export_writes_markdown() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("out").join("plan.md");
    let stdout = output_stdout(run_cmd(
        &dir,
        &["plan", "export", path.to_str().expect("utf8 path")],
    ));
    assert!(stdout.starts_with("Exported plan ID: "));
    let markdown = fs::read_to_string(&path).expect("markdown");
    assert!(markdown.starts_with("# Plan: Sample Strategic Plan 2025-2027"));
    assert!(markdown.contains("### Strengths"));
    assert!(markdown.contains("## Strategic Options"));
    assert!(markdown.contains("Digital Transformation Initiative"));
}

#[tokio::test]
async fn stored_blob_tracks_current_plan() {
    let dir = TempDir::new().expect("temp dir");
    let plan_id = create_plan(&dir, "Acme");

    let blob = stored_blob(&dir).await;
    assert_eq!(blob["currentPlanId"], plan_id.as_str());
    let plans = blob["plans"].as_array().expect("plans");
    assert_eq!(plans.len(), 2);
    assert_eq!(plans[1]["id"], plan_id.as_str());

    output_stdout(run_cmd(&dir, &["plan", "delete", &plan_id]));
    let blob = stored_blob(&dir).await;
    assert_eq!(blob["currentPlanId"], Value::Null);
    assert_eq!(blob["plans"].as_array().expect("plans").len(), 1);
}

#[tokio::test]
async fn corrupt_blob_is_replaced_by_sample() {
    let dir = TempDir::new().expect("temp dir");
    create_plan(&dir, "Lost");

    let db = open_db(&dir).await;
    db.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        format!("UPDATE blobs SET value = '{{not json' WHERE key = '{STORAGE_KEY}';"),
    ))
    .await
    .expect("corrupt blob");
    drop(db);

    let stdout = output_stdout(run_cmd(&dir, &["plan", "list"]));
    assert_eq!(stdout.lines().count(), 2);
    assert!(!stdout.contains("Lost"));
    assert!(stdout.contains("Sample Strategic Plan 2025-2027"));
}

#[test]
fn invalid_enum_values_are_rejected_by_the_parser() {
    let dir = TempDir::new().expect("temp dir");
    let output = run_cmd(&dir, &["swot", "add", "rumor", "Something"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("rumor"));
}
