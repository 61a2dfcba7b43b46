use std::sync::{Arc, Mutex};

use chrono::{DateTime, Days, TimeDelta, Utc};
use tokio::runtime::Handle;
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tracing::{debug, error, info, warn};

use crate::connectivity::ConnectivityObserver;
use crate::id::generate_id;
use crate::model::{
    DataPoint, Kpi, KpiChanges, KpiInput, Objective, ObjectiveChanges, ObjectiveInput, Pap,
    PapChanges, PapInput, Plan, PlanChanges, PlanDraft, PlanStatus, StrategicOption,
    StrategicOptionChanges, StrategicOptionInput, SwotItem, SwotItemChanges, SwotItemInput,
    Timeframe,
};
use crate::sample::sample_plan;
use crate::store::{PlanStore, StoredState};

pub const DEFAULT_PLAN_NAME: &str = "New Strategic Plan";

const EVENT_CAPACITY: usize = 64;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlanEvent {
    Loaded { plan_count: usize },
    PlanCreated { plan_id: String },
    PlanUpdated { plan_id: String },
    PlanDeleted { plan_id: String },
    CurrentPlanChanged { plan_id: Option<String> },
}

enum PersistCommand {
    Save(StoredState),
    Flush(oneshot::Sender<()>),
}

/// Writer task inputs, held until a tokio runtime is available to run them.
struct PendingWriter {
    store: Arc<PlanStore>,
    commands: mpsc::UnboundedReceiver<PersistCommand>,
    synced: watch::Sender<Option<DateTime<Utc>>>,
}

trait Identified {
    fn id(&self) -> &str;
}

macro_rules! identified {
    ($($ty:ty),+) => {
        $(impl Identified for $ty {
            fn id(&self) -> &str {
                &self.id
            }
        })+
    };
}

identified!(SwotItem, StrategicOption, Objective, Kpi, Pap);

fn find_mut<'a, T: Identified>(items: &'a mut [T], id: &str) -> Option<&'a mut T> {
    items.iter_mut().find(|item| item.id() == id)
}

fn remove_by_id<T: Identified>(items: &mut Vec<T>, id: &str) -> Option<()> {
    let index = items.iter().position(|item| item.id() == id)?;
    items.remove(index);
    Some(())
}

/// Strictly later than `previous`, even if the clock has not moved or went back.
fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + TimeDelta::milliseconds(1)
    }
}

/// Owns the plan collection and the active plan.
///
/// Every mutating call builds a new plan value, swaps it into place, queues one
/// durable save and emits one [`PlanEvent`]. Calls that find nothing to change
/// (no current plan, unknown id, empty batch) return without doing any of that.
/// Edits that would put NaN or infinity into a plan are refused the same way.
///
/// Saves run on a background task started on the first tokio runtime the
/// repository is used from. Until then they stay queued in order.
pub struct PlanRepository {
    plans: Vec<Plan>,
    current_plan_id: Option<String>,
    store: Arc<PlanStore>,
    writer: mpsc::UnboundedSender<PersistCommand>,
    pending_writer: Mutex<Option<PendingWriter>>,
    events: broadcast::Sender<PlanEvent>,
    connectivity: ConnectivityObserver,
    last_synced: watch::Receiver<Option<DateTime<Utc>>>,
    is_loading: bool,
    author: Option<String>,
}

impl PlanRepository {
    pub fn new(store: PlanStore, connectivity: ConnectivityObserver) -> Self {
        let store = Arc::new(store);
        let (writer, commands) = mpsc::unbounded_channel();
        let (synced, last_synced) = watch::channel(None);
        let pending_writer = PendingWriter {
            store: store.clone(),
            commands,
            synced,
        };
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            plans: Vec::new(),
            current_plan_id: None,
            store,
            writer,
            pending_writer: Mutex::new(Some(pending_writer)),
            events,
            connectivity,
            last_synced,
            is_loading: true,
            author: None,
        }
    }

    /// Identity used as `createdBy` when a draft does not name one.
    pub fn with_author(mut self, author: Option<String>) -> Self {
        self.author = author;
        self
    }

    /// Loads stored plans, seeding a sample plan when there are none.
    /// Only the first call has any effect.
    pub async fn initialize(&mut self) {
        if !self.is_loading {
            return;
        }
        self.ensure_writer();
        let StoredState {
            plans,
            current_plan_id,
        } = self.store.load().await;

        if plans.is_empty() {
            let sample = sample_plan();
            info!(plan_id = %sample.id, "no stored plans; seeding sample plan");
            self.current_plan_id = Some(sample.id.clone());
            self.plans = vec![sample];
            self.persist();
        } else {
            self.current_plan_id =
                current_plan_id.filter(|id| plans.iter().any(|plan| &plan.id == id));
            if self.current_plan_id.is_none() {
                debug!("stored current plan missing; no plan selected");
            }
            self.plans = plans;
        }

        self.is_loading = false;
        self.emit(PlanEvent::Loaded {
            plan_count: self.plans.len(),
        });
    }

    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }

    pub fn current_plan(&self) -> Option<&Plan> {
        self.current_index().map(|index| &self.plans[index])
    }

    pub fn current_plan_id(&self) -> Option<&str> {
        self.current_plan().map(|plan| plan.id.as_str())
    }

    pub fn is_online(&self) -> bool {
        self.connectivity.is_online()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// When the last save reached the store. `None` until one succeeds.
    pub fn last_synced(&self) -> Option<DateTime<Utc>> {
        *self.last_synced.borrow()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PlanEvent> {
        self.events.subscribe()
    }

    /// Resolves once every save issued so far has been attempted.
    pub async fn flush(&self) {
        if !self.ensure_writer() {
            return;
        }
        let (done, wait) = oneshot::channel();
        if self.writer.send(PersistCommand::Flush(done)).is_ok() {
            let _ = wait.await;
        }
    }

    pub fn create_plan(&mut self, draft: PlanDraft) -> Plan {
        let now = Utc::now();
        let today = now.date_naive();
        let PlanDraft {
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
        } = draft;

        let mut plan = Plan {
            id: generate_id(),
            name: name.unwrap_or_else(|| DEFAULT_PLAN_NAME.to_string()),
            description: description.unwrap_or_default(),
            organization: organization.unwrap_or_default(),
            timeframe: timeframe.unwrap_or_else(|| Timeframe {
                start: today,
                end: today.checked_add_days(Days::new(365)).unwrap_or(today),
            }),
            vision: vision.unwrap_or_default(),
            mission: mission.unwrap_or_default(),
            values: values.unwrap_or_default(),
            swot_items: swot_items.unwrap_or_default(),
            strategic_options: strategic_options.unwrap_or_default(),
            objectives: objectives.unwrap_or_default(),
            paps: paps.unwrap_or_default(),
            status: status.unwrap_or(PlanStatus::Draft),
            created_at: now,
            updated_at: now,
            created_by: created_by.or_else(|| self.author.clone()),
        };
        let replaced = plan.zero_non_finite_numbers();
        if replaced > 0 {
            warn!(plan_id = %plan.id, replaced, "non-finite numbers in new plan set to zero");
        }

        self.plans.push(plan.clone());
        self.current_plan_id = Some(plan.id.clone());
        self.persist();
        self.emit(PlanEvent::PlanCreated {
            plan_id: plan.id.clone(),
        });
        plan
    }

    /// Unknown ids clear the selection, as does `None`.
    pub fn set_current_plan(&mut self, id: Option<&str>) {
        self.current_plan_id = id
            .filter(|id| self.plans.iter().any(|plan| plan.id == *id))
            .map(str::to_string);
        self.persist();
        self.emit(PlanEvent::CurrentPlanChanged {
            plan_id: self.current_plan_id.clone(),
        });
    }

    pub fn update_plan(&mut self, changes: PlanChanges) -> bool {
        self.mutate_current("update_plan", |plan| {
            plan.apply(changes);
            Some(())
        })
        .is_some()
    }

    pub fn delete_plan(&mut self, id: &str) -> bool {
        let Some(index) = self.plans.iter().position(|plan| plan.id == id) else {
            debug!(plan_id = id, "delete_plan: unknown plan");
            return false;
        };
        self.plans.remove(index);
        if self.current_plan_id.as_deref() == Some(id) {
            self.current_plan_id = None;
        }
        self.persist();
        self.emit(PlanEvent::PlanDeleted {
            plan_id: id.to_string(),
        });
        true
    }

    pub fn add_swot_item(&mut self, input: SwotItemInput) -> Option<SwotItem> {
        self.mutate_current("add_swot_item", |plan| {
            let item = input.into_item(generate_id());
            plan.swot_items.push(item.clone());
            Some(item)
        })
    }

    pub fn update_swot_item(&mut self, id: &str, changes: SwotItemChanges) -> bool {
        self.mutate_current("update_swot_item", |plan| {
            find_mut(&mut plan.swot_items, id)?.apply(changes);
            Some(())
        })
        .is_some()
    }

    /// Strategic options keep any ids that pointed at the removed item.
    pub fn remove_swot_item(&mut self, id: &str) -> bool {
        self.mutate_current("remove_swot_item", |plan| {
            remove_by_id(&mut plan.swot_items, id)
        })
        .is_some()
    }

    pub fn bulk_add_swot_items(&mut self, inputs: Vec<SwotItemInput>) -> Vec<SwotItem> {
        if inputs.is_empty() {
            return Vec::new();
        }
        self.mutate_current("bulk_add_swot_items", |plan| {
            let items: Vec<_> = inputs
                .into_iter()
                .map(|input| input.into_item(generate_id()))
                .collect();
            plan.swot_items.extend(items.iter().cloned());
            Some(items)
        })
        .unwrap_or_default()
    }

    pub fn add_strategic_option(&mut self, input: StrategicOptionInput) -> Option<StrategicOption> {
        self.mutate_current("add_strategic_option", |plan| {
            let option = input.into_option(generate_id());
            plan.strategic_options.push(option.clone());
            Some(option)
        })
    }

    pub fn update_strategic_option(&mut self, id: &str, changes: StrategicOptionChanges) -> bool {
        self.mutate_current("update_strategic_option", |plan| {
            find_mut(&mut plan.strategic_options, id)?.apply(changes);
            Some(())
        })
        .is_some()
    }

    pub fn remove_strategic_option(&mut self, id: &str) -> bool {
        self.mutate_current("remove_strategic_option", |plan| {
            remove_by_id(&mut plan.strategic_options, id)
        })
        .is_some()
    }

    pub fn bulk_add_strategic_options(
        &mut self,
        inputs: Vec<StrategicOptionInput>,
    ) -> Vec<StrategicOption> {
        if inputs.is_empty() {
            return Vec::new();
        }
        self.mutate_current("bulk_add_strategic_options", |plan| {
            let options: Vec<_> = inputs
                .into_iter()
                .map(|input| input.into_option(generate_id()))
                .collect();
            plan.strategic_options.extend(options.iter().cloned());
            Some(options)
        })
        .unwrap_or_default()
    }

    pub fn add_objective(&mut self, input: ObjectiveInput) -> Option<Objective> {
        self.mutate_current("add_objective", |plan| {
            let objective = input.into_objective(generate_id());
            plan.objectives.push(objective.clone());
            Some(objective)
        })
    }

    pub fn update_objective(&mut self, id: &str, changes: ObjectiveChanges) -> bool {
        self.mutate_current("update_objective", |plan| {
            find_mut(&mut plan.objectives, id)?.apply(changes);
            Some(())
        })
        .is_some()
    }

    /// Action plans pointing at the removed objective are left as they are.
    pub fn remove_objective(&mut self, id: &str) -> bool {
        self.mutate_current("remove_objective", |plan| {
            remove_by_id(&mut plan.objectives, id)
        })
        .is_some()
    }

    pub fn bulk_add_objectives(&mut self, inputs: Vec<ObjectiveInput>) -> Vec<Objective> {
        if inputs.is_empty() {
            return Vec::new();
        }
        self.mutate_current("bulk_add_objectives", |plan| {
            let objectives: Vec<_> = inputs
                .into_iter()
                .map(|input| input.into_objective(generate_id()))
                .collect();
            plan.objectives.extend(objectives.iter().cloned());
            Some(objectives)
        })
        .unwrap_or_default()
    }

    pub fn add_kpi(&mut self, objective_id: &str, input: KpiInput) -> Option<Kpi> {
        self.mutate_current("add_kpi", |plan| {
            let objective = find_mut(&mut plan.objectives, objective_id)?;
            let kpi = input.into_kpi(generate_id(), objective.id.clone());
            objective.kpis.push(kpi.clone());
            Some(kpi)
        })
    }

    pub fn update_kpi(&mut self, objective_id: &str, kpi_id: &str, changes: KpiChanges) -> bool {
        self.mutate_current("update_kpi", |plan| {
            let objective = find_mut(&mut plan.objectives, objective_id)?;
            let kpi = find_mut(&mut objective.kpis, kpi_id)?;
            kpi.apply(changes);
            kpi.objective_id = objective.id.clone();
            Some(())
        })
        .is_some()
    }

    pub fn remove_kpi(&mut self, objective_id: &str, kpi_id: &str) -> bool {
        self.mutate_current("remove_kpi", |plan| {
            let objective = find_mut(&mut plan.objectives, objective_id)?;
            remove_by_id(&mut objective.kpis, kpi_id)
        })
        .is_some()
    }

    pub fn bulk_add_kpis(&mut self, objective_id: &str, inputs: Vec<KpiInput>) -> Vec<Kpi> {
        if inputs.is_empty() {
            return Vec::new();
        }
        self.mutate_current("bulk_add_kpis", |plan| {
            let objective = find_mut(&mut plan.objectives, objective_id)?;
            let kpis: Vec<_> = inputs
                .into_iter()
                .map(|input| input.into_kpi(generate_id(), objective.id.clone()))
                .collect();
            objective.kpis.extend(kpis.iter().cloned());
            Some(kpis)
        })
        .unwrap_or_default()
    }

    /// Appends to the KPI's history; earlier points are never touched.
    pub fn add_kpi_data_point(&mut self, objective_id: &str, kpi_id: &str, point: DataPoint) -> bool {
        self.mutate_current("add_kpi_data_point", |plan| {
            let objective = find_mut(&mut plan.objectives, objective_id)?;
            find_mut(&mut objective.kpis, kpi_id)?.data_points.push(point);
            Some(())
        })
        .is_some()
    }

    pub fn add_pap(&mut self, input: PapInput) -> Option<Pap> {
        self.mutate_current("add_pap", |plan| {
            let pap = input.into_pap(generate_id());
            plan.paps.push(pap.clone());
            Some(pap)
        })
    }

    pub fn update_pap(&mut self, id: &str, changes: PapChanges) -> bool {
        self.mutate_current("update_pap", |plan| {
            find_mut(&mut plan.paps, id)?.apply(changes);
            Some(())
        })
        .is_some()
    }

    pub fn remove_pap(&mut self, id: &str) -> bool {
        self.mutate_current("remove_pap", |plan| remove_by_id(&mut plan.paps, id))
            .is_some()
    }

    pub fn bulk_add_paps(&mut self, inputs: Vec<PapInput>) -> Vec<Pap> {
        if inputs.is_empty() {
            return Vec::new();
        }
        self.mutate_current("bulk_add_paps", |plan| {
            let paps: Vec<_> = inputs
                .into_iter()
                .map(|input| input.into_pap(generate_id()))
                .collect();
            plan.paps.extend(paps.iter().cloned());
            Some(paps)
        })
        .unwrap_or_default()
    }

    fn current_index(&self) -> Option<usize> {
        let id = self.current_plan_id.as_deref()?;
        self.plans.iter().position(|plan| plan.id == id)
    }

    /// Runs `edit` on a copy of the current plan. `None` from `edit` discards
    /// the copy; otherwise the copy replaces the original at the same index.
    fn mutate_current<T>(
        &mut self,
        operation: &'static str,
        edit: impl FnOnce(&mut Plan) -> Option<T>,
    ) -> Option<T> {
        let Some(index) = self.current_index() else {
            debug!(%operation, "no current plan");
            return None;
        };
        let mut next = self.plans[index].clone();
        let Some(result) = edit(&mut next) else {
            debug!(%operation, plan_id = %next.id, "target not found");
            return None;
        };
        if !next.has_only_finite_numbers() {
            warn!(%operation, plan_id = %next.id, "refusing NaN or infinite value");
            return None;
        }
        next.updated_at = next_timestamp(self.plans[index].updated_at);
        let plan_id = next.id.clone();
        self.plans[index] = next;
        self.persist();
        self.emit(PlanEvent::PlanUpdated { plan_id });
        Some(result)
    }

    /// Starts the writer task if it is not running yet. Returns whether it runs.
    fn ensure_writer(&self) -> bool {
        let mut pending = self
            .pending_writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let Some(writer) = pending.take() else {
            return true;
        };
        match Handle::try_current() {
            Ok(handle) => {
                handle.spawn(run_writer(writer.store, writer.commands, writer.synced));
                true
            }
            Err(err) => {
                debug!(error = %err, "no tokio runtime yet; saves stay queued");
                *pending = Some(writer);
                false
            }
        }
    }

    fn persist(&self) {
        self.ensure_writer();
        let snapshot = StoredState {
            plans: self.plans.clone(),
            current_plan_id: self.current_plan_id.clone(),
        };
        if self.writer.send(PersistCommand::Save(snapshot)).is_err() {
            error!("persistence writer stopped; change kept in memory only");
        }
    }

    fn emit(&self, event: PlanEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}

async fn run_writer(
    store: Arc<PlanStore>,
    mut commands: mpsc::UnboundedReceiver<PersistCommand>,
    synced: watch::Sender<Option<DateTime<Utc>>>,
) {
    while let Some(command) = commands.recv().await {
        match command {
            PersistCommand::Save(state) => {
                if store
                    .save(&state.plans, state.current_plan_id.as_deref())
                    .await
                {
                    synced.send_replace(Some(Utc::now()));
                }
            }
            PersistCommand::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
}
