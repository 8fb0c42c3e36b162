use std::collections::HashMap;
use std::sync::Arc;
use sw_client::HttpQueryClient;
use sw_core::{Error, QueryService, RelatedOutcome, Result, SummaryOutcome};
use sw_render::Renderer;
use tokio::task::{Id, JoinSet};

use crate::config::WidgetConfig;
use crate::state::{Effect, Event, Machine, WidgetState};
use crate::view::{mount, ViewTree};

/// Owns the view tree and drives the state machine.
///
/// Fetches run as tokio tasks and report back as [`Event`]s; nothing is
/// applied to the view until [`Controller::pump`] hands a resolution to the
/// machine. The controller is the only writer to the result container.
///
/// Closing the modal does not cancel an in-flight lookup: its results are
/// rendered into the hidden container and shown on reopen.
pub struct Controller {
    view: ViewTree,
    machine: Machine,
    renderer: Renderer,
    service: Arc<dyn QueryService>,
    in_flight: JoinSet<Event>,
    fetches: HashMap<Id, Fetch>,
}

/// Which lookup a spawned task is running, so a task that dies without
/// reporting back can still be resolved.
#[derive(Debug, Clone, Copy)]
enum Fetch {
    Related(u64),
    Summary(u64),
}

impl Fetch {
    fn failed(self) -> Event {
        match self {
            Fetch::Related(seq) => Event::RelatedResolved {
                seq,
                outcome: RelatedOutcome::NetworkFailure,
            },
            Fetch::Summary(seq) => Event::SummaryResolved {
                seq,
                outcome: SummaryOutcome::NetworkFailure,
            },
        }
    }
}

impl Controller {
    pub fn new(view: ViewTree, renderer: Renderer, service: Arc<dyn QueryService>) -> Self {
        Self {
            view,
            machine: Machine::new(),
            renderer,
            service,
            in_flight: JoinSet::new(),
            fetches: HashMap::new(),
        }
    }

    /// Mounts a widget backed by the HTTP client described in `config`.
    pub fn connect(config: &WidgetConfig) -> Result<Self> {
        let client = HttpQueryClient::new(config.client.clone())?;
        Ok(Self::new(
            mount(config),
            Renderer::new(config.render.clone()),
            Arc::new(client),
        ))
    }

    pub fn view(&self) -> &ViewTree {
        &self.view
    }

    pub fn state(&self) -> WidgetState {
        self.machine.state()
    }

    pub fn has_pending(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Launcher or close control clicked.
    pub fn toggle(&mut self) -> Result<()> {
        self.ensure_mounted()?;
        self.dispatch(Event::Toggle)
    }

    pub fn type_query(&mut self, text: &str) -> Result<()> {
        self.ensure_mounted()?;
        self.view.modal.input.set_value(text);
        Ok(())
    }

    /// Flips the summary toggle. Does nothing if the modal has no toggle.
    pub fn set_summary(&mut self, enabled: bool) -> Result<()> {
        self.ensure_mounted()?;
        match self.view.modal.summary_toggle.as_mut() {
            Some(toggle) => toggle.set_enabled(enabled),
            None => tracing::debug!("Summary toggle not offered, ignoring"),
        }
        Ok(())
    }

    /// Submit control clicked: reads the input and toggle from the view.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&mut self) -> Result<()> {
        self.ensure_mounted()?;
        let event = Event::Submit {
            text: self.view.modal.input.value().to_string(),
            want_summary: self.view.modal.wants_summary(),
        };
        self.dispatch(event)
    }

    /// Waits for the next fetch to finish and applies it. A fetch task that
    /// panicked resolves as a network failure.
    ///
    /// Returns `false` when nothing was in flight.
    pub async fn pump(&mut self) -> Result<bool> {
        let Some(joined) = self.in_flight.join_next_with_id().await else {
            return Ok(false);
        };

        let event = match joined {
            Ok((id, event)) => {
                self.fetches.remove(&id);
                event
            }
            Err(err) => match self.fetches.remove(&err.id()) {
                Some(fetch) => {
                    tracing::error!(?fetch, error = %err, "Fetch task did not complete");
                    fetch.failed()
                }
                None => {
                    tracing::error!(error = %err, "Unknown fetch task did not complete");
                    return Ok(true);
                }
            },
        };
        self.dispatch(event)?;
        Ok(true)
    }

    /// Pumps until no fetch is left in flight.
    pub async fn settle(&mut self) -> Result<()> {
        while self.pump().await? {}
        Ok(())
    }

    /// Removes the widget. In-flight fetches are dropped.
    pub fn teardown(&mut self) {
        // Dropping the set aborts its tasks
        self.in_flight = JoinSet::new();
        self.fetches.clear();
        self.view.teardown();
    }

    fn ensure_mounted(&self) -> Result<()> {
        if self.view.is_mounted() {
            Ok(())
        } else {
            Err(Error::NotMounted)
        }
    }

    fn dispatch(&mut self, event: Event) -> Result<()> {
        if !self.view.is_mounted() {
            tracing::debug!(?event, "Dropping event for unmounted widget");
            return Ok(());
        }

        let toggles = matches!(event, Event::Toggle);
        let (machine, effects) = self.machine.step(event)?;
        self.machine = machine;
        if toggles {
            self.view.toggle();
        }

        for effect in effects {
            self.apply(effect);
        }
        Ok(())
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::ClearResults => self.view.results_mut().clear(),
            Effect::Render(outcome) => {
                let entries = self.renderer.render(&outcome);
                self.view.results_mut().append(entries);
            }
            Effect::FetchRelated { seq, request } => {
                let service = Arc::clone(&self.service);
                tracing::info!(seq, query = %request.query(), summary = request.want_summary(), "Submitting question");
                let handle = self.in_flight.spawn(async move {
                    let outcome = service.fetch_related(&request).await;
                    Event::RelatedResolved { seq, outcome }
                });
                self.fetches.insert(handle.id(), Fetch::Related(seq));
            }
            Effect::FetchSummary { seq, id } => {
                let service = Arc::clone(&self.service);
                let handle = self.in_flight.spawn(async move {
                    let outcome = service.fetch_summary(&id).await;
                    Event::SummaryResolved { seq, outcome }
                });
                self.fetches.insert(handle.id(), Fetch::Summary(seq));
            }
        }
    }
}
