// lib.rs - shared core for the image grid screen

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod capabilities;
pub mod config;
pub mod debounce;
pub mod event;
pub mod fetcher;
pub mod gate;
pub mod model;
pub mod view;

use std::time::Duration;

pub use app::App;
pub use capabilities::{Capabilities, Effect};
pub use config::{ConfigError, ScreenConfig};
pub use event::Event;
pub use model::{ConnectivitySample, HitId, ImageHit, Model};
pub use view::{Mode, RetryReason, ScreenView, ViewModel};

/// Example Pixabay search. `YOUR_API_KEY` must be replaced with a real key;
/// the endpoint answers every unkeyed request with a 4xx.
pub const DEMO_URL: &str =
    "https://pixabay.com/api/?key=YOUR_API_KEY&q=nature&image_type=photo&per_page=40";
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(3000);
pub const GRID_COLUMNS: u8 = 2;

pub mod app {
    use tracing::{debug, info, warn};
    use uuid::Uuid;

    use crate::capabilities::{Capabilities, TimerOutput};
    use crate::config::ScreenConfig;
    use crate::event::Event;
    use crate::fetcher::{FetchGeneration, FetchOutcome, HitsPayload, REQUEST_ID_HEADER};
    use crate::gate::{self, GateDecision, GateTrigger};
    use crate::model::{ConnectivitySample, Lifecycle, Model};
    use crate::view::{Mode, ViewModel};

    #[derive(Default)]
    pub struct App {
        config: ScreenConfig,
    }

    impl App {
        fn schedule_settle(
            &self,
            sample: ConnectivitySample,
            model: &mut Model,
            caps: &Capabilities,
        ) {
            let scheduled = model.debouncer.schedule(sample);
            if let Some(superseded) = scheduled.superseded {
                caps.timer.clear(superseded);
            }
            debug!(timer = %scheduled.id, ?sample, "connectivity settle scheduled");
            caps.timer.start(
                scheduled.id,
                self.config.debounce_delay(),
                Event::DebounceTimer,
            );
        }

        fn settle(&self, sample: ConnectivitySample, model: &mut Model, caps: &Capabilities) {
            let first = !model.settled.visited();
            let changed = model.settled.settle(sample);
            model.loading = false;

            info!(
                connected = sample.connected,
                reachable = sample.reachable,
                first,
                changed,
                "connectivity settled"
            );

            if changed {
                self.run_gate(GateTrigger::ConnectivitySettled, model, caps);
            }
        }

        fn run_gate(&self, trigger: GateTrigger, model: &mut Model, caps: &Capabilities) {
            match gate::evaluate(&model.settled) {
                GateDecision::Fetch => self.start_fetch(model, caps),
                GateDecision::Hold(reason) => debug!(?trigger, ?reason, "fetch held"),
            }
        }

        fn start_fetch(&self, model: &mut Model, caps: &Capabilities) {
            model.loading = true;
            let generation = model.fetches.begin();

            let endpoint = match self.config.endpoint() {
                Ok(endpoint) => endpoint,
                Err(error) => {
                    let outcome = FetchOutcome::failed(error.into());
                    self.finish_fetch(generation, outcome, model, caps);
                    return;
                }
            };

            let request_id = Uuid::new_v4().to_string();
            info!(
                generation = generation.0,
                %request_id,
                host = ?endpoint.host_str(),
                "fetch issued"
            );

            caps.http
                .get(endpoint.as_str())
                .header("Accept", "application/json")
                .header(REQUEST_ID_HEADER, request_id.as_str())
                .expect_json::<HitsPayload>()
                .send(move |result| Event::FetchCompleted { generation, result });
        }

        /// Commits a completed fetch. Returns false for superseded generations.
        fn finish_fetch(
            &self,
            generation: FetchGeneration,
            outcome: FetchOutcome,
            model: &mut Model,
            caps: &Capabilities,
        ) -> bool {
            if !model.fetches.complete(generation) {
                debug!(
                    generation = generation.0,
                    latest = ?model.fetches.latest(),
                    "stale fetch completion dropped"
                );
                return false;
            }

            match &outcome.error {
                Some(error) => warn!(generation = generation.0, %error, "fetch failed"),
                None => info!(
                    generation = generation.0,
                    hits = outcome.hits.len(),
                    "fetch succeeded"
                ),
            }

            model.results = outcome.hits;
            model.last_fetch_error = outcome.error;
            model.loading = false;

            if std::mem::take(&mut model.retry) {
                self.run_gate(GateTrigger::RetryCleared, model, caps);
            }
            true
        }
    }

    impl crux_core::App for App {
        type Event = Event;
        type Model = Model;
        type ViewModel = ViewModel;
        type Capabilities = Capabilities;

        fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
            let event_name = event.name();
            debug!(
                event = event_name,
                user_initiated = event.is_user_initiated(),
                "update"
            );

            match event {
                Event::Mounted => {
                    if model.is_mounted() {
                        warn!("mount while already mounted ignored");
                        return;
                    }
                    model.begin_session();
                    caps.connectivity.subscribe(Event::ConnectivityChanged);
                    caps.render.render();
                }

                Event::Unmounted => {
                    if !model.is_mounted() {
                        return;
                    }
                    if let Some(pending) = model.debouncer.cancel() {
                        caps.timer.clear(pending);
                    }
                    caps.connectivity.unsubscribe();
                    model.lifecycle = Lifecycle::TornDown;
                    if let Some(generation) = model.fetches.in_flight() {
                        debug!(generation = generation.0, "fetch left in flight at teardown");
                    }
                }

                _ if !model.is_mounted() => {
                    debug!(event = event_name, lifecycle = ?model.lifecycle, "event outside session ignored");
                }

                Event::ConnectivityChanged(sample) => {
                    self.schedule_settle(sample, model, caps);
                }

                Event::DebounceTimer(TimerOutput::Elapsed { id }) => {
                    match model.debouncer.elapse(id) {
                        Some(sample) => {
                            self.settle(sample, model, caps);
                            caps.render.render();
                        }
                        None => debug!(timer = %id, "superseded debounce timer ignored"),
                    }
                }

                Event::DebounceTimer(TimerOutput::Cleared { id }) => {
                    // The shell dropped a timer we still wait on; wait again for the same sample.
                    let pending = model.debouncer.pending().copied();
                    if let Some(pending) = pending.filter(|p| p.id == id) {
                        model.debouncer.cancel();
                        self.schedule_settle(pending.sample, model, caps);
                    }
                }

                Event::RetryRequested => {
                    let mode = Mode::of(model);
                    if !mode.accepts_retry() || model.retry {
                        info!(?mode, pending = model.retry, "retry request ignored");
                        return;
                    }
                    model.retry = true;
                    self.run_gate(GateTrigger::RetryRaised, model, caps);
                    caps.render.render();
                }

                Event::FetchCompleted { generation, result } => {
                    let outcome = FetchOutcome::from_result(result);
                    if self.finish_fetch(generation, outcome, model, caps) {
                        caps.render.render();
                    }
                }
            }
        }

        fn view(&self, model: &Model) -> ViewModel {
            ViewModel::project(model)
        }
    }
}
