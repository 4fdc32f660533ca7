#![allow(dead_code)]

use crux_core::testing::AppTester;
use crux_http::protocol::HttpRequest;
use crux_http::testing::ResponseBuilder;
use shared::capabilities::{ConnectivityOperation, TimerId, TimerOperation, TimerOutput};
use shared::fetcher::{HitsPayload, HitsResponse};
use shared::{App, ConnectivitySample, Effect, Event, ImageHit, Model};

pub type Tester = AppTester<App, Effect>;

pub fn mounted() -> (Tester, Model) {
    let app = Tester::default();
    let mut model = Model::default();
    app.update(Event::Mounted, &mut model);
    (app, model)
}

pub fn timer_starts(effects: &[Effect]) -> Vec<(TimerId, u64)> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::Timer(req) => match req.operation {
                TimerOperation::Start { id, millis } => Some((id, millis)),
                TimerOperation::Clear { .. } => None,
            },
            _ => None,
        })
        .collect()
}

pub fn timer_clears(effects: &[Effect]) -> Vec<TimerId> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::Timer(req) => match req.operation {
                TimerOperation::Clear { id } => Some(id),
                TimerOperation::Start { .. } => None,
            },
            _ => None,
        })
        .collect()
}

pub fn fetch_requests(effects: &[Effect]) -> Vec<HttpRequest> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::Http(req) => Some(req.operation.clone()),
            _ => None,
        })
        .collect()
}

pub fn connectivity_ops(effects: &[Effect]) -> Vec<ConnectivityOperation> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::Connectivity(req) => Some(req.operation),
            _ => None,
        })
        .collect()
}

pub fn renders(effects: &[Effect]) -> usize {
    effects
        .iter()
        .filter(|e| matches!(e, Effect::Render(_)))
        .count()
}

/// Reports a sample and lets its debounce timer run out. Returns the effects
/// produced by the timer answer.
pub fn settle(app: &Tester, model: &mut Model, sample: ConnectivitySample) -> Vec<Effect> {
    let update = app.update(Event::ConnectivityChanged(sample), model);
    let (id, _) = *timer_starts(&update.effects)
        .last()
        .expect("debounce timer should start");
    app.update(Event::DebounceTimer(TimerOutput::Elapsed { id }), model)
        .effects
}

pub fn complete_fetch(app: &Tester, model: &mut Model, result: HitsResponse) -> Vec<Effect> {
    let generation = model.fetches.in_flight().expect("a fetch should be in flight");
    app.update(Event::FetchCompleted { generation, result }, model)
        .effects
}

pub fn hits_ok(hits: Vec<ImageHit>) -> HitsResponse {
    Ok(ResponseBuilder::ok().body(HitsPayload::new(hits)).build())
}

pub fn header<'a>(request: &'a HttpRequest, name: &str) -> Option<&'a str> {
    request
        .headers
        .iter()
        .find(|h| h.name.eq_ignore_ascii_case(name))
        .map(|h| h.value.as_str())
}
