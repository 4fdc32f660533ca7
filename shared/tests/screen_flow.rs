mod common;

use assert_matches::assert_matches;
use crux_http::http::StatusCode;
use crux_http::testing::ResponseBuilder;
use crux_http::Error as HttpError;
use shared::capabilities::ConnectivityOperation;
use shared::fetcher::HitsPayload;
use shared::view::{NO_INTERNET_MESSAGE, SOMETHING_WENT_WRONG_MESSAGE};
use shared::{ConnectivitySample, Event, ImageHit, ScreenView, DEMO_URL};

use common::*;

#[test]
fn mount_subscribes_and_shows_loading() {
    let app = Tester::default();
    let mut model = shared::Model::default();

    let update = app.update(Event::Mounted, &mut model);

    assert_eq!(
        connectivity_ops(&update.effects),
        vec![ConnectivityOperation::Subscribe]
    );
    assert_eq!(renders(&update.effects), 1);
    assert_eq!(app.view(&model).screen, ScreenView::Loading);
}

#[test]
fn online_settle_fetches_and_shows_content() {
    let (app, mut model) = mounted();

    let update = app.update(
        Event::ConnectivityChanged(ConnectivitySample::online()),
        &mut model,
    );
    let starts = timer_starts(&update.effects);
    assert_eq!(starts.len(), 1);
    assert_eq!(starts[0].1, 3000);
    assert!(fetch_requests(&update.effects).is_empty());
    assert_eq!(app.view(&model).screen, ScreenView::Loading);

    let effects = app
        .update(
            Event::DebounceTimer(shared::capabilities::TimerOutput::Elapsed { id: starts[0].0 }),
            &mut model,
        )
        .effects;
    let requests = fetch_requests(&effects);
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].url, DEMO_URL);
    assert_eq!(header(&requests[0], "accept"), Some("application/json"));
    assert!(header(&requests[0], "x-request-id").is_some());
    assert!(model.settled.visited());
    assert!(model.loading);
    assert_eq!(app.view(&model).screen, ScreenView::Loading);

    let effects = complete_fetch(
        &app,
        &mut model,
        hits_ok(vec![ImageHit::new(1_i64, "http://x/1.jpg")]),
    );
    assert_eq!(renders(&effects), 1);
    assert_eq!(model.results, vec![ImageHit::new(1_i64, "http://x/1.jpg")]);

    assert_matches!(
        app.view(&model).screen,
        ScreenView::Content { columns: 2, tiles } if tiles.len() == 1
            && tiles[0].key == "1"
            && tiles[0].image_url == "http://x/1.jpg"
    );
}

#[test]
fn empty_hits_render_as_empty_content() {
    let (app, mut model) = mounted();
    settle(&app, &mut model, ConnectivitySample::online());

    complete_fetch(&app, &mut model, hits_ok(vec![]));

    assert!(model.results.is_empty());
    assert!(model.last_fetch_error.is_none());
    assert_eq!(
        app.view(&model).screen,
        ScreenView::Content {
            columns: 2,
            tiles: vec![]
        }
    );
}

#[test]
fn failed_fetch_while_online_shows_empty_grid() {
    let (app, mut model) = mounted();
    settle(&app, &mut model, ConnectivitySample::online());

    complete_fetch(
        &app,
        &mut model,
        Ok(ResponseBuilder::with_status(StatusCode::BadGateway)
            .body(HitsPayload::default())
            .build()),
    );

    assert!(model.results.is_empty());
    assert!(model.last_fetch_error.is_some());
    assert!(!model.loading);
    assert_matches!(app.view(&model).screen, ScreenView::Content { tiles, .. } if tiles.is_empty());
}

#[test]
fn offline_settle_shows_no_internet_without_retry() {
    let (app, mut model) = mounted();

    let effects = settle(&app, &mut model, ConnectivitySample::offline());

    assert!(fetch_requests(&effects).is_empty());
    assert_eq!(
        app.view(&model).screen,
        ScreenView::Retry {
            message: NO_INTERNET_MESSAGE.to_string(),
            can_retry: false,
            retry_enabled: false,
        }
    );
}

#[test]
fn retry_is_inert_when_disconnected() {
    let (app, mut model) = mounted();
    settle(&app, &mut model, ConnectivitySample::offline());

    let update = app.update(Event::RetryRequested, &mut model);

    assert!(update.effects.is_empty());
    assert!(!model.retry);
}

#[test]
fn unreachable_offers_retry_that_fires_once_reachable() {
    let (app, mut model) = mounted();

    let effects = settle(&app, &mut model, ConnectivitySample::new(true, false));
    assert!(fetch_requests(&effects).is_empty());
    assert_eq!(
        app.view(&model).screen,
        ScreenView::Retry {
            message: SOMETHING_WENT_WRONG_MESSAGE.to_string(),
            can_retry: true,
            retry_enabled: true,
        }
    );

    // Still unreachable: the retry is recorded but nothing is fetched.
    let update = app.update(Event::RetryRequested, &mut model);
    assert!(fetch_requests(&update.effects).is_empty());
    assert!(model.retry);
    assert_matches!(
        app.view(&model).screen,
        ScreenView::Retry { can_retry: true, retry_enabled: false, .. }
    );

    // A second tap while one is pending changes nothing.
    let update = app.update(Event::RetryRequested, &mut model);
    assert!(update.effects.is_empty());

    let effects = settle(&app, &mut model, ConnectivitySample::online());
    assert_eq!(fetch_requests(&effects).len(), 1);

    // Clearing the flag re-runs the gate, and connectivity is still favorable.
    let effects = complete_fetch(
        &app,
        &mut model,
        hits_ok(vec![ImageHit::new("a", "http://x/a.jpg")]),
    );
    assert!(!model.retry);
    assert_eq!(model.results.len(), 1);
    assert_eq!(fetch_requests(&effects).len(), 1);
    assert!(model.loading);

    let effects = complete_fetch(
        &app,
        &mut model,
        hits_ok(vec![
            ImageHit::new("a", "http://x/a.jpg"),
            ImageHit::new("b", "http://x/b.jpg"),
        ]),
    );
    assert!(fetch_requests(&effects).is_empty());
    assert!(!model.loading);
    assert_matches!(app.view(&model).screen, ScreenView::Content { tiles, .. } if tiles.len() == 2);
}

#[test]
fn clearing_retry_while_unreachable_holds_the_fetch() {
    let (app, mut model) = mounted();
    settle(&app, &mut model, ConnectivitySample::online());

    // Reachability drops while the request is out, and the user asks to retry.
    settle(&app, &mut model, ConnectivitySample::new(true, false));
    let update = app.update(Event::RetryRequested, &mut model);
    assert!(fetch_requests(&update.effects).is_empty());
    assert!(model.retry);

    let effects = complete_fetch(&app, &mut model, hits_ok(vec![]));

    assert!(!model.retry);
    assert!(fetch_requests(&effects).is_empty());
    assert_eq!(model.fetches.in_flight(), None);
    assert_matches!(
        app.view(&model).screen,
        ScreenView::Retry { can_retry: true, retry_enabled: true, .. }
    );
}

#[test]
fn network_failure_while_unreachable_shows_generic_retry() {
    let (app, mut model) = mounted();
    settle(&app, &mut model, ConnectivitySample::online());

    // Reachability drops while the request is still out.
    let effects = settle(&app, &mut model, ConnectivitySample::new(true, false));
    assert!(fetch_requests(&effects).is_empty());

    complete_fetch(
        &app,
        &mut model,
        Err(HttpError::Io("network unreachable".into())),
    );

    assert!(model.results.is_empty());
    assert_eq!(
        app.view(&model).screen,
        ScreenView::Retry {
            message: SOMETHING_WENT_WRONG_MESSAGE.to_string(),
            can_retry: true,
            retry_enabled: true,
        }
    );
}

#[test]
fn unchanged_settle_does_not_refetch() {
    let (app, mut model) = mounted();
    settle(&app, &mut model, ConnectivitySample::online());
    complete_fetch(&app, &mut model, hits_ok(vec![]));

    let effects = settle(&app, &mut model, ConnectivitySample::online());

    assert!(fetch_requests(&effects).is_empty());
    assert!(!model.loading);
}
