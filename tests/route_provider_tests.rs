use routepilot::models::{Location, RoutePreference, TravelMode};
use routepilot::services::route_provider::RouteProvider;
use routepilot::AppError;
use std::sync::Arc;
use std::time::{Duration, Instant};

mod common;
use common::{directions, hoan_kiem, van_mieu, ScriptedDirections};

fn provider(source: &Arc<ScriptedDirections>) -> RouteProvider {
    RouteProvider::new(source.clone())
}

#[tokio::test]
async fn test_three_distinct_candidates_in_preference_order() {
    let source = Arc::new(
        ScriptedDirections::new()
            .respond(RoutePreference::Fastest, directions(0.000, 2400.0, Some("Tràng Thi")))
            .respond(RoutePreference::Shortest, directions(0.001, 2100.0, Some("Hàng Bông")))
            .respond(RoutePreference::Recommended, directions(0.002, 2600.0, None)),
    );

    let candidates = provider(&source)
        .fetch_route(&hoan_kiem(), &van_mieu(), TravelMode::Car)
        .await
        .unwrap();

    let prefs: Vec<RoutePreference> = candidates.iter().map(|c| c.preference).collect();
    assert_eq!(prefs, RoutePreference::ALL.to_vec());
    assert_eq!(candidates[1].distance_meters, 2100.0);
    assert_eq!(candidates[0].label(0), "Qua Tràng Thi");
    assert_eq!(candidates[2].label(2), "Tuyến 3");
}

#[tokio::test]
async fn test_duplicate_geometries_are_dropped() {
    let source = Arc::new(
        ScriptedDirections::new()
            .respond(RoutePreference::Fastest, directions(0.000, 2400.0, None))
            .respond(RoutePreference::Shortest, directions(0.001, 2100.0, None))
            // Same path as fastest, different summary
            .respond(RoutePreference::Recommended, directions(0.000, 2450.0, None)),
    );

    let report = provider(&source)
        .fetch_route_report(&hoan_kiem(), &van_mieu(), TravelMode::Car)
        .await
        .unwrap();

    assert_eq!(report.candidates.len(), 2);
    assert_eq!(report.duplicates_dropped, 1);
    assert_eq!(report.candidates[0].preference, RoutePreference::Fastest);
    assert_eq!(report.candidates[0].distance_meters, 2400.0);
    assert_eq!(report.candidates[1].preference, RoutePreference::Shortest);
}

#[tokio::test]
async fn test_all_identical_geometries_collapse_to_one() {
    let source = Arc::new(ScriptedDirections::new().respond_all(directions(0.0, 2400.0, None)));

    let candidates = provider(&source)
        .fetch_route(&hoan_kiem(), &van_mieu(), TravelMode::Walking)
        .await
        .unwrap();

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].preference, RoutePreference::Fastest);
}

#[tokio::test]
async fn test_order_is_independent_of_completion_order() {
    // Fastest answers last, recommended first
    let source = Arc::new(
        ScriptedDirections::new()
            .respond_after(
                RoutePreference::Fastest,
                directions(0.000, 2400.0, None),
                Duration::from_millis(120),
            )
            .respond_after(
                RoutePreference::Shortest,
                directions(0.001, 2100.0, None),
                Duration::from_millis(60),
            )
            .respond(RoutePreference::Recommended, directions(0.002, 2600.0, None)),
    );

    let candidates = provider(&source)
        .fetch_route(&hoan_kiem(), &van_mieu(), TravelMode::Car)
        .await
        .unwrap();

    let prefs: Vec<RoutePreference> = candidates.iter().map(|c| c.preference).collect();
    assert_eq!(prefs, RoutePreference::ALL.to_vec());
}

#[tokio::test]
async fn test_preference_requests_run_concurrently() {
    let delay = Duration::from_millis(200);
    let source = Arc::new(
        ScriptedDirections::new()
            .respond_after(RoutePreference::Fastest, directions(0.000, 2400.0, None), delay)
            .respond_after(RoutePreference::Shortest, directions(0.001, 2100.0, None), delay)
            .respond_after(RoutePreference::Recommended, directions(0.002, 2600.0, None), delay),
    );

    let started = Instant::now();
    let candidates = provider(&source)
        .fetch_route(&hoan_kiem(), &van_mieu(), TravelMode::Car)
        .await
        .unwrap();
    let elapsed = started.elapsed();

    assert_eq!(candidates.len(), 3);
    // Sequential issuance would take at least 600ms
    assert!(elapsed < Duration::from_millis(500), "took {:?}", elapsed);
}

#[tokio::test]
async fn test_partial_failure_is_tolerated() {
    let source = Arc::new(
        ScriptedDirections::new()
            .fail(
                RoutePreference::Fastest,
                AppError::Network("connection reset".to_string()),
            )
            .respond(RoutePreference::Shortest, directions(0.001, 2100.0, None)),
        // Recommended is unscripted and answers HTTP 500
    );

    let report = provider(&source)
        .fetch_route_report(&hoan_kiem(), &van_mieu(), TravelMode::Bike)
        .await
        .unwrap();

    assert_eq!(report.candidates.len(), 1);
    assert_eq!(report.candidates[0].preference, RoutePreference::Shortest);

    let failed: Vec<RoutePreference> = report.failures.iter().map(|f| f.preference).collect();
    assert_eq!(
        failed,
        vec![RoutePreference::Fastest, RoutePreference::Recommended]
    );
    assert!(report.failures.iter().all(|f| f.error.is_upstream()));
}

#[tokio::test]
async fn test_total_failure_is_no_route_found() {
    let source = Arc::new(
        ScriptedDirections::new()
            .fail(
                RoutePreference::Fastest,
                AppError::DirectionsApi("HTTP 404: Route could not be found".to_string()),
            )
            .fail(
                RoutePreference::Shortest,
                AppError::Network("timed out".to_string()),
            )
            .fail(
                RoutePreference::Recommended,
                AppError::DirectionsApi("No routes found".to_string()),
            ),
    );

    let result = provider(&source)
        .fetch_route(&hoan_kiem(), &van_mieu(), TravelMode::Car)
        .await;

    assert!(matches!(result, Err(AppError::NoRouteFound(_))));
    assert_eq!(source.calls().len(), 3);
}

#[tokio::test]
async fn test_empty_geometry_counts_as_failure() {
    let mut empty = directions(0.0, 0.0, None);
    empty.geometry.clear();
    let source = Arc::new(ScriptedDirections::new().respond_all(empty));

    let result = provider(&source)
        .fetch_route(&hoan_kiem(), &van_mieu(), TravelMode::Car)
        .await;

    assert!(matches!(result, Err(AppError::NoRouteFound(_))));
}

#[tokio::test]
async fn test_invalid_coordinates_never_reach_the_network() {
    let source = Arc::new(ScriptedDirections::new().respond_all(directions(0.0, 2400.0, None)));
    let provider = provider(&source);

    let bad_start = Location::new(f64::NAN, 105.85, "?");
    let result = provider
        .fetch_route(&bad_start, &van_mieu(), TravelMode::Car)
        .await;
    assert!(matches!(result, Err(AppError::InvalidInput(_))));

    let bad_end = Location::new(21.03, 205.0, "?");
    let result = provider
        .fetch_route(&hoan_kiem(), &bad_end, TravelMode::Car)
        .await;
    assert!(matches!(result, Err(AppError::InvalidInput(_))));

    assert!(source.calls().is_empty());
}

#[tokio::test]
async fn test_mode_selects_profile() {
    let cases = [
        (TravelMode::Walking, "foot-walking"),
        (TravelMode::Bike, "cycling-regular"),
        (TravelMode::Motorbike, "driving-car"),
        (TravelMode::Car, "driving-car"),
    ];

    for (mode, profile) in cases {
        let source =
            Arc::new(ScriptedDirections::new().respond_all(directions(0.0, 2400.0, None)));
        provider(&source)
            .fetch_route(&hoan_kiem(), &van_mieu(), mode)
            .await
            .unwrap();

        let calls = source.calls();
        assert_eq!(calls.len(), 3, "one request per preference for {}", mode);
        assert!(calls.iter().all(|(p, _)| p == profile), "{}: {:?}", mode, calls);
    }
}

#[tokio::test]
async fn test_every_call_refetches() {
    let source = Arc::new(ScriptedDirections::new().respond_all(directions(0.0, 2400.0, None)));
    let provider = provider(&source);

    for _ in 0..2 {
        tokio_test::assert_ok!(
            provider
                .fetch_route(&hoan_kiem(), &van_mieu(), TravelMode::Car)
                .await
        );
    }
    assert_eq!(source.calls().len(), 6);
}
