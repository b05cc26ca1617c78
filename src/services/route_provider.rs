//! Candidate route fetching across routing preferences.
//!
//! One directions request is issued per [`RoutePreference`], all of them
//! concurrently. The join waits for every request to settle, tolerates
//! individual failures, and reassembles the results in preference order
//! (fastest, shortest, recommended) regardless of arrival order. Candidates
//! whose geometry exactly repeats an earlier one are dropped.

use crate::error::{AppError, Result};
use crate::models::{CandidateRoute, Location, RoutePreference, TravelMode};
use crate::services::directions::DirectionsSource;
use std::sync::Arc;

/// A preference whose request failed and was left out of the result
#[derive(Debug, Clone, PartialEq)]
pub struct PreferenceFailure {
    pub preference: RoutePreference,
    pub error: AppError,
}

/// Outcome of one fetch, with the failures and duplicates that were
/// swallowed along the way
#[derive(Debug, Clone)]
pub struct RouteFetchReport {
    pub candidates: Vec<CandidateRoute>,
    pub failures: Vec<PreferenceFailure>,
    pub duplicates_dropped: usize,
}

#[derive(Clone)]
pub struct RouteProvider {
    source: Arc<dyn DirectionsSource>,
}

impl RouteProvider {
    pub fn new(source: Arc<dyn DirectionsSource>) -> Self {
        RouteProvider { source }
    }

    /// Fetch deduplicated candidate routes between `start` and `end`.
    ///
    /// Fails with [`AppError::InvalidInput`] before any request when either
    /// point is malformed, and with [`AppError::NoRouteFound`] when no
    /// preference produced a usable route.
    pub async fn fetch_route(
        &self,
        start: &Location,
        end: &Location,
        mode: TravelMode,
    ) -> Result<Vec<CandidateRoute>> {
        Ok(self.fetch_route_report(start, end, mode).await?.candidates)
    }

    pub async fn fetch_route_report(
        &self,
        start: &Location,
        end: &Location,
        mode: TravelMode,
    ) -> Result<RouteFetchReport> {
        let start = start.coordinates()?;
        let end = end.coordinates()?;
        let profile = mode.directions_profile();

        tracing::debug!(
            mode = %mode,
            profile = %profile,
            "Fetching candidates: ({:.5}, {:.5}) -> ({:.5}, {:.5}), profile {}",
            start.lat, start.lng, end.lat, end.lng, profile
        );

        // join_all yields results in input order, not completion order
        let requests = RoutePreference::ALL.iter().map(|&preference| {
            let source = Arc::clone(&self.source);
            async move {
                let result = source.directions(profile, preference, start, end).await;
                (preference, result)
            }
        });
        let results = futures::future::join_all(requests).await;

        let mut routes = Vec::with_capacity(results.len());
        let mut failures = Vec::new();

        for (preference, result) in results {
            match result {
                Ok(directions) if !directions.geometry.is_empty() => {
                    routes.push(CandidateRoute {
                        preference,
                        geometry: directions.geometry,
                        distance_meters: directions.distance_meters,
                        duration_seconds: directions.duration_seconds,
                        segments: directions.segments,
                    });
                }
                Ok(_) => {
                    tracing::warn!(
                        preference = %preference,
                        "Preference {} returned an empty geometry, omitting it",
                        preference
                    );
                    failures.push(PreferenceFailure {
                        preference,
                        error: AppError::DirectionsApi("Route geometry is empty".to_string()),
                    });
                }
                Err(error) => {
                    tracing::warn!(
                        preference = %preference,
                        error = %error,
                        "Preference {} failed, omitting it: {}",
                        preference, error
                    );
                    failures.push(PreferenceFailure { preference, error });
                }
            }
        }

        let fetched = routes.len();
        let candidates = dedup_by_geometry(routes);
        let duplicates_dropped = fetched - candidates.len();

        if candidates.is_empty() {
            tracing::warn!(
                mode = %mode,
                failed = failures.len(),
                "No usable route from any preference ({})",
                profile
            );
            return Err(AppError::NoRouteFound(format!(
                "{} of {} preferences failed for profile {}",
                failures.len(),
                RoutePreference::ALL.len(),
                profile
            )));
        }

        tracing::debug!(
            candidates = candidates.len(),
            failed = failures.len(),
            duplicates = duplicates_dropped,
            "Fetched {} candidate routes ({} failed, {} duplicates dropped)",
            candidates.len(), failures.len(), duplicates_dropped
        );

        Ok(RouteFetchReport {
            candidates,
            failures,
            duplicates_dropped,
        })
    }
}

/// Keep the first route of each distinct geometry, preserving order.
///
/// Geometries are equal only when every coordinate matches exactly, so
/// paths differing by floating-point noise stay separate candidates.
pub fn dedup_by_geometry(routes: Vec<CandidateRoute>) -> Vec<CandidateRoute> {
    let mut unique: Vec<CandidateRoute> = Vec::with_capacity(routes.len());
    for route in routes {
        if !unique.iter().any(|kept| kept.geometry == route.geometry) {
            unique.push(route);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(preference: RoutePreference, geometry: Vec<[f64; 2]>) -> CandidateRoute {
        CandidateRoute {
            preference,
            geometry,
            distance_meters: 1000.0,
            duration_seconds: 120.0,
            segments: vec![],
        }
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let a = vec![[105.80, 21.00], [105.81, 21.01]];
        let b = vec![[105.80, 21.00], [105.80, 21.02], [105.81, 21.01]];

        let routes = vec![
            candidate(RoutePreference::Fastest, a.clone()),
            candidate(RoutePreference::Shortest, b.clone()),
            candidate(RoutePreference::Recommended, a),
        ];

        let unique = dedup_by_geometry(routes);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].preference, RoutePreference::Fastest);
        assert_eq!(unique[1].preference, RoutePreference::Shortest);
    }

    #[test]
    fn test_dedup_is_exact() {
        let a = vec![[105.80, 21.00], [105.81, 21.01]];
        let nearly_a = vec![[105.80, 21.00], [105.81, 21.010000001]];

        let unique = dedup_by_geometry(vec![
            candidate(RoutePreference::Fastest, a),
            candidate(RoutePreference::Shortest, nearly_a),
        ]);
        assert_eq!(unique.len(), 2);
    }

    #[test]
    fn test_dedup_all_identical() {
        let a = vec![[105.80, 21.00], [105.81, 21.01]];
        let unique = dedup_by_geometry(
            RoutePreference::ALL
                .iter()
                .map(|p| candidate(*p, a.clone()))
                .collect(),
        );
        assert_eq!(unique.len(), 1);
        assert_eq!(unique[0].preference, RoutePreference::Fastest);
    }
}
