//! End-to-end enrichment scenarios against a real record store and a stub
//! pension lookup service.

use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use i2r_core::{EmployeeId, NewEmployee, RefreshStrategy};
use i2r_db::{Database, EmployeeStore};
use i2r_enrichment::{EmployeeDirectory, EnrichmentEngine, EnrichmentError, ProblemScanner};
use i2r_pension::HttpPensionLookup;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

async fn pension_for(Path(name): Path<String>) -> Result<String, StatusCode> {
    match name.as_str() {
        "Alice" => Ok("P100".to_string()),
        "Carol" => Ok("P200".to_string()),
        _ => Err(StatusCode::SERVICE_UNAVAILABLE),
    }
}

async fn start_lookup_service() -> SocketAddr {
    let app = Router::new().route("/:name", get(pension_for));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind lookup service");
    let addr = listener.local_addr().expect("lookup address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve lookup");
    });
    addr
}

/// An address with nothing listening on it.
async fn unreachable_address() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    addr
}

async fn store_with(rows: &[(&str, &str, &str)]) -> Arc<Database> {
    let db = Database::new(":memory:").await.expect("create db");
    db.run_migrations().await.expect("run migrations");
    for (name, pension_id, role) in rows {
        db.save(NewEmployee::new(*name, *role), (*pension_id).to_string())
            .await
            .expect("seed employee");
    }
    Arc::new(db)
}

fn http_lookup(addr: SocketAddr) -> Arc<HttpPensionLookup> {
    Arc::new(
        HttpPensionLookup::new(format!("http://{addr}"), Duration::from_secs(2))
            .expect("create lookup client"),
    )
}

#[tokio::test]
async fn test_refresh_resolves_pension_id() {
    let addr = start_lookup_service().await;
    let store = store_with(&[("Alice", "", "Engineer")]).await;

    for strategy in [RefreshStrategy::Sequential, RefreshStrategy::Concurrent] {
        let engine =
            EnrichmentEngine::new(store.clone(), http_lookup(addr)).with_strategy(strategy);
        let refreshed = engine.refresh_all_pensions().await.expect("refresh");

        assert_eq!(refreshed.len(), 1);
        assert_eq!(refreshed[0].pension_id, "P100");
    }
}

#[tokio::test]
async fn test_refresh_with_unreachable_service_clears_pension_id() {
    let addr = unreachable_address().await;
    let store = store_with(&[("Alice", "P-old", "Engineer")]).await;

    let engine = EnrichmentEngine::new(store.clone(), http_lookup(addr));
    let refreshed = engine.refresh_all_pensions().await.expect("refresh succeeds");

    assert_eq!(refreshed[0].pension_id, "");
    let stored = store.find_all().await.expect("find all");
    assert_eq!(stored[0].pension_id, "");
}

#[tokio::test]
async fn test_lowercase_name_is_a_problem() {
    let store = store_with(&[("bob", "P1", "Clerk"), ("Alice", "P100", "Engineer")]).await;

    let problems = ProblemScanner::new(store)
        .find_problems()
        .await
        .expect("scan");

    assert_eq!(problems.len(), 1);
    assert_eq!(problems[0].name, "bob");
}

#[tokio::test]
async fn test_empty_name_is_a_problem() {
    let store = store_with(&[("", "P1", "Clerk")]).await;

    let problems = ProblemScanner::new(store)
        .find_problems()
        .await
        .expect("scan does not fail");

    assert_eq!(problems.len(), 1);
    assert_eq!(problems[0].name, "");
}

#[tokio::test]
async fn test_get_missing_employee_is_not_found() {
    let store = store_with(&[("Alice", "P100", "Engineer")]).await;

    let result = EmployeeDirectory::new(store)
        .get_by_id(EmployeeId::from(999))
        .await;

    assert!(matches!(result, Err(EnrichmentError::NotFound(_))));
}

#[tokio::test]
async fn test_create_employee_resolves_and_stores() {
    let addr = start_lookup_service().await;
    let store = store_with(&[]).await;
    let engine = EnrichmentEngine::new(store.clone(), http_lookup(addr));

    let carol = engine
        .create_employee(NewEmployee::new("Carol", "Manager"))
        .await
        .expect("create");

    assert_eq!(carol.pension_id, "P200");
    let stored = EmployeeDirectory::new(store)
        .get_by_id(carol.id)
        .await
        .expect("stored record");
    assert_eq!(stored, carol);
}

#[tokio::test]
async fn test_refresh_outcome_is_independent_per_employee() {
    let addr = start_lookup_service().await;
    let store = store_with(&[
        ("Alice", "", "Engineer"),
        ("Zed", "P-old", "Clerk"),
        ("Carol", "", "Manager"),
    ])
    .await;

    let engine = EnrichmentEngine::new(store, http_lookup(addr)).with_max_concurrent_lookups(2);
    let refreshed = engine.refresh_all_pensions().await.expect("refresh");

    let ids: Vec<_> = refreshed.iter().map(|e| e.pension_id.as_str()).collect();
    assert_eq!(ids, vec!["P100", "", "P200"]);
}
