use std::net::SocketAddr;

use axum::Router;
use configs::DatabaseConfig;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use server::{build_router, AppState};

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    let db = models::db::connect_and_migrate(&DatabaseConfig::sqlite_memory()).await?;
    let app: Router = build_router(AppState::new(db), CorsLayer::very_permissive());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(format!("{}/health", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_create_farmer_then_dashboard() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = c.post(format!("{}/api/farmers", app.base_url))
        .json(&json!({
            "farmerName": "Jane",
            "federalIdentification": "12345678901",
            "farms": [{"farmName": "Boa Vista", "city": "Campinas", "state": "SP",
                       "totalArea": 100.0, "arableArea": 60.0, "vegetationArea": 40.0}]
        }))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let farmer = res.json::<serde_json::Value>().await?;
    assert_ne!(farmer["id"], 0);

    let res = c.get(format!("{}/api/dashboard", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["totalFarms"], 1);
    assert_eq!(body["totalArea"], 100.0);

    let res = c.get(format!("{}/api/farmers?page=1&limit=5", app.base_url)).send().await?;
    let page = res.json::<serde_json::Value>().await?;
    assert_eq!(page["items"][0]["farms"][0]["farmName"], "Boa Vista");
    Ok(())
}
