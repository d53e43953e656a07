use anyhow::Result;
use planner_core::Database;
use planner_server::state::AppState;
use std::net::SocketAddr;

const DEFAULT_PORT: u16 = 4280;
const DEFAULT_DB_PATH: &str = "planner.db";

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let db_path = std::env::var("PLANNER_DB").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());
    let db = Database::open(&db_path)?;
    log::info!("using database at {}", db_path);

    let app = planner_server::app(AppState::new(db));

    let port = std::env::var("PLANNER_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    println!("planner-server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
