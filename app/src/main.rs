//! FILENAME: app/src/main.rs

use std::path::PathBuf;

#[tokio::main]
async fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let db_path = PathBuf::from(args.next().unwrap_or_else(|| "merged_data.db".to_string()));
    let export_dir = PathBuf::from(args.next().unwrap_or_else(|| ".".to_string()));

    let state = app::create_app_state(db_path.clone(), export_dir);
    let router = app::router(state);

    let addr = "127.0.0.1:8000";
    log::info!("serving filter shell for {:?} on http://{}", db_path, addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, router)
        .await
        .expect("server error");
}
