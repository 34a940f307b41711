// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::time::Duration;

use axum::Router;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::http::header::CACHE_CONTROL;
use axum::http::header::CONTENT_TYPE;
use axum::response::Html;
use axum::routing::get;
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::net::TcpStream;
use tokio::time::sleep;

use crate::error::Fallible;
use crate::web::badges;
use crate::web::state::ServerState;
use crate::web::timetable;
use crate::workspace::Workspace;

pub async fn start_server(
    directory: Option<String>,
    port: Option<u16>,
    open_browser: bool,
) -> Fallible<()> {
    let ws = Workspace::open(directory)?;
    let port = port.unwrap_or(ws.config.server.port);
    let workspace_dir = ws.directory.display().to_string();
    let state = ServerState::new(ws);

    let app = Router::new();
    let app = app.route("/", get(timetable::get_handler));
    let app = app.route("/schedules", post(timetable::add_handler));
    let app = app.route("/schedules/delete", post(timetable::delete_handler));
    let app = app.route("/badges", get(badges::get_handler));
    let app = app.route("/badges/score", post(badges::score_handler));
    let app = app.route("/api/timetable", get(timetable::api_timetable_handler));
    let app = app.route("/api/weeks/{week}", get(timetable::api_week_handler));
    let app = app.route("/style.css", get(stylesheet));
    let app = app.fallback(not_found_handler);
    let app = app.with_state(state);
    let bind = format!("127.0.0.1:{port}");

    if open_browser {
        // Open the browser once the server accepts connections.
        let url = format!("http://{bind}/");
        let probe = bind.clone();
        tokio::spawn(async move {
            loop {
                if let Ok(stream) = TcpStream::connect(&probe).await {
                    drop(stream);
                    break;
                }
                sleep(Duration::from_millis(1)).await;
            }
            let _ = open::that(url);
        });
    }

    log::debug!("Starting server on {bind}");
    println!("Serving {workspace_dir} on http://{bind}/");
    let listener = TcpListener::bind(&bind).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn stylesheet() -> (StatusCode, [(HeaderName, &'static str); 2], &'static [u8]) {
    let bytes = include_bytes!("style.css");
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, "text/css"),
            (CACHE_CONTROL, "public, max-age=604800, immutable"),
        ],
        bytes,
    )
}

async fn not_found_handler() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html("Not Found".to_string()))
}
