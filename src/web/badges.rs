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

use axum::Form;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;
use maud::html;
use serde::Deserialize;

use crate::badges::model::BadgeId;
use crate::types::timestamp::Timestamp;
use crate::web::state::ServerState;
use crate::web::template::error_page;
use crate::web::template::page_template;

#[derive(Deserialize)]
pub struct ScoreForm {
    id: String,
    score: u32,
}

pub async fn get_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let ws = match state.lock() {
        Ok(ws) => ws,
        Err(e) => return error_page(StatusCode::INTERNAL_SERVER_ERROR, e),
    };
    let progress = ws.badges.progress();
    let body = html! {
        h1 { "Clinical skill badges" }
        div.progress-summary {
            (format!(
                "{} of {} completed ({:.0}%), {} active, {} pending",
                progress.completed,
                progress.total,
                progress.completion_rate,
                progress.active,
                progress.pending
            ))
        }
        div.badges {
            @for badge in ws.badges.badges() {
                div class=(format!("badge {}", badge.status.as_str())) {
                    div.badge-header {
                        h2 { (badge.title) }
                        span.status { (badge.status.as_str()) }
                    }
                    div.category { (badge.category) }
                    p { (badge.description) }
                    div.bar {
                        div.fill style=(format!("width: {:.0}%;", badge.progress_percent())) {}
                    }
                    div.scores {
                        (format!(
                            "Score {} / pass {} (requires {}), {} attempts",
                            badge.current_score,
                            badge.passing_score,
                            badge.required_score,
                            badge.attempts
                        ))
                        @if let Some(best) = badge.best_score() {
                            (format!(", best {best}"))
                        }
                    }
                    form action="/badges/score" method="post" {
                        input type="hidden" name="id" value=(badge.id.as_str());
                        input type="number" name="score" min="0" max=(badge.max_score);
                        input type="submit" value="Record";
                    }
                }
            }
        }
    };
    (
        StatusCode::OK,
        Html(page_template("Badges", body).into_string()),
    )
}

pub async fn score_handler(State(state): State<ServerState>, Form(form): Form<ScoreForm>) -> Response {
    let mut ws = match state.lock() {
        Ok(ws) => ws,
        Err(e) => return error_page(StatusCode::INTERNAL_SERVER_ERROR, e).into_response(),
    };
    let today = Timestamp::now().local_date();
    match ws
        .badges
        .update_badge_score(&BadgeId::new(form.id), form.score, today)
    {
        Ok(_) => Redirect::to("/badges").into_response(),
        Err(e) => error_page(StatusCode::UNPROCESSABLE_ENTITY, e).into_response(),
    }
}
