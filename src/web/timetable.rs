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
use axum::Json;
use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;
use maud::Markup;
use maud::html;
use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::timetable::form::ScheduleForm;
use crate::timetable::geometry::Block;
use crate::timetable::geometry::GridGeometry;
use crate::timetable::model::ClassSchedule;
use crate::timetable::model::Timetable;
use crate::timetable::model::WeekData;
use crate::types::day::Day;
use crate::types::schedule_id::ScheduleId;
use crate::types::timestamp::Timestamp;
use crate::web::state::ServerState;
use crate::web::template::error_page;
use crate::web::template::page_template;
use crate::workspace::Workspace;

#[derive(Deserialize)]
pub struct WeekQuery {
    week: Option<u32>,
}

#[derive(Deserialize)]
pub struct AddScheduleForm {
    week: u32,
    day: String,
    start_time: String,
    end_time: String,
    name: String,
    professor: String,
    location: String,
}

#[derive(Deserialize)]
pub struct DeleteScheduleForm {
    week: u32,
    id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedSchedule {
    schedule: ClassSchedule,
    block: Block,
}

pub async fn get_handler(
    State(state): State<ServerState>,
    Query(query): Query<WeekQuery>,
) -> (StatusCode, Html<String>) {
    let result = state.lock().map(|mut ws| {
        if let Some(week) = query.week {
            ws.timetable.set_current_week(week);
        }
        render_timetable(&ws, None)
    });
    match result {
        Ok(page) => (StatusCode::OK, Html(page.into_string())),
        Err(e) => error_page(StatusCode::INTERNAL_SERVER_ERROR, e),
    }
}

pub async fn add_handler(
    State(state): State<ServerState>,
    Form(form): Form<AddScheduleForm>,
) -> Response {
    let mut ws = match state.lock() {
        Ok(ws) => ws,
        Err(e) => return error_page(StatusCode::INTERNAL_SERVER_ERROR, e).into_response(),
    };
    let week = form.week;
    if ws.timetable.week(week).is_none() {
        let err = ErrorReport::new(&format!("week {week} does not exist."));
        return error_page(StatusCode::NOT_FOUND, err).into_response();
    }
    ws.timetable.set_current_week(week);
    let schedule_form = ScheduleForm {
        day: form.day,
        start_time: form.start_time,
        end_time: form.end_time,
        name: form.name,
        professor: form.professor,
        location: form.location,
    };
    match schedule_form.into_schedule(Timestamp::now()) {
        Ok(schedule) => {
            ws.timetable.add_schedule(week, schedule);
            Redirect::to(&format!("/?week={week}")).into_response()
        }
        Err(e) => {
            let page = render_timetable(&ws, Some(e.to_string()));
            (StatusCode::UNPROCESSABLE_ENTITY, Html(page.into_string())).into_response()
        }
    }
}

pub async fn delete_handler(
    State(state): State<ServerState>,
    Form(form): Form<DeleteScheduleForm>,
) -> Response {
    match state.lock() {
        Ok(mut ws) => {
            ws.timetable.delete_schedule(form.week, &ScheduleId::new(form.id));
            Redirect::to(&format!("/?week={}", form.week)).into_response()
        }
        Err(e) => error_page(StatusCode::INTERNAL_SERVER_ERROR, e).into_response(),
    }
}

pub async fn api_timetable_handler(State(state): State<ServerState>) -> Response {
    let result: Fallible<Timetable> = state.lock().map(|ws| ws.timetable.timetable().clone());
    match result {
        Ok(timetable) => Json(timetable).into_response(),
        Err(e) => error_page(StatusCode::INTERNAL_SERVER_ERROR, e).into_response(),
    }
}

/// The classes of one week with their grid positions.
pub async fn api_week_handler(
    State(state): State<ServerState>,
    Path(week): Path<u32>,
) -> Response {
    let result = state.lock().map(|ws| {
        ws.timetable
            .week(week)
            .map(|data| place_schedules(&ws.geometry, data))
    });
    match result {
        Ok(Some(placed)) => Json(placed).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, format!("no week {week}")).into_response(),
        Err(e) => error_page(StatusCode::INTERNAL_SERVER_ERROR, e).into_response(),
    }
}

fn place_schedules(geometry: &GridGeometry, data: &WeekData) -> Vec<PlacedSchedule> {
    data.schedules
        .iter()
        .map(|schedule| PlacedSchedule {
            schedule: schedule.clone(),
            block: geometry.layout(schedule),
        })
        .collect()
}

fn render_timetable(ws: &Workspace, error: Option<String>) -> Markup {
    let week = ws.timetable.current_week();
    let data = ws.timetable.current_week_data();
    let body = html! {
        div.week-header {
            a href=(format!("/?week={}", week.saturating_sub(1))) { "‹" }
            h1 {
                "Week " (week)
            }
            a href=(format!("/?week={}", week.saturating_add(1))) { "›" }
        }
        @if let Some(error) = &error {
            div.alert {
                (error)
            }
        }
        @match data {
            Some(data) => {
                p.dates {
                    (data.start_date.to_string()) " – " (data.end_date.to_string())
                }
                (render_grid(&ws.geometry, data))
                (render_add_form(week))
            }
            None => {
                p.empty {
                    "No timetable for this week."
                }
            }
        }
    };
    page_template(&format!("Week {week}"), body)
}

fn render_grid(geometry: &GridGeometry, data: &WeekData) -> Markup {
    let grid_style = format!(
        "width: {:.1}px; height: {:.1}px;",
        geometry.grid_width(),
        geometry.grid_height()
    );
    html! {
        div.timetable {
            div.day-headers style=(format!("width: {:.1}px;", geometry.grid_width())) {
                @for day in Day::ALL {
                    div.day-header style=(format!("left: {:.1}px; width: {:.1}px;", geometry.left(day), geometry.column_width())) {
                        (day.short_name())
                    }
                }
            }
            div.grid-body {
                div.hours {
                    @for (time, top) in geometry.hour_marks() {
                        div.hour style=(format!("top: {top:.1}px;")) {
                            (time.to_string())
                        }
                    }
                }
                div.grid style=(grid_style) {
                    @for (_, top) in geometry.hour_marks() {
                        div.hour-line style=(format!("top: {top:.1}px;")) {}
                    }
                    @for schedule in &data.schedules {
                        (render_block(geometry, data.week, schedule))
                    }
                }
            }
        }
    }
}

fn render_block(geometry: &GridGeometry, week: u32, schedule: &ClassSchedule) -> Markup {
    let block = geometry.layout(schedule);
    let style = format!(
        "top: {:.1}px; left: {:.1}px; width: {:.1}px; height: {:.1}px;",
        block.top, block.left, block.width, block.height
    );
    html! {
        div class=(format!("class-block color-{}", schedule.color_index)) style=(style) title=(format!("{} ({} min)", schedule.professor, schedule.duration_minutes())) {
            div.class-name { (schedule.name) }
            div.class-time { (schedule.start_time.to_string()) "–" (schedule.end_time.to_string()) }
            div.class-location { (schedule.location) }
            form action="/schedules/delete" method="post" {
                input type="hidden" name="week" value=(week);
                input type="hidden" name="id" value=(schedule.id.as_str());
                input.delete type="submit" value="×" title="Delete";
            }
        }
    }
}

fn render_add_form(week: u32) -> Markup {
    html! {
        form.add-class action="/schedules" method="post" {
            h2 { "Add class" }
            input type="hidden" name="week" value=(week);
            label {
                "Day "
                select name="day" {
                    @for day in Day::ALL {
                        option value=(day.index()) { (day.short_name()) }
                    }
                }
            }
            label { "Start " input type="time" name="start_time" value="09:00"; }
            label { "End " input type="time" name="end_time" value="10:00"; }
            label { "Class " input type="text" name="name"; }
            label { "Professor " input type="text" name="professor"; }
            label { "Location " input type="text" name="location"; }
            input type="submit" value="Add";
        }
    }
}
