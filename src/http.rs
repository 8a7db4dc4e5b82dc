use axum::extract::Query;
use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::Json;
use axum::Router;
use tokio_util::sync::CancellationToken;

use crate::state::ProgramKind;
use crate::state::StateUpdate;

/// The control page: a single HTML form. Selecting a program or pressing
/// On/Off issues a plain GET with query parameters, which mutates the shared
/// state; the render task notices the change on its next wakeup.
#[derive(Clone)]
struct AppState {
    state: crate::state::StateHandle,
    clock: crate::clock::WallClock,
}

pub async fn run(
    config: crate::config::HttpConfig,
    cancellation_token: CancellationToken,
    state: crate::state::StateHandle,
    clock: crate::clock::WallClock,
) -> Result<(), crate::error::Error> {
    let app = Router::new()
        .route("/", get(control_page))
        .route("/state", get(current_state))
        .with_state(AppState { state, clock });

    let listener =
        tokio::net::TcpListener::bind(config.bind)
            .await
            .map_err(|source| crate::error::Error::HttpBind {
                addr: config.bind,
                source,
            })?;
    tracing::info!(addr = %config.bind, "Control page listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(cancellation_token.cancelled_owned())
        .await
        .map_err(crate::error::Error::HttpServe)
}

#[derive(Debug, serde::Deserialize)]
struct ControlQuery {
    light: Option<String>,
    program: Option<String>,
}

async fn control_page(
    State(app): State<AppState>,
    Query(query): Query<ControlQuery>,
) -> Html<String> {
    let update = StateUpdate {
        light_on: query.light.as_deref().map(|light| light == "on"),
        program: query
            .program
            .as_deref()
            .map(|name| match name.parse::<ProgramKind>() {
                Ok(kind) => Some(kind),
                Err(error) => {
                    tracing::debug!(%error, "Ignoring unknown program name from control page");
                    None
                }
            }),
    };

    if update.light_on.is_some() || update.program.is_some() {
        tracing::debug!(?update, "Applying update from control page");
        app.state.apply_update(update);
    }

    let now = app.clock.is_synced().then(|| app.clock.now_utc());
    Html(render_page(app.state.snapshot(), now))
}

async fn current_state(State(app): State<AppState>) -> Json<crate::state::DeviceState> {
    Json(app.state.snapshot())
}

fn render_page(state: crate::state::DeviceState, now: Option<time::OffsetDateTime>) -> String {
    use std::fmt::Write;

    let light = if state.light_on { "on" } else { "off" };
    let program = state
        .program
        .map(|kind| kind.as_str())
        .unwrap_or("none");

    let current_time = now
        .and_then(|now| {
            now.format(time::macros::format_description!(
                "[year]/[month]/[day] [hour]:[minute]:[second] UTC"
            ))
            .ok()
        })
        .unwrap_or_else(|| String::from("time not yet synchronised"));

    let mut programs = String::new();
    for kind in ProgramKind::ALL {
        let name = kind.as_str();
        let _ = write!(
            programs,
            r#"<div><input type="radio" id="{name}" name="program" value="{name}"><label for="{name}">{name}</label></div>"#
        );
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.2">
    <title>Pico Lights!</title>
</head>
<body>
    <h1>Pico Lights!</h1>

    <p>Current state: light {light}, program {program}</p>

    <p>{current_time}</p>

    <form method="GET">
        <label>Program:</label><br>
        {programs}
        <br>
        <button type="submit" name="light" value="on">On</button>
        <button type="submit" name="light" value="off">Off</button>
    </form>
</body>
</html>
"#
    )
}
