//! Request dispatch and route handlers.
//!
//! Every inbound request enters through [`dispatch`]:
//!
//! 1. Unrecognized path: 200 `text/html` with the API help envelope (a
//!    fallback, not a true error).
//! 2. Matched route: `application/json`, default 200, table-driven lookup
//!    on `(method, route name)`. A matched path with no handler for the
//!    method is an explicit [`Outcome::Unhandled`] pass-through (200,
//!    empty body).
//! 3. Any handler error becomes HTTP 401 with
//!    `{"status":"Error","message":[<message>,<trace>]}` — the sole error
//!    code of the surface, not semantically "unauthorized".
//!
//! Handlers never handle errors locally; they bubble `DispatchError` to
//! this boundary.

use axum::body::{to_bytes, Bytes};
use axum::extract::{Request, State};
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use panel_core::{joins, percent_from_raw, PanelStore};

use crate::error::DispatchError;
use crate::routes::{RouteMatch, RouteTable};
use crate::AppState;

/// Upper bound on accepted request bodies.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Body of the holamundo POST request.
#[derive(Debug, Clone, Deserialize)]
pub struct TextBody {
    pub text: String,
}

/// Body of the postslider POST request.
#[derive(Debug, Clone, Deserialize)]
pub struct SliderBody {
    pub value: u16,
}

/// One button's state in the interlock report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ButtonStatus {
    pub button: bool,
}

/// Reply of the interlockstatus route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterlockStatus {
    pub status: Vec<ButtonStatus>,
}

/// Generic error/help envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope {
    pub status: String,
    pub message: Vec<String>,
}

/// Result of the dispatch table lookup.
///
/// `Unhandled` is the explicit default for a matched route with no handler
/// for the request method; it renders as 200 with an empty body.
#[derive(Debug)]
enum Outcome {
    Handled(String),
    Unhandled,
}

/// Single entry point for every inbound request.
pub async fn dispatch(State(state): State<AppState>, req: Request) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    debug!(%method, %path, "inbound request");

    let Some(matched) = state.routes.resolve(&path) else {
        return help_reply(&state.routes);
    };

    let body = match to_bytes(req.into_body(), MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => return error_reply(&DispatchError::Body(e.to_string())),
    };

    match handle_route(&state, &method, &matched, &body).await {
        Ok(Outcome::Handled(reply)) => json_reply(reply),
        Ok(Outcome::Unhandled) => {
            debug!(%method, route = matched.name, "no handler for method, passing through");
            json_reply(String::new())
        }
        Err(e) => {
            error!(%method, route = matched.name, error = %e, "request handler failed");
            error_reply(&e)
        }
    }
}

/// Table-driven handler lookup on `(method, route name)`.
async fn handle_route(
    state: &AppState,
    method: &Method,
    matched: &RouteMatch,
    body: &Bytes,
) -> Result<Outcome, DispatchError> {
    match matched.name.to_ascii_uppercase().as_str() {
        "HELLOWORLD" if *method == Method::GET => {
            let (_, data) = matched
                .variable
                .clone()
                .ok_or(DispatchError::MissingVariable("data"))?;
            state
                .panel
                .write()
                .await
                .set_string(joins::MESSAGE_TEXT, &data);
            state.log.append(&data)?;
            info!(%data, "helloworld message forwarded to panel");
            // Plain-text reply on a JSON content type, kept as-is.
            Ok(Outcome::Handled("Hello Atlanta!".to_string()))
        }

        "INTERLOCKSTATUS" if *method == Method::GET => {
            let panel = state.panel.read().await;
            let reply = InterlockStatus {
                status: joins::INTERLOCK
                    .iter()
                    .map(|&join| ButtonStatus {
                        button: panel.boolean(join),
                    })
                    .collect(),
            };
            Ok(Outcome::Handled(serde_json::to_string(&reply)?))
        }

        "GETSLIDER" if *method == Method::GET => {
            let raw = state.panel.read().await.ushort(joins::SLIDER_LEVEL);
            let percent = percent_from_raw(raw);
            // The embedded % is part of the companion-UI contract even
            // though it makes the body invalid JSON.
            Ok(Outcome::Handled(format!("{{\"value\": {percent}%}}")))
        }

        "LOG" if *method == Method::GET => {
            let contents = state.log.read_all()?;
            // Raw contents interpolated unescaped; a fresh file yields
            // {"log:": ""}.
            Ok(Outcome::Handled(format!("{{\"log:\": \"{contents}\"}}")))
        }

        "HOLAMUNDO" if *method == Method::POST => {
            let payload: TextBody = serde_json::from_slice(body)?;
            state.log.append(&payload.text)?;
            // Echo the panel's current button state, not the request.
            let button = state.panel.read().await.boolean(joins::ECHO_BUTTON);
            Ok(Outcome::Handled(serde_json::to_string(&ButtonStatus {
                button,
            })?))
        }

        "POSTSLIDER" if *method == Method::POST => {
            let payload: SliderBody = serde_json::from_slice(body)?;
            state.log.append(&payload.value.to_string())?;
            state
                .panel
                .write()
                .await
                .set_ushort(joins::SLIDER_LEVEL, percent_from_raw(payload.value));
            // The reply echoes the raw submitted value, unscaled.
            Ok(Outcome::Handled(format!(
                "{{\"statusvalue\": \"{}\"}}",
                payload.value
            )))
        }

        _ => Ok(Outcome::Unhandled),
    }
}

/// 200 `application/json` reply with the given body.
fn json_reply(body: String) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

/// API help fallback for unrecognized paths: 200, `text/html`.
fn help_reply(routes: &RouteTable) -> Response {
    let envelope = ApiEnvelope {
        status: "Error".to_string(),
        message: api_help(routes),
    };
    let body = serde_json::to_string_pretty(&envelope).unwrap_or_default();
    ([(header::CONTENT_TYPE, "text/html")], body).into_response()
}

/// Map a handler failure to the single wire-visible error shape.
fn error_reply(error: &DispatchError) -> Response {
    let envelope = ApiEnvelope {
        status: "Error".to_string(),
        message: vec![
            format!("Message: {error}"),
            format!("Trace: {error:?}"),
        ],
    };
    let body = serde_json::to_string_pretty(&envelope).unwrap_or_default();
    (
        StatusCode::UNAUTHORIZED,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response()
}

/// Help lines listing every registered route.
fn api_help(routes: &RouteTable) -> Vec<String> {
    routes
        .routes()
        .iter()
        .map(|route| {
            let methods: Vec<&str> = route.methods.iter().map(Method::as_str).collect();
            format!("[{}] {}", methods.join(","), route.pattern)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::RouteTable;

    #[test]
    fn test_api_help_lists_all_routes() {
        let table = RouteTable::standard("");
        let help = api_help(&table);
        assert_eq!(help.len(), 6);
        assert!(help.contains(&"[GET] helloworld/{data}".to_string()));
        assert!(help.contains(&"[POST] postslider".to_string()));
    }

    #[test]
    fn test_slider_body_rejects_out_of_range() {
        assert!(serde_json::from_str::<SliderBody>(r#"{"value": 65535}"#).is_ok());
        assert!(serde_json::from_str::<SliderBody>(r#"{"value": 65536}"#).is_err());
        assert!(serde_json::from_str::<SliderBody>(r#"{"value": -1}"#).is_err());
    }

    #[test]
    fn test_interlock_reply_shape() {
        let reply = InterlockStatus {
            status: vec![
                ButtonStatus { button: true },
                ButtonStatus { button: false },
                ButtonStatus { button: false },
            ],
        };
        assert_eq!(
            serde_json::to_string(&reply).unwrap(),
            r#"{"status":[{"button":true},{"button":false},{"button":false}]}"#
        );
    }
}
