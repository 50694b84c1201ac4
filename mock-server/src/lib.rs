use std::{collections::HashMap, time::Duration};

use axum::{
    extract::{Path, Query},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::debug;
use uuid::Uuid;

/// The body every route answers with: a business status plus payload.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Envelope {
    pub status: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Value,
}

impl Envelope {
    pub fn ok(data: Value) -> Self {
        Self {
            status: 200,
            message: None,
            data,
        }
    }

    pub fn failure(status: i64, message: &str) -> Self {
        Self {
            status,
            message: Some(message.to_string()),
            data: Value::Null,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
}

#[derive(Deserialize)]
pub struct SlowQuery {
    #[serde(default)]
    pub ms: u64,
}

pub fn app() -> Router {
    Router::new()
        .route("/api/users", get(list_users))
        .route("/api/notices", get(list_notices))
        .route("/question/{id}", get(get_question))
        .route("/daas/user/login", get(login))
        .route("/daas/auth/user/login", get(login))
        .route("/bi/share", get(share))
        .route("/business/{code}", get(business_status))
        .route("/http/{code}", get(http_status))
        .route("/slow", get(slow))
        .route("/echo", get(echo))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_users(headers: HeaderMap) -> Json<Envelope> {
    if !headers.contains_key(AUTHORIZATION) {
        return Json(Envelope::failure(401, "not logged in"));
    }
    let users = vec![
        User {
            id: Uuid::new_v4(),
            name: "alice".to_string(),
        },
        User {
            id: Uuid::new_v4(),
            name: "bob".to_string(),
        },
    ];
    Json(Envelope::ok(json!(users)))
}

async fn list_notices() -> Json<Envelope> {
    Json(Envelope::ok(json!([
        { "id": Uuid::new_v4(), "title": "maintenance window", "read": false }
    ])))
}

async fn get_question(Path(id): Path<u64>) -> Json<Envelope> {
    Json(Envelope::ok(json!({ "id": id, "title": format!("question {id}") })))
}

async fn login() -> Json<Envelope> {
    Json(Envelope::ok(json!({ "token": Uuid::new_v4().to_string() })))
}

async fn share() -> Json<Envelope> {
    Json(Envelope::ok(json!({ "dashboard": "shared" })))
}

async fn business_status(Path(code): Path<i64>) -> Json<Envelope> {
    if code == 200 {
        return Json(Envelope::ok(Value::Null));
    }
    Json(Envelope::failure(code, &format!("business failure {code}")))
}

async fn http_status(Path(code): Path<u16>) -> Result<Json<Envelope>, (StatusCode, Json<Envelope>)> {
    let status = StatusCode::from_u16(code).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(Envelope::failure(400, "invalid status code")),
        )
    })?;
    if status.is_success() {
        return Ok(Json(Envelope::ok(Value::Null)));
    }
    Err((status, Json(Envelope::failure(i64::from(code), "transport failure"))))
}

async fn slow(Query(query): Query<SlowQuery>) -> Json<Envelope> {
    debug!(ms = query.ms, "delaying response");
    tokio::time::sleep(Duration::from_millis(query.ms)).await;
    Json(Envelope::ok(Value::Null))
}

async fn echo(
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Envelope> {
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    Json(Envelope::ok(json!({
        "query": query,
        "authorization": authorization,
    })))
}
