//! End-to-end HTTP tests against the full router backed by the in-memory store.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use hogwarts_school::{app, AppState, InMemoryRepository};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const BODY_LIMIT: usize = 64 * 1024;

fn router() -> Router {
    app(AppState::new(Arc::new(InMemoryRepository::new())), BODY_LIMIT)
}

fn encode(s: &str) -> String {
    s.bytes()
        .map(|b| {
            if b.is_ascii_alphanumeric() {
                (b as char).to_string()
            } else {
                format!("%{:02X}", b)
            }
        })
        .collect()
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), BODY_LIMIT).await.unwrap();
    (status, bytes.to_vec())
}

async fn send_json(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send(router, method, uri, body).await;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_faculty(router: &Router, name: &str, color: &str) -> i64 {
    let (status, body) = send_json(
        router,
        Method::POST,
        "/faculty",
        Some(json!({"name": name, "color": color})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["id"].as_i64().unwrap()
}

async fn create_student(router: &Router, name: &str, age: i32, faculty_id: Option<i64>) -> Value {
    let (status, body) = send_json(
        router,
        Method::POST,
        "/student",
        Some(json!({"name": name, "age": age, "facultyId": faculty_id})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body
}

#[tokio::test]
async fn create_faculty_ignores_client_id() {
    let router = router();
    let (status, body) = send_json(
        &router,
        Method::POST,
        "/faculty",
        Some(json!({"id": 345, "name": "Гриффиндор", "color": "Красный"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": 1, "name": "Гриффиндор", "color": "Красный"}));
}

#[tokio::test]
async fn faculty_listing_filters_and_no_content() {
    let router = router();
    let (status, _) = send(&router, Method::GET, "/faculty", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    create_faculty(&router, "Гриффиндор", "Красный").await;
    create_faculty(&router, "Слизерин", "Зеленый").await;

    let (status, all) = send_json(&router, Method::GET, "/faculty", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 2);

    let uri = format!("/faculty?color={}", encode("зеленый"));
    let (status, by_color) = send_json(&router, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_color[0]["name"], "Слизерин");

    let uri = format!("/faculty?name={}&color={}", encode("Гриффиндор"), encode("Зеленый"));
    let (_, by_name) = send_json(&router, Method::GET, &uri, None).await;
    assert_eq!(by_name.as_array().unwrap().len(), 1);
    assert_eq!(by_name[0]["color"], "Красный");

    let uri = format!("/faculty?name={}", encode("Пуффендуй"));
    let (status, _) = send(&router, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn faculty_read_update_delete() {
    let router = router();
    let id = create_faculty(&router, "Гриффиндор", "Красный").await;

    let (status, body) = send_json(&router, Method::GET, &format!("/faculty/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Гриффиндор");

    let (status, _) = send(&router, Method::GET, "/faculty/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let replacement = json!({"id": id, "name": "Гриффиндор новый", "color": "Красный новый"});
    let (status, body) = send_json(&router, Method::PUT, "/faculty", Some(replacement.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, replacement);

    let (status, body) = send_json(
        &router,
        Method::PUT,
        "/faculty",
        Some(json!({"id": 360, "name": "x", "color": "y"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "faculty_not_found");

    let (status, _) = send(&router, Method::DELETE, &format!("/faculty/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&router, Method::DELETE, &format!("/faculty/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&router, Method::GET, &format!("/faculty/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_without_id_is_bad_request() {
    let router = router();
    let (status, body) = send_json(
        &router,
        Method::PUT,
        "/student",
        Some(json!({"name": "Рон Уизли", "age": 11})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "bad_request");
}

#[tokio::test]
async fn students_by_faculty_name() {
    let router = router();
    let fid = create_faculty(&router, "Гриффиндор", "Красный").await;

    let uri = format!("/faculty/students_by_faculty?name={}", encode("Гриффиндор"));
    let (status, _) = send(&router, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    create_student(&router, "Гарри Поттер", 11, Some(fid)).await;
    create_student(&router, "Гермиона Грейнджер", 12, Some(fid)).await;
    create_student(&router, "Драко Малфой", 11, None).await;

    let (status, body) = send_json(&router, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
    assert_eq!(body[0]["name"], "Гарри Поттер");
    assert_eq!(body[1]["name"], "Гермиона Грейнджер");

    let uri = format!("/faculty/students_by_faculty?name={}", encode("Слизерин"));
    let (status, body) = send_json(&router, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "faculty_not_found");

    let (status, _) = send(&router, Method::GET, "/faculty/students_by_faculty", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn max_length_is_plain_text() {
    let router = router();
    let (status, body) = send(&router, Method::GET, "/faculty/max_length", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8(body).unwrap(), "Список факультетов пуст");

    create_faculty(&router, "Слизерин", "Зеленый").await;
    create_faculty(&router, "Гриффиндор", "Красный").await;
    let (_, body) = send(&router, Method::GET, "/faculty/max_length", None).await;
    assert_eq!(String::from_utf8(body).unwrap(), "Гриффиндор");
}

#[tokio::test]
async fn student_crud_and_filters() {
    let router = router();
    let (status, body) = send_json(
        &router,
        Method::POST,
        "/student",
        Some(json!({"id": 99, "name": "Гарри Поттер", "age": 11})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);
    assert_eq!(body["facultyId"], Value::Null);

    create_student(&router, "Рон Уизли", 11, None).await;
    create_student(&router, "Гермиона Грейнджер", 12, None).await;
    create_student(&router, "Почти Безголовый Ник", 0, None).await;
    create_student(&router, "Кровавый Барон", -2, None).await;

    let (status, body) = send_json(&router, Method::GET, "/student?age=11", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, _) = send(&router, Method::GET, "/student?age=0", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&router, Method::GET, "/student?age=-2", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&router, Method::GET, "/student?minAge=0&maxAge=12", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send_json(&router, Method::GET, "/student?minAge=11&maxAge=12", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (status, _) = send(&router, Method::GET, "/student?minAge=12&maxAge=11", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send_json(&router, Method::GET, "/student?minAge=11", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 5);

    let (status, _) = send(&router, Method::GET, "/student/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&router, Method::GET, "/student/not-a-number", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send_json(
        &router,
        Method::PUT,
        "/student",
        Some(json!({"id": 42, "name": "Никто", "age": 20})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "student_not_found");

    let (status, _) = send(&router, Method::DELETE, "/student/1", None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&router, Method::GET, "/student/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn student_with_unknown_faculty_conflicts() {
    let router = router();
    let (status, body) = send_json(
        &router,
        Method::POST,
        "/student",
        Some(json!({"name": "Гарри Поттер", "age": 11, "facultyId": 7})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "conflict");
}

#[tokio::test]
async fn faculty_by_student_name() {
    let router = router();
    let fid = create_faculty(&router, "Гриффиндор", "Красный").await;
    create_student(&router, "Гарри Поттер", 11, Some(fid)).await;

    let uri = format!("/student/faculty_by_student?name={}", encode("Гарри Поттер"));
    let (status, body) = send_json(&router, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": fid, "name": "Гриффиндор", "color": "Красный"}));

    let uri = format!("/student/faculty_by_student?name={}", encode("Рон Уизли"));
    let (status, _) = send(&router, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn student_aggregates() {
    let router = router();
    let (_, body) = send_json(&router, Method::GET, "/student/count", None).await;
    assert_eq!(body, json!(0));
    let (_, body) = send_json(&router, Method::GET, "/student/average_age_2", None).await;
    assert_eq!(body, json!(0.0));

    for (name, age) in [
        ("Гарри Поттер", 11),
        ("Гермиона Грейнджер", 12),
        ("Рон Уизли", 11),
        ("Джинни Уизли", 10),
        ("Фред Уизли", 13),
        ("Джордж Уизли", 13),
    ] {
        create_student(&router, name, age, None).await;
    }

    let (_, body) = send_json(&router, Method::GET, "/student/count", None).await;
    assert_eq!(body, json!(6));

    let (_, body) = send_json(&router, Method::GET, "/student/average_age", None).await;
    assert_eq!(body, json!(11.666666666666666));
    let (_, body) = send_json(&router, Method::GET, "/student/average_age_2", None).await;
    assert_eq!(body, json!(11.666666666666666));

    let (status, body) = send_json(&router, Method::GET, "/student/five_latest_students", None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![6, 5, 4, 3, 2]);

    let uri = format!("/student/all_names?letter={}", encode("Г"));
    let (status, body) = send_json(&router, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["ГАРРИ", "ГЕРМИОНА"]));

    let (_, body) = send_json(&router, Method::GET, "/student/step_4", None).await;
    assert_eq!(body, json!(500000500000i64));
}

#[tokio::test]
async fn operational_routes() {
    let router = router();
    let (status, body) = send_json(&router, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    assert!(body.get("store").is_none());

    let (status, body) = send_json(&router, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok", "store": "ok"}));

    let (status, body) = send_json(&router, Method::GET, "/version", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "hogwarts-school");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));

    let (status, body) = send_json(&router, Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/student/all_names"].is_object());
    assert!(body["paths"]["/ready"].is_object());
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let router = app(AppState::new(Arc::new(InMemoryRepository::new())), 32);
    let (status, _) = send(
        &router,
        Method::POST,
        "/faculty",
        Some(json!({"name": "Гриффиндор".repeat(10), "color": "Красный"})),
    )
    .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}
