//! Request dispatch module
//!
//! Entry point for HTTP request processing: method validation, body
//! collection, URL parsing, and the verb-by-verb binding of routes to store
//! operations. Every branch produces exactly one response.

use http_body_util::{BodyExt, Full};
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::convert::Infallible;
use std::sync::Arc;

use crate::config::AppState;
use crate::http;
use crate::logger;
use crate::routing::{parse_path, RouteDescriptor};
use crate::store::{
    AnimalPayload, CustomerPayload, EmployeePayload, EntryPayload, LocationPayload, Store,
};

use super::resources::Resource;

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let target = match req.uri().query() {
        Some(q) => format!("{}?{}", req.uri().path(), q),
        None => req.uri().path().to_string(),
    };

    // 1. Preflight requests are answered before any body or route processing
    if method == Method::OPTIONS {
        let response = http::options_response();
        log_access(&state, &method, &target, &response);
        return Ok(response);
    }

    // 2. Check HTTP method
    if let Some(response) = check_http_method(&method) {
        log_access(&state, &method, &target, &response);
        return Ok(response);
    }

    // 3. Check body size
    if let Some(response) = check_body_size(&req, state.config.http.max_body_size) {
        log_access(&state, &method, &target, &response);
        return Ok(response);
    }

    // 4. Collect the body, then bind verb + route to a store operation
    let body = match req.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            logger::log_error(&format!("Failed to read request body: {e}"));
            let response = http::bad_request("failed to read request body");
            log_access(&state, &method, &target, &response);
            return Ok(response);
        }
    };

    let response = dispatch(&method, &target, &body, &state.store).await;
    log_access(&state, &method, &target, &response);
    Ok(response)
}

/// Bind an HTTP verb and a raw request target to one store operation.
///
/// Unknown resource names get 404 on every verb; a known resource asked for
/// a verb outside its table gets 405 with an accurate `Allow` header.
pub async fn dispatch(
    method: &Method,
    target: &str,
    body: &Bytes,
    store: &Store,
) -> Response<Full<Bytes>> {
    let route = match parse_path(target) {
        Ok(route) => route,
        Err(e) => return http::bad_request(&e.to_string()),
    };

    let Some(resource) = Resource::from_name(route.resource()) else {
        return http::not_found();
    };

    if !resource.allowed_methods().contains(method) {
        return http::method_not_allowed(&resource.allow_header());
    }

    match method {
        &Method::GET => handle_get(resource, &route, store).await,
        &Method::POST => handle_post(resource, &route, body, store).await,
        &Method::PUT => handle_put(resource, &route, body, store).await,
        &Method::DELETE => handle_delete(resource, &route, store).await,
        _ => http::method_not_allowed(&resource.allow_header()),
    }
}

/// Reject verbs outside the server's surface before touching the body
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    match method {
        &Method::GET | &Method::POST | &Method::PUT | &Method::DELETE => None,
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::method_not_allowed("GET, POST, PUT, DELETE, OPTIONS"))
        }
    }
}

/// Reject oversized bodies from the declared Content-Length before reading
/// them. An absent or unparseable header skips the check.
fn check_body_size(
    req: &Request<hyper::body::Incoming>,
    max_body_size: u64,
) -> Option<Response<Full<Bytes>>> {
    let declared = req
        .headers()
        .get("content-length")?
        .to_str()
        .ok()?
        .parse::<u64>()
        .ok()?;

    if declared > max_body_size {
        logger::log_warning(&format!(
            "Request body too large: {declared} bytes (max: {max_body_size})"
        ));
        return Some(http::payload_too_large());
    }
    None
}

fn log_access(state: &AppState, method: &Method, target: &str, response: &Response<Full<Bytes>>) {
    if state.config.logging.access_log {
        let body_bytes = response.body().size_hint().exact().unwrap_or(0);
        logger::log_access(
            method.as_str(),
            target,
            response.status().as_u16(),
            body_bytes,
        );
    }
}

// ---- verb handlers -------------------------------------------------------

async fn handle_get(
    resource: Resource,
    route: &RouteDescriptor,
    store: &Store,
) -> Response<Full<Bytes>> {
    match route {
        RouteDescriptor::Path { id: Some(id), .. } => single(resource, *id, store).await,
        RouteDescriptor::Path { .. } => list(resource, store).await,
        RouteDescriptor::Query { key, value, .. } => filter(resource, key, value, store).await,
    }
}

async fn handle_post(
    resource: Resource,
    route: &RouteDescriptor,
    body: &Bytes,
    store: &Store,
) -> Response<Full<Bytes>> {
    if !matches!(route, RouteDescriptor::Path { id: None, .. }) {
        return http::bad_request("create takes a bare /resource path");
    }

    match resource {
        Resource::Entries => match parse_body::<EntryPayload>(body) {
            Ok(payload) => created(store.create_entry(&payload).await),
            Err(response) => response,
        },
        Resource::Animals => match parse_body::<AnimalPayload>(body) {
            Ok(payload) => created(store.create_animal(payload).await),
            Err(response) => response,
        },
        Resource::Locations => match parse_body::<LocationPayload>(body) {
            Ok(payload) => created(store.create_location(payload).await),
            Err(response) => response,
        },
        Resource::Customers => match parse_body::<CustomerPayload>(body) {
            Ok(payload) => created(store.create_customer(payload).await),
            Err(response) => response,
        },
        Resource::Employees => match parse_body::<EmployeePayload>(body) {
            Ok(payload) => created(store.create_employee(payload).await),
            Err(response) => response,
        },
        Resource::Moods => http::method_not_allowed(&resource.allow_header()),
    }
}

async fn handle_put(
    resource: Resource,
    route: &RouteDescriptor,
    body: &Bytes,
    store: &Store,
) -> Response<Full<Bytes>> {
    let RouteDescriptor::Path { id: Some(id), .. } = route else {
        return http::bad_request("update requires /resource/{id}");
    };

    match resource {
        Resource::Entries => match parse_body::<EntryPayload>(body) {
            Ok(payload) => updated(store.update_entry(*id, &payload).await),
            Err(response) => response,
        },
        Resource::Animals => match parse_body::<AnimalPayload>(body) {
            Ok(payload) => updated(store.update_animal(*id, &payload).await),
            Err(response) => response,
        },
        Resource::Locations => match parse_body::<LocationPayload>(body) {
            Ok(payload) => updated(store.update_location(*id, &payload).await),
            Err(response) => response,
        },
        Resource::Customers => match parse_body::<CustomerPayload>(body) {
            Ok(payload) => updated(store.update_customer(*id, &payload).await),
            Err(response) => response,
        },
        Resource::Employees => match parse_body::<EmployeePayload>(body) {
            Ok(payload) => updated(store.update_employee(*id, &payload).await),
            Err(response) => response,
        },
        Resource::Moods => http::method_not_allowed(&resource.allow_header()),
    }
}

async fn handle_delete(
    resource: Resource,
    route: &RouteDescriptor,
    store: &Store,
) -> Response<Full<Bytes>> {
    let RouteDescriptor::Path { id: Some(id), .. } = route else {
        return http::bad_request("delete requires /resource/{id}");
    };

    match resource {
        Resource::Entries => deleted(store.delete_entry(*id).await),
        Resource::Animals => deleted(store.delete_animal(*id).await),
        Resource::Locations => deleted(store.delete_location(*id).await),
        Resource::Customers => deleted(store.delete_customer(*id).await),
        Resource::Employees => deleted(store.delete_employee(*id).await),
        Resource::Moods => http::method_not_allowed(&Resource::Moods.allow_header()),
    }
}

// ---- read operations -----------------------------------------------------

async fn list(resource: Resource, store: &Store) -> Response<Full<Bytes>> {
    match resource {
        Resource::Entries => many(store.list_entries().await),
        Resource::Moods => many(store.list_moods().await),
        Resource::Animals => many(store.list_animals().await),
        Resource::Locations => many(store.list_locations().await),
        Resource::Customers => many(store.list_customers().await),
        Resource::Employees => many(store.list_employees().await),
    }
}

async fn single(resource: Resource, id: i64, store: &Store) -> Response<Full<Bytes>> {
    match resource {
        Resource::Entries => one(store.entry_by_id(id).await),
        Resource::Moods => one(store.mood_by_id(id).await),
        Resource::Animals => one(store.animal_by_id(id).await),
        Resource::Locations => one(store.location_by_id(id).await),
        Resource::Customers => one(store.customer_by_id(id).await),
        Resource::Employees => one(store.employee_by_id(id).await),
    }
}

async fn filter(
    resource: Resource,
    key: &str,
    value: &str,
    store: &Store,
) -> Response<Full<Bytes>> {
    match (resource, key) {
        (Resource::Entries, "mood_id") => match numeric(value, "mood_id") {
            Ok(mood_id) => many(store.entries_by_mood(mood_id).await),
            Err(response) => response,
        },
        (Resource::Entries, "q") => many(store.search_entries(value).await),
        (Resource::Animals, "location_id") => match numeric(value, "location_id") {
            Ok(location_id) => many(store.animals_by_location(location_id).await),
            Err(response) => response,
        },
        (Resource::Employees, "location_id") => match numeric(value, "location_id") {
            Ok(location_id) => many(store.employees_by_location(location_id).await),
            Err(response) => response,
        },
        (Resource::Customers, "email") => many(store.customers_by_email(value).await),
        _ => http::bad_request(&format!(
            "unsupported filter '{key}' for /{}",
            resource.name()
        )),
    }
}

// ---- response shaping ----------------------------------------------------

fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, Response<Full<Bytes>>> {
    serde_json::from_slice(body).map_err(|e| http::bad_request(&format!("invalid JSON body: {e}")))
}

fn numeric(value: &str, key: &str) -> Result<i64, Response<Full<Bytes>>> {
    value
        .parse()
        .map_err(|_| http::bad_request(&format!("{key} must be an integer")))
}

fn many<T: Serialize>(result: Result<Vec<T>, sqlx::Error>) -> Response<Full<Bytes>> {
    match result {
        Ok(rows) => http::json_response(StatusCode::OK, &rows),
        Err(e) => store_failure(&e),
    }
}

fn one<T: Serialize>(result: Result<Option<T>, sqlx::Error>) -> Response<Full<Bytes>> {
    match result {
        Ok(Some(row)) => http::json_response(StatusCode::OK, &row),
        Ok(None) => http::not_found(),
        Err(e) => store_failure(&e),
    }
}

fn created<T: Serialize>(result: Result<T, sqlx::Error>) -> Response<Full<Bytes>> {
    match result {
        Ok(row) => http::json_response(StatusCode::CREATED, &row),
        Err(e) => store_failure(&e),
    }
}

fn updated(result: Result<bool, sqlx::Error>) -> Response<Full<Bytes>> {
    match result {
        Ok(true) => http::empty_response(StatusCode::NO_CONTENT),
        Ok(false) => http::empty_response(StatusCode::NOT_FOUND),
        Err(e) => store_failure(&e),
    }
}

fn deleted(result: Result<(), sqlx::Error>) -> Response<Full<Bytes>> {
    match result {
        Ok(()) => http::empty_response(StatusCode::NO_CONTENT),
        Err(e) => store_failure(&e),
    }
}

fn store_failure(e: &sqlx::Error) -> Response<Full<Bytes>> {
    logger::log_error(&format!("Store operation failed: {e}"));
    http::server_error()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    async fn fixture() -> (Store, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path().join("journal.sqlite3"));
        store.bootstrap().await.unwrap();
        (store, dir)
    }

    async fn get(store: &Store, target: &str) -> Response<Full<Bytes>> {
        dispatch(&Method::GET, target, &Bytes::new(), store).await
    }

    async fn send(
        store: &Store,
        method: Method,
        target: &str,
        body: &Value,
    ) -> Response<Full<Bytes>> {
        let bytes = Bytes::from(serde_json::to_vec(body).unwrap());
        dispatch(&method, target, &bytes, store).await
    }

    async fn body_json(response: Response<Full<Bytes>>) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn entry_body(concept: &str, text: &str, mood_id: i64) -> Value {
        json!({
            "concept": concept,
            "entry": text,
            "date": "2024-01-01",
            "mood_id": mood_id,
        })
    }

    #[tokio::test]
    async fn test_list_entries_attaches_moods() {
        let (store, _dir) = fixture().await;
        store
            .create_entry(&EntryPayload {
                concept: "rust".to_string(),
                entry: "traits".to_string(),
                date: "2024-01-01".to_string(),
                mood_id: 1,
            })
            .await
            .unwrap();
        store
            .create_entry(&EntryPayload {
                concept: "sql".to_string(),
                entry: "joins".to_string(),
                date: "2024-01-02".to_string(),
                mood_id: 2,
            })
            .await
            .unwrap();

        let response = get(&store, "/entries").await;
        assert_eq!(response.status(), StatusCode::OK);

        let rows = body_json(response).await;
        let rows = rows.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["mood"], json!({"id": 1, "label": "happy"}));
        assert_eq!(rows[1]["mood"], json!({"id": 2, "label": "sad"}));
    }

    #[tokio::test]
    async fn test_create_then_read_round_trip() {
        let (store, _dir) = fixture().await;

        let response = send(
            &store,
            Method::POST,
            "/entries",
            &entry_body("x", "y", 1),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        let id = created["id"].as_i64().unwrap();

        let response = get(&store, &format!("/entries/{id}")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let fetched = body_json(response).await;
        assert_eq!(fetched["concept"], "x");
        assert_eq!(fetched["entry"], "y");
        assert_eq!(fetched["date"], "2024-01-01");
        assert_eq!(fetched["mood"]["id"], 1);
    }

    #[tokio::test]
    async fn test_get_missing_entry_is_404() {
        let (store, _dir) = fixture().await;
        let response = get(&store, "/entries/42").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_filter_customers_by_email() {
        let (store, _dir) = fixture().await;
        for (name, email) in [
            ("Jenna Solis", "jenna@solis.com"),
            ("Ryan Tanay", "ryan@tanay.com"),
        ] {
            send(
                &store,
                Method::POST,
                "/customers",
                &json!({"name": name, "address": "100 Main St", "email": email}),
            )
            .await;
        }

        let response = get(&store, "/customers?email=jenna@solis.com").await;
        assert_eq!(response.status(), StatusCode::OK);
        let rows = body_json(response).await;
        let rows = rows.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["name"], "Jenna Solis");
    }

    #[tokio::test]
    async fn test_filter_entries_by_mood() {
        let (store, _dir) = fixture().await;
        send(&store, Method::POST, "/entries", &entry_body("a", "b", 1)).await;
        send(&store, Method::POST, "/entries", &entry_body("c", "d", 2)).await;

        let response = get(&store, "/entries?mood_id=2").await;
        let rows = body_json(response).await;
        assert_eq!(rows.as_array().unwrap().len(), 1);
        assert_eq!(rows[0]["concept"], "c");
    }

    #[tokio::test]
    async fn test_update_missing_id_is_404_and_creates_nothing() {
        let (store, _dir) = fixture().await;
        let response = send(
            &store,
            Method::PUT,
            "/entries/99",
            &entry_body("x", "y", 1),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(store.list_entries().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_existing_entry_is_204() {
        let (store, _dir) = fixture().await;
        let response = send(&store, Method::POST, "/entries", &entry_body("x", "y", 1)).await;
        let id = body_json(response).await["id"].as_i64().unwrap();

        let response = send(
            &store,
            Method::PUT,
            &format!("/entries/{id}"),
            &entry_body("x", "revised", 2),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let fetched = body_json(get(&store, &format!("/entries/{id}")).await).await;
        assert_eq!(fetched["entry"], "revised");
        assert_eq!(fetched["mood"]["label"], "sad");
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let (store, _dir) = fixture().await;
        let response = send(&store, Method::POST, "/entries", &entry_body("x", "y", 1)).await;
        let id = body_json(response).await["id"].as_i64().unwrap();
        let target = format!("/entries/{id}");

        let first = dispatch(&Method::DELETE, &target, &Bytes::new(), &store).await;
        assert_eq!(first.status(), StatusCode::NO_CONTENT);

        // Deleting the same row again is still a 204, never an error
        let second = dispatch(&Method::DELETE, &target, &Bytes::new(), &store).await;
        assert_eq!(second.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_unknown_resource_is_404() {
        let (store, _dir) = fixture().await;
        let response = get(&store, "/widgets").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(&store, Method::POST, "/widgets", &json!({})).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_post_moods_is_405_with_allow() {
        let (store, _dir) = fixture().await;
        let response = send(&store, Method::POST, "/moods", &json!({"label": "tired"})).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers().get("Allow").unwrap(), "GET, OPTIONS");
    }

    #[tokio::test]
    async fn test_malformed_body_is_400() {
        let (store, _dir) = fixture().await;
        let body = Bytes::from_static(b"{not json");
        let response = dispatch(&Method::POST, "/entries", &body, &store).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_multi_parameter_query_is_400() {
        let (store, _dir) = fixture().await;
        let response = get(&store, "/animals?location_id=1&status=treated").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unsupported_filter_key_is_400() {
        let (store, _dir) = fixture().await;
        let response = get(&store, "/customers?name=Jenna").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_put_without_id_is_400() {
        let (store, _dir) = fixture().await;
        let response = send(&store, Method::PUT, "/entries", &entry_body("x", "y", 1)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_moods_are_listable_and_seeded() {
        let (store, _dir) = fixture().await;
        let response = get(&store, "/moods").await;
        assert_eq!(response.status(), StatusCode::OK);
        let rows = body_json(response).await;
        let labels: Vec<&str> = rows
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["label"].as_str().unwrap())
            .collect();
        assert_eq!(labels, vec!["happy", "sad", "angry", "ok"]);
    }
}
