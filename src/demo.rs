//! Sample routes served by the `route-dispatch` binary.

use std::path::PathBuf;
use std::sync::Arc;

use axum::http::{header, HeaderMap, HeaderValue, Method, StatusCode};
use route_dispatch::dispatch::{HandlerResult, Params};
use route_dispatch::routing::{Bindings, RouteRecord, RouteRegistry};
use route_dispatch::Value;

#[derive(Debug, Clone)]
struct User {
    id: i64,
    name: &'static str,
    state: &'static str,
}

impl User {
    fn to_value(&self) -> Value {
        Value::map([
            ("id", Value::Int(self.id)),
            ("name", Value::from(self.name)),
            ("state", Value::from(self.state)),
        ])
    }
}

fn users() -> Arc<Vec<User>> {
    Arc::new(vec![
        User { id: 1, name: "ada", state: "active" },
        User { id: 2, name: "grace", state: "active" },
        User { id: 3, name: "edsger", state: "archived" },
    ])
}

/// Register the sample modules. `files_dir` backs the file download route.
pub fn register(registry: &mut RouteRegistry, files_dir: PathBuf) {
    registry.symbols(["active", "archived"]);

    let all = users();
    let by_id = Arc::clone(&all);
    let by_state = Arc::clone(&all);
    let csv = Arc::clone(&all);

    registry
        .module("health")
        .route(
            RouteRecord::new("health", Method::GET, "/health")
                .describe("Liveness probe")
                .tag("public"),
            |_: &Bindings, _: &Params| HandlerResult::Ok,
        );

    registry
        .module("users")
        .route(
            RouteRecord::new("list_users", Method::GET, "/users")
                .describe("List users")
                .tag("public"),
            move |_: &Bindings, _: &Params| {
                HandlerResult::body(Value::List(all.iter().map(User::to_value).collect()))
            },
        )
        .route(
            RouteRecord::new("get_user", Method::GET, "/users/:id:int")
                .describe("Fetch a user by id")
                .tag("public"),
            move |b: &Bindings, _: &Params| {
                let id = b.int("id").unwrap_or_default();
                match by_id.iter().find(|u| u.id == id) {
                    Some(user) => HandlerResult::body(user.to_value()),
                    None => HandlerResult::status(StatusCode::NOT_FOUND, "no such user"),
                }
            },
        )
        .route(
            RouteRecord::new("users_by_state", Method::GET, "/users/state/:state:atom")
                .describe("List users in a state")
                .tag("public"),
            move |b: &Bindings, _: &Params| {
                let state = b.atom("state").map(|s| s.as_str()).unwrap_or_default();
                HandlerResult::body(Value::List(
                    by_state
                        .iter()
                        .filter(|u| u.state == state)
                        .map(User::to_value)
                        .collect(),
                ))
            },
        )
        .route(
            RouteRecord::new("create_user", Method::POST, "/users")
                .describe("Create a user from a JSON body")
                .tag("public"),
            |_: &Bindings, p: &Params| match p.text("name") {
                Some(name) if !name.is_empty() => {
                    let mut headers = HeaderMap::new();
                    headers.insert(header::LOCATION, HeaderValue::from_static("/users/4"));
                    HandlerResult::StatusWithHeaders {
                        status: StatusCode::CREATED,
                        headers,
                        body: Value::map([("id", Value::Int(4)), ("name", Value::from(name))]),
                    }
                }
                _ => HandlerResult::status(StatusCode::UNPROCESSABLE_ENTITY, "name is required"),
            },
        )
        .route(
            RouteRecord::new("export_users", Method::GET, "/export/users.csv")
                .describe("Users as CSV")
                .tag("internal"),
            move |_: &Bindings, _: &Params| {
                let mut body = String::from("id,name,state\n");
                for u in csv.iter() {
                    body.push_str(&format!("{},{},{}\n", u.id, u.name, u.state));
                }
                let mut headers = HeaderMap::new();
                headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/csv"));
                HandlerResult::raw(headers, body)
            },
        );

    registry
        .module("files")
        .route(
            RouteRecord::new("download", Method::GET, "/files/:name")
                .describe("Download a file")
                .tag("internal"),
            move |b: &Bindings, _: &Params| {
                let name = b.text("name").unwrap_or_default();
                if name.starts_with('.') {
                    return HandlerResult::status(StatusCode::BAD_REQUEST, "invalid file name");
                }
                let mut headers = HeaderMap::new();
                headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/octet-stream"));
                HandlerResult::file(headers, files_dir.join(name))
            },
        );

    registry
        .module("debug")
        .route(
            RouteRecord::new("echo", Method::POST, "/debug/echo/:tag")
                .describe("Echo bindings and params")
                .tag("internal"),
            |b: &Bindings, p: &Params| {
                HandlerResult::body(Value::map([("bindings", b.to_value()), ("params", p.to_value())]))
            },
        )
        .route(
            RouteRecord::new("fail", Method::GET, "/debug/fail")
                .describe("Always fails")
                .tag("internal"),
            |_: &Bindings, _: &Params| HandlerResult::error("deliberate failure"),
        );
}
