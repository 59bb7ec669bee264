//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::http::{Method, StatusCode};
use route_dispatch::config::DispatchConfig;
use route_dispatch::dispatch::{Dispatcher, HandlerResult, Params};
use route_dispatch::routing::{Bindings, RouteRecord, RouteRegistry};
use route_dispatch::{HttpServer, Value};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Counts handler invocations.
#[derive(Clone, Default)]
pub struct Spy(Arc<AtomicUsize>);

impl Spy {
    pub fn hit(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Registry with a small user API. Every handler bumps `spy`.
pub fn user_registry(spy: &Spy) -> RouteRegistry {
    let mut registry = RouteRegistry::new();
    registry.symbols(["active", "archived"]);

    let (s1, s2, s3, s4) = (spy.clone(), spy.clone(), spy.clone(), spy.clone());
    registry
        .module("users")
        .route(
            RouteRecord::new("get_user", Method::GET, "/users/:id:int")
                .describe("Fetch a user")
                .tag("public"),
            move |b: &Bindings, _: &Params| {
                s1.hit();
                HandlerResult::body(b.to_value())
            },
        )
        .route(
            RouteRecord::new("users_by_state", Method::GET, "/users/state/:state:atom")
                .describe("Users by state")
                .tag("public"),
            move |b: &Bindings, _: &Params| {
                s2.hit();
                HandlerResult::body(b.to_value())
            },
        )
        .route(
            RouteRecord::new("create_user", Method::POST, "/users")
                .describe("Create a user")
                .tag("public"),
            move |_: &Bindings, p: &Params| {
                s3.hit();
                HandlerResult::status(StatusCode::CREATED, p.to_value())
            },
        )
        .route(
            RouteRecord::new("debug_dump", Method::GET, "/debug/dump")
                .describe("Internal dump")
                .tag("internal"),
            move |_: &Bindings, _: &Params| {
                s4.hit();
                HandlerResult::body(Value::from("dump"))
            },
        );
    registry
}

pub fn user_dispatcher(spy: &Spy, excluded: &[String]) -> Dispatcher {
    let registry = user_registry(spy);
    let table = registry.build(excluded).unwrap();
    Dispatcher::new(table, registry.symbol_table())
}

/// A server running on an ephemeral port.
#[allow(dead_code)]
pub struct TestServer {
    pub addr: SocketAddr,
    stop: oneshot::Sender<()>,
    task: JoinHandle<std::io::Result<()>>,
}

#[allow(dead_code)]
impl TestServer {
    /// Resolve the shutdown future and wait for the server to drain.
    pub async fn shutdown(self) -> std::io::Result<()> {
        let _ = self.stop.send(());
        tokio::time::timeout(Duration::from_secs(5), self.task)
            .await
            .expect("server did not stop")
            .expect("server task panicked")
    }
}

/// Serve `dispatcher` on an ephemeral port.
#[allow(dead_code)]
pub async fn start_server(dispatcher: Dispatcher) -> TestServer {
    let mut config = DispatchConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.listener.max_body_size = 4 * 1024;

    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let (stop, stopped) = oneshot::channel::<()>();
    let server = HttpServer::new(&config, dispatcher);
    let task = tokio::spawn(server.run(listener, async move {
        let _ = stopped.await;
    }));

    tokio::time::sleep(Duration::from_millis(50)).await;
    TestServer { addr, stop, task }
}
