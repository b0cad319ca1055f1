// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Canned API server responses for exercising kube clients in unit tests.

use http::{Request, Response};
use kube::client::Body;
use kube::Client;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

/// In-process stand-in for the API server, answering GETs by exact path
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<(String, String), (u16, String)>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A mock that already answers discovery for pods, services, namespaces and deployments
    pub fn with_discovery() -> Self {
        Self::new()
            .on_get("/api", 200, &api_versions_json())
            .on_get("/api/v1", 200, &core_resources_json())
            .on_get("/apis", 200, &api_groups_json())
            .on_get("/apis/apps/v1", 200, &apps_resources_json())
    }

    /// Add a response for GET requests matching the exact path (query string ignored)
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(("GET".to_string(), path.to_string()), (status, body.to_string()));
        self
    }

    /// Every request seen so far, as `METHOD path?query`
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    fn find_response(&self, method: &str, path: &str) -> Option<(u16, String)> {
        self.responses
            .lock()
            .unwrap()
            .get(&(method.to_string(), path.to_string()))
            .cloned()
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();
        let path_and_query = req
            .uri()
            .path_and_query()
            .map(|pq| pq.to_string())
            .unwrap_or_else(|| path.clone());
        self.requests
            .lock()
            .unwrap()
            .push(format!("{} {}", method, path_and_query));

        let response = self.find_response(&method, &path);

        Box::pin(async move {
            let (status, body) = response.unwrap_or_else(|| (404, not_found_json("resource", &path)));
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

/// Core API versions (`GET /api`)
pub fn api_versions_json() -> String {
    json!({
        "kind": "APIVersions",
        "versions": ["v1"],
        "serverAddressByClientCIDRs": [
            {"clientCIDR": "0.0.0.0/0", "serverAddress": "10.0.0.1:6443"}
        ]
    })
    .to_string()
}

/// Core v1 resources (`GET /api/v1`)
pub fn core_resources_json() -> String {
    json!({
        "kind": "APIResourceList",
        "groupVersion": "v1",
        "resources": [
            api_resource("pods", "pod", true, "Pod", &["po"]),
            api_resource("pods/log", "", true, "Pod", &[]),
            api_resource("services", "service", true, "Service", &["svc"]),
            api_resource("namespaces", "namespace", false, "Namespace", &["ns"]),
        ]
    })
    .to_string()
}

/// API groups (`GET /apis`)
pub fn api_groups_json() -> String {
    json!({
        "kind": "APIGroupList",
        "apiVersion": "v1",
        "groups": [{
            "name": "apps",
            "versions": [{"groupVersion": "apps/v1", "version": "v1"}],
            "preferredVersion": {"groupVersion": "apps/v1", "version": "v1"}
        }]
    })
    .to_string()
}

/// apps/v1 resources (`GET /apis/apps/v1`)
pub fn apps_resources_json() -> String {
    json!({
        "kind": "APIResourceList",
        "groupVersion": "apps/v1",
        "resources": [
            api_resource("deployments", "deployment", true, "Deployment", &["deploy"]),
            api_resource("deployments/scale", "", true, "Scale", &[]),
        ]
    })
    .to_string()
}

fn api_resource(name: &str, singular: &str, namespaced: bool, kind: &str, short: &[&str]) -> Value {
    json!({
        "name": name,
        "singularName": singular,
        "namespaced": namespaced,
        "kind": kind,
        "verbs": ["get", "list"],
        "shortNames": short
    })
}

/// A pod object as returned by `GET .../pods/{name}`
pub fn pod_json(name: &str, namespace: &str, created: &str) -> Value {
    json!({
        "apiVersion": "v1",
        "kind": "Pod",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "uid": format!("uid-{}", name),
            "creationTimestamp": created
        },
        "spec": {"containers": [{"name": "main", "image": "nginx"}]}
    })
}

/// A list response; items carry no type information, as from a real API server
pub fn list_json(kind: &str, items: Vec<Value>) -> String {
    let items: Vec<Value> = items
        .into_iter()
        .map(|mut item| {
            if let Some(obj) = item.as_object_mut() {
                obj.remove("apiVersion");
                obj.remove("kind");
            }
            item
        })
        .collect();
    json!({
        "apiVersion": "v1",
        "kind": kind,
        "metadata": {"resourceVersion": "100"},
        "items": items
    })
    .to_string()
}

/// Create a 404 not found response
pub fn not_found_json(resource: &str, name: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": format!("{} \"{}\" not found", resource, name),
        "reason": "NotFound",
        "code": 404
    })
    .to_string()
}
