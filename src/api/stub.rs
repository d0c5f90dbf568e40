//! In-memory transport that serves canned responses and records every request.

use serde_json::Value;
use std::cell::RefCell;

use super::transport::{ApiRequest, Transport};
use crate::error::{FmError, Result};

enum Reply {
    Json(Value),
    Status(u16, String),
}

struct Route {
    method: String,
    path: String,
    reply: Reply,
}

#[derive(Default)]
pub struct StubTransport {
    routes: Vec<Route>,
    requests: RefCell<Vec<ApiRequest>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method path` with a 2xx JSON body.
    pub fn on(mut self, method: &str, path: &str, body: Value) -> Self {
        self.routes.push(Route {
            method: method.to_string(),
            path: path.to_string(),
            reply: Reply::Json(body),
        });
        self
    }

    /// Answer `method path` with a non-2xx status and raw body.
    pub fn fail(mut self, method: &str, path: &str, status: u16, body: &str) -> Self {
        self.routes.push(Route {
            method: method.to_string(),
            path: path.to_string(),
            reply: Reply::Status(status, body.to_string()),
        });
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    /// Recorded requests rendered as `METHOD /path`.
    pub fn calls(&self) -> Vec<String> {
        self.requests.borrow().iter().map(ToString::to_string).collect()
    }

    pub fn write_count(&self) -> usize {
        self.requests.borrow().iter().filter(|r| r.is_write()).count()
    }
}

impl Transport for StubTransport {
    fn send(&self, request: &ApiRequest) -> Result<Value> {
        self.requests.borrow_mut().push(request.clone());
        let path = request.path();
        let route = self
            .routes
            .iter()
            .find(|r| r.method == request.method.as_str() && r.path == path);
        match route.map(|r| &r.reply) {
            Some(Reply::Json(body)) => Ok(body.clone()),
            Some(Reply::Status(status, body)) => {
                Err(FmError::Api { status: *status, body: body.clone() })
            }
            None => Err(FmError::Api { status: 404, body: format!("no stub for {request}") }),
        }
    }
}
