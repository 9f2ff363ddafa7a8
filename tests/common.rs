#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use axum_test::multipart::MultipartForm;
use courseware::auth::{UserClaims, generate_token};
use courseware::build_server_with_state;
use courseware::model::entity::{Course, Lesson, LessonKind, Module, Resource};
use courseware::model::{CourseStore, ModelManager};
use courseware::uploader::{
    ResourceStorage, SelectedFile, SimulatedStorage, StorageError, StorageResult,
};
use courseware::web::middlewares::AUTH_TOKEN;
use courseware::web::{AppState, UserRole};
use serde_json::Value;
use tempfile::TempDir;
use tower_cookies::Cookie;

pub const TEST_JWT: &str = "test-secret";

pub fn test_course() -> Course {
    Course {
        modules: vec![
            Module::new(1, "Basics", "Getting started").with_lessons(vec![
                Lesson::new("1-1", "Welcome", "5 min", LessonKind::Video, "Hello"),
                Lesson::new("1-2", "Setup", "15 min", LessonKind::Text, "Toolchain"),
            ]),
            Module::new(2, "Ownership", "Moves and borrows").with_lessons(vec![Lesson::new(
                "2-1",
                "Moves",
                "12 min",
                LessonKind::Exercise,
                "Who owns a value",
            )]),
        ],
        resources: vec![],
    }
}

/// Storage that always fails, standing in for an unreachable bucket.
pub struct FailingStorage;

#[async_trait]
impl ResourceStorage for FailingStorage {
    async fn upload_resource(&self, _file: &SelectedFile, _name: &str) -> StorageResult<Resource> {
        Err(StorageError::Rejected("bucket unavailable".to_string()))
    }
}

/// Server over an in-memory course. The uploads directory is removed on `Drop`.
pub struct TestEnv {
    pub server: TestServer,
    pub state: AppState,
    pub uploads: TempDir,
}

pub async fn setup_server() -> TestEnv {
    setup_server_with(Arc::new(SimulatedStorage::new(Duration::ZERO))).await
}

pub async fn setup_server_with(storage: Arc<dyn ResourceStorage>) -> TestEnv {
    let uploads = tempfile::tempdir().unwrap();
    setup_server_in(uploads, storage).await
}

pub async fn setup_server_in(uploads: TempDir, storage: Arc<dyn ResourceStorage>) -> TestEnv {
    let state = test_state(&uploads, storage);
    serve(uploads, state).await
}

/// Server whose upload route accepts at most `max_bytes` per request.
pub async fn setup_server_limited(max_bytes: usize) -> TestEnv {
    let uploads = tempfile::tempdir().unwrap();
    let storage = Arc::new(SimulatedStorage::new(Duration::ZERO));
    let state = test_state(&uploads, storage).with_max_upload_bytes(max_bytes);
    serve(uploads, state).await
}

fn test_state(uploads: &TempDir, storage: Arc<dyn ResourceStorage>) -> AppState {
    let mm = ModelManager::new(CourseStore::new(test_course()));
    AppState::new(mm, storage, TEST_JWT, uploads.path().to_path_buf())
}

async fn serve(uploads: TempDir, state: AppState) -> TestEnv {
    let (state, app) = build_server_with_state(state).await.unwrap();

    TestEnv {
        server: TestServer::new(app).unwrap(),
        state,
        uploads,
    }
}

pub fn token_cookie(sub: &str, role: UserRole) -> Cookie<'static> {
    let claims = UserClaims::new(sub, role, chrono::Duration::hours(1));
    let token = generate_token(claims, TEST_JWT).unwrap();
    Cookie::new(AUTH_TOKEN, token)
}

#[derive(Debug)]
pub struct FlowContext {
    pub store: HashMap<&'static str, Value>, // a way to pass data between steps
}

impl FlowContext {
    pub fn new() -> Self {
        Self {
            store: HashMap::new(),
        }
    }

    pub fn store(&mut self, key: &'static str, val: Value) {
        self.store.insert(key, val);
    }

    pub fn get(&self, key: &str) -> &Value {
        self.store.get(key).expect("missing store key")
    }
}

pub struct Action {
    #[allow(unused)]
    pub name: &'static str,
    pub method: &'static str,
    pub path: String,
    pub dyn_path: Option<Box<dyn Fn(&FlowContext) -> String + Send + Sync>>,
    pub body: Option<Value>,
    pub dyn_body: Option<Box<dyn Fn(&FlowContext) -> Value + Send + Sync>>,
    pub multipart: Option<MultipartForm>,
    pub actor: Option<Cookie<'static>>,
    pub expect: StatusCode,
    pub query_params: Vec<(String, String)>,
    pub body_asserts: Vec<Box<dyn Fn(&Value) + Send + Sync>>,
    pub save_as: Option<&'static str>,
}

impl Action {
    pub fn new(name: &'static str, method: &'static str, path: &str) -> Self {
        Self {
            name,
            method,
            path: path.to_string(),
            dyn_path: None,
            body: None,
            dyn_body: None,
            multipart: None,
            actor: None,
            expect: StatusCode::OK,
            query_params: vec![],
            body_asserts: vec![],
            save_as: None,
        }
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_multipart(mut self, form: MultipartForm) -> Self {
        self.multipart = Some(form);
        self
    }

    pub fn with_expect(mut self, expect: StatusCode) -> Self {
        self.expect = expect;
        self
    }

    /// Sends the request as `sub` acting in `role`.
    pub fn as_actor(mut self, sub: &str, role: UserRole) -> Self {
        self.actor = Some(token_cookie(sub, role));
        self
    }

    pub fn with_cookie(mut self, cookie: Cookie<'static>) -> Self {
        self.actor = Some(cookie);
        self
    }

    pub fn with_param(mut self, key: &str, val: &str) -> Self {
        self.query_params
            .push((String::from(key), String::from(val)));
        self
    }

    pub fn with_dyn_path<F>(mut self, f: F) -> Self
    where
        F: Fn(&FlowContext) -> String + Send + Sync + 'static,
    {
        self.dyn_path = Some(Box::new(f));
        self
    }

    pub fn with_dyn_body<F>(mut self, f: F) -> Self
    where
        F: Fn(&FlowContext) -> Value + Send + Sync + 'static,
    {
        self.dyn_body = Some(Box::new(f));
        self
    }

    pub fn with_save_as(mut self, key: &'static str) -> Self {
        self.save_as = Some(key);
        self
    }

    pub fn assert_body<F>(mut self, check: F) -> Self
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        self.body_asserts.push(Box::new(check));
        self
    }
}

pub struct Flow {
    actions: Vec<Action>,
}

impl Flow {
    pub fn new() -> Self {
        Self { actions: vec![] }
    }

    pub fn step(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    pub async fn run(self, env: &TestEnv) {
        let server = &env.server;
        let mut ctx = FlowContext::new(); // create new context for this flow
        for action in self.actions {
            println!("==> Running test action `{}`", action.name);

            let path = if let Some(dyn_path_fn) = action.dyn_path {
                dyn_path_fn(&ctx)
            } else {
                action.path.clone()
            };

            let mut req = match action.method {
                "GET" => server.get(&path),
                "POST" => server.post(&path),
                "PUT" => server.put(&path),
                "DELETE" => server.delete(&path),
                _ => panic!("unsupported method {}", action.method),
            };

            if let Some(cookie) = action.actor {
                req = req.add_cookie(cookie);
            }

            match (action.dyn_body, action.body, action.multipart) {
                (Some(f), _, _) => req = req.json(&f(&ctx)),
                (_, Some(json), _) => req = req.json(&json),
                (_, _, Some(form)) => req = req.multipart(form),
                _ => {}
            }

            for (k, v) in action.query_params {
                req = req.add_query_param(&k, v);
            }

            let resp = req.await;
            resp.assert_status(action.expect);

            if !action.body_asserts.is_empty() || action.save_as.is_some() {
                let body = resp.json::<Value>();
                for check in action.body_asserts {
                    check(&body);
                }

                if let Some(save_key) = action.save_as {
                    ctx.store(save_key, body);
                }
            }
        }
    }
}

// Common actions builders

pub fn list_modules_action(sub: &str, role: UserRole) -> Action {
    Action::new("list_modules", "GET", "/api/v1/modules/").as_actor(sub, role)
}

pub fn get_module_action(sub: &str, role: UserRole, id: u32) -> Action {
    Action::new("get_module", "GET", &format!("/api/v1/modules/{id}")).as_actor(sub, role)
}

pub fn edit_action(sub: &str, role: UserRole, id: u32) -> Action {
    Action::new("edit", "POST", &format!("/api/v1/modules/{id}/edit")).as_actor(sub, role)
}

pub fn draft_action(sub: &str, role: UserRole, id: u32, body: Value) -> Action {
    Action::new("draft", "PUT", &format!("/api/v1/modules/{id}/draft"))
        .as_actor(sub, role)
        .with_body(body)
}

pub fn save_action(sub: &str, role: UserRole, id: u32) -> Action {
    Action::new("save", "POST", &format!("/api/v1/modules/{id}/save")).as_actor(sub, role)
}

pub fn cancel_action(sub: &str, role: UserRole, id: u32) -> Action {
    Action::new("cancel", "POST", &format!("/api/v1/modules/{id}/cancel")).as_actor(sub, role)
}

pub fn upload_action(sub: &str, role: UserRole, form: MultipartForm) -> Action {
    Action::new("upload", "POST", "/api/v1/resources/")
        .as_actor(sub, role)
        .with_multipart(form)
        .with_expect(StatusCode::CREATED)
}
