use std::{net::SocketAddr, sync::Arc};

use httpmock::{Method::POST, MockServer};
use reqwest::StatusCode;
use rustyroster::{
    api::{AppState, create_router},
    config::Config,
    model::{Student, StudentSummary},
    store::StudentStore,
    summarization::StudentSummarizer,
};
use serde_json::json;
use tokio::{net::TcpListener, task::JoinSet};

struct TestServer {
    base_url: String,
    store: Arc<StudentStore>,
    http: reqwest::Client,
}

impl TestServer {
    async fn start(ollama_url: &str) -> Self {
        let config = Config {
            ollama_url: ollama_url.to_string(),
            ..Config::default()
        };
        let store = Arc::new(StudentStore::new());
        let summarizer = StudentSummarizer::from_config(&config).expect("summarizer");
        let app = create_router(AppState::new(store.clone(), summarizer));

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("server");
        });

        Self {
            base_url: format!("http://{addr}/students"),
            store,
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, suffix: &str) -> String {
        format!("{}{suffix}", self.base_url)
    }
}

fn alice() -> serde_json::Value {
    json!({ "id": 1, "name": "Alice", "age": 20, "email": "alice@example.com" })
}

#[tokio::test]
async fn create_read_delete_lifecycle() {
    let server = TestServer::start("http://127.0.0.1:1").await;

    let response = server
        .http
        .post(server.url(""))
        .json(&alice())
        .send()
        .await
        .expect("create");
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: serde_json::Value = response.json().await.expect("json");
    assert_eq!(created, alice());

    let response = server.http.get(server.url("/1")).send().await.expect("get");
    assert_eq!(response.status(), StatusCode::OK);
    let fetched: serde_json::Value = response.json().await.expect("json");
    assert_eq!(fetched, alice());

    let response = server
        .http
        .delete(server.url("/1"))
        .send()
        .await
        .expect("delete");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = server.http.get(server.url("/1")).send().await.expect("get");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.text().await.expect("text"), "Student not found");
}

#[tokio::test]
async fn update_replaces_every_field() {
    let server = TestServer::start("http://127.0.0.1:1").await;
    server
        .http
        .post(server.url(""))
        .json(&alice())
        .send()
        .await
        .expect("create");

    let replacement = json!({ "id": 500, "name": "Alicia", "age": 33, "email": " ALICIA@Example.org " });
    let response = server
        .http
        .put(server.url("/1"))
        .json(&replacement)
        .send()
        .await
        .expect("update");
    assert_eq!(response.status(), StatusCode::OK);

    let stored = server.store.get(1).await.expect("stored");
    assert_eq!(
        stored,
        Student {
            id: 1,
            name: "Alicia".into(),
            age: 33,
            email: " ALICIA@Example.org ".into(),
        }
    );
    assert_eq!(server.store.len().await, 1);
}

#[tokio::test]
async fn invalid_email_is_rejected_with_rule_message() {
    let server = TestServer::start("http://127.0.0.1:1").await;
    for email in ["a@b", "abc"] {
        let response = server
            .http
            .post(server.url(""))
            .json(&json!({ "id": 3, "name": "Eve", "age": 30, "email": email }))
            .send()
            .await
            .expect("create");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.text().await.expect("text"), "Student Email is invalid");
    }
    assert!(server.store.is_empty().await);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_are_all_listed() {
    const WRITERS: i64 = 50;
    let server = Arc::new(TestServer::start("http://127.0.0.1:1").await);

    let mut tasks = JoinSet::new();
    for id in 1..=WRITERS {
        let server = server.clone();
        tasks.spawn(async move {
            let student = Student {
                id,
                name: format!("Student {id}"),
                age: 20,
                email: format!("student{id}@example.com"),
            };
            server
                .http
                .post(server.url(""))
                .json(&student)
                .send()
                .await
                .expect("create")
                .status()
        });
    }
    while let Some(status) = tasks.join_next().await {
        assert_eq!(status.expect("task"), StatusCode::CREATED);
    }

    let listed: Vec<Student> = server
        .http
        .get(server.url(""))
        .send()
        .await
        .expect("list")
        .json()
        .await
        .expect("json");
    let mut ids: Vec<_> = listed.iter().map(|student| student.id).collect();
    ids.sort_unstable();
    assert_eq!(ids, (1..=WRITERS).collect::<Vec<_>>());
    for student in &listed {
        assert_eq!(student.email, format!("student{}@example.com", student.id));
    }
}

#[tokio::test]
async fn summary_round_trips_through_ollama() {
    let ollama = MockServer::start_async().await;
    let mock = ollama
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/generate")
                .body_contains("Name: Alice")
                .json_body_partial(r#"{"model":"mistral","stream":false}"#);
            then.status(200).json_body(json!({
                "response": "\n Alice is a 20-year-old student with a bright future. \n",
                "done": true
            }));
        })
        .await;

    let server = TestServer::start(&ollama.base_url()).await;
    server
        .http
        .post(server.url(""))
        .json(&alice())
        .send()
        .await
        .expect("create");

    let response = server
        .http
        .get(server.url("/1/summary"))
        .send()
        .await
        .expect("summary");
    assert_eq!(response.status(), StatusCode::OK);
    let summary: StudentSummary = response.json().await.expect("json");
    mock.assert_async().await;
    assert_eq!(
        summary,
        StudentSummary {
            student_id: 1,
            name: "Alice".into(),
            summary: "Alice is a 20-year-old student with a bright future.".into(),
        }
    );
}

#[tokio::test]
async fn unreachable_summarizer_is_a_generic_server_error() {
    let server = TestServer::start("http://127.0.0.1:1").await;
    server
        .http
        .post(server.url(""))
        .json(&alice())
        .send()
        .await
        .expect("create");

    let response = server
        .http
        .get(server.url("/1/summary"))
        .send()
        .await
        .expect("summary");
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.text().await.expect("text"),
        "Failed to generate summary"
    );
}
