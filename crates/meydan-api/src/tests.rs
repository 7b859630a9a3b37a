//! Router tests driving the full API over an in-memory store.

use std::sync::Arc;

use axum::{
  body::Body,
  http::{Request, StatusCode, header},
};
use meydan_core::{access::Role, store::UploadStore};
use meydan_store_sqlite::SqliteStore;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt as _;
use uuid::Uuid;

use super::*;

struct Harness {
  state:   AppState<SqliteStore>,
  _upload: TempDir,
}

async fn harness() -> Harness {
  harness_with_upload_limit(uploads::DEFAULT_MAX_UPLOAD_BYTES).await
}

async fn harness_with_upload_limit(max_bytes: usize) -> Harness {
  let dir = tempfile::tempdir().unwrap();
  let state = AppState {
    store:   Arc::new(SqliteStore::open_in_memory().await.unwrap()),
    tokens:  Arc::new(TokenKeys::new(b"test-secret", 3600)),
    uploads: Arc::new(UploadDir::new(dir.path()).with_max_bytes(max_bytes)),
  };
  Harness { state, _upload: dir }
}

impl Harness {
  /// A token for a fresh identity with `role`.
  fn token(&self, role: Role) -> (Uuid, String) {
    let id = Uuid::new_v4();
    (id, self.state.tokens.issue(id, role).unwrap())
  }

  async fn raw(&self, req: Request<Body>) -> axum::response::Response {
    api_router(self.state.clone()).oneshot(req).await.unwrap()
  }

  async fn send(
    &self,
    method: &str,
    uri:    &str,
    token:  Option<&str>,
    body:   Option<Value>,
  ) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
      builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    let resp = self.raw(builder.body(body).unwrap()).await;
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
  }

  async fn create_event(&self, token: &str, title: &str) -> Value {
    let (status, event) = self
      .send(
        "POST",
        "/events",
        Some(token),
        Some(json!({
          "title": title,
          "description": "Cleaning the shoreline",
          "date": "2026-06-01T09:00:00Z",
          "location": "Kadıköy",
        })),
      )
      .await;
    assert_eq!(status, StatusCode::CREATED, "{event}");
    event
  }
}

// ─── Health ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn health_check() {
  let h = harness().await;
  let (status, body) = h.send("GET", "/", None, None).await;
  assert_eq!(status, StatusCode::OK);
  assert!(body["message"].is_string());
}

// ─── Users ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn register_login_me() {
  let h = harness().await;

  let (status, user) = h
    .send(
      "POST",
      "/users/register",
      None,
      Some(json!({
        "name": "Ayşe",
        "email": "ayse@example.com",
        "password": "hunter22",
        "user_type": "young",
      })),
    )
    .await;
  assert_eq!(status, StatusCode::CREATED, "{user}");
  assert_eq!(user["user_type"], "individual");
  assert!(user.get("password_hash").is_none());

  let req = Request::builder()
    .method("POST")
    .uri("/users/login")
    .header(header::CONTENT_TYPE, "application/json")
    .body(Body::from(
      json!({ "email": "ayse@example.com", "password": "hunter22" }).to_string(),
    ))
    .unwrap();
  let resp = h.raw(req).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let cookie = resp
    .headers()
    .get(header::SET_COOKIE)
    .unwrap()
    .to_str()
    .unwrap()
    .to_owned();
  assert!(cookie.starts_with("token="));
  assert!(cookie.contains("HttpOnly"));

  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  let login: Value = serde_json::from_slice(&bytes).unwrap();
  let token = login["token"].as_str().unwrap();
  assert_eq!(login["user"]["user_id"], user["user_id"]);

  let (status, me) = h.send("GET", "/users/me", Some(token), None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(me["email"], "ayse@example.com");

  // The cookie alone authenticates too.
  let cookie_pair = cookie.split(';').next().unwrap().to_owned();
  let req = Request::builder()
    .uri("/users/me")
    .header(header::COOKIE, cookie_pair)
    .body(Body::empty())
    .unwrap();
  assert_eq!(h.raw(req).await.status(), StatusCode::OK);
}

#[tokio::test]
async fn registration_rejections() {
  let h = harness().await;
  let body = |email: &str, password: &str| {
    json!({ "name": "A", "email": email, "password": password, "user_type": "company" })
  };

  let (status, _) = h
    .send("POST", "/users/register", None, Some(body("a@example.com", "123")))
    .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);

  let (status, _) = h
    .send("POST", "/users/register", None, Some(body("not-an-email", "hunter22")))
    .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);

  let (status, _) = h
    .send("POST", "/users/register", None, Some(body("a@example.com", "hunter22")))
    .await;
  assert_eq!(status, StatusCode::CREATED);

  let (status, err) = h
    .send("POST", "/users/register", None, Some(body("A@example.com", "hunter22")))
    .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(err["message"].as_str().unwrap().contains("already registered"));
}

#[tokio::test]
async fn login_with_wrong_password_is_401() {
  let h = harness().await;
  h.send(
    "POST",
    "/users/register",
    None,
    Some(json!({ "name": "A", "email": "a@example.com", "password": "hunter22" })),
  )
  .await;

  let (status, _) = h
    .send(
      "POST",
      "/users/login",
      None,
      Some(json!({ "email": "a@example.com", "password": "hunter23" })),
    )
    .await;
  assert_eq!(status, StatusCode::UNAUTHORIZED);

  let (status, _) = h
    .send(
      "POST",
      "/users/login",
      None,
      Some(json!({ "email": "nobody@example.com", "password": "hunter22" })),
    )
    .await;
  assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// ─── Authentication and role gate ────────────────────────────────────────────

#[tokio::test]
async fn protected_endpoint_without_token_is_401() {
  let h = harness().await;
  let req = Request::builder()
    .method("POST")
    .uri("/events")
    .header(header::CONTENT_TYPE, "application/json")
    .body(Body::from("{}"))
    .unwrap();
  let resp = h.raw(req).await;
  assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  assert_eq!(
    resp.headers().get(header::WWW_AUTHENTICATE).unwrap(),
    "Bearer"
  );

  let (status, _) = h.send("GET", "/users/me", Some("garbage"), None).await;
  assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn non_admin_on_admin_endpoint_is_403() {
  let h = harness().await;
  let (_, owner) = h.token(Role::Individual);
  let event = h.create_event(&owner, "Beach").await;
  let id = event["event_id"].as_str().unwrap();

  let (status, body) = h
    .send("PUT", &format!("/events/{id}/approve"), Some(&owner), None)
    .await;
  assert_eq!(status, StatusCode::FORBIDDEN);
  assert!(body["message"].is_string());

  let (status, _) = h
    .send(
      "POST",
      "/badges",
      Some(&owner),
      Some(json!({ "name": "Helper", "description": "d" })),
    )
    .await;
  assert_eq!(status, StatusCode::FORBIDDEN);

  let (status, _) = h.send("GET", "/complaints", Some(&owner), None).await;
  assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn malformed_input_is_400() {
  let h = harness().await;
  let (_, token) = h.token(Role::Individual);

  let (status, _) = h.send("GET", "/events/not-a-uuid", None, None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);

  let req = Request::builder()
    .method("POST")
    .uri("/events")
    .header(header::AUTHORIZATION, format!("Bearer {token}"))
    .header(header::CONTENT_TYPE, "application/json")
    .body(Body::from("{not json"))
    .unwrap();
  assert_eq!(h.raw(req).await.status(), StatusCode::BAD_REQUEST);

  let (status, _) = h
    .send("POST", "/events", Some(&token), Some(json!({ "title": "No date" })))
    .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ─── Events ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn owner_scoped_event_scenario() {
  let h = harness().await;
  let (a_id, a) = h.token(Role::Individual);
  let (_, b) = h.token(Role::Individual);
  let (_, admin) = h.token(Role::Organization);

  let event = h.create_event(&a, "Beach").await;
  let id = event["event_id"].as_str().unwrap().to_owned();
  assert_eq!(event["organizer_id"], a_id.to_string());
  assert_eq!(event["approved"], false);

  // B is not the owner: indistinguishable from a missing id.
  let (status, miss) = h
    .send("PUT", &format!("/events/my/{id}"), Some(&b), Some(json!({ "title": "Mine now" })))
    .await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  let (status, true_miss) = h
    .send(
      "PUT",
      &format!("/events/my/{}", Uuid::new_v4()),
      Some(&b),
      Some(json!({ "title": "Mine now" })),
    )
    .await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(miss.as_object().unwrap().keys().collect::<Vec<_>>(), ["message"]);
  assert_eq!(true_miss.as_object().unwrap().keys().collect::<Vec<_>>(), ["message"]);

  // A updates; protected fields in the body are ignored.
  let (status, updated) = h
    .send(
      "PUT",
      &format!("/events/my/{id}"),
      Some(&a),
      Some(json!({
        "title": "Beach cleanup",
        "approved": true,
        "organizer_id": Uuid::new_v4(),
        "participants": [Uuid::new_v4()],
      })),
    )
    .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(updated["title"], "Beach cleanup");
  assert_eq!(updated["approved"], false);
  assert_eq!(updated["organizer_id"], a_id.to_string());
  assert_eq!(updated["participants"], json!([]));

  // B cannot delete via the admin route either.
  let (status, _) = h.send("DELETE", &format!("/events/{id}"), Some(&b), None).await;
  assert_eq!(status, StatusCode::FORBIDDEN);

  let (status, _) = h.send("DELETE", &format!("/events/{id}"), Some(&admin), None).await;
  assert_eq!(status, StatusCode::OK);

  let (status, _) = h.send("DELETE", &format!("/events/{id}"), Some(&admin), None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  let (status, _) = h.send("DELETE", &format!("/events/my/{id}"), Some(&a), None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_approves_and_lists() {
  let h = harness().await;
  let (_, a) = h.token(Role::Individual);
  let (_, admin) = h.token(Role::Community);
  let event = h.create_event(&a, "Beach").await;
  let id = event["event_id"].as_str().unwrap();
  h.create_event(&admin, "Park").await;

  let (status, approved) = h
    .send("PUT", &format!("/events/{id}/approve"), Some(&admin), None)
    .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(approved["approved"], true);

  let (_, all) = h.send("GET", "/events", None, None).await;
  assert_eq!(all.as_array().unwrap().len(), 2);

  let (_, mine) = h.send("GET", "/events/my", Some(&a), None).await;
  let mine = mine.as_array().unwrap();
  assert_eq!(mine.len(), 1);
  assert_eq!(mine[0]["event_id"], id);

  let (status, _) = h
    .send("PUT", &format!("/events/{}/approve", Uuid::new_v4()), Some(&admin), None)
    .await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn joining_twice_is_400() {
  let h = harness().await;
  let (_, owner) = h.token(Role::Individual);
  let (user_id, user) = h.token(Role::Individual);
  let event = h.create_event(&owner, "Beach").await;
  let uri = format!("/events/{}/participants", event["event_id"].as_str().unwrap());

  let (status, joined) = h.send("POST", &uri, Some(&user), None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(joined["participants"], json!([user_id]));

  let (status, _) = h.send("POST", &uri, Some(&user), None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);

  let (status, _) = h
    .send("POST", &format!("/events/{}/participants", Uuid::new_v4()), Some(&user), None)
    .await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

// ─── Announcements ───────────────────────────────────────────────────────────

#[tokio::test]
async fn announcement_owner_comes_from_token() {
  let h = harness().await;
  let (org_id, org) = h.token(Role::Organization);
  let (_, other) = h.token(Role::Individual);

  let (status, created) = h
    .send(
      "POST",
      "/announcements",
      Some(&org),
      Some(json!({
        "title": "Volunteers wanted",
        "content": "Sign up at the desk.",
        "image_id": Uuid::new_v4(),
        "organization_id": Uuid::new_v4(),
      })),
    )
    .await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(created["organization_id"], org_id.to_string());
  let id = created["announcement_id"].as_str().unwrap();

  let (status, _) = h
    .send(
      "DELETE",
      &format!("/announcements/my/{id}"),
      Some(&other),
      None,
    )
    .await;
  assert_eq!(status, StatusCode::NOT_FOUND);

  let (status, updated) = h
    .send(
      "PUT",
      &format!("/announcements/my/{id}"),
      Some(&org),
      Some(json!({ "content": "Desk closes at five." })),
    )
    .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(updated["content"], "Desk closes at five.");
}

// ─── Badges ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn badge_crud() {
  let h = harness().await;
  let (_, admin) = h.token(Role::Company);

  let (status, badge) = h
    .send(
      "POST",
      "/badges",
      Some(&admin),
      Some(json!({ "name": "Helper", "description": "Joined five events", "point": 10 })),
    )
    .await;
  assert_eq!(status, StatusCode::CREATED);
  let id = badge["badge_id"].as_str().unwrap();

  let (status, fetched) = h.send("GET", &format!("/badges/{id}"), None, None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(fetched["point"], 10);

  let (_, updated) = h
    .send("PUT", &format!("/badges/{id}"), Some(&admin), Some(json!({ "point": 20 })))
    .await;
  assert_eq!(updated["point"], 20);
  assert_eq!(updated["name"], "Helper");

  let (status, _) = h.send("DELETE", &format!("/badges/{id}"), Some(&admin), None).await;
  assert_eq!(status, StatusCode::OK);
  let (status, _) = h.send("GET", &format!("/badges/{id}"), None, None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

// ─── Forum ───────────────────────────────────────────────────────────────────

async fn create_post(h: &Harness, token: &str, title: &str) -> String {
  let (status, post) = h
    .send(
      "POST",
      "/forums",
      Some(token),
      Some(json!({ "title": title, "content": "What should we plant?", "tags": ["garden"] })),
    )
    .await;
  assert_eq!(status, StatusCode::CREATED, "{post}");
  post["post_id"].as_str().unwrap().to_owned()
}

#[tokio::test]
async fn like_toggle_twice_restores_the_set() {
  let h = harness().await;
  let (_, author) = h.token(Role::Individual);
  let (user_id, user) = h.token(Role::Individual);
  let id = create_post(&h, &author, "Seeds").await;
  let likes = format!("/forums/{id}/likes");

  let (_, once) = h.send("POST", &likes, Some(&user), None).await;
  assert_eq!(once["likes"], json!([user_id]));

  let (_, twice) = h.send("POST", &likes, Some(&user), None).await;
  assert_eq!(twice["likes"], json!([]));

  let (_, disliked) = h
    .send("POST", &format!("/forums/{id}/dislikes"), Some(&user), None)
    .await;
  assert_eq!(disliked["dislikes"], json!([user_id]));
  assert_eq!(disliked["likes"], json!([]));

  let (status, undisliked) = h
    .send("POST", &format!("/forums/{id}/disslikes"), Some(&user), None)
    .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(undisliked["dislikes"], json!([]));
}

#[tokio::test]
async fn comments_require_content() {
  let h = harness().await;
  let (_, user) = h.token(Role::Individual);
  let id = create_post(&h, &user, "Seeds").await;
  let uri = format!("/forums/{id}/comments");

  let (status, _) = h.send("POST", &uri, Some(&user), Some(json!({ "content": "  " }))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  let (status, _) = h.send("POST", &uri, Some(&user), Some(json!({}))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);

  let (status, post) = h
    .send("POST", &uri, Some(&user), Some(json!({ "content": "Tomatoes" })))
    .await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(post["comments"][0]["content"], "Tomatoes");
}

#[tokio::test]
async fn forum_ownership_and_moderation() {
  let h = harness().await;
  let (_, author) = h.token(Role::Individual);
  let (_, other) = h.token(Role::Individual);
  let (_, admin) = h.token(Role::Organization);
  let older = create_post(&h, &author, "older").await;
  let newer = create_post(&h, &author, "newer").await;

  let (_, posts) = h.send("GET", "/forums", None, None).await;
  assert_eq!(posts[0]["post_id"], newer);
  assert_eq!(posts[1]["post_id"], older);

  let (status, _) = h.send("DELETE", &format!("/forums/{older}"), Some(&other), None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  let (status, _) = h
    .send("DELETE", &format!("/forums/{older}/moderate"), Some(&other), None)
    .await;
  assert_eq!(status, StatusCode::FORBIDDEN);
  let (status, _) = h
    .send("DELETE", &format!("/forums/{older}/moderate"), Some(&admin), None)
    .await;
  assert_eq!(status, StatusCode::OK);

  let (status, updated) = h
    .send(
      "PUT",
      &format!("/forums/{newer}"),
      Some(&author),
      Some(json!({ "tags": ["spring"], "likes": [Uuid::new_v4()] })),
    )
    .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(updated["tags"], json!(["spring"]));
  assert_eq!(updated["likes"], json!([]));
}

// ─── File uploads ────────────────────────────────────────────────────────────

fn multipart_request(token: &str, field: &str, file_name: &str, data: &str) -> Request<Body> {
  let boundary = "meydan-test-boundary";
  let body = format!(
    "--{boundary}\r\n\
     Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
     Content-Type: text/plain\r\n\r\n\
     {data}\r\n\
     --{boundary}--\r\n"
  );
  Request::builder()
    .method("POST")
    .uri("/fileupload")
    .header(header::AUTHORIZATION, format!("Bearer {token}"))
    .header(
      header::CONTENT_TYPE,
      format!("multipart/form-data; boundary={boundary}"),
    )
    .body(Body::from(body))
    .unwrap()
}

#[tokio::test]
async fn upload_view_and_delete() {
  let h = harness().await;
  let (owner_id, owner) = h.token(Role::Individual);
  let (_, other) = h.token(Role::Individual);

  let resp = h.raw(multipart_request(&owner, "file", "../notes.txt", "hello")).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  let record: Value = serde_json::from_slice(&bytes).unwrap();
  assert_eq!(record["owner_id"], owner_id.to_string());
  assert_eq!(record["file_type"], "text/plain");
  assert!(record["file_path"].as_str().unwrap().ends_with("-notes.txt"));
  let id = record["file_id"].as_str().unwrap().to_owned();

  let req = Request::builder()
    .uri(format!("/fileupload/{id}/view"))
    .header(header::AUTHORIZATION, format!("Bearer {other}"))
    .body(Body::empty())
    .unwrap();
  let resp = h.raw(req).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(resp.headers().get(header::CONTENT_TYPE).unwrap(), "text/plain");
  assert_eq!(resp.headers().get(header::X_CONTENT_TYPE_OPTIONS).unwrap(), "nosniff");
  assert_eq!(resp.headers().get(header::CONTENT_DISPOSITION).unwrap(), "attachment");
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  assert_eq!(&bytes[..], b"hello");

  let (_, mine) = h.send("GET", "/fileupload/my", Some(&owner), None).await;
  assert_eq!(mine.as_array().unwrap().len(), 1);
  let (_, theirs) = h.send("GET", "/fileupload/my", Some(&other), None).await;
  assert!(theirs.as_array().unwrap().is_empty());

  let (status, _) = h.send("DELETE", &format!("/fileupload/{id}"), Some(&other), None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  let (status, _) = h.send("DELETE", &format!("/fileupload/{id}"), Some(&owner), None).await;
  assert_eq!(status, StatusCode::OK);
  let (status, _) = h.send("DELETE", &format!("/fileupload/{id}"), Some(&owner), None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);

  let path = record["file_path"].as_str().unwrap();
  assert!(!std::path::Path::new(path).exists());
}

#[tokio::test]
async fn upload_without_file_field_is_400() {
  let h = harness().await;
  let (_, owner) = h.token(Role::Individual);
  let resp = h.raw(multipart_request(&owner, "attachment", "a.txt", "x")).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn oversized_upload_is_413() {
  let h = harness_with_upload_limit(1024).await;
  let (owner_id, owner) = h.token(Role::Individual);

  let resp = h.raw(multipart_request(&owner, "file", "small.txt", "fits")).await;
  assert_eq!(resp.status(), StatusCode::CREATED);

  let big = "x".repeat(4096);
  let resp = h.raw(multipart_request(&owner, "file", "big.txt", &big)).await;
  assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
  let body: Value = serde_json::from_slice(&bytes).unwrap();
  assert!(body["message"].is_string());

  let stored = h.state.store.list_uploads(Some(owner_id)).await.unwrap();
  assert_eq!(stored.len(), 1);
}

// ─── Complaints ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn complaint_review_flow() {
  let h = harness().await;
  let (_, user) = h.token(Role::Individual);
  let (_, admin) = h.token(Role::Organization);

  let (status, _) = h
    .send(
      "POST",
      "/complaints",
      Some(&user),
      Some(json!({ "content_id": Uuid::new_v4(), "content_type": "forumPost" })),
    )
    .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);

  let (status, complaint) = h
    .send(
      "POST",
      "/complaints",
      Some(&user),
      Some(json!({
        "content_id": Uuid::new_v4(),
        "content_type": "forumPost",
        "note": "Off topic",
      })),
    )
    .await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(complaint["status"], "pending");
  assert_eq!(complaint["content_type"], "forum_post");
  let id = complaint["complaint_id"].as_str().unwrap();

  let (status, _) = h
    .send("PUT", &format!("/complaints/{id}"), Some(&admin), Some(json!({ "status": "closed" })))
    .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);

  let (status, reviewed) = h
    .send("PUT", &format!("/complaints/{id}"), Some(&admin), Some(json!({ "status": "reviewed" })))
    .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(reviewed["status"], "reviewed");

  let (_, all) = h.send("GET", "/complaints", Some(&admin), None).await;
  assert_eq!(all.as_array().unwrap().len(), 1);
}

// ─── Translations ────────────────────────────────────────────────────────────

#[tokio::test]
async fn translations_map_per_language() {
  let h = harness().await;
  let (_, admin) = h.token(Role::Community);
  let (_, user) = h.token(Role::Individual);

  let (status, _) = h.send("GET", "/translations/tr", None, None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);

  let add = json!({ "lang": "tr", "key": "greeting", "value": "Merhaba" });
  let (status, _) = h.send("POST", "/translations/add", Some(&user), Some(add.clone())).await;
  assert_eq!(status, StatusCode::FORBIDDEN);
  let (status, _) = h.send("POST", "/translations/add", Some(&admin), Some(add)).await;
  assert_eq!(status, StatusCode::CREATED);

  let (status, _) = h
    .send(
      "POST",
      "/translations/add",
      Some(&admin),
      Some(json!({ "lang": "tr", "key": "", "value": "x" })),
    )
    .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);

  let (status, map) = h.send("GET", "/translations/tr", None, None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(map, json!({ "greeting": "Merhaba" }));
}
