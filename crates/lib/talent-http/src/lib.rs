//! HTTP server for talent-directory.
//!
//! Exposes candidate CRUD and search, the CSV report, and user registration
//! and login over axum.

mod error;
mod guard;
mod routes;
mod state;

use std::net::SocketAddr;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use surrealdb::Connection;
use tracing::info;

pub use error::ApiError;
pub use guard::CurrentUser;
pub use routes::{HealthResponse, MessageResponse};
pub use state::AppState;

/// Configuration for the HTTP server.
#[derive(Debug, Clone)]
pub struct HttpServerConfig {
    pub addr: SocketAddr,
    pub max_body_bytes: usize,
}

impl HttpServerConfig {
    #[must_use]
    pub const fn new(addr: SocketAddr) -> Self {
        Self {
            addr,
            max_body_bytes: 1024 * 1024,
        }
    }

    #[must_use]
    pub const fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self::new(SocketAddr::from(([127, 0, 0, 1], 4030)))
    }
}

/// HTTP server wrapper.
pub struct TalentServer<C: Connection> {
    config: HttpServerConfig,
    state: AppState<C>,
}

impl<C: Connection> TalentServer<C> {
    #[must_use]
    pub const fn new(state: AppState<C>, config: HttpServerConfig) -> Self {
        Self { config, state }
    }
}

impl<C> TalentServer<C>
where
    C: Connection + Send + Sync + 'static,
{
    /// Runs the HTTP server until shutdown.
    ///
    /// # Errors
    /// Returns any listener or server error.
    pub async fn serve(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr = self.config.addr;
        let listener = tokio::net::TcpListener::bind(addr).await?;
        let app = build_router(self.state, self.config.max_body_bytes);

        info!("talent-http listening on {addr}");
        axum::serve(listener, app).await?;
        Ok(())
    }
}

/// Builds the application router over the given state.
pub fn build_router<C>(state: AppState<C>, max_body_bytes: usize) -> Router
where
    C: Connection + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(routes::health))
        .route("/register", post(routes::register::<C>))
        .route("/token", post(routes::login::<C>))
        .route("/generate-report", get(routes::generate_report::<C>))
        .route("/all-candidates", get(routes::list_candidates::<C>))
        .route("/candidate", post(routes::create_candidate::<C>))
        .route(
            "/candidate/:id",
            get(routes::get_candidate::<C>)
                .put(routes::update_candidate::<C>)
                .delete(routes::delete_candidate::<C>),
        )
        .route("/user", post(routes::populate_user::<C>))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, StatusCode, header};
    use serde_json::{Value, json};
    use surrealdb::Surreal;
    use surrealdb::engine::local::{Db, Mem};
    use talent_core::auth::TokenAuthority;
    use talent_core::control::TalentControlPlane;
    use tower::ServiceExt;

    use super::*;

    async fn test_router(db_name: &str) -> Router {
        let db = Surreal::new::<Mem>(())
            .await
            .expect("failed to create in-memory surrealdb instance");
        db.use_ns("talent")
            .use_db(db_name)
            .await
            .expect("failed to select surrealdb namespace/db");
        let state = AppState::<Db>::new(
            TalentControlPlane::new(db),
            TokenAuthority::new(
                "http-test-secret-long-enough-for-hmac".as_bytes(),
                Duration::from_secs(300),
            ),
            Duration::from_secs(5),
        );
        build_router(state, 64 * 1024)
    }

    async fn send(
        router: &Router,
        request: Request<Body>,
    ) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
        let response = router
            .clone()
            .oneshot(request)
            .await
            .expect("router should respond");
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        (status, headers, body.to_vec())
    }

    fn json_request(method: Method, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder
            .body(Body::from(body.to_string()))
            .expect("request should build")
    }

    fn empty_request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::empty()).expect("request should build")
    }

    async fn login(router: &Router) -> String {
        let register = json_request(
            Method::POST,
            "/register",
            None,
            &json!({"username": "recruiter", "password": "pw-123"}),
        );
        let (status, _, _) = send(router, register).await;
        assert_eq!(status, StatusCode::OK);

        let form = Request::builder()
            .method(Method::POST)
            .uri("/token")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("username=recruiter&password=pw-123"))
            .expect("request should build");
        let (status, _, body) = send(router, form).await;
        assert_eq!(status, StatusCode::OK);
        let token: Value = serde_json::from_slice(&body).expect("token body should be json");
        assert_eq!(token["token_type"], "bearer");
        token["access_token"]
            .as_str()
            .expect("access token should be a string")
            .to_string()
    }

    fn candidate_body(first_name: &str, salary: i64) -> Value {
        json!({
            "first_name": first_name,
            "last_name": "Candidate",
            "email": "someone@example.com",
            "career_level": "Junior",
            "job_major": "Physics",
            "degree_type": "Master",
            "years_of_experience": 1,
            "skills": ["Python"],
            "nationality": "Jordanian",
            "city": "Amman",
            "salary": salary,
            "gender": "male"
        })
    }

    #[tokio::test]
    async fn health_is_public() {
        let router = test_router("health").await;
        let (status, _, body) = send(&router, empty_request(Method::GET, "/health", None)).await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&body).expect("health body should be json");
        assert_eq!(body, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn protected_routes_require_bearer() {
        let router = test_router("guard").await;
        let (status, headers, _) =
            send(&router, empty_request(Method::GET, "/all-candidates", None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            headers.get(header::WWW_AUTHENTICATE).map(|v| v.as_bytes()),
            Some(&b"Bearer"[..])
        );

        let (status, _, _) = send(
            &router,
            empty_request(Method::GET, "/all-candidates", Some("not.a-token")),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn bad_login_is_unauthorized() {
        let router = test_router("bad_login").await;
        let form = Request::builder()
            .method(Method::POST)
            .uri("/token")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("username=nobody&password=nope"))
            .expect("request should build");
        let (status, _, _) = send(&router, form).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn duplicate_registration_conflicts() {
        let router = test_router("dup").await;
        let body = json!({"username": "recruiter", "password": "pw"});
        let (first, _, _) =
            send(&router, json_request(Method::POST, "/register", None, &body)).await;
        let (second, _, _) =
            send(&router, json_request(Method::POST, "/register", None, &body)).await;
        assert_eq!(first, StatusCode::OK);
        assert_eq!(second, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn create_search_update_delete_flow() {
        let router = test_router("flow").await;
        let token = login(&router).await;

        let (status, _, body) = send(
            &router,
            json_request(Method::POST, "/candidate", Some(&token), &candidate_body("Sami", 4200)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let created: MessageResponse =
            serde_json::from_slice(&body).expect("create body should be json");
        let uuid = created.uuid.expect("create should return uuid");

        let (status, _, body) = send(
            &router,
            empty_request(Method::GET, "/all-candidates?search=4200", Some(&token)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let found: Vec<Value> = serde_json::from_slice(&body).expect("list body should be json");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0]["uuid"], uuid.as_str());

        let (status, _, body) = send(
            &router,
            empty_request(Method::GET, "/all-candidates?search=amm", Some(&token)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let found: Vec<Value> = serde_json::from_slice(&body).expect("list body should be json");
        assert_eq!(found.len(), 1);

        let (status, _, _) = send(
            &router,
            json_request(
                Method::PUT,
                &format!("/candidate/{uuid}"),
                Some(&token),
                &candidate_body("Samira", 4300),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _, body) = send(
            &router,
            empty_request(Method::GET, &format!("/candidate/{uuid}"), Some(&token)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let fetched: Value = serde_json::from_slice(&body).expect("candidate body should be json");
        assert_eq!(fetched["first_name"], "Samira");
        assert_eq!(fetched["salary"], 4300);

        let (status, _, _) = send(
            &router,
            empty_request(Method::DELETE, &format!("/candidate/{uuid}"), Some(&token)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _, _) = send(
            &router,
            empty_request(Method::GET, &format!("/candidate/{uuid}"), Some(&token)),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn invalid_candidate_id_is_bad_request() {
        let router = test_router("bad_id").await;
        let token = login(&router).await;
        let (status, _, _) = send(
            &router,
            empty_request(Method::GET, "/candidate/not-a-uuid", Some(&token)),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_candidate_fields_are_rejected() {
        let router = test_router("unknown_fields").await;
        let token = login(&router).await;
        let mut body = candidate_body("Hala", 100);
        body["is_admin"] = json!(true);
        let (status, _, _) = send(
            &router,
            json_request(Method::POST, "/candidate", Some(&token), &body),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn report_is_csv_attachment() {
        let router = test_router("report").await;
        let token = login(&router).await;
        let (status, _, _) = send(
            &router,
            json_request(Method::POST, "/candidate", Some(&token), &candidate_body("Rana", 900)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, headers, body) =
            send(&router, empty_request(Method::GET, "/generate-report", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            headers.get(header::CONTENT_TYPE).map(|v| v.as_bytes()),
            Some(&b"text/csv"[..])
        );
        assert_eq!(
            headers.get(header::CONTENT_DISPOSITION).map(|v| v.as_bytes()),
            Some(&b"attachment; filename=candidates_report.csv"[..])
        );
        let csv = String::from_utf8(body).expect("csv should be utf-8");
        assert_eq!(csv.lines().count(), 2);
        assert!(csv.contains("Rana"));
    }

    #[tokio::test]
    async fn populate_user_seeds_profile() {
        let router = test_router("populate").await;
        let (status, _, body) = send(
            &router,
            json_request(
                Method::POST,
                "/user",
                None,
                &json!({"username": "viewer", "full_name": "View Only", "disabled": false}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let message: MessageResponse =
            serde_json::from_slice(&body).expect("body should be json");
        assert_eq!(message.message, "User populated successfully");
    }

    #[tokio::test]
    async fn populate_user_cannot_touch_registered_account() {
        let router = test_router("populate_existing").await;
        let token = login(&router).await;

        let (status, _, _) = send(
            &router,
            json_request(
                Method::POST,
                "/user",
                None,
                &json!({"username": "recruiter", "disabled": true}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _, _) =
            send(&router, empty_request(Method::GET, "/all-candidates", Some(&token))).await;
        assert_eq!(status, StatusCode::OK);
    }
}
