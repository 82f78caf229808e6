pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::jobs::handlers as job_handlers;
use crate::scoring::handlers as rank_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Job description
        .route(
            "/api/v1/job",
            get(job_handlers::handle_get_job).put(job_handlers::handle_put_job),
        )
        // Ranking
        .route("/api/v1/rank", post(rank_handlers::handle_rank))
        .route(
            "/api/v1/rank/dataset",
            post(rank_handlers::handle_rank_dataset),
        )
        .route(
            "/api/v1/rank/export",
            post(rank_handlers::handle_rank_export),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::jobs::store::JobStore;
    use crate::scoring::engine::RubricScorer;

    fn test_state(dir: &Path) -> AppState {
        let config = Config {
            port: 0,
            rust_log: "debug".to_string(),
            job_file_path: dir.join("vaga.json"),
            example_dataset_path: dir.join("perfis_example.json"),
            default_top_n: 2,
        };
        AppState {
            job_store: JobStore::new(config.job_file_path.clone()),
            config,
            scorer: Arc::new(RubricScorer),
        }
    }

    fn job_json() -> Value {
        json!({
            "grau_escolaridade": "Superior",
            "conhecimentos_obrigatorios": ["Python", "Estatística"],
            "conhecimentos_desejados": ["SQL"],
            "tempo_experiencia": 2,
            "outras_observacoes": "Analista de dados"
        })
    }

    fn profiles_json() -> Value {
        json!([
            {"url": "u1", "nome": "Baixo", "habilidades": "Vendas", "educacao": "Médio",
             "experiencia_anos": 0, "resumo": "Atendimento"},
            {"url": "u2", "nome": "Alto", "habilidades": "Python, Estatística, SQL",
             "educacao": "Mestrado", "experiencia_anos": 5, "resumo": "Analista de dados"},
            {"url": "u3", "nome": "Medio", "habilidades": "Python", "educacao": "Superior",
             "experiencia_anos": "3", "resumo": ""}
        ])
    }

    async fn send(app: Router, method: Method, uri: &str, body: Body) -> (StatusCode, Vec<u8>) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    fn json_body(value: &Value) -> Body {
        Body::from(serde_json::to_vec(value).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(dir.path()));
        let (status, body) = send(app, Method::GET, "/health", Body::empty()).await;
        assert_eq!(status, StatusCode::OK);
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["status"], "ok");
    }

    #[tokio::test]
    async fn test_get_job_before_save_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(dir.path()));
        let (status, body) = send(app, Method::GET, "/api/v1/job", Body::empty()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_put_then_get_job() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());

        let (status, _) = send(
            build_router(state.clone()),
            Method::PUT,
            "/api/v1/job",
            json_body(&job_json()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) =
            send(build_router(state), Method::GET, "/api/v1/job", Body::empty()).await;
        assert_eq!(status, StatusCode::OK);
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["conhecimentos_obrigatorios"], json!(["Python", "Estatística"]));
    }

    #[tokio::test]
    async fn test_put_job_rejects_out_of_range_experience() {
        let dir = tempfile::tempdir().unwrap();
        let mut job = job_json();
        job["tempo_experiencia"] = json!(80);
        let (status, body) = send(
            build_router(test_state(dir.path())),
            Method::PUT,
            "/api/v1/job",
            json_body(&job),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_rank_with_inline_job_and_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let request = json!({ "job": job_json(), "profiles": profiles_json() });
        let (status, body) = send(
            build_router(test_state(dir.path())),
            Method::POST,
            "/api/v1/rank",
            json_body(&request),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["total"], 3);
        assert_eq!(value["top"].as_array().unwrap().len(), 2);
        assert_eq!(value["ranked"][0]["profile"]["nome"], "Alto");
        assert_eq!(value["ranked"][0]["rank"], 1);
        assert_eq!(value["ranked"][2]["profile"]["nome"], "Baixo");
        assert_eq!(value["scorer_backend"], "rubric");
    }

    #[tokio::test]
    async fn test_rank_without_job_is_unprocessable() {
        let dir = tempfile::tempdir().unwrap();
        let request = json!({ "profiles": profiles_json() });
        let (status, _) = send(
            build_router(test_state(dir.path())),
            Method::POST,
            "/api/v1/rank",
            json_body(&request),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_rank_with_missing_example_dataset_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let request = json!({ "job": job_json(), "use_example": true });
        let (status, _) = send(
            build_router(test_state(dir.path())),
            Method::POST,
            "/api/v1/rank",
            json_body(&request),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_rank_uses_example_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());
        std::fs::write(
            &state.config.example_dataset_path,
            serde_json::to_vec(&profiles_json()).unwrap(),
        )
        .unwrap();
        let request = json!({ "job": job_json(), "use_example": true, "top_n": 1 });
        let (status, body) =
            send(build_router(state), Method::POST, "/api/v1/rank", json_body(&request)).await;
        assert_eq!(status, StatusCode::OK);
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["total"], 3);
        assert_eq!(value["top"][0]["profile"]["nome"], "Alto");
    }

    #[tokio::test]
    async fn test_rank_csv_dataset_against_saved_job() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());
        let job = serde_json::from_value(job_json()).unwrap();
        state.job_store.save(&job).await.unwrap();

        let csv = "url,nome,habilidades,educacao,experiencia_anos,resumo\n\
                   u1,Ana,\"Python, Estatística\",Mestrado,4,Analista de dados\n\
                   u2,Beto,Excel,Médio,,\n";
        let (status, body) = send(
            build_router(state),
            Method::POST,
            "/api/v1/rank/dataset?top_n=1",
            Body::from(csv),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["total"], 2);
        assert_eq!(value["top"][0]["profile"]["nome"], "Ana");
        assert_eq!(value["ranked"][1]["result"]["breakdown"]["experience"], 0);
    }

    #[tokio::test]
    async fn test_rank_dataset_rejects_json_object() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = send(
            build_router(test_state(dir.path())),
            Method::POST,
            "/api/v1/rank/dataset",
            Body::from(r#"{"nome": "Ana"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"]["code"], "DATASET_ERROR");
    }

    #[tokio::test]
    async fn test_export_csv() {
        let dir = tempfile::tempdir().unwrap();
        let request = json!({ "job": job_json(), "profiles": profiles_json() });
        let (status, body) = send(
            build_router(test_state(dir.path())),
            Method::POST,
            "/api/v1/rank/export?format=csv",
            json_body(&request),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let text = String::from_utf8(body).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("rank,url,nome,score"));
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("1,u2,Alto,"));
    }
}
