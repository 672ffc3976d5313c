//! HTTP surface: `GET /` renders the form, `POST /predict` classifies the
//! submitted text and renders the result into the same page.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;
use textclass_model::{Pipeline, Prediction};
use tracing::{error, info};

const INDEX_TEMPLATE: &str = include_str!("../templates/index.html.liquid");

/// Shared per-process state: the prediction pipeline and the parsed page
/// template.
pub struct AppState {
    pipeline: Pipeline,
    template: liquid::Template,
}

impl AppState {
    pub fn new(pipeline: Pipeline) -> anyhow::Result<Self> {
        let template = liquid::ParserBuilder::with_stdlib()
            .build()?
            .parse(INDEX_TEMPLATE)?;
        Ok(Self { pipeline, template })
    }

    fn render(&self, prediction: Option<&Prediction>) -> anyhow::Result<String> {
        let globals = match prediction {
            Some(p) => liquid::object!({
                "result": p.label.clone(),
                "score": format!("{:.3}", p.score),
            }),
            None => liquid::object!({ "result": false, "score": false }),
        };
        Ok(self.template.render(&globals)?)
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/predict", post(predict))
        .with_state(state)
}

async fn home(State(state): State<Arc<AppState>>) -> Response {
    match state.render(None) {
        Ok(html) => Html(html).into_response(),
        Err(err) => internal_error(err),
    }
}

#[derive(Deserialize)]
struct PredictForm {
    text: String,
}

async fn predict(State(state): State<Arc<AppState>>, Form(form): Form<PredictForm>) -> Response {
    let rendered = state
        .pipeline
        .predict(&form.text)
        .map_err(anyhow::Error::from)
        .and_then(|prediction| {
            info!(label = %prediction.label, score = prediction.score, "prediction served");
            state.render(Some(&prediction))
        });

    match rendered {
        Ok(html) => Html(html).into_response(),
        Err(err) => internal_error(err),
    }
}

fn internal_error(err: anyhow::Error) -> Response {
    error!(error = %err, "request failed");
    (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, header};
    use http_body_util::BodyExt;
    use textclass_core::Normalizer;
    use textclass_model::{LinearModel, Vectorizer};
    use tower::ServiceExt;

    fn test_router() -> Router {
        let vectorizer =
            Vectorizer::from_json_slice(br#"{ "vocabulary": { "good": 0, "bad": 1 } }"#).unwrap();
        let model = LinearModel::from_json_slice(
            br#"{
                "classes": ["negative", "positive"],
                "weights": [[0.0, 1.0], [1.0, 0.0]],
                "intercepts": [0.0, 0.0]
            }"#,
        )
        .unwrap();
        let pipeline = Pipeline::new(Normalizer::new().unwrap(), vectorizer, model).unwrap();
        router(Arc::new(AppState::new(pipeline).unwrap()))
    }

    async fn body_string(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn home_renders_form_without_result() {
        let response = test_router()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains(r#"<form action="/predict" method="post">"#));
        assert!(!html.contains("Prediction"));
    }

    #[tokio::test]
    async fn predict_renders_label() {
        let request = Request::builder()
            .method("POST")
            .uri("/predict")
            .header(
                header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(Body::from("text=a+really+good+movie"))
            .unwrap();

        let response = test_router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("Prediction"));
        assert!(html.contains("<strong>positive</strong>"));
    }

    #[tokio::test]
    async fn predict_classifies_negative_text() {
        let request = Request::builder()
            .method("POST")
            .uri("/predict")
            .header(
                header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(Body::from("text=bad%2C+just+bad"))
            .unwrap();

        let response = test_router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("<strong>negative</strong>"));
    }

    #[tokio::test]
    async fn predict_accepts_empty_text() {
        let request = Request::builder()
            .method("POST")
            .uri("/predict")
            .header(
                header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(Body::from("text="))
            .unwrap();

        let response = test_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn predict_rejects_missing_field() {
        let request = Request::builder()
            .method("POST")
            .uri("/predict")
            .header(
                header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(Body::from("other=value"))
            .unwrap();

        let response = test_router().oneshot(request).await.unwrap();
        assert!(response.status().is_client_error());
    }
}
