//! Request handlers for the form pages.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    Form,
};
use serde::Deserialize;
use std::collections::HashMap;

use crate::assessment::{assess, AssessmentError};
use crate::features::FEATURE_COUNT;
use crate::validation::FormInput;

use super::pages::{self, InputMode, Outcome, PredictView};
use super::server::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ModeQuery {
    #[serde(default)]
    mode: InputMode,
}

fn background(state: &AppState) -> Option<&str> {
    state.background.as_deref().map(|b| b.data_url())
}

pub async fn home(State(state): State<AppState>) -> Html<String> {
    Html(pages::home(background(&state)))
}

pub async fn about(State(state): State<AppState>) -> Html<String> {
    Html(pages::about(background(&state)))
}

pub async fn about_us(State(state): State<AppState>) -> Html<String> {
    Html(pages::about_us(background(&state)))
}

pub async fn model_info(State(state): State<AppState>) -> Html<String> {
    let description = state.classifier.describe();
    Html(pages::model_info(background(&state), &description))
}

pub async fn predict_form(
    State(state): State<AppState>,
    Query(query): Query<ModeQuery>,
) -> Html<String> {
    let view = PredictView::empty(query.mode);
    Html(pages::predict(background(&state), &view))
}

/// Pull the submitted text out of a urlencoded form.
///
/// Missing discrete fields become empty strings so they fail as parse errors.
fn submitted_view(form: &HashMap<String, String>) -> PredictView {
    let mode = form
        .get("mode")
        .and_then(|m| m.parse().ok())
        .unwrap_or_default();

    let fields = (0..FEATURE_COUNT)
        .map(|i| form.get(&format!("f{}", i)).cloned().unwrap_or_default())
        .collect();
    let pasted = form.get("values").cloned().unwrap_or_default();

    PredictView {
        mode,
        fields,
        pasted,
        outcome: None,
    }
}

pub async fn predict_submit(
    State(state): State<AppState>,
    Form(form): Form<HashMap<String, String>>,
) -> (StatusCode, Html<String>) {
    let mut view = submitted_view(&form);
    let input = match view.mode {
        InputMode::Fields => FormInput::Fields(view.fields.clone()),
        InputMode::Pasted => FormInput::Delimited(view.pasted.clone()),
    };

    let status = match assess(state.classifier.as_ref(), &input, state.range_policy) {
        Ok(assessment) => {
            view.outcome = Some(Outcome::Verdict(assessment.verdict));
            StatusCode::OK
        }
        Err(e) => {
            let status = match e {
                AssessmentError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                AssessmentError::Classifier(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            view.outcome = Some(Outcome::Error(e.user_message()));
            status
        }
    };

    (status, Html(pages::predict(background(&state), &view)))
}
