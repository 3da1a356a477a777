//! GET / and POST / — the chat page.
//!
//! The page is rendered server-side from the session on every request; the
//! form posts back to `/` and is answered with a `303` redirect so reloads
//! never resubmit a question.

use std::sync::Arc;

use axum::{
    Form,
    extract::State,
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect, Response},
};
use minijinja::context;
use tracing::{debug, instrument, warn};
use tutor::{Profile, ProviderState, Session};

use crate::{
    core::{
        app_state::{AppState, CHAT_TEMPLATE},
        session_cookie::{attach_session_cookie, resolve_session},
    },
    error_handler::AppResult,
    routes::chat_page::chat_form::{ChatForm, ProfileOption, SKILL_FOCUS, SkillGauge},
};

/// Handler: GET /
#[instrument(name = "chat_page", skip_all)]
pub async fn chat_page_route(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> AppResult<Response> {
    let handle = resolve_session(&state, &headers).await;
    let image_url = state.images.fetch_decorative_image().await;

    let html = {
        let session = handle.session.lock().await;
        render_chat_page(&state, &session, &image_url)?
    };

    Ok(attach_session_cookie(&handle, Html(html).into_response()))
}

/// Handler: POST /
#[instrument(name = "chat_submit", skip_all)]
pub async fn chat_submit_route(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(form): Form<ChatForm>,
) -> Response {
    let handle = resolve_session(&state, &headers).await;
    let mut session = handle.session.lock().await;

    let profile = form
        .profile
        .as_deref()
        .and_then(|raw| match raw.parse::<Profile>() {
            Ok(p) => Some(p),
            Err(err) => {
                warn!(error = %err, "unknown profile in form; keeping previous choice");
                None
            }
        })
        .unwrap_or_else(|| session.profile());
    session.set_profile(profile);

    if form.question.trim().is_empty() {
        debug!(session = %handle.id, "blank question ignored");
    } else if let Err(err) = state.tutor.ask(&mut session, &form.question, profile).await {
        // Only a blank question fails, which is filtered above.
        warn!(error = %err, "question rejected");
    }
    drop(session);

    attach_session_cookie(&handle, Redirect::to("/").into_response())
}

fn render_chat_page(state: &AppState, session: &Session, image_url: &str) -> AppResult<String> {
    let current = session.profile();
    let profiles: Vec<ProfileOption> = Profile::ALL
        .into_iter()
        .map(|p| ProfileOption {
            value: p.label(),
            label: p.selector_label(),
            selected: p == current,
        })
        .collect();

    let skills: Vec<SkillGauge> = SKILL_FOCUS
        .into_iter()
        .map(|(name, level)| SkillGauge { name, level })
        .collect();

    let tmpl = state.templates.get_template(CHAT_TEMPLATE)?;
    let html = tmpl.render(context! {
        image_url => image_url,
        profiles => profiles,
        skills => skills,
        turns => session.transcript().all(),
        provider_note => provider_note(session.provider_state()),
    })?;
    Ok(html)
}

/// Status line shown when the primary model is no longer answering.
fn provider_note(state: ProviderState) -> &'static str {
    match state {
        ProviderState::Primary => "",
        ProviderState::Fallback => {
            "Gemini quota is used up for this session; answers now come from the Hugging Face fallback."
        }
        ProviderState::Unavailable => {
            "No AI provider is available for this session right now."
        }
    }
}
