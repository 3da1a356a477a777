//! Data science tutor core.
//!
//! Public API: [`Tutor::ask`]. It validates the question, builds the tutor
//! prompt for the chosen [`Profile`], runs the [`AnsweringPipeline`] against
//! the session's provider state, and appends the resulting [`ChatTurn`] to the
//! session transcript.

pub mod cfg;
mod error;
pub mod pipeline;
pub mod profile;
pub mod prompt;
pub mod provider_state;
pub mod session;
pub mod transcript;

pub use cfg::TutorConfig;
pub use error::TutorError;
pub use pipeline::{AnsweringPipeline, PROVIDERS_UNAVAILABLE_MESSAGE, QUOTA_EXCEEDED_MESSAGE};
pub use profile::Profile;
pub use provider_state::ProviderState;
pub use session::{Session, SessionHandle, SessionStore, SharedSession};
pub use transcript::{ChatTurn, Transcript};

use tracing::{debug, instrument};

/// Facade the HTTP layer talks to.
#[derive(Clone)]
pub struct Tutor {
    pipeline: AnsweringPipeline,
}

impl Tutor {
    pub fn new(pipeline: AnsweringPipeline) -> Self {
        Self { pipeline }
    }

    /// Provider state for sessions created from now on.
    pub fn initial_state(&self) -> ProviderState {
        self.pipeline.initial_state()
    }

    /// Asks one question within `session` and records the turn.
    ///
    /// # Errors
    /// [`TutorError::EmptyQuestion`] for blank input; the session is left untouched.
    ///
    /// # Example
    /// ```no_run
    /// # use std::time::Duration;
    /// # use tutor::{AnsweringPipeline, Profile, Session, Tutor};
    /// # #[tokio::main] async fn main() {
    /// let tutor = Tutor::new(AnsweringPipeline::new(None, None, Duration::from_secs(60)));
    /// let mut session = Session::new(uuid::Uuid::new_v4(), tutor.initial_state());
    /// let turn = tutor.ask(&mut session, "What is overfitting?", Profile::Beginner).await.unwrap();
    /// println!("{}", turn.answer);
    /// # }
    /// ```
    #[instrument(skip_all, fields(session = %session.id(), profile = %profile))]
    pub async fn ask(
        &self,
        session: &mut Session,
        question: &str,
        profile: Profile,
    ) -> Result<ChatTurn, TutorError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(TutorError::EmptyQuestion);
        }

        session.set_profile(profile);
        let answer = self
            .pipeline
            .answer(session.provider_state_mut(), question, profile)
            .await;

        let turn = session.transcript_mut().append(question, answer).clone();
        debug!(
            turns = session.transcript().len(),
            state = %session.provider_state(),
            "turn recorded"
        );
        Ok(turn)
    }
}
