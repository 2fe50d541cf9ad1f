use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc,
};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    constants::labels::DEFAULT_CORRECTED_TEXT,
    errors::{AppError, AppResult},
    models::domain::{
        CorrectionRequest, CorrectionResult, GradingRequest, GradingResult, QuizItem, Verdict,
    },
    services::ProblemBank,
    session::speech::{capitalize_first, SpeechCapability, SPEECH_LANG},
};

/// The grading pipeline as seen by a session.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizBackend: Send + Sync {
    async fn grade(&self, request: GradingRequest) -> AppResult<GradingResult>;
    async fn correct(&self, request: CorrectionRequest) -> AppResult<CorrectionResult>;
    async fn generate_question(&self) -> AppResult<QuizItem>;
}

#[derive(Debug, PartialEq, Eq)]
pub enum SessionOutcome<T> {
    Rendered(T),
    /// Text to show the user in place of a result.
    Failed(String),
    /// A newer request started while this one was in flight; its result was dropped.
    Stale,
    /// The triggering control is disabled while its previous request runs.
    Busy,
}

/// Triggering controls, each disabled while its own request is in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    NewQuestion,
    SubmitAnswer,
    SubmitCorrection,
}

impl Control {
    fn index(self) -> usize {
        match self {
            Control::NewQuestion => 0,
            Control::SubmitAnswer => 1,
            Control::SubmitCorrection => 2,
        }
    }
}

/// Results that replace each other on screen. A newer request only
/// supersedes older ones in the same stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stream {
    /// The history quiz: generated questions and their grading.
    Quiz,
    /// The translation exercise: source sentences and their corrections.
    Correction,
}

impl Stream {
    fn index(self) -> usize {
        match self {
            Stream::Quiz => 0,
            Stream::Correction => 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GradingView {
    pub correctness: String,
    pub explanation: String,
    pub verdict: Verdict,
}

impl From<GradingResult> for GradingView {
    fn from(result: GradingResult) -> Self {
        let verdict = result.verdict();
        Self {
            correctness: result.correctness,
            explanation: result.explanation,
            verdict,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorrectionView {
    pub corrected_text: String,
    pub score_label: String,
    pub advice: String,
}

impl From<CorrectionResult> for CorrectionView {
    fn from(result: CorrectionResult) -> Self {
        Self {
            score_label: result.score_label(),
            corrected_text: result.corrected_text,
            advice: result.advice,
        }
    }
}

#[derive(Default)]
struct SessionState {
    current_item: Option<QuizItem>,
    current_problem: Option<String>,
}

/// Re-enables its control when dropped, whichever way the request ends.
struct ControlGuard<'a>(&'a AtomicBool);

impl Drop for ControlGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Holds the current question and problem for one user and applies
/// "last request wins" within each exercise.
pub struct QuizSession<B, S> {
    backend: Arc<B>,
    speech: S,
    problems: Arc<ProblemBank>,
    state: Mutex<SessionState>,
    latest_tickets: [AtomicU64; 2],
    busy: [AtomicBool; 3],
}

impl<B, S> QuizSession<B, S>
where
    B: QuizBackend,
    S: SpeechCapability,
{
    pub fn new(backend: Arc<B>, speech: S, problems: Arc<ProblemBank>) -> Self {
        Self {
            backend,
            speech,
            problems,
            state: Mutex::new(SessionState::default()),
            latest_tickets: [AtomicU64::new(0), AtomicU64::new(0)],
            busy: [
                AtomicBool::new(false),
                AtomicBool::new(false),
                AtomicBool::new(false),
            ],
        }
    }

    pub async fn current_question(&self) -> Option<QuizItem> {
        self.state.lock().await.current_item.clone()
    }

    pub async fn current_problem(&self) -> Option<String> {
        self.state.lock().await.current_problem.clone()
    }

    pub fn is_busy(&self, control: Control) -> bool {
        self.busy[control.index()].load(Ordering::Acquire)
    }

    pub async fn request_new_question(&self) -> SessionOutcome<QuizItem> {
        let Some(_guard) = self.acquire(Control::NewQuestion) else {
            return SessionOutcome::Busy;
        };
        let ticket = self.next_ticket(Stream::Quiz);

        let result = self.backend.generate_question().await;
        if !self.is_latest(Stream::Quiz, ticket) {
            return SessionOutcome::Stale;
        }

        match result {
            Ok(item) => {
                self.state.lock().await.current_item = Some(item.clone());
                SessionOutcome::Rendered(item)
            }
            Err(err) => SessionOutcome::Failed(user_message(&err)),
        }
    }

    pub async fn submit_answer(&self, user_text: &str) -> SessionOutcome<GradingView> {
        let Some(_guard) = self.acquire(Control::SubmitAnswer) else {
            return SessionOutcome::Busy;
        };

        let Some(item) = self.current_question().await else {
            return SessionOutcome::Failed("問題がありません。先に問題を出してください。".to_string());
        };
        let request = match GradingRequest::new(user_text, item.question, item.answer) {
            Ok(request) => request,
            Err(err) => return SessionOutcome::Failed(user_message(&err)),
        };

        let ticket = self.next_ticket(Stream::Quiz);
        let result = self.backend.grade(request).await;
        if !self.is_latest(Stream::Quiz, ticket) {
            return SessionOutcome::Stale;
        }

        match result {
            Ok(result) => SessionOutcome::Rendered(result.into()),
            Err(err) => SessionOutcome::Failed(user_message(&err)),
        }
    }

    /// Draws a new source sentence for the correction exercise.
    pub async fn next_problem(&self) -> SessionOutcome<String> {
        let problem = match self.problems.random() {
            Ok(problem) => problem.to_string(),
            Err(err) => return SessionOutcome::Failed(user_message(&err)),
        };
        // Any correction still in flight belongs to the previous problem.
        self.next_ticket(Stream::Correction);
        self.state.lock().await.current_problem = Some(problem.clone());
        SessionOutcome::Rendered(problem)
    }

    /// Sends the user's English for correction and reads the corrected
    /// sentence aloud.
    pub async fn submit_correction(&self, user_text: &str) -> SessionOutcome<CorrectionView> {
        let Some(_guard) = self.acquire(Control::SubmitCorrection) else {
            return SessionOutcome::Busy;
        };

        let Some(problem) = self.current_problem().await else {
            return SessionOutcome::Failed("問題がありません。".to_string());
        };
        let request = match CorrectionRequest::new(user_text, problem) {
            Ok(request) => request,
            Err(err) => return SessionOutcome::Failed(user_message(&err)),
        };

        let ticket = self.next_ticket(Stream::Correction);
        let result = self.backend.correct(request).await;
        if !self.is_latest(Stream::Correction, ticket) {
            return SessionOutcome::Stale;
        }

        match result {
            Ok(result) => {
                if result.corrected_text != DEFAULT_CORRECTED_TEXT {
                    if let Err(err) = self.speech.speak(&result.corrected_text, SPEECH_LANG) {
                        log::warn!("Could not read corrected sentence aloud: {}", err);
                    }
                }
                SessionOutcome::Rendered(result.into())
            }
            Err(err) => SessionOutcome::Failed(user_message(&err)),
        }
    }

    /// One dictation pass, with the first letter capitalised.
    pub async fn dictate(&self) -> SessionOutcome<String> {
        match self.speech.start_dictation(SPEECH_LANG).await {
            Ok(transcript) => SessionOutcome::Rendered(capitalize_first(transcript.trim())),
            Err(err) => SessionOutcome::Failed(err.to_string()),
        }
    }

    fn acquire(&self, control: Control) -> Option<ControlGuard<'_>> {
        let flag = &self.busy[control.index()];
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| ControlGuard(flag))
    }

    fn next_ticket(&self, stream: Stream) -> u64 {
        self.latest_tickets[stream.index()].fetch_add(1, Ordering::AcqRel) + 1
    }

    fn is_latest(&self, stream: Stream, ticket: u64) -> bool {
        self.latest_tickets[stream.index()].load(Ordering::Acquire) == ticket
    }
}

fn user_message(err: &AppError) -> String {
    match err {
        AppError::MissingField { .. } => "回答を入力してください".to_string(),
        AppError::TransportError(_) => {
            "サービスに接続できません。しばらくしてから再度お試しください。".to_string()
        }
        AppError::EmptyCompletion | AppError::ExtractionFailed(_) => {
            format!("{} もう一度お試しください。", err)
        }
        _ => format!("エラー: {}", err),
    }
}
