use async_trait::async_trait;
use flowqa::{errors::QaError, providers::QaProvider, types::Prediction};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

static INIT: Once = Once::new();

/// Initializes the tracing subscriber and loads .env for tests.
pub fn setup_tracing() {
    INIT.call_once(|| {
        dotenvy::dotenv().ok();
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

// --- Fixtures ---

pub mod fixtures {
    /// SQuAD v2.0 dev paragraph about the Black Death.
    pub const PARAGRAPH_SQUAD: &str = "The Black Death is thought to have originated in the arid plains of Central Asia, where it then travelled along the Silk Road, reaching Crimea by 1343. From there, it was most likely carried by Oriental rat fleas living on the black rats that were regular passengers on merchant ships. Spreading throughout the Mediterranean and Europe, the Black Death is estimated to have killed 30–60% of Europe's total population. In total, the plague reduced the world population from an estimated 450 million down to 350–375 million in the 14th century. The world population as a whole did not recover to pre-plague levels until the 17th century. The plague recurred occasionally in Europe until the 19th century.";
    pub const QUESTION_SQUAD: &str = "Where did the black death originate?";
    pub const ANSWER_SQUAD: &str = "the arid plains of Central Asia";

    pub const PARAGRAPH_NIFI: &str = "Apache NiFi was open-sourced as part of NSA's technology transfer program in 2014.   Development started in 2006.   It is currently supported by Cloudera";
    pub const QUESTION_NIFI: &str = "Q: When did NiFi start?";
    pub const ANSWER_NIFI: &str = "2006";
}

// --- Mock QA Provider ---

#[derive(Debug, Clone)]
enum Scripted {
    Answer(Prediction),
    Fail(String),
}

/// A QA provider that answers from a script and records every call.
///
/// Scripts are keyed by a substring of the question; the first matching key
/// wins. Unmatched questions fail with `QaError::AiApi`.
#[derive(Clone, Debug, Default)]
pub struct MockQaProvider {
    script: Arc<Mutex<Vec<(String, Scripted)>>>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
    warm_ups: Arc<AtomicUsize>,
    warm_up_error: Arc<Mutex<Option<String>>>,
    latency: Option<Duration>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl MockQaProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider pre-programmed with the SQuAD and NiFi fixture answers.
    pub fn with_fixture_answers() -> Self {
        let provider = Self::new();
        provider.add_answer(fixtures::QUESTION_SQUAD, fixtures::ANSWER_SQUAD);
        provider.add_answer(fixtures::QUESTION_NIFI, fixtures::ANSWER_NIFI);
        provider
    }

    /// Pre-programs an answer for questions containing `key`.
    pub fn add_answer(&self, key: &str, answer: &str) {
        self.add_prediction(key, Prediction::answer(answer));
    }

    pub fn add_prediction(&self, key: &str, prediction: Prediction) {
        self.script
            .lock()
            .unwrap()
            .push((key.to_string(), Scripted::Answer(prediction)));
    }

    /// Pre-programs a model failure for questions containing `key`.
    pub fn add_failure(&self, key: &str, message: &str) {
        self.script
            .lock()
            .unwrap()
            .push((key.to_string(), Scripted::Fail(message.to_string())));
    }

    pub fn fail_warm_up(&self, message: &str) {
        *self.warm_up_error.lock().unwrap() = Some(message.to_string());
    }

    /// Delays every prediction, which lets tests observe concurrency.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Retrieves the recorded `(question, paragraph)` calls for assertion.
    pub fn get_calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn warm_up_count(&self) -> usize {
        self.warm_ups.load(Ordering::SeqCst)
    }

    /// The highest number of predictions observed running at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QaProvider for MockQaProvider {
    async fn predict(&self, question: &str, paragraph: &str) -> Result<Prediction, QaError> {
        self.calls
            .lock()
            .unwrap()
            .push((question.to_string(), paragraph.to_string()));

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let scripted = self
            .script
            .lock()
            .unwrap()
            .iter()
            .find(|(key, _)| question.contains(key.as_str()))
            .map(|(_, scripted)| scripted.clone());

        match scripted {
            Some(Scripted::Answer(prediction)) => Ok(prediction),
            Some(Scripted::Fail(message)) => Err(QaError::AiApi(message)),
            None => Err(QaError::AiApi(format!(
                "MockQaProvider: No answer programmed for question. Got: '{question}'"
            ))),
        }
    }

    async fn warm_up(&self) -> Result<(), QaError> {
        self.warm_ups.fetch_add(1, Ordering::SeqCst);
        match self.warm_up_error.lock().unwrap().clone() {
            Some(message) => Err(QaError::AiApi(message)),
            None => Ok(()),
        }
    }
}
