use crate::core::collector;
use crate::domain::model::{AnalysisResult, RetentionPolicy, UploadFile, UploadPair};
use crate::domain::ports::AnalysisBackend;
use crate::utils::error::{DashboardError, Result};
use std::mem;

/// The dashboard's upload/submit lifecycle as one explicit state machine,
/// instead of three independently mutable flags (files, result, loading)
/// whose combinations are not all meaningful.
#[derive(Debug)]
pub enum SessionState {
    Idle,
    FilesSelected {
        pair: UploadPair,
        last_good: Option<AnalysisResult>,
    },
    Submitting {
        last_good: Option<AnalysisResult>,
    },
    Populated {
        result: AnalysisResult,
    },
    Failed {
        last_good: Option<AnalysisResult>,
    },
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Idle => "Idle",
            SessionState::FilesSelected { .. } => "FilesSelected",
            SessionState::Submitting { .. } => "Submitting",
            SessionState::Populated { .. } => "Populated",
            SessionState::Failed { .. } => "Failed",
        }
    }
}

pub struct DashboardSession<B: AnalysisBackend> {
    backend: B,
    policy: RetentionPolicy,
    state: SessionState,
}

impl<B: AnalysisBackend> DashboardSession<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            policy: RetentionPolicy::default(),
            state: SessionState::Idle,
        }
    }

    pub fn with_policy(mut self, policy: RetentionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.state, SessionState::Submitting { .. })
    }

    pub fn can_submit(&self) -> bool {
        matches!(self.state, SessionState::FilesSelected { .. })
    }

    /// The result the charts should currently show, regardless of which
    /// state the session is in. `None` is the empty state: no chart section.
    pub fn current_result(&self) -> Option<&AnalysisResult> {
        match &self.state {
            SessionState::Populated { result } => Some(result),
            SessionState::FilesSelected { last_good, .. }
            | SessionState::Submitting { last_good }
            | SessionState::Failed { last_good } => last_good.as_ref(),
            SessionState::Idle => None,
        }
    }

    fn take_current_result(&mut self) -> Option<AnalysisResult> {
        match mem::replace(&mut self.state, SessionState::Idle) {
            SessionState::Populated { result } => Some(result),
            SessionState::FilesSelected { last_good, .. }
            | SessionState::Submitting { last_good }
            | SessionState::Failed { last_good } => last_good,
            SessionState::Idle => None,
        }
    }

    /// Offer a dropped batch. A valid batch replaces any held pair; an
    /// invalid one leaves the session exactly as it was.
    pub fn offer_files(&mut self, batch: Vec<UploadFile>) -> Result<()> {
        let pair = collector::screen_batch(batch)?;
        tracing::info!(
            "Selected files: {}, {}",
            pair.transactions.name,
            pair.customers.name
        );
        let last_good = self.take_current_result();
        self.state = SessionState::FilesSelected { pair, last_good };
        Ok(())
    }

    /// Submit the held pair. Legal only from `FilesSelected`; the pair is
    /// consumed either way (no retry cache). `Submitting` is entered before
    /// dispatch and left on both outcome paths.
    pub async fn submit(&mut self) -> Result<()> {
        let (pair, last_good) = match mem::replace(&mut self.state, SessionState::Idle) {
            SessionState::FilesSelected { pair, last_good } => (pair, last_good),
            other => {
                let state = other.name();
                self.state = other;
                return Err(DashboardError::InvalidState {
                    operation: "submit",
                    state,
                });
            }
        };

        self.state = SessionState::Submitting { last_good };
        let outcome = self.backend.submit(&pair).await;

        let last_good = match mem::replace(&mut self.state, SessionState::Idle) {
            SessionState::Submitting { last_good } => last_good,
            other => {
                let state = other.name();
                self.state = other;
                return Err(DashboardError::InvalidState {
                    operation: "submit",
                    state,
                });
            }
        };

        match outcome {
            Ok(result) => {
                tracing::info!("Analysis succeeded: {} records", result.len());
                self.state = SessionState::Populated { result };
                Ok(())
            }
            Err(err) => {
                tracing::error!("Analysis request failed: {}", err);
                let last_good = match self.policy {
                    RetentionPolicy::KeepLastGood => last_good,
                    RetentionPolicy::ClearOnFailure => None,
                };
                self.state = SessionState::Failed { last_good };
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct MockBackend {
        calls: AtomicUsize,
        responses: Mutex<Vec<Result<AnalysisResult>>>,
    }

    impl MockBackend {
        fn new(responses: Vec<Result<AnalysisResult>>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                responses: Mutex::new(responses),
            }
        }

        fn calls(session: &DashboardSession<Self>) -> usize {
            session.backend.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl AnalysisBackend for MockBackend {
        async fn submit(&self, _pair: &UploadPair) -> Result<AnalysisResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .lock()
                .unwrap()
                .remove(0)
        }
    }

    fn csv(name: &str) -> UploadFile {
        UploadFile::new(name, b"a,b\n1,2".to_vec())
    }

    fn sample_result(monetary: f64) -> AnalysisResult {
        let record = serde_json::from_value(serde_json::json!({
            "CustomerID": 1, "Recency": 5, "Frequency": 3, "Monetary": monetary
        }))
        .unwrap();
        AnalysisResult {
            records: vec![record],
            summary: None,
        }
    }

    #[tokio::test]
    async fn test_submit_without_files_makes_no_network_call() {
        let mut session = DashboardSession::new(MockBackend::new(vec![]));
        let err = session.submit().await.unwrap_err();
        assert!(matches!(
            err,
            DashboardError::InvalidState {
                operation: "submit",
                state: "Idle"
            }
        ));
        assert_eq!(MockBackend::calls(&session), 0);
        assert!(!session.is_busy());
    }

    #[tokio::test]
    async fn test_bad_batch_leaves_session_unchanged() {
        let mut session = DashboardSession::new(MockBackend::new(vec![]));
        session
            .offer_files(vec![csv("transactions.csv"), csv("customers.csv")])
            .unwrap();
        assert!(session.can_submit());

        let err = session.offer_files(vec![csv("lonely.csv")]).unwrap_err();
        assert!(matches!(
            err,
            DashboardError::InvalidUploadCount { actual: 1 }
        ));
        // The previously held pair is still there.
        assert!(session.can_submit());
        match session.state() {
            SessionState::FilesSelected { pair, .. } => {
                assert_eq!(pair.transactions.name, "transactions.csv");
            }
            other => panic!("unexpected state: {}", other.name()),
        }
    }

    #[tokio::test]
    async fn test_successful_submit_populates_and_consumes_pair() {
        let mut session = DashboardSession::new(MockBackend::new(vec![Ok(sample_result(100.0))]));
        session
            .offer_files(vec![csv("transactions.csv"), csv("customers.csv")])
            .unwrap();

        assert!(!session.is_busy());
        session.submit().await.unwrap();
        assert!(!session.is_busy());
        assert_eq!(session.current_result().unwrap().len(), 1);
        assert_eq!(MockBackend::calls(&session), 1);

        // Pair was consumed; a second submit is a state error, not a resend.
        let err = session.submit().await.unwrap_err();
        assert!(matches!(
            err,
            DashboardError::InvalidState {
                state: "Populated",
                ..
            }
        ));
        assert_eq!(MockBackend::calls(&session), 1);
    }

    #[tokio::test]
    async fn test_failure_keeps_last_good_by_default() {
        let mut session = DashboardSession::new(MockBackend::new(vec![
            Ok(sample_result(100.0)),
            Err(DashboardError::MalformedResult {
                reason: "response has no rfm_analysis field".to_string(),
            }),
        ]));

        session
            .offer_files(vec![csv("transactions.csv"), csv("customers.csv")])
            .unwrap();
        session.submit().await.unwrap();
        let first = session.current_result().unwrap().clone();

        session
            .offer_files(vec![csv("transactions.csv"), csv("customers.csv")])
            .unwrap();
        // New files selected, but the old charts are still showing.
        assert_eq!(session.current_result(), Some(&first));

        let err = session.submit().await.unwrap_err();
        assert!(matches!(err, DashboardError::MalformedResult { .. }));
        assert!(!session.is_busy());
        assert_eq!(session.state().name(), "Failed");
        assert_eq!(session.current_result(), Some(&first));
    }

    #[tokio::test]
    async fn test_failure_clears_result_under_clear_on_failure() {
        let mut session = DashboardSession::new(MockBackend::new(vec![
            Ok(sample_result(100.0)),
            Err(DashboardError::MalformedResult {
                reason: "rfm_analysis is not a sequence (got number)".to_string(),
            }),
        ]))
        .with_policy(RetentionPolicy::ClearOnFailure);

        session
            .offer_files(vec![csv("transactions.csv"), csv("customers.csv")])
            .unwrap();
        session.submit().await.unwrap();
        assert!(session.current_result().is_some());

        session
            .offer_files(vec![csv("transactions.csv"), csv("customers.csv")])
            .unwrap();
        session.submit().await.unwrap_err();
        assert!(!session.is_busy());
        assert!(session.current_result().is_none());
    }

    #[tokio::test]
    async fn test_first_failure_with_no_prior_result_stays_empty() {
        let mut session = DashboardSession::new(MockBackend::new(vec![Err(
            DashboardError::MalformedResult {
                reason: "response has no rfm_analysis field".to_string(),
            },
        )]));
        session
            .offer_files(vec![csv("transactions.csv"), csv("customers.csv")])
            .unwrap();
        session.submit().await.unwrap_err();
        assert!(session.current_result().is_none());
        assert_eq!(session.state().name(), "Failed");
    }
}
