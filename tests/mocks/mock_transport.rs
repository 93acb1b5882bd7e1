use contact_intake::error::{RelayError, RelayResult};
use contact_intake::RelayTransport;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A submission captured by the mock transport.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct RecordedSubmission {
    pub action: String,
    pub fields: Vec<(String, String)>,
}

/// Mock relay transport for testing.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockTransport {
    submissions: Arc<Mutex<Vec<RecordedSubmission>>>,
    delay: Option<Duration>,
    fail_with: Option<u16>,
}

#[allow(dead_code)]
impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every send take this long.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Make every send fail with this status.
    pub fn failing(mut self, status: u16) -> Self {
        self.fail_with = Some(status);
        self
    }

    pub fn submissions(&self) -> Vec<RecordedSubmission> {
        self.submissions.lock().unwrap().clone()
    }

    pub fn submission_count(&self) -> usize {
        self.submissions.lock().unwrap().len()
    }

    /// Block until `count` submissions arrived or the timeout passes.
    pub async fn wait_for(&self, count: usize, timeout: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + timeout;
        while tokio::time::Instant::now() < deadline {
            if self.submission_count() >= count {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.submission_count() >= count
    }
}

impl RelayTransport for MockTransport {
    fn submit(&self, action: &str, fields: &[(String, String)]) -> RelayResult<()> {
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }

        self.submissions.lock().unwrap().push(RecordedSubmission {
            action: action.to_string(),
            fields: fields.to_vec(),
        });

        match self.fail_with {
            Some(status) => Err(RelayError::Status { status }),
            None => Ok(()),
        }
    }
}
