use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use super::types::{ChatStatus, ChatTurn, RejectReason, SubmitOutcome};
use crate::assistant::Responder;
use crate::utils::PortalError;

#[derive(Debug, Default)]
struct SessionState {
    status: ChatStatus,
    transcript: Vec<ChatTurn>,
    pending_input: String,
}

/// Where the text of a submission comes from
#[derive(Debug, Clone, Copy)]
enum Draft<'a> {
    Text(&'a str),
    Pending,
}

/// Holds the send gate for one dispatch.
///
/// Dropping it always reopens the gate. If nothing was settled (the dispatching
/// future was dropped mid-flight) the error turn is appended first, so an accepted
/// user turn is never left unanswered.
struct SendGuard<'a> {
    state: &'a Mutex<SessionState>,
    settled: bool,
}

impl SendGuard<'_> {
    fn settle(mut self, turn: ChatTurn) {
        self.state.lock().transcript.push(turn);
        self.settled = true;
    }
}

impl Drop for SendGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock();
        if !self.settled {
            warn!("dispatch abandoned before the assistant answered");
            state.transcript.push(ChatTurn::failure());
        }
        state.status = ChatStatus::Idle;
    }
}

/// One linear conversation with the remote assistant.
///
/// Cloning yields another handle to the same session, so a UI loop can hand a
/// clone to a spawned task and keep reading state while the call is in flight.
#[derive(Clone)]
pub struct ChatController {
    responder: Arc<dyn Responder>,
    state: Arc<Mutex<SessionState>>,
    timeout: Option<Duration>,
}

impl ChatController {
    pub fn new(responder: Arc<dyn Responder>) -> Self {
        Self {
            responder,
            state: Arc::new(Mutex::new(SessionState::default())),
            timeout: None,
        }
    }

    /// Race every remote call against `limit`; expiry counts as a failure
    pub fn with_timeout(mut self, limit: Duration) -> Self {
        self.timeout = Some(limit);
        self
    }

    pub fn status(&self) -> ChatStatus {
        self.state.lock().status
    }

    /// Drives the typing indicator
    pub fn is_sending(&self) -> bool {
        self.status() == ChatStatus::Sending
    }

    /// Snapshot of the transcript
    pub fn transcript(&self) -> Vec<ChatTurn> {
        self.state.lock().transcript.clone()
    }

    pub fn transcript_len(&self) -> usize {
        self.state.lock().transcript.len()
    }

    pub fn pending_input(&self) -> String {
        self.state.lock().pending_input.clone()
    }

    pub fn set_input(&self, text: impl Into<String>) {
        self.state.lock().pending_input = text.into();
    }

    /// Empty the pending input, returning what it held
    pub fn take_input(&self) -> String {
        std::mem::take(&mut self.state.lock().pending_input)
    }

    pub fn push_input(&self, c: char) {
        self.state.lock().pending_input.push(c);
    }

    pub fn pop_input(&self) {
        self.state.lock().pending_input.pop();
    }

    /// Send control enabled: non-blank pending input and nothing in flight
    pub fn submit_enabled(&self) -> bool {
        let state = self.state.lock();
        state.status == ChatStatus::Idle && !state.pending_input.trim().is_empty()
    }

    /// Submit `text` directly. The pending input is left alone.
    pub async fn submit(&self, text: &str) -> SubmitOutcome {
        self.run(Draft::Text(text)).await
    }

    /// Submit the pending input, clearing it once the submission is accepted
    pub async fn submit_pending(&self) -> SubmitOutcome {
        self.run(Draft::Pending).await
    }

    /// Put `text` into the pending input and submit it. A no-op while sending.
    pub async fn send_suggestion(&self, text: &str) -> SubmitOutcome {
        {
            let mut state = self.state.lock();
            if state.status == ChatStatus::Sending {
                debug!("suggestion ignored while a message is in flight");
                return SubmitOutcome::Rejected(RejectReason::AlreadySending);
            }
            state.pending_input = text.to_string();
        }
        self.submit_pending().await
    }

    async fn run(&self, draft: Draft<'_>) -> SubmitOutcome {
        let (guard, message) = match self.begin(draft) {
            Ok(accepted) => accepted,
            Err(reason) => {
                debug!(?reason, "submission ignored");
                return SubmitOutcome::Rejected(reason);
            }
        };

        info!(chars = message.chars().count(), "sending message to assistant");
        match self.dispatch(&message).await {
            Ok(reply) => {
                guard.settle(ChatTurn::assistant(reply));
                SubmitOutcome::Replied
            }
            Err(err) => {
                warn!(error = %err, "assistant call failed");
                guard.settle(ChatTurn::failure());
                SubmitOutcome::Failed
            }
        }
    }

    /// Check the gate and, if open, record the user turn and close it.
    /// Everything happens under one lock so racing submissions cannot both pass.
    fn begin(&self, draft: Draft<'_>) -> Result<(SendGuard<'_>, String), RejectReason> {
        let mut state = self.state.lock();
        if state.status == ChatStatus::Sending {
            return Err(RejectReason::AlreadySending);
        }

        let message = match draft {
            Draft::Text(text) => text.trim().to_string(),
            Draft::Pending => state.pending_input.trim().to_string(),
        };
        if message.is_empty() {
            return Err(RejectReason::EmptyMessage);
        }

        if matches!(draft, Draft::Pending) {
            state.pending_input.clear();
        }
        state.transcript.push(ChatTurn::user(message.clone()));
        state.status = ChatStatus::Sending;

        Ok((
            SendGuard {
                state: &self.state,
                settled: false,
            },
            message,
        ))
    }

    /// Exactly one remote call. Panics and timeouts come back as errors.
    async fn dispatch(&self, message: &str) -> Result<String, PortalError> {
        let call = AssertUnwindSafe(self.responder.respond(message)).catch_unwind();

        let settled = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| PortalError::Timeout(limit))?,
            None => call.await,
        };

        settled.unwrap_or_else(|panic| Err(PortalError::AssistantError(panic_message(panic.as_ref()))))
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "responder panicked".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::MockResponder;
    use crate::chat::Sender;
    use crate::constants::CHAT_FAILURE_MESSAGE;
    use async_trait::async_trait;
    use mockall::predicate::eq;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    fn controller_with(mock: MockResponder) -> ChatController {
        ChatController::new(Arc::new(mock))
    }

    fn summary(controller: &ChatController) -> Vec<(Sender, String, bool)> {
        controller
            .transcript()
            .into_iter()
            .map(|t| (t.sender, t.text, t.is_error))
            .collect()
    }

    struct PanickingResponder;

    #[async_trait]
    impl Responder for PanickingResponder {
        async fn respond(&self, _message: &str) -> Result<String, PortalError> {
            panic!("connection reset")
        }
    }

    /// Blocks until released, counting calls
    #[derive(Default)]
    struct GatedResponder {
        release: Notify,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Responder for GatedResponder {
        async fn respond(&self, message: &str) -> Result<String, PortalError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.release.notified().await;
            Ok(format!("echo: {}", message))
        }
    }

    struct SlowResponder;

    #[async_trait]
    impl Responder for SlowResponder {
        async fn respond(&self, _message: &str) -> Result<String, PortalError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok("too late".to_string())
        }
    }

    async fn wait_until_sending(controller: &ChatController) {
        while !controller.is_sending() {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_successful_exchange() {
        let mut mock = MockResponder::new();
        mock.expect_respond()
            .with(eq("Hello"))
            .times(1)
            .returning(|_| Ok("Hi!".to_string()));
        let controller = controller_with(mock);

        let outcome = controller.submit("  Hello  ").await;

        assert_eq!(outcome, SubmitOutcome::Replied);
        assert_eq!(controller.status(), ChatStatus::Idle);
        assert_eq!(
            summary(&controller),
            vec![
                (Sender::User, "Hello".to_string(), false),
                (Sender::Assistant, "Hi!".to_string(), false),
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_exchange_appends_error_turn() {
        let mut mock = MockResponder::new();
        mock.expect_respond()
            .times(1)
            .returning(|_| Err(PortalError::ApiError { status: 502 }));
        let controller = controller_with(mock);

        let outcome = controller.submit("Hello").await;

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(controller.status(), ChatStatus::Idle);
        assert_eq!(
            summary(&controller),
            vec![
                (Sender::User, "Hello".to_string(), false),
                (Sender::Assistant, CHAT_FAILURE_MESSAGE.to_string(), true),
            ]
        );
    }

    #[tokio::test]
    async fn test_panicking_responder_is_a_failure() {
        let controller = ChatController::new(Arc::new(PanickingResponder));

        let outcome = controller.submit("Hello").await;

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert!(!controller.is_sending());
        let transcript = controller.transcript();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0].text, "Hello");
        assert!(transcript[1].is_error);
        assert_eq!(transcript[1].text, CHAT_FAILURE_MESSAGE);
    }

    #[tokio::test]
    async fn test_blank_submissions_are_ignored() {
        let mut mock = MockResponder::new();
        mock.expect_respond().never();
        let controller = controller_with(mock);

        for text in ["", "   ", "\n\t"] {
            let outcome = controller.submit(text).await;
            assert_eq!(outcome, SubmitOutcome::Rejected(RejectReason::EmptyMessage));
        }

        assert_eq!(controller.transcript_len(), 0);
        assert_eq!(controller.status(), ChatStatus::Idle);
    }

    #[tokio::test]
    async fn test_submit_while_sending_is_a_noop() {
        let responder = Arc::new(GatedResponder::default());
        let controller = ChatController::new(responder.clone());

        let first = tokio::spawn({
            let controller = controller.clone();
            async move { controller.submit("first").await }
        });
        wait_until_sending(&controller).await;

        assert_eq!(controller.transcript_len(), 1);
        let second = controller.submit("second").await;
        assert_eq!(second, SubmitOutcome::Rejected(RejectReason::AlreadySending));
        let suggestion = controller.send_suggestion("suggested").await;
        assert_eq!(suggestion, SubmitOutcome::Rejected(RejectReason::AlreadySending));
        assert_eq!(controller.transcript_len(), 1);
        assert_eq!(controller.pending_input(), "");

        responder.release.notify_one();
        assert_eq!(first.await.unwrap(), SubmitOutcome::Replied);

        assert_eq!(responder.calls.load(Ordering::SeqCst), 1);
        assert_eq!(controller.status(), ChatStatus::Idle);
        assert_eq!(
            summary(&controller),
            vec![
                (Sender::User, "first".to_string(), false),
                (Sender::Assistant, "echo: first".to_string(), false),
            ]
        );
    }

    #[tokio::test]
    async fn test_submit_enabled_tracks_input_and_state() {
        let responder = Arc::new(GatedResponder::default());
        let controller = ChatController::new(responder.clone());

        assert!(!controller.submit_enabled());
        controller.set_input("   ");
        assert!(!controller.submit_enabled());
        controller.set_input("Hi there");
        assert!(controller.submit_enabled());

        let task = tokio::spawn({
            let controller = controller.clone();
            async move { controller.submit_pending().await }
        });
        wait_until_sending(&controller).await;

        // input cleared on acceptance, and typing again does not re-enable sending
        assert_eq!(controller.pending_input(), "");
        controller.push_input('x');
        assert!(!controller.submit_enabled());

        responder.release.notify_one();
        task.await.unwrap();
        assert!(controller.submit_enabled());
        controller.pop_input();
        assert!(!controller.submit_enabled());
    }

    #[tokio::test]
    async fn test_send_suggestion_goes_through_pending_input() {
        let mut mock = MockResponder::new();
        mock.expect_respond()
            .with(eq("What events are coming up?"))
            .times(1)
            .returning(|_| Ok("Three this month.".to_string()));
        let controller = controller_with(mock);
        controller.set_input("draft that gets replaced");

        let outcome = controller.send_suggestion("What events are coming up?").await;

        assert_eq!(outcome, SubmitOutcome::Replied);
        assert_eq!(controller.pending_input(), "");
        assert_eq!(controller.transcript()[0].text, "What events are coming up?");
    }

    #[tokio::test]
    async fn test_timeout_is_a_failure() {
        let controller =
            ChatController::new(Arc::new(SlowResponder)).with_timeout(Duration::from_millis(20));

        let outcome = controller.submit("Hello").await;

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(controller.transcript_len(), 2);
        assert!(controller.transcript()[1].is_error);
        assert!(!controller.is_sending());
    }

    #[tokio::test]
    async fn test_abandoned_dispatch_still_settles() {
        let responder = Arc::new(GatedResponder::default());
        let controller = ChatController::new(responder);

        let task = tokio::spawn({
            let controller = controller.clone();
            async move { controller.submit("never answered").await }
        });
        wait_until_sending(&controller).await;

        task.abort();
        assert!(task.await.unwrap_err().is_cancelled());

        assert_eq!(controller.status(), ChatStatus::Idle);
        let transcript = controller.transcript();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[1].sender, Sender::Assistant);
        assert!(transcript[1].is_error);
    }

    #[tokio::test]
    async fn test_sequential_exchanges_accumulate() {
        let mut mock = MockResponder::new();
        mock.expect_respond()
            .times(2)
            .returning(|message| Ok(format!("re: {}", message)));
        let controller = controller_with(mock);

        controller.submit("one").await;
        controller.submit("two").await;

        let texts: Vec<String> = controller.transcript().into_iter().map(|t| t.text).collect();
        assert_eq!(texts, vec!["one", "re: one", "two", "re: two"]);
    }
}
