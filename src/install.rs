use serde::{Deserialize, Serialize};
use std::future::Future;
use thiserror::Error;
use tokio::sync::oneshot;
use tracing::{debug, info};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InstallError {
    #[error("Install prompt not available right now. Try again later!")]
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallOutcome {
    Accepted,
    Dismissed,
}

/// An install signal the platform handed over and that can be replayed once.
pub trait DeferredPrompt: Send + 'static {
    fn prompt(&mut self);
    fn user_choice(self) -> impl Future<Output = InstallOutcome> + Send;
}

#[derive(Debug)]
pub struct InstallPromptHandler<P> {
    deferred: Option<P>,
    trigger_visible: bool,
    standalone: bool,
}

impl<P> Default for InstallPromptHandler<P> {
    fn default() -> Self {
        Self {
            deferred: None,
            trigger_visible: false,
            standalone: false,
        }
    }
}

impl<P: DeferredPrompt> InstallPromptHandler<P> {
    pub fn trigger_visible(&self) -> bool {
        self.trigger_visible && !self.standalone
    }

    pub fn has_signal(&self) -> bool {
        self.deferred.is_some()
    }

    pub fn set_standalone(&mut self, standalone: bool) {
        self.standalone = standalone;
        if standalone {
            self.trigger_visible = false;
        }
    }

    pub fn on_installable(&mut self, signal: P) {
        self.deferred = Some(signal);
        self.trigger_visible = !self.standalone;
        debug!(visible = self.trigger_visible, "install signal deferred");
    }

    /// Hides the trigger and hands out the stored signal, which is used up.
    pub fn trigger(&mut self) -> Result<PendingInstall<P>, InstallError> {
        self.trigger_visible = false;
        self.deferred
            .take()
            .map(|signal| PendingInstall { signal })
            .ok_or(InstallError::Unavailable)
    }
}

#[derive(Debug)]
pub struct PendingInstall<P> {
    signal: P,
}

impl<P: DeferredPrompt> PendingInstall<P> {
    pub async fn run(mut self) -> InstallOutcome {
        self.signal.prompt();
        let outcome = self.signal.user_choice().await;
        match outcome {
            InstallOutcome::Accepted => info!("app installed"),
            InstallOutcome::Dismissed => info!("install dismissed"),
        }
        outcome
    }
}

/// Install signal held by the page; the user's choice comes back over HTTP.
#[derive(Debug)]
pub struct BrowserPrompt {
    choice: oneshot::Receiver<InstallOutcome>,
}

impl BrowserPrompt {
    pub fn channel() -> (Self, oneshot::Sender<InstallOutcome>) {
        let (tx, rx) = oneshot::channel();
        (Self { choice: rx }, tx)
    }
}

impl DeferredPrompt for BrowserPrompt {
    fn prompt(&mut self) {
        debug!("asking page to show the install prompt");
    }

    async fn user_choice(self) -> InstallOutcome {
        // A page that goes away without answering counts as a dismissal.
        self.choice.await.unwrap_or(InstallOutcome::Dismissed)
    }
}

/// Per-session install state: the handler plus the way back for the choice.
#[derive(Debug, Default)]
pub struct InstallSession {
    pub handler: InstallPromptHandler<BrowserPrompt>,
    // Sender for the signal still on offer; moves to `awaiting_tx` on trigger.
    offered_tx: Option<oneshot::Sender<InstallOutcome>>,
    awaiting_tx: Option<oneshot::Sender<InstallOutcome>>,
}

impl InstallSession {
    pub fn on_installable(&mut self) {
        let (prompt, tx) = BrowserPrompt::channel();
        self.handler.on_installable(prompt);
        self.offered_tx = Some(tx);
    }

    pub fn trigger(&mut self) -> Result<PendingInstall<BrowserPrompt>, InstallError> {
        let pending = self.handler.trigger()?;
        self.awaiting_tx = self.offered_tx.take();
        Ok(pending)
    }

    /// Forwards the page's answer; `false` unless a triggered prompt awaits it.
    pub fn resolve_choice(&mut self, outcome: InstallOutcome) -> bool {
        match self.awaiting_tx.take() {
            Some(tx) => tx.send(outcome).is_ok(),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct ScriptedPrompt {
        answer: InstallOutcome,
        prompted: Arc<Mutex<u32>>,
    }

    impl DeferredPrompt for ScriptedPrompt {
        fn prompt(&mut self) {
            *self.prompted.lock().unwrap() += 1;
        }

        async fn user_choice(self) -> InstallOutcome {
            self.answer
        }
    }

    fn scripted(answer: InstallOutcome) -> (ScriptedPrompt, Arc<Mutex<u32>>) {
        let prompted = Arc::new(Mutex::new(0));
        let prompt = ScriptedPrompt {
            answer,
            prompted: Arc::clone(&prompted),
        };
        (prompt, prompted)
    }

    #[tokio::test]
    async fn signal_is_replayed_once() {
        let mut handler = InstallPromptHandler::default();
        assert!(!handler.trigger_visible());

        let (prompt, prompted) = scripted(InstallOutcome::Accepted);
        handler.on_installable(prompt);
        assert!(handler.trigger_visible());

        let pending = handler.trigger().unwrap();
        assert!(!handler.trigger_visible());
        assert_eq!(pending.run().await, InstallOutcome::Accepted);
        assert_eq!(*prompted.lock().unwrap(), 1);

        assert_eq!(handler.trigger().err(), Some(InstallError::Unavailable));
        assert!(!handler.has_signal());
    }

    #[test]
    fn trigger_without_signal_is_unavailable() {
        let mut handler = InstallPromptHandler::<ScriptedPrompt>::default();
        assert_eq!(handler.trigger().err(), Some(InstallError::Unavailable));
        assert!(!handler.trigger_visible());
    }

    #[test]
    fn standalone_keeps_trigger_hidden() {
        let mut handler = InstallPromptHandler::default();
        handler.set_standalone(true);
        handler.on_installable(scripted(InstallOutcome::Dismissed).0);
        assert!(!handler.trigger_visible());
        assert!(handler.has_signal());
    }

    #[tokio::test]
    async fn browser_choice_arrives_through_session() {
        let mut session = InstallSession::default();
        assert!(!session.resolve_choice(InstallOutcome::Accepted));

        session.on_installable();
        let pending = session.trigger().unwrap();
        let task = tokio::spawn(pending.run());

        assert!(session.resolve_choice(InstallOutcome::Dismissed));
        assert_eq!(task.await.unwrap(), InstallOutcome::Dismissed);
    }

    #[tokio::test]
    async fn abandoned_prompt_counts_as_dismissed() {
        let mut session = InstallSession::default();
        session.on_installable();
        let pending = session.trigger().unwrap();
        session.awaiting_tx = None;
        assert_eq!(pending.run().await, InstallOutcome::Dismissed);
    }

    #[tokio::test]
    async fn choice_before_trigger_is_refused() {
        let mut session = InstallSession::default();
        session.on_installable();
        assert!(!session.resolve_choice(InstallOutcome::Accepted));

        let pending = session.trigger().unwrap();
        let task = tokio::spawn(pending.run());
        assert!(session.resolve_choice(InstallOutcome::Dismissed));
        assert_eq!(task.await.unwrap(), InstallOutcome::Dismissed);
    }
}
