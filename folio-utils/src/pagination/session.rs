//! Session controller: one paginated, button-driven message from first
//! render to idle expiry.
//!
//! A session moves `Pending -> Active -> Expired`. `Expired` is terminal and
//! is also where sessions that never got a live message end up. Activations
//! are handled strictly one at a time in arrival order; the session owns all
//! of its state, so nothing here is locked.
//!
//! Out-of-range transitions are discarded, not clamped: a button asking for
//! an index outside `[0, total_pages)` leaves the message untouched.

use std::{sync::Arc, time::Duration};

use tokio::{task::JoinHandle, time::Instant};
use tracing::{debug, warn};
use twilight_model::{
    channel::message::embed::Embed,
    id::{
        Id,
        marker::{MessageMarker, UserMarker},
    },
};

use crate::embed::not_found_embed;

use super::{
    activation::Activation,
    button::{ClickContext, PaginationButton, default_buttons},
    collector::{ComponentCollector, Inbox},
    components::build_controls,
    provider::PageProvider,
    surface::{Origin, PageView, Surface},
};

/// Idle period after which a session expires.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(60);
/// How long a button waits for its follow-up modal to be submitted.
pub const DEFAULT_MODAL_TIMEOUT: Duration = Duration::from_secs(60);

/// Content written above the last page once a session has ended.
pub const SESSION_ENDED_MESSAGE: &str =
    "The pagination session has ended. Please re-run the command to start over.";
/// Ephemeral notice when a button handler fails.
pub const HANDLER_FAILED_MESSAGE: &str = "Something went wrong.";
/// Ephemeral notice for activations from someone other than the owner.
pub const WRONG_USER_MESSAGE: &str = "This pagination session belongs to another user.";

/// Who may operate a session's controls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AccessPolicy {
    /// Only the user that started the session.
    #[default]
    Owner,
    Anyone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Pending,
    Active,
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// First page is live and the session listens for activations.
    Active,
    /// Nothing to show; a placeholder without controls was rendered.
    NotFound,
    /// The page count or the first send failed; nothing is live.
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationOutcome {
    /// Index moved (or stayed) and the message was re-rendered.
    Navigated(usize),
    /// The control is not part of the current button set.
    Ignored,
    Unauthorized,
    /// The requested index was out of range and was dropped.
    Discarded,
    /// The button answered the activation itself.
    Dismissed,
    HandlerFailed,
    /// The provider failed or had nothing for the requested index.
    ContentUnavailable,
    /// The session is not active.
    Inactive,
}

/// A single paginated session.
pub struct Paginator {
    surface: Arc<dyn Surface>,
    collector: ComponentCollector,
    provider: Box<dyn PageProvider>,
    buttons: Vec<Box<dyn PaginationButton>>,
    origin: Origin,
    owner: Id<UserMarker>,
    access: AccessPolicy,
    idle_timeout: Duration,
    modal_timeout: Duration,
    not_found: Embed,
    phase: SessionPhase,
    index: usize,
    total_pages: usize,
    shown: Vec<Embed>,
    /// The message currently shows the not-found placeholder without controls.
    placeholder_shown: bool,
    message_id: Option<Id<MessageMarker>>,
    inbox: Option<Inbox>,
    deadline: Instant,
}

impl Paginator {
    /// Create a pending session with the stock navigation buttons.
    pub fn new(
        surface: Arc<dyn Surface>,
        collector: ComponentCollector,
        provider: impl PageProvider + 'static,
        origin: Origin,
        owner: Id<UserMarker>,
    ) -> Self {
        Self {
            surface,
            collector,
            provider: Box::new(provider),
            buttons: default_buttons(),
            origin,
            owner,
            access: AccessPolicy::default(),
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            modal_timeout: DEFAULT_MODAL_TIMEOUT,
            not_found: not_found_embed(),
            phase: SessionPhase::Pending,
            index: 0,
            total_pages: 0,
            shown: Vec::new(),
            placeholder_shown: false,
            message_id: None,
            inbox: None,
            deadline: Instant::now(),
        }
    }

    pub fn buttons(mut self, buttons: Vec<Box<dyn PaginationButton>>) -> Self {
        self.buttons = buttons;
        self
    }

    pub fn access(mut self, access: AccessPolicy) -> Self {
        self.access = access;
        self
    }

    pub fn idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    pub fn modal_timeout(mut self, modal_timeout: Duration) -> Self {
        self.modal_timeout = modal_timeout;
        self
    }

    /// Page to open on. Clamped to the last page at start.
    pub fn initial_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    pub fn not_found_embed(mut self, embed: Embed) -> Self {
        self.not_found = embed;
        self
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn message_id(&self) -> Option<Id<MessageMarker>> {
        self.message_id
    }

    /// Run the whole lifecycle on a background task.
    pub fn spawn(self) -> JoinHandle<SessionPhase> {
        tokio::spawn(self.run())
    }

    /// Start, collect until idle, expire.
    pub async fn run(mut self) -> SessionPhase {
        if self.start().await == StartOutcome::Active {
            self.collect().await;
        }

        self.phase
    }

    /// Fetch the page count, render the first page and begin listening.
    pub async fn start(&mut self) -> StartOutcome {
        if self.phase != SessionPhase::Pending {
            warn!(phase = ?self.phase, "pagination session started twice");
            return StartOutcome::Failed;
        }
        self.phase = SessionPhase::Expired;

        let total_pages = match self.provider.total_pages().await {
            Ok(total_pages) => total_pages,
            Err(source) => {
                warn!(?source, "failed to fetch pagination page count");
                return StartOutcome::Failed;
            }
        };
        self.total_pages = total_pages;
        self.index = self.index.min(total_pages.saturating_sub(1));

        let first_page = if total_pages == 0 {
            None
        } else {
            self.fetch(self.index, None).await.ok().flatten()
        };

        let Some(embeds) = first_page else {
            let placeholder = PageView {
                embeds: vec![self.not_found.clone()],
                ..PageView::default()
            };
            if let Err(source) = self.surface.send_origin(&self.origin, &placeholder).await {
                debug!(?source, "failed to send pagination placeholder");
            }
            return StartOutcome::NotFound;
        };

        let view = self.view(embeds.clone(), false);
        let message_id = match self.surface.send_origin(&self.origin, &view).await {
            Ok(message_id) => message_id,
            Err(source) => {
                debug!(?source, "failed to send pagination message");
                return StartOutcome::Failed;
            }
        };

        self.shown = embeds;
        self.message_id = Some(message_id);
        self.inbox = Some(self.collector.subscribe(message_id));
        self.deadline = Instant::now() + self.idle_timeout;
        self.phase = SessionPhase::Active;

        StartOutcome::Active
    }

    /// Process activations until the idle deadline passes, then expire.
    pub async fn collect(&mut self) {
        while self.phase == SessionPhase::Active {
            let Some(inbox) = self.inbox.as_mut() else {
                break;
            };
            let Some(activation) = inbox.next_before(self.deadline).await else {
                break;
            };

            let outcome = self.handle_activation(activation).await;
            debug!(?outcome, index = self.index, "pagination activation handled");
        }

        self.expire().await;
    }

    /// Apply one activation to the session.
    pub async fn handle_activation(&mut self, activation: Activation) -> ActivationOutcome {
        if self.phase != SessionPhase::Active {
            return ActivationOutcome::Inactive;
        }

        if self.access == AccessPolicy::Owner && activation.user_id != self.owner {
            self.notify(&activation, WRONG_USER_MESSAGE).await;
            return ActivationOutcome::Unauthorized;
        }

        let (index, total_pages) = (self.index, self.total_pages);
        let Some(button) = self
            .buttons
            .iter()
            .find(|button| button.spec(index, total_pages).custom_id == activation.custom_id)
        else {
            self.acknowledge(&activation).await;
            return ActivationOutcome::Ignored;
        };

        self.deadline = Instant::now() + self.idle_timeout;

        let Some(inbox) = self.inbox.as_mut() else {
            return ActivationOutcome::Inactive;
        };
        let ctx = ClickContext::new(
            &activation,
            self.surface.as_ref(),
            inbox,
            self.modal_timeout,
        );

        let transition = match button.on_click(index, total_pages, ctx).await {
            Ok(Some(transition)) => transition,
            Ok(None) => return ActivationOutcome::Dismissed,
            Err(source) => {
                debug!(?source, custom_id = %activation.custom_id, "pagination button handler failed");
                self.notify(&activation, HANDLER_FAILED_MESSAGE).await;
                return ActivationOutcome::HandlerFailed;
            }
        };

        let responder = transition.reply_to.as_ref().unwrap_or(&activation);

        let Some(new_index) = self.checked_index(transition.new_index) else {
            self.acknowledge(responder).await;
            return ActivationOutcome::Discarded;
        };

        self.render(new_index, transition.locate.as_deref(), responder)
            .await
    }

    /// Fetch `index` and rewrite the message through `responder`.
    ///
    /// The index is committed only when the provider has content for it. The
    /// not-found sentinel replaces the page with a placeholder and no controls.
    pub async fn render(
        &mut self,
        index: usize,
        locate: Option<&str>,
        responder: &Activation,
    ) -> ActivationOutcome {
        let embeds = match self.fetch(index, locate).await {
            Ok(Some(embeds)) => embeds,
            Ok(None) => {
                let placeholder = PageView {
                    embeds: vec![self.not_found.clone()],
                    ..PageView::default()
                };
                self.update(responder, &placeholder).await;
                self.shown = placeholder.embeds;
                self.placeholder_shown = true;
                return ActivationOutcome::ContentUnavailable;
            }
            Err(()) => {
                self.acknowledge(responder).await;
                return ActivationOutcome::ContentUnavailable;
            }
        };

        self.index = index;
        self.shown = embeds.clone();
        self.placeholder_shown = false;

        let view = self.view(embeds, false);
        self.update(responder, &view).await;

        ActivationOutcome::Navigated(index)
    }

    /// Disable every control, keep whatever is on screen visible and stop
    /// listening.
    ///
    /// Only the first call has any effect.
    pub async fn expire(&mut self) {
        if self.phase != SessionPhase::Active {
            return;
        }
        self.phase = SessionPhase::Expired;
        self.inbox = None;

        let Some(message_id) = self.message_id else {
            return;
        };

        let mut view = self.view(self.shown.clone(), true);
        if self.placeholder_shown {
            view.components.clear();
        }
        view.content = Some(SESSION_ENDED_MESSAGE.to_owned());

        if let Err(source) = self
            .surface
            .edit_origin(&self.origin, message_id, &view)
            .await
        {
            debug!(?source, message_id = message_id.get(), "failed to disable pagination controls");
        }
    }

    fn checked_index(&self, new_index: isize) -> Option<usize> {
        usize::try_from(new_index)
            .ok()
            .filter(|index| *index < self.total_pages)
    }

    fn view(&self, embeds: Vec<Embed>, disable_all: bool) -> PageView {
        PageView {
            content: None,
            embeds,
            components: build_controls(&self.buttons, self.index, self.total_pages, disable_all),
        }
    }

    /// Provider call with failures logged. Empty pages count as not found.
    async fn fetch(&self, index: usize, locate: Option<&str>) -> Result<Option<Vec<Embed>>, ()> {
        match self.provider.page(index, self.total_pages, locate).await {
            Ok(embeds) => Ok(embeds.filter(|embeds| !embeds.is_empty())),
            Err(source) => {
                warn!(?source, index, "failed to fetch pagination page");
                Err(())
            }
        }
    }

    async fn update(&self, activation: &Activation, view: &PageView) {
        if let Err(source) = self.surface.update(activation, view).await {
            debug!(?source, "failed to update pagination message");
        }
    }

    async fn acknowledge(&self, activation: &Activation) {
        if let Err(source) = self.surface.acknowledge(activation).await {
            debug!(?source, "failed to acknowledge pagination activation");
        }
    }

    async fn notify(&self, activation: &Activation, content: &str) {
        if let Err(source) = self.surface.notify(activation, content).await {
            debug!(?source, "failed to send pagination notice");
        }
    }
}
