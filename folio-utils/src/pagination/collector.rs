//! Message-scoped routing of activations to their owning session.

use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use tokio::{
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    time::{Instant, timeout_at},
};
use tracing::{debug, warn};
use twilight_model::id::{Id, marker::MessageMarker};

use super::{CUSTOM_ID_PREFIX, activation::Activation, surface::Surface};

/// Ephemeral notice for stock controls whose session is no longer running.
pub const SESSION_GONE_MESSAGE: &str =
    "This pagination session has expired. Please re-run the command to start over.";

type RouteMap = HashMap<Id<MessageMarker>, UnboundedSender<Activation>>;

/// What [`ComponentCollector::route`] did with an activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Handed to the live session owning the message.
    Delivered,
    /// A stock control with no live session; the user was told it expired.
    Expired,
    /// Not a pagination control; left for other handlers.
    Foreign,
}

/// Routes gateway activations to the session that owns the target message.
///
/// Shared through the bot context; clones refer to the same routing table.
/// A route lives exactly as long as the [`Inbox`] returned by
/// [`ComponentCollector::subscribe`].
#[derive(Clone, Default)]
pub struct ComponentCollector {
    routes: Arc<Mutex<RouteMap>>,
}

impl ComponentCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start receiving activations for `message_id`.
    ///
    /// Subscribing twice to the same message replaces the earlier route.
    pub fn subscribe(&self, message_id: Id<MessageMarker>) -> Inbox {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.lock().insert(message_id, sender.clone());

        Inbox {
            message_id,
            route: sender,
            receiver,
            pending: VecDeque::new(),
            collector: self.clone(),
        }
    }

    /// Forward an activation to its session.
    ///
    /// Hands the activation back when no live session owns its message.
    pub fn dispatch(&self, activation: Activation) -> Result<(), Activation> {
        let routes = self.lock();
        match routes.get(&activation.message_id) {
            Some(sender) => sender.send(activation).map_err(|rejected| rejected.0),
            None => Err(activation),
        }
    }

    /// Dispatch `activation`, answering stale stock controls through `surface`.
    pub async fn route(&self, surface: &dyn Surface, activation: Activation) -> RouteOutcome {
        let Err(unrouted) = self.dispatch(activation) else {
            return RouteOutcome::Delivered;
        };

        if !unrouted.custom_id.starts_with(CUSTOM_ID_PREFIX) {
            return RouteOutcome::Foreign;
        }

        if let Err(source) = surface.notify(&unrouted, SESSION_GONE_MESSAGE).await {
            warn!(?source, custom_id = %unrouted.custom_id, "failed to answer stale pagination control");
        }

        RouteOutcome::Expired
    }

    pub fn is_routed(&self, message_id: Id<MessageMarker>) -> bool {
        self.lock().contains_key(&message_id)
    }

    fn unroute(&self, message_id: Id<MessageMarker>, route: &UnboundedSender<Activation>) {
        let mut routes = self.lock();
        if routes
            .get(&message_id)
            .is_some_and(|current| current.same_channel(route))
        {
            routes.remove(&message_id);
        }
    }

    fn lock(&self) -> MutexGuard<'_, RouteMap> {
        self.routes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Receiving end of a session's route. Dropping it detaches the session.
pub struct Inbox {
    message_id: Id<MessageMarker>,
    route: UnboundedSender<Activation>,
    receiver: UnboundedReceiver<Activation>,
    pending: VecDeque<Activation>,
    collector: ComponentCollector,
}

impl Inbox {
    /// Next activation in arrival order, or `None` once `deadline` passes.
    pub async fn next_before(&mut self, deadline: Instant) -> Option<Activation> {
        if let Some(activation) = self.pending.pop_front() {
            return Some(activation);
        }

        timeout_at(deadline, self.receiver.recv()).await.ok().flatten()
    }

    /// Wait for a modal submit with the given custom ID.
    ///
    /// Discord never reports a closed modal, so a button press arriving
    /// first counts as a dismissal: the wait ends with `None` and the press
    /// is returned by the next call to [`Inbox::next_before`]. Other modal
    /// submits are held back in their original order.
    pub async fn wait_for_modal(&mut self, custom_id: &str, wait: Duration) -> Option<Activation> {
        let matches = |activation: &Activation| {
            activation.is_modal_submit() && activation.custom_id == custom_id
        };

        if let Some(position) = self.pending.iter().position(matches) {
            return self.pending.remove(position);
        }
        if self.pending.iter().any(|held| !held.is_modal_submit()) {
            return None;
        }

        let deadline = Instant::now() + wait;
        loop {
            match timeout_at(deadline, self.receiver.recv()).await {
                Ok(Some(activation)) if matches(&activation) => return Some(activation),
                Ok(Some(activation)) if activation.is_modal_submit() => {
                    self.pending.push_back(activation);
                }
                Ok(Some(activation)) => {
                    debug!(custom_id = %activation.custom_id, "modal abandoned for a button press");
                    self.pending.push_back(activation);
                    return None;
                }
                Ok(None) | Err(_) => return None,
            }
        }
    }
}

impl Drop for Inbox {
    fn drop(&mut self) {
        self.collector.unroute(self.message_id, &self.route);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::testing::{RecordingSurface, SurfaceCall, button_press, modal_submit};

    #[test]
    fn dispatch_without_route_hands_activation_back() {
        let collector = ComponentCollector::new();
        let activation = button_press(7, 1, "pagination:next");

        let rejected = collector.dispatch(activation).unwrap_err();
        assert_eq!(rejected.custom_id, "pagination:next");
    }

    #[test]
    fn dropping_inbox_removes_route() {
        let collector = ComponentCollector::new();
        let inbox = collector.subscribe(Id::new(7));
        assert!(collector.is_routed(Id::new(7)));

        drop(inbox);
        assert!(!collector.is_routed(Id::new(7)));
    }

    #[test]
    fn stale_inbox_does_not_remove_replacement_route() {
        let collector = ComponentCollector::new();
        let first = collector.subscribe(Id::new(7));
        let _second = collector.subscribe(Id::new(7));

        drop(first);
        assert!(collector.is_routed(Id::new(7)));
    }

    #[tokio::test(start_paused = true)]
    async fn activations_arrive_in_dispatch_order() {
        let collector = ComponentCollector::new();
        let mut inbox = collector.subscribe(Id::new(7));

        for custom_id in ["a", "b", "c"] {
            collector.dispatch(button_press(7, 1, custom_id)).unwrap();
        }

        let deadline = Instant::now() + Duration::from_secs(1);
        let mut seen = Vec::new();
        while let Some(activation) = inbox.next_before(deadline).await {
            seen.push(activation.custom_id);
        }

        assert_eq!(seen, ["a", "b", "c"]);
    }

    #[tokio::test(start_paused = true)]
    async fn modal_wait_holds_back_other_submits() {
        let collector = ComponentCollector::new();
        let mut inbox = collector.subscribe(Id::new(7));

        collector
            .dispatch(modal_submit(7, 1, "other-modal", &[("page", "9")]))
            .unwrap();
        collector
            .dispatch(modal_submit(7, 1, "jump-modal", &[("page", "2")]))
            .unwrap();

        let submit = inbox
            .wait_for_modal("jump-modal", Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(submit.field("page"), Some("2"));

        let deadline = Instant::now() + Duration::from_secs(1);
        let held = inbox.next_before(deadline).await.unwrap();
        assert_eq!(held.custom_id, "other-modal");
        assert!(inbox.next_before(deadline).await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn button_press_ends_modal_wait() {
        let collector = ComponentCollector::new();
        let mut inbox = collector.subscribe(Id::new(7));

        let feeder = collector.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            feeder.dispatch(button_press(7, 1, "next")).unwrap();
        });

        let started = Instant::now();
        let submit = inbox
            .wait_for_modal("jump-modal", Duration::from_secs(60))
            .await;

        assert!(submit.is_none());
        assert!(started.elapsed() < Duration::from_secs(2));

        let deadline = Instant::now() + Duration::from_secs(1);
        assert_eq!(inbox.next_before(deadline).await.unwrap().custom_id, "next");
    }

    #[tokio::test(start_paused = true)]
    async fn held_press_dismisses_later_modal_wait() {
        let collector = ComponentCollector::new();
        let mut inbox = collector.subscribe(Id::new(7));
        collector.dispatch(button_press(7, 1, "next")).unwrap();
        let started = Instant::now();

        assert!(inbox
            .wait_for_modal("jump-modal", Duration::from_secs(60))
            .await
            .is_none());
        assert!(inbox
            .wait_for_modal("jump-modal", Duration::from_secs(60))
            .await
            .is_none());
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test]
    async fn route_delivers_to_live_session() {
        let collector = ComponentCollector::new();
        let surface = RecordingSurface::default();
        let mut inbox = collector.subscribe(Id::new(7));

        let outcome = collector
            .route(&surface, button_press(7, 1, "pagination:next"))
            .await;

        assert_eq!(outcome, RouteOutcome::Delivered);
        let deadline = Instant::now() + Duration::from_secs(1);
        assert_eq!(
            inbox.next_before(deadline).await.unwrap().custom_id,
            "pagination:next"
        );
        assert!(surface.calls().is_empty());
    }

    #[tokio::test]
    async fn route_tells_user_stale_control_expired() {
        let collector = ComponentCollector::new();
        let surface = RecordingSurface::default();
        let stale = button_press(7, 1, "pagination:last");
        let stale_id = stale.interaction_id;

        assert_eq!(collector.route(&surface, stale).await, RouteOutcome::Expired);
        assert_eq!(
            surface.calls(),
            vec![SurfaceCall::Notify(stale_id, SESSION_GONE_MESSAGE.to_owned())]
        );
    }

    #[tokio::test]
    async fn route_leaves_foreign_controls_alone() {
        let collector = ComponentCollector::new();
        let surface = RecordingSurface::default();

        let outcome = collector
            .route(&surface, button_press(7, 1, "tickets:close"))
            .await;

        assert_eq!(outcome, RouteOutcome::Foreign);
        assert!(surface.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn modal_wait_gives_up_after_timeout() {
        let collector = ComponentCollector::new();
        let mut inbox = collector.subscribe(Id::new(7));

        let started = Instant::now();
        let submit = inbox
            .wait_for_modal("jump-modal", Duration::from_secs(30))
            .await;

        assert!(submit.is_none());
        assert!(started.elapsed() >= Duration::from_secs(30));
    }
}
