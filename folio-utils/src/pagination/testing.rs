//! In-memory doubles for exercising sessions without Discord.

use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
};

use twilight_model::{
    channel::message::embed::Embed,
    id::{
        Id,
        marker::{InteractionMarker, MessageMarker},
    },
};

use crate::embed::build_page_embed;

use super::{
    activation::{Activation, ActivationKind},
    provider::PageProvider,
    surface::{BoxFuture, ModalPrompt, Origin, PageView, Surface},
};

/// Message ID every recorded origin send resolves to.
pub const SESSION_MESSAGE_ID: u64 = 42;

static NEXT_INTERACTION_ID: AtomicU64 = AtomicU64::new(1);

fn activation(message_id: u64, user_id: u64, custom_id: &str, kind: ActivationKind) -> Activation {
    Activation {
        interaction_id: Id::new(NEXT_INTERACTION_ID.fetch_add(1, Ordering::Relaxed)),
        application_id: Id::new(1),
        token: "token".to_owned(),
        message_id: Id::new(message_id),
        user_id: Id::new(user_id),
        custom_id: custom_id.to_owned(),
        kind,
        fields: HashMap::new(),
    }
}

pub fn button_press(message_id: u64, user_id: u64, custom_id: &str) -> Activation {
    activation(message_id, user_id, custom_id, ActivationKind::Button)
}

pub fn modal_submit(
    message_id: u64,
    user_id: u64,
    custom_id: &str,
    fields: &[(&str, &str)],
) -> Activation {
    let mut submit = activation(message_id, user_id, custom_id, ActivationKind::ModalSubmit);
    submit.fields = fields
        .iter()
        .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
        .collect();
    submit
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    Send(PageView),
    Edit(Id<MessageMarker>, PageView),
    Update(Id<InteractionMarker>, PageView),
    Acknowledge(Id<InteractionMarker>),
    Notify(Id<InteractionMarker>, String),
    OpenModal(Id<InteractionMarker>, ModalPrompt),
}

/// Records every call; optionally fails sends or updates.
#[derive(Default)]
pub struct RecordingSurface {
    calls: Mutex<Vec<SurfaceCall>>,
    fail_send: AtomicBool,
    fail_update: AtomicBool,
}

impl RecordingSurface {
    pub fn failing_send() -> Self {
        let surface = Self::default();
        surface.fail_send.store(true, Ordering::Relaxed);
        surface
    }

    pub fn set_fail_update(&self, fail: bool) {
        self.fail_update.store(fail, Ordering::Relaxed);
    }

    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Views written by `update`, in order.
    pub fn updates(&self) -> Vec<PageView> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                SurfaceCall::Update(_, view) => Some(view),
                _ => None,
            })
            .collect()
    }

    pub fn last_call(&self) -> Option<SurfaceCall> {
        self.calls().pop()
    }

    fn record(&self, call: SurfaceCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Surface for RecordingSurface {
    fn send_origin<'a>(
        &'a self,
        _origin: &'a Origin,
        view: &'a PageView,
    ) -> BoxFuture<'a, anyhow::Result<Id<MessageMarker>>> {
        Box::pin(async move {
            if self.fail_send.load(Ordering::Relaxed) {
                anyhow::bail!("unknown channel");
            }
            self.record(SurfaceCall::Send(view.clone()));
            Ok(Id::new(SESSION_MESSAGE_ID))
        })
    }

    fn edit_origin<'a>(
        &'a self,
        _origin: &'a Origin,
        message_id: Id<MessageMarker>,
        view: &'a PageView,
    ) -> BoxFuture<'a, anyhow::Result<()>> {
        Box::pin(async move {
            self.record(SurfaceCall::Edit(message_id, view.clone()));
            Ok(())
        })
    }

    fn update<'a>(
        &'a self,
        activation: &'a Activation,
        view: &'a PageView,
    ) -> BoxFuture<'a, anyhow::Result<()>> {
        Box::pin(async move {
            if self.fail_update.load(Ordering::Relaxed) {
                anyhow::bail!("unknown message");
            }
            self.record(SurfaceCall::Update(activation.interaction_id, view.clone()));
            Ok(())
        })
    }

    fn acknowledge<'a>(&'a self, activation: &'a Activation) -> BoxFuture<'a, anyhow::Result<()>> {
        Box::pin(async move {
            self.record(SurfaceCall::Acknowledge(activation.interaction_id));
            Ok(())
        })
    }

    fn notify<'a>(
        &'a self,
        activation: &'a Activation,
        content: &'a str,
    ) -> BoxFuture<'a, anyhow::Result<()>> {
        Box::pin(async move {
            self.record(SurfaceCall::Notify(
                activation.interaction_id,
                content.to_owned(),
            ));
            Ok(())
        })
    }

    fn open_modal<'a>(
        &'a self,
        activation: &'a Activation,
        modal: &'a ModalPrompt,
    ) -> BoxFuture<'a, anyhow::Result<()>> {
        Box::pin(async move {
            self.record(SurfaceCall::OpenModal(
                activation.interaction_id,
                modal.clone(),
            ));
            Ok(())
        })
    }
}

/// Provider with a fixed page count whose pages are titled by index.
///
/// Records every locate hint it receives.
pub struct NumberedPages {
    total: usize,
    fail_total: bool,
    missing_from: Option<usize>,
    locates: Mutex<Vec<Option<String>>>,
}

impl NumberedPages {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            fail_total: false,
            missing_from: None,
            locates: Mutex::new(Vec::new()),
        }
    }

    /// Every page comes back as the not-found sentinel.
    pub fn missing(total: usize) -> Self {
        Self::missing_from(total, 0)
    }

    /// Pages at `first_missing` and beyond come back as not found.
    pub fn missing_from(total: usize, first_missing: usize) -> Self {
        Self {
            missing_from: Some(first_missing),
            ..Self::new(total)
        }
    }

    pub fn failing_total() -> Self {
        Self {
            fail_total: true,
            ..Self::new(0)
        }
    }

    pub fn locates(&self) -> Vec<Option<String>> {
        self.locates.lock().unwrap().clone()
    }

    pub fn embed(index: usize, total: usize) -> Embed {
        build_page_embed(&format!("Page {index}"), "content", index, total, None).unwrap()
    }
}

impl PageProvider for NumberedPages {
    fn total_pages(&self) -> BoxFuture<'_, anyhow::Result<usize>> {
        Box::pin(async move {
            if self.fail_total {
                anyhow::bail!("database unavailable");
            }
            Ok(self.total)
        })
    }

    fn page<'a>(
        &'a self,
        index: usize,
        total_pages: usize,
        locate: Option<&'a str>,
    ) -> BoxFuture<'a, anyhow::Result<Option<Vec<Embed>>>> {
        Box::pin(async move {
            self.locates.lock().unwrap().push(locate.map(str::to_owned));
            if self.missing_from.is_some_and(|first| index >= first) {
                return Ok(None);
            }
            Ok(Some(vec![Self::embed(index, total_pages)]))
        })
    }
}
