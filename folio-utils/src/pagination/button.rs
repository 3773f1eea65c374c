//! Button descriptors: visual state, disabled predicate and click transition.

use std::time::Duration;

use twilight_model::channel::message::component::ButtonStyle;

use super::{
    activation::Activation,
    collector::Inbox,
    surface::{BoxFuture, ModalPrompt, Surface},
};

pub const FIRST_ID: &str = "pagination:first";
pub const PREVIOUS_ID: &str = "pagination:prev";
pub const JUMP_ID: &str = "pagination:jump";
pub const NEXT_ID: &str = "pagination:next";
pub const LAST_ID: &str = "pagination:last";
/// Custom ID of the modal opened by the jump button.
pub const JUMP_MODAL_ID: &str = "pagination:jump:modal";
/// Custom ID of the text input inside the jump modal.
pub const JUMP_INPUT_ID: &str = "page";

/// Visual state of one button for one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonSpec {
    pub custom_id: String,
    pub label: String,
    pub style: ButtonStyle,
}

impl ButtonSpec {
    pub fn new(custom_id: impl Into<String>, label: impl Into<String>, style: ButtonStyle) -> Self {
        Self {
            custom_id: custom_id.into(),
            label: label.into(),
            style,
        }
    }
}

/// Result of a button click.
#[derive(Debug, Clone)]
pub struct Transition {
    /// Requested index. May be out of range; the session discards those.
    pub new_index: isize,
    /// Free-form hint forwarded to the page provider.
    pub locate: Option<String>,
    /// Interaction that should carry the re-render, when the clicked one was
    /// already answered (e.g. with a modal).
    pub reply_to: Option<Activation>,
}

impl Transition {
    pub fn to(new_index: isize) -> Self {
        Self {
            new_index,
            locate: None,
            reply_to: None,
        }
    }

    pub fn locate(mut self, locate: impl Into<String>) -> Self {
        self.locate = Some(locate.into());
        self
    }

    pub fn reply_to(mut self, activation: Activation) -> Self {
        self.reply_to = Some(activation);
        self
    }
}

/// What a click handler may use while computing its transition.
pub struct ClickContext<'a> {
    pub activation: &'a Activation,
    surface: &'a dyn Surface,
    inbox: &'a mut Inbox,
    modal_timeout: Duration,
}

impl<'a> ClickContext<'a> {
    pub(crate) fn new(
        activation: &'a Activation,
        surface: &'a dyn Surface,
        inbox: &'a mut Inbox,
        modal_timeout: Duration,
    ) -> Self {
        Self {
            activation,
            surface,
            inbox,
            modal_timeout,
        }
    }

    /// Answer the click with `modal` and wait for the user to submit it.
    ///
    /// Returns `Ok(None)` when the modal was dismissed or timed out.
    pub async fn prompt(&mut self, modal: &ModalPrompt) -> anyhow::Result<Option<Activation>> {
        self.surface.open_modal(self.activation, modal).await?;
        Ok(self
            .inbox
            .wait_for_modal(&modal.custom_id, self.modal_timeout)
            .await)
    }
}

/// One control in a session's button set.
pub trait PaginationButton: Send + Sync {
    /// Label, style and custom ID for the given position.
    fn spec(&self, index: usize, total_pages: usize) -> ButtonSpec;

    fn disabled(&self, index: usize, total_pages: usize) -> bool;

    /// Compute the next position.
    ///
    /// `Ok(None)` means the handler already answered the activation and no
    /// re-render should happen.
    fn on_click<'a>(
        &'a self,
        index: usize,
        total_pages: usize,
        ctx: ClickContext<'a>,
    ) -> BoxFuture<'a, anyhow::Result<Option<Transition>>>;
}

/// Stock navigation controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavButton {
    First,
    Previous,
    Jump,
    Next,
    Last,
}

/// First, previous, jump, next, last.
pub fn default_buttons() -> Vec<Box<dyn PaginationButton>> {
    [
        NavButton::First,
        NavButton::Previous,
        NavButton::Jump,
        NavButton::Next,
        NavButton::Last,
    ]
    .into_iter()
    .map(|button| Box::new(button) as Box<dyn PaginationButton>)
    .collect()
}

impl NavButton {
    fn custom_id(self) -> &'static str {
        match self {
            Self::First => FIRST_ID,
            Self::Previous => PREVIOUS_ID,
            Self::Jump => JUMP_ID,
            Self::Next => NEXT_ID,
            Self::Last => LAST_ID,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::First => "⏪",
            Self::Previous => "◀",
            Self::Jump => "#",
            Self::Next => "▶",
            Self::Last => "⏩",
        }
    }
}

impl PaginationButton for NavButton {
    fn spec(&self, _index: usize, _total_pages: usize) -> ButtonSpec {
        ButtonSpec::new(self.custom_id(), self.label(), ButtonStyle::Secondary)
    }

    fn disabled(&self, index: usize, total_pages: usize) -> bool {
        let on_last = index + 1 >= total_pages;
        match self {
            Self::First | Self::Previous => index == 0,
            Self::Jump => total_pages <= 1,
            Self::Next | Self::Last => on_last,
        }
    }

    fn on_click<'a>(
        &'a self,
        index: usize,
        total_pages: usize,
        mut ctx: ClickContext<'a>,
    ) -> BoxFuture<'a, anyhow::Result<Option<Transition>>> {
        let index = index as isize;
        let total_pages = total_pages as isize;

        Box::pin(async move {
            let transition = match self {
                Self::First => Transition::to(0),
                Self::Previous => Transition::to(index - 1),
                Self::Next => Transition::to(index + 1),
                Self::Last => Transition::to(total_pages - 1),
                Self::Jump => {
                    let Some(submit) = ctx.prompt(&jump_modal(total_pages)).await? else {
                        return Ok(None);
                    };
                    jump_transition(index, submit)
                }
            };

            Ok(Some(transition))
        })
    }
}

fn jump_modal(total_pages: isize) -> ModalPrompt {
    ModalPrompt {
        custom_id: JUMP_MODAL_ID.to_owned(),
        title: "Jump to Page".to_owned(),
        input_id: JUMP_INPUT_ID.to_owned(),
        label: "Page number or search text".to_owned(),
        placeholder: format!("Enter a page from 1 to {total_pages}"),
    }
}

/// Numeric input jumps to that (one-based) page; anything else stays put and
/// hands the text to the provider as a locate hint.
fn jump_transition(index: isize, submit: Activation) -> Transition {
    let entered = submit.field(JUMP_INPUT_ID).unwrap_or_default().to_owned();

    let transition = match entered.parse::<isize>() {
        Ok(page) => Transition::to(page - 1),
        Err(_) if entered.is_empty() => Transition::to(index),
        Err(_) => Transition::to(index).locate(entered),
    };

    transition.reply_to(submit)
}

type ClickFn = dyn Fn(usize, usize) -> anyhow::Result<isize> + Send + Sync;
type DisabledFn = dyn Fn(usize, usize) -> bool + Send + Sync;

/// Closure-backed button for call sites that need a one-off control.
pub struct FnButton {
    spec: ButtonSpec,
    on_click: Box<ClickFn>,
    disabled: Option<Box<DisabledFn>>,
}

impl FnButton {
    pub fn new<F>(
        custom_id: impl Into<String>,
        label: impl Into<String>,
        style: ButtonStyle,
        on_click: F,
    ) -> Self
    where
        F: Fn(usize, usize) -> anyhow::Result<isize> + Send + Sync + 'static,
    {
        Self {
            spec: ButtonSpec::new(custom_id, label, style),
            on_click: Box::new(on_click),
            disabled: None,
        }
    }

    pub fn disabled_when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(usize, usize) -> bool + Send + Sync + 'static,
    {
        self.disabled = Some(Box::new(predicate));
        self
    }
}

impl PaginationButton for FnButton {
    fn spec(&self, _index: usize, _total_pages: usize) -> ButtonSpec {
        self.spec.clone()
    }

    fn disabled(&self, index: usize, total_pages: usize) -> bool {
        self.disabled
            .as_ref()
            .is_some_and(|predicate| predicate(index, total_pages))
    }

    fn on_click<'a>(
        &'a self,
        index: usize,
        total_pages: usize,
        _ctx: ClickContext<'a>,
    ) -> BoxFuture<'a, anyhow::Result<Option<Transition>>> {
        Box::pin(async move {
            let new_index = (self.on_click)(index, total_pages)?;
            Ok(Some(Transition::to(new_index)))
        })
    }
}
