//! Button-driven pagination sessions and the helpers command handlers use to
//! build them.

mod activation;
mod button;
mod collector;
mod components;
mod page;
mod provider;
mod session;
mod surface;

#[cfg(test)]
pub(crate) mod testing;

pub use activation::{Activation, ActivationKind};
pub use button::{
    ButtonSpec, ClickContext, FIRST_ID, FnButton, JUMP_ID, JUMP_INPUT_ID, JUMP_MODAL_ID, LAST_ID,
    NEXT_ID, NavButton, PREVIOUS_ID, PaginationButton, Transition, default_buttons,
};
pub use collector::{ComponentCollector, Inbox, RouteOutcome, SESSION_GONE_MESSAGE};
pub use components::{BUTTONS_PER_ROW, build_button, build_controls, pack_rows};
pub use page::{bulleted_description, page_window, total_pages};
pub use provider::{ListPages, PageProvider, StaticPages};
pub use session::{
    AccessPolicy, ActivationOutcome, DEFAULT_IDLE_TIMEOUT, DEFAULT_MODAL_TIMEOUT,
    HANDLER_FAILED_MESSAGE, Paginator, SESSION_ENDED_MESSAGE, SessionPhase, StartOutcome,
    WRONG_USER_MESSAGE,
};
pub use surface::{BoxFuture, ModalPrompt, Origin, PageView, Surface, TwilightSurface};

/// Prefix shared by every custom ID the stock controls use.
pub const CUSTOM_ID_PREFIX: &str = "pagination:";
