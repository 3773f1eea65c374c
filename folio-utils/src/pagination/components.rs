//! Button row layout for session messages.

use twilight_model::channel::message::component::{ActionRow, Button, Component};

use super::button::{ButtonSpec, PaginationButton};

/// Maximum number of buttons Discord renders in one action row.
pub const BUTTONS_PER_ROW: usize = 5;

/// Build the full control grid for a session position.
///
/// Disabled flags are derived from `index`/`total_pages` on every call.
/// `disable_all` forces every control off (final render after expiry).
pub fn build_controls(
    buttons: &[Box<dyn PaginationButton>],
    index: usize,
    total_pages: usize,
    disable_all: bool,
) -> Vec<Component> {
    let rendered = buttons
        .iter()
        .map(|button| {
            let disabled = disable_all || button.disabled(index, total_pages);
            build_button(button.spec(index, total_pages), disabled)
        })
        .collect();

    pack_rows(rendered)
}

/// Convert a button spec into a Discord button component.
pub fn build_button(spec: ButtonSpec, disabled: bool) -> Component {
    Component::Button(Button {
        id: None,
        custom_id: Some(spec.custom_id),
        disabled,
        emoji: None,
        label: Some(spec.label),
        style: spec.style,
        url: None,
        sku_id: None,
    })
}

/// Group components into action rows of [`BUTTONS_PER_ROW`].
///
/// The last row holds whatever is left over.
pub fn pack_rows(components: Vec<Component>) -> Vec<Component> {
    components
        .chunks(BUTTONS_PER_ROW)
        .map(|row| {
            Component::ActionRow(ActionRow {
                id: None,
                components: row.to_vec(),
            })
        })
        .collect()
}
