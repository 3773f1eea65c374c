//! Inbound control activations routed to a pagination session.

use std::collections::HashMap;

use twilight_model::{
    application::interaction::{InteractionData, modal::ModalInteractionComponent},
    gateway::payload::incoming::InteractionCreate,
    id::{
        Id,
        marker::{ApplicationMarker, InteractionMarker, MessageMarker, UserMarker},
    },
};

/// Which kind of interaction produced an activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationKind {
    Button,
    ModalSubmit,
}

/// A user-triggered control interaction on a session message.
///
/// Carries just enough of the interaction to respond to it later.
#[derive(Debug, Clone)]
pub struct Activation {
    pub interaction_id: Id<InteractionMarker>,
    pub application_id: Id<ApplicationMarker>,
    pub token: String,
    /// Message carrying the control that was used.
    pub message_id: Id<MessageMarker>,
    pub user_id: Id<UserMarker>,
    pub custom_id: String,
    pub kind: ActivationKind,
    /// Text input values keyed by input custom ID (modal submits only).
    pub fields: HashMap<String, String>,
}

impl Activation {
    /// Extract an activation from a component or modal-submit interaction.
    ///
    /// Returns `None` for any other interaction, or when the interaction is
    /// not attached to a message.
    pub fn from_interaction(interaction: &InteractionCreate) -> Option<Self> {
        let message_id = interaction.message.as_ref()?.id;
        let user_id = interaction.author_id()?;

        let (custom_id, kind, fields) = match interaction.data.as_ref()? {
            InteractionData::MessageComponent(data) => (
                data.custom_id.clone(),
                ActivationKind::Button,
                HashMap::new(),
            ),
            InteractionData::ModalSubmit(data) => (
                data.custom_id.clone(),
                ActivationKind::ModalSubmit,
                modal_fields(&data.components),
            ),
            _ => return None,
        };

        Some(Self {
            interaction_id: interaction.id,
            application_id: interaction.application_id,
            token: interaction.token.clone(),
            message_id,
            user_id,
            custom_id,
            kind,
            fields,
        })
    }

    /// Trimmed value of a modal text input.
    pub fn field(&self, input_id: &str) -> Option<&str> {
        self.fields.get(input_id).map(|value| value.trim())
    }

    pub fn is_modal_submit(&self) -> bool {
        self.kind == ActivationKind::ModalSubmit
    }
}

fn modal_fields(components: &[ModalInteractionComponent]) -> HashMap<String, String> {
    let mut fields = HashMap::new();

    for component in components {
        if let ModalInteractionComponent::ActionRow(row) = component {
            for nested in &row.components {
                if let ModalInteractionComponent::TextInput(text_input) = nested {
                    fields.insert(text_input.custom_id.clone(), text_input.value.clone());
                }
            }
        }
    }

    fields
}
