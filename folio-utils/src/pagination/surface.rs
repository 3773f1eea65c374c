//! Display surface the session engine renders to.
//!
//! The engine only ever talks to a [`Surface`]; [`TwilightSurface`] is the
//! Discord implementation backed by the shared HTTP client.

use std::{future::Future, pin::Pin, sync::Arc};

use twilight_http::Client;
use twilight_model::{
    channel::message::{
        MessageFlags,
        component::{ActionRow, Component, TextInput, TextInputStyle},
        embed::Embed,
    },
    http::interaction::{InteractionResponse, InteractionResponseData, InteractionResponseType},
    id::{
        Id,
        marker::{ApplicationMarker, ChannelMarker, MessageMarker},
    },
};
use twilight_util::builder::InteractionResponseDataBuilder;

use super::activation::Activation;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Where a session's message lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// A fresh message posted to a channel (prefix commands).
    Channel(Id<ChannelMarker>),
    /// The original response of a deferred application command.
    Interaction {
        application_id: Id<ApplicationMarker>,
        token: String,
    },
}

/// One complete render of a session message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageView {
    pub content: Option<String>,
    pub embeds: Vec<Embed>,
    pub components: Vec<Component>,
}

/// Single-input modal used by buttons that need a follow-up value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalPrompt {
    pub custom_id: String,
    pub title: String,
    pub input_id: String,
    pub label: String,
    pub placeholder: String,
}

/// Transport operations the session engine needs.
pub trait Surface: Send + Sync {
    /// Publish the first render and return the ID of the resulting message.
    fn send_origin<'a>(
        &'a self,
        origin: &'a Origin,
        view: &'a PageView,
    ) -> BoxFuture<'a, anyhow::Result<Id<MessageMarker>>>;

    /// Edit the session message outside of any interaction (expiry).
    fn edit_origin<'a>(
        &'a self,
        origin: &'a Origin,
        message_id: Id<MessageMarker>,
        view: &'a PageView,
    ) -> BoxFuture<'a, anyhow::Result<()>>;

    /// Answer an activation by rewriting the message it came from.
    fn update<'a>(
        &'a self,
        activation: &'a Activation,
        view: &'a PageView,
    ) -> BoxFuture<'a, anyhow::Result<()>>;

    /// Answer an activation without changing anything visible.
    fn acknowledge<'a>(&'a self, activation: &'a Activation) -> BoxFuture<'a, anyhow::Result<()>>;

    /// Answer an activation with a message only the activating user sees.
    fn notify<'a>(
        &'a self,
        activation: &'a Activation,
        content: &'a str,
    ) -> BoxFuture<'a, anyhow::Result<()>>;

    /// Answer an activation by opening a modal.
    fn open_modal<'a>(
        &'a self,
        activation: &'a Activation,
        modal: &'a ModalPrompt,
    ) -> BoxFuture<'a, anyhow::Result<()>>;
}

/// [`Surface`] backed by the Discord HTTP API.
#[derive(Clone)]
pub struct TwilightSurface {
    http: Arc<Client>,
}

impl TwilightSurface {
    pub fn new(http: Arc<Client>) -> Self {
        Self { http }
    }

    async fn respond(
        &self,
        activation: &Activation,
        response: &InteractionResponse,
    ) -> anyhow::Result<()> {
        self.http
            .interaction(activation.application_id)
            .create_response(activation.interaction_id, &activation.token, response)
            .await?;

        Ok(())
    }
}

impl Surface for TwilightSurface {
    fn send_origin<'a>(
        &'a self,
        origin: &'a Origin,
        view: &'a PageView,
    ) -> BoxFuture<'a, anyhow::Result<Id<MessageMarker>>> {
        Box::pin(async move {
            let message = match origin {
                Origin::Channel(channel_id) => {
                    let mut request = self
                        .http
                        .create_message(*channel_id)
                        .embeds(&view.embeds)
                        .components(&view.components);
                    if let Some(content) = view.content.as_deref() {
                        request = request.content(content);
                    }

                    request.await?.model().await?
                }
                Origin::Interaction {
                    application_id,
                    token,
                } => {
                    self.http
                        .interaction(*application_id)
                        .update_response(token)
                        .content(view.content.as_deref())
                        .embeds(Some(view.embeds.as_slice()))
                        .components(Some(view.components.as_slice()))
                        .await?
                        .model()
                        .await?
                }
            };

            Ok(message.id)
        })
    }

    fn edit_origin<'a>(
        &'a self,
        origin: &'a Origin,
        message_id: Id<MessageMarker>,
        view: &'a PageView,
    ) -> BoxFuture<'a, anyhow::Result<()>> {
        Box::pin(async move {
            match origin {
                Origin::Channel(channel_id) => {
                    self.http
                        .update_message(*channel_id, message_id)
                        .content(view.content.as_deref())
                        .embeds(Some(view.embeds.as_slice()))
                        .components(Some(view.components.as_slice()))
                        .await?;
                }
                Origin::Interaction {
                    application_id,
                    token,
                } => {
                    self.http
                        .interaction(*application_id)
                        .update_response(token)
                        .content(view.content.as_deref())
                        .embeds(Some(view.embeds.as_slice()))
                        .components(Some(view.components.as_slice()))
                        .await?;
                }
            }

            Ok(())
        })
    }

    fn update<'a>(
        &'a self,
        activation: &'a Activation,
        view: &'a PageView,
    ) -> BoxFuture<'a, anyhow::Result<()>> {
        Box::pin(async move {
            let mut data = InteractionResponseDataBuilder::new()
                .embeds(view.embeds.clone())
                .components(view.components.clone());
            if let Some(content) = view.content.as_deref() {
                data = data.content(content);
            }

            let response = InteractionResponse {
                kind: InteractionResponseType::UpdateMessage,
                data: Some(data.build()),
            };

            self.respond(activation, &response).await
        })
    }

    fn acknowledge<'a>(&'a self, activation: &'a Activation) -> BoxFuture<'a, anyhow::Result<()>> {
        Box::pin(async move {
            let response = InteractionResponse {
                kind: InteractionResponseType::DeferredUpdateMessage,
                data: None,
            };

            self.respond(activation, &response).await
        })
    }

    fn notify<'a>(
        &'a self,
        activation: &'a Activation,
        content: &'a str,
    ) -> BoxFuture<'a, anyhow::Result<()>> {
        Box::pin(async move {
            let response = InteractionResponse {
                kind: InteractionResponseType::ChannelMessageWithSource,
                data: Some(
                    InteractionResponseDataBuilder::new()
                        .content(content)
                        .flags(MessageFlags::EPHEMERAL)
                        .build(),
                ),
            };

            self.respond(activation, &response).await
        })
    }

    #[allow(deprecated)]
    fn open_modal<'a>(
        &'a self,
        activation: &'a Activation,
        modal: &'a ModalPrompt,
    ) -> BoxFuture<'a, anyhow::Result<()>> {
        Box::pin(async move {
            let input = Component::TextInput(TextInput {
                id: None,
                custom_id: modal.input_id.clone(),
                label: Some(modal.label.clone()),
                max_length: Some(100),
                min_length: Some(1),
                placeholder: Some(modal.placeholder.clone()),
                required: Some(true),
                style: TextInputStyle::Short,
                value: None,
            });

            let response = InteractionResponse {
                kind: InteractionResponseType::Modal,
                data: Some(InteractionResponseData {
                    components: Some(vec![Component::ActionRow(ActionRow {
                        id: None,
                        components: vec![input],
                    })]),
                    custom_id: Some(modal.custom_id.clone()),
                    title: Some(modal.title.clone()),
                    ..InteractionResponseData::default()
                }),
            };

            self.respond(activation, &response).await
        })
    }
}
