pub mod config;
pub mod cooldown;

use std::sync::Arc;

use twilight_http::Client;

use folio_utils::pagination::{ComponentCollector, Surface, TwilightSurface};

pub use config::{Config, ConfigError};
pub use cooldown::{CooldownStatus, Cooldowns};

/// Shared application context passed into command handlers.
///
/// Cheap to clone because it only stores reference-counted shared state.
#[derive(Clone)]
pub struct Context {
    pub http: Arc<Client>,
    /// Where pagination sessions render.
    pub surface: Arc<dyn Surface>,
    /// Routes component interactions to live pagination sessions.
    pub collector: ComponentCollector,
    pub cooldowns: Cooldowns,
    pub config: Arc<Config>,
}

impl Context {
    /// Create a new application context.
    pub fn new(http: Arc<Client>, config: Config) -> Self {
        Self {
            surface: Arc::new(TwilightSurface::new(Arc::clone(&http))),
            http,
            collector: ComponentCollector::new(),
            cooldowns: Cooldowns::new(config.command_cooldown),
            config: Arc::new(config),
        }
    }
}
