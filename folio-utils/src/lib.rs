/// Embed builders shared by paginated views.
pub mod embed;
/// Single source of truth for the message-command prefix.
pub const COMMAND_PREFIX: char = '!';
/// Pagination sessions, controls and page providers.
pub mod pagination;
