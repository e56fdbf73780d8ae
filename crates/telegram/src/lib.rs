//! Telegram surface - the narrow-format outbound side of the bot
//!
//! The transport itself (webhook/polling, the Bot API client) lives
//! outside this workspace; what belongs here is everything that must be
//! right *before* a message crosses that boundary:
//! - **Notifications** (`notification`) - rendering a qualified lead into
//!   the admin-chat Markdown message
//! - **Commands** (`commands`) - parsing the follow-up actions an admin
//!   sends back (`/answer_<id>`, `/close_<id>`)
//! - **Outbound** (`outbound`) - the `Notifier` trait the real transport
//!   implements, and the gateway that sanitizes every message first
//!
//! Telegram enforces a 4096-character ceiling and a constrained Markdown
//! dialect, so the sanitizer pass in the gateway is a hard requirement,
//! not cosmetics.

pub mod commands;
pub mod notification;
pub mod outbound;

pub use commands::AdminCommand;
pub use notification::render_lead;
pub use outbound::{AdminGateway, Notifier, NotifyError, OutboundMessage, ParseMode};
