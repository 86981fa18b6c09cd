//! The conversational advisor.
//!
//! This crate provides:
//! - [`screen`]: relevance, program and routing keyword checks
//! - [`CurriculumIndex`]: read-only substring search over extracted curricula
//! - [`ElectiveTable`]: rule-based elective recommendations
//! - [`Advisor`]: the stateless per-message handler
//! - [`Transport`] / [`serve`]: the serving loop, with a Telegram transport

pub mod advisor;
pub mod electives;
pub mod index;
pub mod screen;
pub mod telegram;
pub mod transport;

pub use advisor::{Advisor, Reply};
pub use electives::{
    ElectiveTable, MAX_RECOMMENDATIONS, RoleBucket, RoleEntry, RoleRequest, parse_role_request,
};
pub use index::{CurriculumIndex, MAX_MATCHES};
pub use screen::{is_recommendation_request, is_relevant, resolve_program};
pub use telegram::{TelegramOptions, TelegramTransport};
pub use transport::{Inbound, Transport, serve};
