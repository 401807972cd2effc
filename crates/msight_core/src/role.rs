//! Role types for conversation participants.

use serde::{Deserialize, Serialize};

/// Author of a message sent to the text-generation collaborator.
///
/// # Examples
///
/// ```
/// use msight_core::Role;
///
/// assert_ne!(Role::User, Role::Assistant);
/// assert_eq!(format!("{}", Role::System), "System");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum Role {
    /// Agent persona and standing instructions
    System,
    /// Task prompt
    User,
    /// Earlier model output
    Assistant,
}
