//! Role types for conversation participants.

use serde::{Deserialize, Serialize};

/// Who authored a message in the chat history.
///
/// # Examples
///
/// ```
/// use scenewright_core::Role;
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
    /// System messages provide context and instructions
    System,
    /// User messages are from the human (or carry tool results back)
    User,
    /// Assistant messages are from the model
    Assistant,
}
