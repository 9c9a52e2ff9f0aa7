//! Notification permission
//!
//! The platform refreshes permission asynchronously; readers take whatever value is
//! current and never wait for a refresh.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, RwLock};

/// Permission granted by the notification service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PermissionState {
    /// User has not been asked yet
    #[default]
    NotDetermined,
    /// User refused notifications
    Denied,
    /// Full permission
    Authorized,
    /// Quiet delivery allowed
    Provisional,
}

impl PermissionState {
    /// Check if notifications may be delivered
    pub fn allows_delivery(&self) -> bool {
        matches!(self, Self::Authorized | Self::Provisional)
    }
}

impl fmt::Display for PermissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotDetermined => write!(f, "not-determined"),
            Self::Denied => write!(f, "denied"),
            Self::Authorized => write!(f, "authorized"),
            Self::Provisional => write!(f, "provisional"),
        }
    }
}

/// Source of the current permission state
pub trait PermissionProvider: Send + Sync {
    /// Latest known permission state
    fn current_status(&self) -> PermissionState;
}

/// A fixed permission state
impl PermissionProvider for PermissionState {
    fn current_status(&self) -> PermissionState {
        *self
    }
}

/// Permission state shared with an asynchronous refresher
///
/// Clones share the same slot: the refresher keeps one clone and calls [`set`],
/// the gate reads through another.
///
/// [`set`]: SharedPermission::set
#[derive(Debug, Clone, Default)]
pub struct SharedPermission {
    state: Arc<RwLock<PermissionState>>,
}

impl SharedPermission {
    /// Create a shared slot holding `initial`
    pub fn new(initial: PermissionState) -> Self {
        Self {
            state: Arc::new(RwLock::new(initial)),
        }
    }

    /// Store a refreshed permission state
    pub fn set(&self, state: PermissionState) {
        match self.state.write() {
            Ok(mut guard) => *guard = state,
            Err(poisoned) => *poisoned.into_inner() = state,
        }
    }
}

impl PermissionProvider for SharedPermission {
    fn current_status(&self) -> PermissionState {
        match self.state.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allows_delivery() {
        assert!(PermissionState::Authorized.allows_delivery());
        assert!(PermissionState::Provisional.allows_delivery());
        assert!(!PermissionState::Denied.allows_delivery());
        assert!(!PermissionState::NotDetermined.allows_delivery());
    }

    #[test]
    fn test_shared_permission_starts_undetermined() {
        let shared = SharedPermission::default();
        assert_eq!(shared.current_status(), PermissionState::NotDetermined);
    }

    #[test]
    fn test_shared_permission_refresh_from_other_thread() {
        let shared = SharedPermission::default();
        let refresher = shared.clone();

        std::thread::spawn(move || refresher.set(PermissionState::Provisional))
            .join()
            .unwrap();

        assert_eq!(shared.current_status(), PermissionState::Provisional);
    }

    #[test]
    fn test_permission_from_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            permission: PermissionState,
        }

        let parsed: Wrapper = toml::from_str("permission = \"not-determined\"").unwrap();
        assert_eq!(parsed.permission, PermissionState::NotDetermined);
        assert!(toml::from_str::<Wrapper>("permission = \"maybe\"").is_err());
    }
}
