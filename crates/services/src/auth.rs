//! Identity provider boundary.
//!
//! Providers publish the current identity on a watch channel; consumers hold an
//! `IdentitySubscription` and drop it to unsubscribe.

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::info;
use tracker_core::model::UserIdentity;

use crate::error::AuthError;

/// Receives identity changes: `Some` when signed in, `None` when signed out.
pub struct IdentitySubscription {
    receiver: watch::Receiver<Option<UserIdentity>>,
}

impl IdentitySubscription {
    #[must_use]
    pub fn new(receiver: watch::Receiver<Option<UserIdentity>>) -> Self {
        Self { receiver }
    }

    /// The identity at the time of the call; marks it as seen.
    pub fn current(&mut self) -> Option<UserIdentity> {
        self.receiver.borrow_and_update().clone()
    }

    /// Waits for the next change. Returns `None` once the provider is gone.
    pub async fn changed(&mut self) -> Option<Option<UserIdentity>> {
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Sign a user in and publish the identity to subscribers.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if sign-in fails; the published identity is unchanged.
    async fn sign_in(&self) -> Result<UserIdentity, AuthError>;

    /// Sign the current user out and publish `None`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if sign-out fails.
    async fn sign_out(&self) -> Result<(), AuthError>;

    fn subscribe(&self) -> IdentitySubscription;
}

/// Desktop provider that signs in a single locally configured profile.
pub struct LocalIdentityProvider {
    profile: Option<UserIdentity>,
    current: watch::Sender<Option<UserIdentity>>,
}

impl LocalIdentityProvider {
    #[must_use]
    pub fn new(profile: Option<UserIdentity>) -> Self {
        let (current, _) = watch::channel(None);
        Self { profile, current }
    }

    #[must_use]
    pub fn current(&self) -> Option<UserIdentity> {
        self.current.borrow().clone()
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    async fn sign_in(&self) -> Result<UserIdentity, AuthError> {
        let profile = self.profile.clone().ok_or(AuthError::NoProfile)?;
        info!(user = %profile.id(), "signed in");
        self.current.send_replace(Some(profile.clone()));
        Ok(profile)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        if let Some(previous) = self.current.send_replace(None) {
            info!(user = %previous.id(), "signed out");
        }
        Ok(())
    }

    fn subscribe(&self) -> IdentitySubscription {
        IdentitySubscription::new(self.current.subscribe())
    }
}
