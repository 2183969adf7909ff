use leptos::prelude::*;
use leptos::task::spawn_local;

use lumio_core::models::Session;
use lumio_core::session::{AuthChange, SessionState};

use crate::api;

/// The session provider: one reactive source of auth truth, provided at the
/// app root. The route guard and every view read `state`; all transitions go
/// through [`SessionCtx::apply`] so dependents re-render off a fresh snapshot.
#[derive(Clone, Copy)]
pub struct SessionCtx {
    pub state: RwSignal<SessionState>,
}

impl SessionCtx {
    pub fn provide() -> Self {
        let ctx = Self { state: RwSignal::new(SessionState::Loading) };
        provide_context(ctx);
        ctx
    }

    /// Resolve the session on mount: restore the persisted token and confirm
    /// it with the auth service. Any failure reads as "no session"; there is
    /// no retry.
    pub fn init(self) {
        spawn_local(async move {
            if api::load_session().is_none() {
                self.state.set(SessionState::Unauthenticated);
                return;
            }
            match api::current_user().await {
                Ok(user) => self.apply(AuthChange::SignedIn(user)),
                Err(e) => {
                    log::error!("Session fetch failed: {e}");
                    api::clear_session();
                    self.apply(AuthChange::SignedOut);
                }
            }
        });
    }

    pub fn apply(self, change: AuthChange) {
        self.state.update(|s| *s = s.apply(change));
    }

    /// Persist a freshly granted session and mark the user signed in.
    pub fn establish(self, session: Session) {
        api::store_session(&session);
        self.apply(AuthChange::SignedIn(session.user));
    }

    pub fn sign_out(self) {
        spawn_local(async move {
            if let Err(e) = api::sign_out().await {
                log::error!("Sign out failed: {e}");
            }
            api::clear_session();
            self.apply(AuthChange::SignedOut);
        });
    }

    /// Current user id, untracked; views behind the guard always have one.
    pub fn user_id(self) -> Option<String> {
        self.state.with_untracked(|s| s.user().map(|u| u.id.clone()))
    }
}
