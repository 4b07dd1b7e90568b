use parlor_models::session::SessionContext;
use parlor_models::update::{Update, Updates};
use parlor_models::user::{PublicProfile, UpdateProfileRequest, UserSnapshot};
use parlor_util::validation;

use crate::error::CoreError;
use crate::sync::{SyncError, SyncService};
use crate::{AppConfig, AppState};

/// Apply `request` to the profile of `user_id` and return the account's
/// self-view.
///
/// Only fields that differ from the stored record are written. A name change
/// is pushed to the account's other sessions; the session identified by
/// `session` is left out. Failures are returned as-is, without retries or
/// rollback of earlier writes.
pub async fn update_profile(
    state: &AppState,
    request: &UpdateProfileRequest,
    user_id: i64,
    session: &SessionContext,
) -> Result<PublicProfile, CoreError> {
    let _account = state.account_locks.lock(user_id).await;
    apply_profile_update(state, request, user_id, session).await
}

async fn apply_profile_update(
    state: &AppState,
    request: &UpdateProfileRequest,
    user_id: i64,
    session: &SessionContext,
) -> Result<PublicProfile, CoreError> {
    let mut me = state
        .users
        .get_immutable_user(user_id)
        .await
        .map_err(|e| {
            tracing::error!(user_id, error = %e, "account.updateProfile - error getting user");
            CoreError::UserLookupFailed(e)
        })?;

    let names = validate_names(request)?;
    if let Some(about) = request.about.as_deref() {
        validate_about(about, &state.config)?;
    }

    if let Some((first_name, last_name)) = names {
        me = update_names(state, me, first_name, last_name, session).await?;
    }

    if let Some(about) = request.about.as_deref() {
        me = update_about(state, me, about).await?;
    }

    tracing::debug!(
        user_id,
        perm_auth_key_id = session.perm_auth_key_id,
        client = session.client.as_deref().unwrap_or("-"),
        first_name = %me.first_name,
        last_name = %me.last_name,
        about = %me.about(),
        "account.updateProfile - success"
    );
    Ok(me.to_self_profile())
}

/// Check the first/last name pair. `None` when the request leaves names alone.
fn validate_names(request: &UpdateProfileRequest) -> Result<Option<(&str, &str)>, CoreError> {
    if !request.touches_names() {
        return Ok(None);
    }
    let (Some(first_name), Some(last_name)) =
        (request.first_name.as_deref(), request.last_name.as_deref())
    else {
        tracing::error!("account.updateProfile - bad request: first and last name must be sent together");
        return Err(CoreError::InvalidFirstName);
    };

    let first_name = validation::validate_first_name(first_name).map_err(|e| {
        tracing::error!(error = %e, "account.updateProfile - bad request: first name");
        CoreError::InvalidFirstName
    })?;
    Ok(Some((first_name, last_name.trim())))
}

fn validate_about(about: &str, config: &AppConfig) -> Result<(), CoreError> {
    validation::validate_about(about, config.about_max_length).map_err(|e| {
        tracing::error!(error = %e, "account.updateProfile - about too long");
        CoreError::AboutTooLong {
            max: config.about_max_length,
            got: validation::text_length(about),
        }
    })
}

async fn update_names(
    state: &AppState,
    me: UserSnapshot,
    first_name: &str,
    last_name: &str,
    session: &SessionContext,
) -> Result<UserSnapshot, CoreError> {
    if me.names_equal(first_name, last_name) {
        tracing::debug!(user_id = me.id, "account.updateProfile - names are the same, not updating");
        return Ok(me);
    }

    tracing::debug!(
        user_id = me.id,
        first_name,
        last_name,
        "account.updateProfile - updating names"
    );
    state
        .users
        .update_first_and_last_name(me.id, first_name, last_name)
        .await
        .map_err(|e| {
            tracing::error!(user_id = me.id, error = %e, "account.updateProfile - error updating names");
            CoreError::DownstreamWriteFailed(e)
        })?;

    let me = me.with_names(first_name, last_name);
    notify_name_changed(
        state.sync.as_ref(),
        me.id,
        session.perm_auth_key_id,
        &me.first_name,
        &me.last_name,
        me.username(),
    )
    .await
    .map_err(|e| {
        tracing::error!(user_id = me.id, error = %e, "account.updateProfile - error syncing updates");
        CoreError::NotificationFailed(e)
    })?;
    Ok(me)
}

async fn update_about(
    state: &AppState,
    me: UserSnapshot,
    about: &str,
) -> Result<UserSnapshot, CoreError> {
    if about == me.about() {
        tracing::debug!(user_id = me.id, "account.updateProfile - about is the same, not updating");
        return Ok(me);
    }

    tracing::debug!(user_id = me.id, about, "account.updateProfile - updating about");
    state.users.update_about(me.id, about).await.map_err(|e| {
        tracing::error!(user_id = me.id, error = %e, "account.updateProfile - error updating about");
        CoreError::DownstreamWriteFailed(e)
    })?;
    Ok(me.with_about(about))
}

/// Tell the other sessions of `user_id` that its name changed.
pub async fn notify_name_changed(
    sync: &dyn SyncService,
    user_id: i64,
    perm_auth_key_id: i64,
    first_name: &str,
    last_name: &str,
    username: &str,
) -> Result<(), SyncError> {
    let updates = Updates::from_updates(vec![Update::UserName {
        user_id,
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        username: username.to_string(),
    }]);
    sync.notify_others(user_id, perm_auth_key_id, updates).await
}
