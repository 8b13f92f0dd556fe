//! Raw upstream record to user row mapping

use crate::adapters::randomuser::RawUser;
use crate::domain::{NewUser, Result, RosterError, UserUuid};

fn missing(index: usize, path: &str) -> RosterError {
    RosterError::Transform(format!("record {index}: missing field `{path}`"))
}

/// Maps one raw record to `(uuid, "first last", email, city)`
///
/// # Errors
///
/// Returns `RosterError::Transform` naming the record index and field path
/// when a required field is absent or the uuid is unusable.
pub fn transform_user(index: usize, raw: RawUser) -> Result<NewUser> {
    let uuid = raw
        .login
        .and_then(|login| login.uuid)
        .ok_or_else(|| missing(index, "login.uuid"))?;
    let uuid = UserUuid::new(uuid).map_err(|e| {
        RosterError::Transform(format!("record {index}: invalid `login.uuid`: {e}"))
    })?;

    let name = raw.name.ok_or_else(|| missing(index, "name"))?;
    let first = name.first.ok_or_else(|| missing(index, "name.first"))?;
    let last = name.last.ok_or_else(|| missing(index, "name.last"))?;

    let email = raw.email.ok_or_else(|| missing(index, "email"))?;

    let city = raw
        .location
        .and_then(|location| location.city)
        .ok_or_else(|| missing(index, "location.city"))?;

    Ok(NewUser {
        uuid,
        name: format!("{first} {last}"),
        email,
        city,
    })
}

/// Maps a whole crawl; the first bad record aborts the batch
///
/// # Errors
///
/// See [`transform_user`].
pub fn transform_users(raw: Vec<RawUser>) -> Result<Vec<NewUser>> {
    raw.into_iter()
        .enumerate()
        .map(|(index, user)| transform_user(index, user))
        .collect()
}
