use meydan_core::{
  store::UserStore,
  user::{NewUser, User, UserCredentials},
};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use super::SqliteStore;
use crate::{
  Result,
  encode::{USER_COLUMNS, RawUser, encode_dt, encode_uuid, now},
};

impl UserStore for SqliteStore {
  async fn create_user(&self, input: NewUser) -> Result<Option<User>> {
    let user = User {
      user_id:          Uuid::new_v4(),
      name:             input.name,
      email:            input.email,
      user_type:        input.user_type,
      profile_image_id: None,
      badges:           Vec::new(),
      point:            0,
      profile_details:  serde_json::json!({}),
      created_at:       now(),
    };

    let id_str    = encode_uuid(user.user_id);
    let name      = user.name.clone();
    let email     = user.email.clone();
    let role_str  = user.user_type.as_ref().to_owned();
    let at_str    = encode_dt(user.created_at);
    let hash      = input.password_hash;

    let inserted = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          "INSERT INTO users (user_id, name, email, password_hash, user_type, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)
           ON CONFLICT(email) DO NOTHING",
          rusqlite::params![id_str, name, email, hash, role_str, at_str],
        )?;
        Ok(n == 1)
      })
      .await?;

    Ok(inserted.then_some(user))
  }

  async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = ?1"),
            rusqlite::params![id_str],
            RawUser::from_row,
          )
          .optional()?)
      })
      .await?;

    raw
      .map(|r| r.into_parts().map(|(user, _)| user))
      .transpose()
  }

  async fn find_credentials(&self, email: String) -> Result<Option<UserCredentials>> {
    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1"),
            rusqlite::params![email.trim()],
            RawUser::from_row,
          )
          .optional()?)
      })
      .await?;

    raw
      .map(|r| {
        r.into_parts()
          .map(|(user, password_hash)| UserCredentials { user, password_hash })
      })
      .transpose()
  }
}
