use meydan_core::{
  access::Scope,
  forum::{Comment, ForumPost, ForumPostPatch, NewForumPost, Reaction},
  membership,
  store::ForumStore,
};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use super::{SqliteStore, owner_param};
use crate::{
  Result,
  encode::{POST_COLUMNS, RawPost, decode_json, encode_dt, encode_json, encode_uuid, in_call, now},
};

impl ForumStore for SqliteStore {
  async fn create_post(&self, input: NewForumPost) -> Result<ForumPost> {
    let post = ForumPost {
      post_id:    Uuid::new_v4(),
      title:      input.title,
      content:    input.content,
      author_id:  input.author_id,
      comments:   Vec::new(),
      likes:      Vec::new(),
      dislikes:   Vec::new(),
      tags:       input.tags,
      created_at: now(),
    };

    let params = (
      encode_uuid(post.post_id),
      post.title.clone(),
      post.content.clone(),
      encode_uuid(post.author_id),
      encode_json(&post.tags)?,
      encode_dt(post.created_at),
    );

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO forum_posts (post_id, title, content, author_id, tags, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          params,
        )?;
        Ok(())
      })
      .await?;

    Ok(post)
  }

  async fn get_post(&self, id: Uuid) -> Result<Option<ForumPost>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawPost> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {POST_COLUMNS} FROM forum_posts WHERE post_id = ?1"),
            rusqlite::params![id_str],
            RawPost::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawPost::into_post).transpose()
  }

  async fn list_posts(&self) -> Result<Vec<ForumPost>> {
    let raws: Vec<RawPost> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {POST_COLUMNS} FROM forum_posts ORDER BY created_at DESC, rowid DESC"
        ))?;
        let rows = stmt
          .query_map([], RawPost::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPost::into_post).collect()
  }

  async fn update_post(
    &self,
    id:    Uuid,
    scope: Scope,
    patch: ForumPostPatch,
  ) -> Result<Option<ForumPost>> {
    let params = (
      encode_uuid(id),
      owner_param(scope),
      patch.title,
      patch.content,
      patch.tags.as_deref().map(encode_json).transpose()?,
    );

    let raw: Option<RawPost> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!(
              "UPDATE forum_posts SET
                 title   = COALESCE(?3, title),
                 content = COALESCE(?4, content),
                 tags    = COALESCE(?5, tags)
               WHERE post_id = ?1 AND (?2 IS NULL OR author_id = ?2)
               RETURNING {POST_COLUMNS}"
            ),
            params,
            RawPost::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawPost::into_post).transpose()
  }

  async fn delete_post(&self, id: Uuid, scope: Scope) -> Result<bool> {
    let id_str    = encode_uuid(id);
    let owner_str = owner_param(scope);

    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM forum_posts WHERE post_id = ?1 AND (?2 IS NULL OR author_id = ?2)",
          rusqlite::params![id_str, owner_str],
        )?)
      })
      .await?;

    Ok(deleted > 0)
  }

  async fn add_comment(
    &self,
    id:      Uuid,
    user:    Uuid,
    content: String,
  ) -> Result<Option<ForumPost>> {
    let comment = Comment {
      comment_id: Uuid::new_v4(),
      user_id:    user,
      content,
      created_at: now(),
    };
    let id_str       = encode_uuid(id);
    let comment_json = encode_json(&comment)?;

    // Appending inside SQLite keeps the read and the write in one statement.
    let raw: Option<RawPost> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!(
              "UPDATE forum_posts SET comments = json_insert(comments, '$[#]', json(?2))
               WHERE post_id = ?1
               RETURNING {POST_COLUMNS}"
            ),
            rusqlite::params![id_str, comment_json],
            RawPost::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawPost::into_post).transpose()
  }

  async fn toggle_reaction(
    &self,
    id:       Uuid,
    user:     Uuid,
    reaction: Reaction,
  ) -> Result<Option<ForumPost>> {
    let id_str = encode_uuid(id);
    let column = match reaction {
      Reaction::Like => "likes",
      Reaction::Dislike => "dislikes",
    };

    let raw: Option<RawPost> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let current: Option<String> = tx
          .query_row(
            &format!("SELECT {column} FROM forum_posts WHERE post_id = ?1"),
            rusqlite::params![id_str],
            |r| r.get(0),
          )
          .optional()?;
        let Some(current) = current else {
          return Ok(None);
        };

        let mut set: Vec<Uuid> = decode_json(&current).map_err(in_call)?;
        membership::toggle(&mut set, user);
        let updated = encode_json(&set).map_err(in_call)?;

        let raw = tx.query_row(
          &format!(
            "UPDATE forum_posts SET {column} = ?2 WHERE post_id = ?1
             RETURNING {POST_COLUMNS}"
          ),
          rusqlite::params![id_str, updated],
          RawPost::from_row,
        )?;
        tx.commit()?;
        Ok(Some(raw))
      })
      .await?;

    raw.map(RawPost::into_post).transpose()
  }
}
