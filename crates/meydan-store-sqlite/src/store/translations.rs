use meydan_core::{
  store::TranslationStore,
  translation::{NewTranslation, Translation},
};
use uuid::Uuid;

use super::SqliteStore;
use crate::{
  Result,
  encode::{TRANSLATION_COLUMNS, RawTranslation, encode_uuid},
};

impl TranslationStore for SqliteStore {
  async fn add_translation(&self, input: NewTranslation) -> Result<Translation> {
    let translation = Translation {
      translation_id: Uuid::new_v4(),
      lang:           input.lang,
      key:            input.key,
      value:          input.value,
    };

    let params = (
      encode_uuid(translation.translation_id),
      translation.lang.clone(),
      translation.key.clone(),
      translation.value.clone(),
    );

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO translations (translation_id, lang, key, value)
           VALUES (?1, ?2, ?3, ?4)",
          params,
        )?;
        Ok(())
      })
      .await?;

    Ok(translation)
  }

  async fn translations_for(&self, lang: String) -> Result<Vec<Translation>> {
    let raws: Vec<RawTranslation> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {TRANSLATION_COLUMNS} FROM translations WHERE lang = ?1 ORDER BY rowid"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![lang], RawTranslation::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawTranslation::into_translation).collect()
  }
}
