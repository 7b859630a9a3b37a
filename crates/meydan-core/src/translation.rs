//! UI string translations, keyed by language code.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
  pub translation_id: Uuid,
  /// Language code, e.g. `en` or `tr`.
  pub lang:           String,
  pub key:            String,
  pub value:          String,
}

#[derive(Debug, Clone)]
pub struct NewTranslation {
  pub lang:  String,
  pub key:   String,
  pub value: String,
}
