//! Runtime server configuration, deserialised from `config.toml` layered with
//! `MEYDAN_*` environment variables.

use std::path::PathBuf;

use anyhow::Context as _;
use axum::http::{HeaderValue, Method, header};
use meydan_api::uploads::DEFAULT_MAX_UPLOAD_BYTES;
use serde::Deserialize;
use tower_http::cors::{AllowOrigin, CorsLayer};

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:             String,
  #[serde(default = "default_port")]
  pub port:             u16,
  #[serde(default = "default_store_path")]
  pub store_path:       PathBuf,
  #[serde(default = "default_upload_dir")]
  pub upload_dir:       PathBuf,
  /// Largest accepted upload request, in bytes.
  #[serde(default = "default_max_upload_bytes")]
  pub max_upload_bytes: usize,
  /// HS256 signing secret. Required.
  pub jwt_secret:       String,
  #[serde(default = "default_token_ttl")]
  pub token_ttl_secs:   i64,
  /// Browser origins allowed to call the API with credentials.
  #[serde(default)]
  pub allowed_origins:  Vec<String>,
}

fn default_host() -> String { "127.0.0.1".to_owned() }
fn default_port() -> u16 { 5000 }
fn default_store_path() -> PathBuf { PathBuf::from("~/.local/share/meydan/meydan.db") }
fn default_upload_dir() -> PathBuf { PathBuf::from("uploads") }
fn default_max_upload_bytes() -> usize { DEFAULT_MAX_UPLOAD_BYTES }
fn default_token_ttl() -> i64 { 60 * 60 * 24 }

impl ServerConfig {
  /// Load from `path` (optional) and the environment.
  pub fn load(path: PathBuf) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix("MEYDAN")
          .try_parsing(true)
          .list_separator(",")
          .with_list_parse_key("allowed_origins"),
      )
      .build()
      .context("failed to read config file")?;

    let cfg: ServerConfig = settings
      .try_deserialize()
      .context("failed to deserialise ServerConfig")?;
    cfg.validate()?;
    Ok(cfg)
  }

  fn validate(&self) -> anyhow::Result<()> {
    if self.jwt_secret.trim().is_empty() {
      anyhow::bail!("jwt_secret must be set (config file or MEYDAN_JWT_SECRET)");
    }
    if self.token_ttl_secs <= 0 {
      anyhow::bail!("token_ttl_secs must be positive");
    }
    if self.max_upload_bytes == 0 {
      anyhow::bail!("max_upload_bytes must be positive");
    }
    Ok(())
  }

  /// CORS for the configured origins, with credentials so the token cookie
  /// is sent.
  pub fn cors_layer(&self) -> anyhow::Result<CorsLayer> {
    let origins = self
      .allowed_origins
      .iter()
      .map(|o| {
        HeaderValue::from_str(o).with_context(|| format!("invalid origin {o:?}"))
      })
      .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(
      CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([
          Method::GET,
          Method::POST,
          Method::PUT,
          Method::DELETE,
          Method::PATCH,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
    )
  }
}
