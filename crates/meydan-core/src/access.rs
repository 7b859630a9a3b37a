//! Roles, the permission policy table, identity claims and access scopes.
//!
//! Every authorisation decision in Meydan goes through this module:
//!
//! - [`POLICY`] maps each [`Role`] to the [`Permission`]s it holds. It is the
//!   only place where "which roles are admins" is decided.
//! - [`Claims`] is the identity decoded from a verified credential.
//! - [`Scope`] is the filter handed to store mutations. An owner scope only
//!   matches resources recorded as owned by the claim's subject; the
//!   unrestricted scope can only be obtained through [`Claims::override_scope`],
//!   i.e. after passing the role gate.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Roles ───────────────────────────────────────────────────────────────────

/// The account type chosen at registration.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
  EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
  /// A single person. Older clients send `young`.
  #[serde(alias = "young")]
  #[strum(to_string = "individual", serialize = "young")]
  Individual,
  Community,
  Company,
  Organization,
}

// ─── Permissions ─────────────────────────────────────────────────────────────

/// An action gated by the role policy.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Permission {
  /// Create events, announcements, forum posts, uploads and complaints.
  Publish,
  /// Approve, update or delete any event, announcement or forum post
  /// regardless of who owns it.
  Moderate,
  ManageBadges,
  ReviewComplaints,
  ManageTranslations,
}

const MEMBER: &[Permission] = &[Permission::Publish];

const ADMIN: &[Permission] = &[
  Permission::Publish,
  Permission::Moderate,
  Permission::ManageBadges,
  Permission::ReviewComplaints,
  Permission::ManageTranslations,
];

/// The role → permission-set policy.
///
/// Community, company and organization accounts currently hold every admin
/// permission. That grant is questionable (there is no dedicated admin role)
/// and is kept here, in one place, until the product decides otherwise.
pub const POLICY: &[(Role, &[Permission])] = &[
  (Role::Individual, MEMBER),
  (Role::Community, ADMIN),
  (Role::Company, ADMIN),
  (Role::Organization, ADMIN),
];

impl Role {
  /// The permissions granted to this role by [`POLICY`].
  pub fn permissions(self) -> &'static [Permission] {
    POLICY
      .iter()
      .find(|(role, _)| *role == self)
      .map(|(_, perms)| *perms)
      .unwrap_or(&[])
  }

  pub fn grants(self, permission: Permission) -> bool {
    self.permissions().contains(&permission)
  }
}

// ─── Claims ──────────────────────────────────────────────────────────────────

/// Identity decoded from a verified credential. Never persisted.
///
/// The wire names (`id`, `userType`) are shared with existing clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
  #[serde(rename = "id")]
  pub subject_id: Uuid,
  #[serde(rename = "userType")]
  pub role:       Role,
  /// Expiry as seconds since the Unix epoch.
  pub exp:        i64,
}

impl Claims {
  /// The role gate: `Ok` if this identity's role grants `permission`.
  pub fn require(&self, permission: Permission) -> Result<()> {
    if self.role.grants(permission) {
      Ok(())
    } else {
      Err(Error::Forbidden { role: self.role, permission })
    }
  }

  /// Scope restricted to resources owned by this identity.
  pub fn own_scope(&self) -> Scope { Scope(Some(self.subject_id)) }

  /// Unrestricted scope; requires [`Permission::Moderate`].
  pub fn override_scope(&self) -> Result<Scope> {
    self.require(Permission::Moderate)?;
    Ok(Scope(None))
  }
}

// ─── Scope ───────────────────────────────────────────────────────────────────

/// Ownership filter applied by store mutations together with the resource id.
///
/// A mutation under an owner scope that does not match is indistinguishable
/// from a mutation of an id that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scope(Option<Uuid>);

impl Scope {
  /// The owner a resource must have to match, or `None` for any owner.
  pub fn owner(&self) -> Option<Uuid> { self.0 }
}
