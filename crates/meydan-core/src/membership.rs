//! Set-like operations over the user-id lists embedded in resources
//! (event participants, forum likes and dislikes).
//!
//! Lists preserve insertion order and never hold duplicates.

use uuid::Uuid;

/// Add `member` to `set`. Returns `false` (leaving `set` untouched) if it was
/// already present.
pub fn insert(set: &mut Vec<Uuid>, member: Uuid) -> bool {
  if set.contains(&member) {
    return false;
  }
  set.push(member);
  true
}

/// Add `member` if absent, remove it if present. Returns whether `member` is
/// in the set afterwards.
///
/// Toggling the same member twice restores the original set.
pub fn toggle(set: &mut Vec<Uuid>, member: Uuid) -> bool {
  match set.iter().position(|m| *m == member) {
    Some(index) => {
      set.remove(index);
      false
    }
    None => {
      set.push(member);
      true
    }
  }
}
