//! Validation failure type for `dealdesk-core`.

use std::collections::BTreeMap;

use serde::Serialize;

/// Per-field validation messages, keyed by wire field name.
///
/// Serialises directly as a 400 response body, e.g.
/// `{"status": ["\"pending_approval\" is not a valid choice."]}`.
/// Field order is deterministic (sorted by field name).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
  pub fn new() -> Self { Self::default() }

  /// Append a message to `field`'s list.
  pub fn push(&mut self, field: &str, message: impl Into<String>) {
    self.0.entry(field.to_owned()).or_default().push(message.into());
  }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  /// Messages recorded for `field`, if any.
  pub fn get(&self, field: &str) -> Option<&[String]> {
    self.0.get(field).map(Vec::as_slice)
  }
}

impl std::fmt::Display for FieldErrors {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let mut first = true;
    for (field, messages) in &self.0 {
      if !first {
        write!(f, "; ")?;
      }
      first = false;
      write!(f, "{field}: {}", messages.join(" "))?;
    }
    Ok(())
  }
}

impl std::error::Error for FieldErrors {}
