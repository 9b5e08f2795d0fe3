//! Deal — the tracked sales record.
//!
//! A deal is a single mutable row: a label, a lifecycle status, an assignee,
//! and a monetary value, plus two store-assigned timestamps. Inbound payloads
//! arrive as a [`DealDraft`] and are validated into a [`NewDeal`] (create /
//! full replace) or a [`DealPatch`] (partial update).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::FieldErrors;

// ─── Status ──────────────────────────────────────────────────────────────────

/// Lifecycle state of a deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DealStatus {
  #[default]
  Active,
  Inactive,
  Archived,
}

impl DealStatus {
  pub const CHOICES: [DealStatus; 3] =
    [Self::Active, Self::Inactive, Self::Archived];

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Active => "active",
      Self::Inactive => "inactive",
      Self::Archived => "archived",
    }
  }

  /// Parse a wire value. Returns `None` for anything outside the enumeration.
  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "active" => Some(Self::Active),
      "inactive" => Some(Self::Inactive),
      "archived" => Some(Self::Archived),
      _ => None,
    }
  }
}

// ─── Deal ────────────────────────────────────────────────────────────────────

/// A persisted deal, as read back from a store.
///
/// `id` is store-assigned and immutable. `creation_date` is written exactly
/// once; `last_updated` is refreshed on every write, so
/// `last_updated >= creation_date` always holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
  pub id:                  i64,
  pub name:                String,
  pub description:         String,
  pub status:              DealStatus,
  pub assigned_to_user_id: i64,
  pub value:               Decimal,
  pub creation_date:       DateTime<Utc>,
  pub last_updated:        DateTime<Utc>,
}

/// Validated input for creating or fully replacing a deal.
///
/// Construct via [`DealDraft::into_new_deal`]; the store assigns `id` and
/// both timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDeal {
  pub name:                String,
  pub description:         String,
  pub status:              DealStatus,
  pub assigned_to_user_id: i64,
  pub value:               Decimal,
}

/// Validated partial update. `None` fields are left untouched; the store
/// still refreshes `last_updated` even when every field is `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DealPatch {
  pub name:                Option<String>,
  pub description:         Option<String>,
  pub status:              Option<DealStatus>,
  pub assigned_to_user_id: Option<i64>,
  pub value:               Option<Decimal>,
}

// ─── Draft & validation ──────────────────────────────────────────────────────

/// Maximum length of `name`, in characters.
pub const NAME_MAX_CHARS: usize = 200;
/// Maximum significant digits accepted for `value`.
pub const VALUE_MAX_DIGITS: usize = 10;
/// Maximum decimal places accepted for `value`; accepted values are rescaled
/// to exactly this many places.
pub const VALUE_DECIMAL_PLACES: usize = 2;

const MSG_REQUIRED: &str = "This field is required.";

/// The raw wire shape of a create/update body.
///
/// Every field is optional at this layer; unknown fields are rejected at
/// deserialisation time. `value` deserialises from either a JSON string or a
/// JSON number.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DealDraft {
  pub name:                Option<String>,
  pub description:         Option<String>,
  pub status:              Option<String>,
  pub assigned_to_user_id: Option<i64>,
  pub value:               Option<Decimal>,
}

impl DealDraft {
  /// Validate the draft as a full payload (create or replace).
  ///
  /// `name`, `assigned_to_user_id`, and `value` are required. An omitted
  /// `description` becomes the empty string and an omitted `status` defaults
  /// to [`DealStatus::Active`]. All failing fields are reported together.
  pub fn into_new_deal(self) -> Result<NewDeal, FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = match self.name {
      Some(name) => validate_name(name, &mut errors),
      None => {
        errors.push("name", MSG_REQUIRED);
        None
      }
    };

    let status = match self.status.as_deref() {
      Some(raw) => validate_status(raw, &mut errors),
      None => Some(DealStatus::default()),
    };

    let assigned_to_user_id = match self.assigned_to_user_id {
      Some(id) => Some(id),
      None => {
        errors.push("assigned_to_user_id", MSG_REQUIRED);
        None
      }
    };

    let value = match self.value {
      Some(value) => validate_value(value, &mut errors),
      None => {
        errors.push("value", MSG_REQUIRED);
        None
      }
    };

    match (name, status, assigned_to_user_id, value) {
      (Some(name), Some(status), Some(assigned_to_user_id), Some(value))
        if errors.is_empty() =>
      {
        Ok(NewDeal {
          name,
          description: self.description.unwrap_or_default(),
          status,
          assigned_to_user_id,
          value,
        })
      }
      _ => Err(errors),
    }
  }

  /// Validate the draft as a partial payload: only supplied fields are
  /// checked, and only supplied fields end up in the patch.
  pub fn into_patch(self) -> Result<DealPatch, FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = self.name.and_then(|n| validate_name(n, &mut errors));
    let status = self
      .status
      .as_deref()
      .and_then(|raw| validate_status(raw, &mut errors));
    let value = self.value.and_then(|v| validate_value(v, &mut errors));

    if !errors.is_empty() {
      return Err(errors);
    }

    Ok(DealPatch {
      name,
      description: self.description,
      status,
      assigned_to_user_id: self.assigned_to_user_id,
      value,
    })
  }
}

fn validate_name(name: String, errors: &mut FieldErrors) -> Option<String> {
  if name.trim().is_empty() {
    errors.push("name", "This field may not be blank.");
    return None;
  }
  if name.chars().count() > NAME_MAX_CHARS {
    errors.push(
      "name",
      format!("Ensure this field has no more than {NAME_MAX_CHARS} characters."),
    );
    return None;
  }
  Some(name)
}

fn validate_status(raw: &str, errors: &mut FieldErrors) -> Option<DealStatus> {
  match DealStatus::parse(raw) {
    Some(status) => Some(status),
    None => {
      errors.push("status", format!("\"{raw}\" is not a valid choice."));
      None
    }
  }
}

/// Enforce the precision contract: at most [`VALUE_MAX_DIGITS`] significant
/// digits, of which at most [`VALUE_DECIMAL_PLACES`] after the point.
/// Accepted values are rescaled to exactly two decimal places.
fn validate_value(value: Decimal, errors: &mut FieldErrors) -> Option<Decimal> {
  let rendered = value.normalize().abs().to_string();
  let (whole, frac) = match rendered.split_once('.') {
    Some((whole, frac)) => (whole, frac),
    None => (rendered.as_str(), ""),
  };
  let whole_digits = if whole == "0" { 0 } else { whole.len() };
  let decimal_places = frac.len();
  let max_whole_digits = VALUE_MAX_DIGITS - VALUE_DECIMAL_PLACES;

  if whole_digits + decimal_places > VALUE_MAX_DIGITS {
    errors.push(
      "value",
      format!("Ensure that there are no more than {VALUE_MAX_DIGITS} digits in total."),
    );
    return None;
  }
  if decimal_places > VALUE_DECIMAL_PLACES {
    errors.push(
      "value",
      format!(
        "Ensure that there are no more than {VALUE_DECIMAL_PLACES} decimal places."
      ),
    );
    return None;
  }
  if whole_digits > max_whole_digits {
    errors.push(
      "value",
      format!(
        "Ensure that there are no more than {max_whole_digits} digits before the decimal point."
      ),
    );
    return None;
  }

  let mut value = value;
  value.rescale(VALUE_DECIMAL_PLACES as u32);
  Some(value)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use rust_decimal::Decimal;

  use super::*;

  fn full_draft() -> DealDraft {
    DealDraft {
      name:                Some("Acme renewal".into()),
      description:         Some("Annual contract renewal".into()),
      status:              Some("inactive".into()),
      assigned_to_user_id: Some(7),
      value:               Some(Decimal::new(150050, 2)), // 1500.50
    }
  }

  #[test]
  fn full_draft_validates() {
    let deal = full_draft().into_new_deal().unwrap();
    assert_eq!(deal.name, "Acme renewal");
    assert_eq!(deal.status, DealStatus::Inactive);
    assert_eq!(deal.value, Decimal::new(150050, 2));
  }

  #[test]
  fn status_defaults_to_active_when_omitted() {
    let mut draft = full_draft();
    draft.status = None;
    draft.description = None;
    let deal = draft.into_new_deal().unwrap();
    assert_eq!(deal.status, DealStatus::Active);
    assert_eq!(deal.description, "");
  }

  #[test]
  fn unknown_status_names_the_rejected_value() {
    let mut draft = full_draft();
    draft.status = Some("pending_approval".into());
    let errors = draft.into_new_deal().unwrap_err();
    assert_eq!(
      errors.get("status").unwrap(),
      &["\"pending_approval\" is not a valid choice.".to_string()]
    );
  }

  #[test]
  fn missing_name_is_a_field_error() {
    let mut draft = full_draft();
    draft.name = None;
    let errors = draft.into_new_deal().unwrap_err();
    assert_eq!(errors.get("name").unwrap(), &["This field is required."]);
  }

  #[test]
  fn blank_name_is_rejected() {
    let mut draft = full_draft();
    draft.name = Some("   ".into());
    let errors = draft.into_new_deal().unwrap_err();
    assert_eq!(errors.get("name").unwrap(), &["This field may not be blank."]);
  }

  #[test]
  fn overlong_name_is_rejected() {
    let mut draft = full_draft();
    draft.name = Some("x".repeat(NAME_MAX_CHARS + 1));
    let errors = draft.into_new_deal().unwrap_err();
    assert_eq!(
      errors.get("name").unwrap(),
      &["Ensure this field has no more than 200 characters."]
    );
  }

  #[test]
  fn missing_fields_accumulate() {
    let errors = DealDraft::default().into_new_deal().unwrap_err();
    assert!(errors.get("name").is_some());
    assert!(errors.get("assigned_to_user_id").is_some());
    assert!(errors.get("value").is_some());
    assert!(errors.get("status").is_none());
  }

  #[test]
  fn value_with_three_decimal_places_is_rejected() {
    let mut draft = full_draft();
    draft.value = Some(Decimal::new(1005, 3)); // 1.005
    let errors = draft.into_new_deal().unwrap_err();
    assert_eq!(
      errors.get("value").unwrap(),
      &["Ensure that there are no more than 2 decimal places."]
    );
  }

  #[test]
  fn value_with_nine_whole_digits_is_rejected() {
    let mut draft = full_draft();
    draft.value = Some(Decimal::new(123_456_789_5, 1)); // 123456789.5
    let errors = draft.into_new_deal().unwrap_err();
    assert_eq!(
      errors.get("value").unwrap(),
      &["Ensure that there are no more than 8 digits before the decimal point."]
    );
  }

  #[test]
  fn value_with_eleven_digits_is_rejected() {
    let mut draft = full_draft();
    draft.value = Some(Decimal::new(123_456_789_01, 2)); // 123456789.01
    let errors = draft.into_new_deal().unwrap_err();
    assert_eq!(
      errors.get("value").unwrap(),
      &["Ensure that there are no more than 10 digits in total."]
    );
  }

  #[test]
  fn value_is_rescaled_to_two_places() {
    let mut draft = full_draft();
    draft.value = Some(Decimal::new(100, 0)); // 100
    let deal = draft.into_new_deal().unwrap();
    assert_eq!(deal.value.to_string(), "100.00");
  }

  #[test]
  fn patch_keeps_only_supplied_fields() {
    let draft = DealDraft {
      status: Some("archived".into()),
      ..DealDraft::default()
    };
    let patch = draft.into_patch().unwrap();
    assert_eq!(patch.status, Some(DealStatus::Archived));
    assert_eq!(patch.name, None);
    assert_eq!(patch.value, None);
  }

  #[test]
  fn patch_still_validates_supplied_fields() {
    let draft = DealDraft {
      name: Some("".into()),
      status: Some("closed".into()),
      ..DealDraft::default()
    };
    let errors = draft.into_patch().unwrap_err();
    assert!(errors.get("name").is_some());
    assert!(errors.get("status").is_some());
  }

  #[test]
  fn draft_rejects_unknown_fields() {
    let err = serde_json::from_str::<DealDraft>(
      r#"{"name":"n","value":"1.00","assigned_to_user_id":1,"stage":"won"}"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("stage"));
  }
}
