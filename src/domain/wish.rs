use chrono::{Datelike, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Symbols allowed in a share code. Uppercase letters minus the
/// ambiguous I/O, plus digits 2-9.
pub(crate) const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
pub(crate) const CODE_LEN: usize = 6;

pub(crate) const MAX_PHOTOS: usize = 5;

/// Occasions offered by the create form. `other` carries a custom label.
pub(crate) const OCCASIONS: &[(&str, &str)] = &[
    ("birthday", "Birthday"),
    ("anniversary", "Anniversary"),
    ("wedding", "Wedding"),
    ("graduation", "Graduation"),
    ("new_year", "New Year"),
    ("valentine", "Valentine's Day"),
    ("mothers_day", "Mother's Day"),
    ("fathers_day", "Father's Day"),
    ("christmas", "Christmas"),
    ("diwali", "Diwali"),
    ("eid", "Eid"),
    ("other", "Other"),
];

pub(crate) const GIFT_AMOUNTS: &[u32] = &[10, 25, 50, 100, 150, 200, 250, 500];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct WishId(String);

impl WishId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for WishId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GiftCard {
    pub(crate) brand: String,
    #[serde(default)]
    pub(crate) brand_logo: String,
    pub(crate) amount: u32,
    #[serde(default)]
    pub(crate) currency: String,
    pub(crate) code: String,
    pub(crate) message: String,
}

/// One greeting record. `code` is the public lookup key shared over SMS;
/// `id` stays internal. `occasion_month`/`occasion_day` are cached from
/// `occasion_date` so the due scan never re-parses dates.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Wish {
    pub(crate) id: WishId,
    pub(crate) code: String,
    pub(crate) sender_name: String,
    pub(crate) sender_phone: String,
    pub(crate) recipient_name: String,
    pub(crate) recipient_phone: String,
    pub(crate) occasion: String,
    pub(crate) message: String,
    pub(crate) photos: Vec<String>,
    pub(crate) occasion_date: NaiveDate,
    pub(crate) occasion_month: u32,
    pub(crate) occasion_day: u32,
    pub(crate) created_at: String,
    pub(crate) notified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) gift_card: Option<GiftCard>,
}

/// Everything the create/update form collects. The repository derives the
/// rest (id, code, cached month/day, timestamps).
#[derive(Clone, Debug)]
pub(crate) struct WishForm {
    pub(crate) sender_name: String,
    pub(crate) sender_phone: String,
    pub(crate) recipient_name: String,
    pub(crate) recipient_phone: String,
    pub(crate) occasion: String,
    pub(crate) custom_occasion: String,
    pub(crate) message: String,
    pub(crate) photos: Vec<String>,
    pub(crate) occasion_date: NaiveDate,
    pub(crate) gift_card: Option<GiftCard>,
}

impl WishForm {
    /// The occasion stored on the record: `other` is replaced by the
    /// free-text label the form collected.
    pub(crate) fn resolved_occasion(&self) -> &str {
        if self.occasion == "other" {
            &self.custom_occasion
        } else {
            &self.occasion
        }
    }

    pub(crate) fn occasion_month(&self) -> u32 {
        self.occasion_date.month()
    }

    pub(crate) fn occasion_day(&self) -> u32 {
        self.occasion_date.day()
    }
}

/// Uniform draw of `CODE_LEN` symbols. Collision handling is the
/// repository's job.
pub(crate) fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..CODE_LEN)
        .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// Fixture shared by repository and scheduler tests.
#[cfg(test)]
pub(crate) fn sample_form() -> WishForm {
    WishForm {
        sender_name: "Asha".to_string(),
        sender_phone: "5551234567".to_string(),
        recipient_name: "Ravi".to_string(),
        recipient_phone: "5559876543".to_string(),
        occasion: "birthday".to_string(),
        custom_occasion: String::new(),
        message: "Happy birthday!".to_string(),
        photos: vec![],
        occasion_date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
        gift_card: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_code_has_expected_shape() {
        for _ in 0..100 {
            let code = generate_code();
            assert_eq!(code.len(), CODE_LEN);
            assert!(code.bytes().all(|b| CODE_ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn alphabet_excludes_ambiguous_glyphs() {
        for b in [b'I', b'O', b'0', b'1'] {
            assert!(!CODE_ALPHABET.contains(&b));
        }
        assert_eq!(CODE_ALPHABET.len(), 32);
    }

    #[test]
    fn resolved_occasion_prefers_custom_for_other() {
        let mut form = sample_form();
        assert_eq!(form.resolved_occasion(), "birthday");
        form.occasion = "other".to_string();
        form.custom_occasion = "House warming".to_string();
        assert_eq!(form.resolved_occasion(), "House warming");
    }

    #[test]
    fn wish_serializes_with_camel_case_keys() {
        let form = sample_form();
        let wish = Wish {
            id: WishId::new(),
            code: "ABCDEF".to_string(),
            sender_name: form.sender_name,
            sender_phone: form.sender_phone,
            recipient_name: form.recipient_name,
            recipient_phone: form.recipient_phone,
            occasion: form.occasion,
            message: form.message,
            photos: form.photos,
            occasion_date: form.occasion_date,
            occasion_month: 6,
            occasion_day: 15,
            created_at: "2024-01-01T00:00:00+00:00".to_string(),
            notified: false,
            gift_card: None,
        };
        let json = serde_json::to_value(&wish).unwrap();
        assert!(json.get("senderPhone").is_some());
        assert!(json.get("occasionMonth").is_some());
        assert!(json.get("createdAt").is_some());
        // absent gift card is omitted entirely
        assert!(json.get("giftCard").is_none());
    }
}
