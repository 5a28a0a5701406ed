use serde::{Deserialize, Serialize};

/// One account per phone number. The digest is never the plaintext; see
/// `auth::digest` for the transform.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserProfile {
    pub(crate) phone: String,
    pub(crate) password_digest: String,
    pub(crate) created_at: String,
}
