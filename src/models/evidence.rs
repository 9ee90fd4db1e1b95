//! Photo and sign-off ledger entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use uuid::Uuid;
use validator::Validate;

use super::enums::{SignoffOutcome, SignoffRole};

/// Photo attached to an inspection; the url comes from external file storage
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: Uuid,
    pub url: String,
    pub caption: Option<String>,
    pub item_id: Option<Uuid>,
    pub defect_id: Option<Uuid>,
    pub uploaded_at: DateTime<Utc>,
}

/// Sign-off record
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signoff {
    pub id: Uuid,
    pub user_id: String,
    pub role: SignoffRole,
    pub outcome: SignoffOutcome,
    /// Reference to a stored signature image
    pub signature: Option<String>,
    pub comment: Option<String>,
    pub signed_at: DateTime<Utc>,
}

/// Add photo request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddPhoto {
    #[validate(length(min = 1, message = "Photo url is required"))]
    pub url: String,
    pub caption: Option<String>,
    pub item_id: Option<Uuid>,
    pub defect_id: Option<Uuid>,
}

/// Add sign-off request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddSignoff {
    #[validate(length(min = 1, message = "User id is required"))]
    pub user_id: String,
    pub role: SignoffRole,
    pub outcome: SignoffOutcome,
    pub signature: Option<String>,
    pub comment: Option<String>,
}
