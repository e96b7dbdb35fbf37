//! Account models.

use jiff::civil::Date;
use serde::Serialize;

/// Partial update of a shopper's own account details.
///
/// Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AccountUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook_link: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<Date>,
}
