//! Shop metadata shown on the storefront.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::catalog::non_blank;
use super::id::ShopInfoId;

/// The single row describing the business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopInfo {
    pub id: ShopInfoId,
    pub shop_name: String,
    pub owner_name: Option<String>,
    pub business_idea: Option<String>,
    pub concept_vision: Option<String>,
    pub logo_url: Option<String>,
    pub banner_url: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating or replacing the shop metadata.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ShopInfoInput {
    pub shop_name: String,
    pub owner_name: Option<String>,
    pub business_idea: Option<String>,
    pub concept_vision: Option<String>,
    pub logo_url: Option<String>,
    pub banner_url: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl ShopInfoInput {
    /// Trim every field, returning `None` if the shop name is blank.
    #[must_use]
    pub fn normalized(self) -> Option<Self> {
        let shop_name = self.shop_name.trim().to_owned();
        if shop_name.is_empty() {
            return None;
        }
        Some(Self {
            shop_name,
            owner_name: non_blank(self.owner_name),
            business_idea: non_blank(self.business_idea),
            concept_vision: non_blank(self.concept_vision),
            logo_url: non_blank(self.logo_url),
            banner_url: non_blank(self.banner_url),
            address: non_blank(self.address),
            phone: non_blank(self.phone),
            email: non_blank(self.email),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_requires_shop_name() {
        let input = ShopInfoInput {
            shop_name: "  ".to_owned(),
            ..ShopInfoInput::default()
        };
        assert!(input.normalized().is_none());
    }

    #[test]
    fn test_normalized_trims_fields() {
        let input = ShopInfoInput {
            shop_name: " Larder Foods ".to_owned(),
            phone: Some(" +91 98450 00000 ".to_owned()),
            address: Some(String::new()),
            ..ShopInfoInput::default()
        };
        let normalized = input.normalized();
        assert_eq!(
            normalized.as_ref().map(|s| s.shop_name.as_str()),
            Some("Larder Foods")
        );
        assert_eq!(
            normalized.as_ref().and_then(|s| s.phone.as_deref()),
            Some("+91 98450 00000")
        );
        assert_eq!(normalized.and_then(|s| s.address), None);
    }
}
