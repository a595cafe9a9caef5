//! Charger domain entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// A charger listed by a provider
#[derive(Debug, Clone, PartialEq)]
pub struct Charger {
    /// Unique charger ID
    pub id: String,
    /// Display name, unique per provider
    pub name: String,
    /// Free-form location description
    pub location: Option<String>,
    /// Hourly price, non-negative
    pub price_per_hour: Decimal,
    /// Owning provider
    pub provider_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Charger {
    pub fn new(
        name: impl Into<String>,
        location: Option<String>,
        price_per_hour: Decimal,
        provider_id: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            location,
            price_per_hour,
            provider_id: provider_id.into(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, provider_id: &str) -> bool {
        self.provider_id == provider_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_charger_gets_unique_id() {
        let a = Charger::new("CP-A", None, Decimal::from(5), "prov-1");
        let b = Charger::new("CP-A", None, Decimal::from(5), "prov-1");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn ownership_check() {
        let c = Charger::new("CP-A", Some("Garage 2".into()), Decimal::from(3), "prov-1");
        assert!(c.is_owned_by("prov-1"));
        assert!(!c.is_owned_by("prov-2"));
    }
}
