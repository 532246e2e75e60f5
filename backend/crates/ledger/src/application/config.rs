//! Application Configuration
//!
//! Configuration for the ledger application layer.

use kernel::id::RewardId;
use uuid::Uuid;

use crate::domain::entities::Reward;
use crate::domain::value_objects::RewardKind;

/// Stable catalog ids so redemptions survive restarts and reseeding
pub const ELECTRICITY_DISCOUNT_ID: RewardId =
    RewardId::from_uuid(Uuid::from_u128(0x5f2b6c1e_0a8d_4c5e_9b1a_00000000e050));
pub const WATER_DISCOUNT_ID: RewardId =
    RewardId::from_uuid(Uuid::from_u128(0x5f2b6c1e_0a8d_4c5e_9b1a_00000000a100));
pub const SHOPPING_VOUCHER_ID: RewardId =
    RewardId::from_uuid(Uuid::from_u128(0x5f2b6c1e_0a8d_4c5e_9b1a_00000000c150));
pub const TREE_CERTIFICATE_ID: RewardId =
    RewardId::from_uuid(Uuid::from_u128(0x5f2b6c1e_0a8d_4c5e_9b1a_0000000070ee));

/// Ledger application configuration
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Reward catalog seeded at startup
    pub rewards: Vec<Reward>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            rewards: default_catalog(),
        }
    }
}

impl LedgerConfig {
    /// Config with a custom catalog
    pub fn with_rewards(rewards: Vec<Reward>) -> Self {
        Self { rewards }
    }
}

/// The municipal reward catalog
pub fn default_catalog() -> Vec<Reward> {
    vec![
        Reward::new(
            ELECTRICITY_DISCOUNT_ID,
            "₹50 Electricity Bill Discount",
            "Valid for 30 days",
            50,
            RewardKind::Electricity,
        ),
        Reward::new(
            WATER_DISCOUNT_ID,
            "₹100 Water Bill Discount",
            "Valid for 30 days",
            75,
            RewardKind::Water,
        ),
        Reward::new(
            SHOPPING_VOUCHER_ID,
            "₹150 Shopping Voucher",
            "Local grocery stores",
            100,
            RewardKind::Voucher,
        ),
        Reward::new(
            TREE_CERTIFICATE_ID,
            "Plant a Tree Certificate",
            "Environmental contribution",
            150,
            RewardKind::Tree,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog() {
        let catalog = default_catalog();
        let costs: Vec<i32> = catalog.iter().map(|r| r.cost).collect();
        assert_eq!(costs, vec![50, 75, 100, 150]);
        assert_eq!(catalog[3].kind, RewardKind::Tree);

        let ids: std::collections::HashSet<_> = catalog.iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), 4);
    }
}
