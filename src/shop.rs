//! Coin shop
//!
//! Items are bought with in-game coins; coins are bought with (pretend)
//! money through the payment form. Prices live here as the single catalog.

use serde::Serialize;

use crate::sim::{GameSession, InventoryItem};

/// A purchasable inventory item with its coin cost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShopItem {
    pub item: InventoryItem,
    pub cost: u32,
}

/// The item catalog, in display order
pub const CATALOG: [ShopItem; 3] = [
    ShopItem {
        item: InventoryItem::Shield,
        cost: 100,
    },
    ShopItem {
        item: InventoryItem::SpeedBoost,
        cost: 150,
    },
    ShopItem {
        item: InventoryItem::ExtraLife,
        cost: 200,
    },
];

/// A coin bundle priced in cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CoinPackage {
    pub price_cents: u32,
    pub coins: u32,
}

/// Coin bundles, in display order. Larger bundles carry a volume bonus.
pub const COIN_PACKAGES: [CoinPackage; 5] = [
    CoinPackage {
        price_cents: 299,
        coins: 300,
    },
    CoinPackage {
        price_cents: 999,
        coins: 1000,
    },
    CoinPackage {
        price_cents: 1999,
        coins: 2500,
    },
    CoinPackage {
        price_cents: 4999,
        coins: 7000,
    },
    CoinPackage {
        price_cents: 9999,
        coins: 15000,
    },
];

/// Result of a purchase attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseOutcome {
    Success,
    InsufficientFunds,
}

/// Buy `item` for the session, debiting coins and crediting inventory
///
/// On insufficient funds nothing changes.
pub fn purchase(session: &mut GameSession, item: ShopItem) -> PurchaseOutcome {
    if session.coins < item.cost {
        log::debug!(
            "purchase of {:?} rejected, have {} need {}",
            item.item,
            session.coins,
            item.cost
        );
        return PurchaseOutcome::InsufficientFunds;
    }
    session.coins -= item.cost;
    session.inventory.add(item.item);
    log::info!(
        "bought {:?} for {} coins, {} remaining",
        item.item,
        item.cost,
        session.coins
    );
    PurchaseOutcome::Success
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn purchase_debits_coins_and_credits_inventory() {
        let mut s = GameSession::new(1, Tuning::default());
        assert_eq!(s.coins, 300);
        let outcome = purchase(&mut s, CATALOG[0]);
        assert_eq!(outcome, PurchaseOutcome::Success);
        assert_eq!(s.coins, 200);
        assert_eq!(s.inventory.count(InventoryItem::Shield), 1);
    }

    #[test]
    fn insufficient_funds_changes_nothing() {
        let mut s = GameSession::new(1, Tuning::default());
        s.coins = 50;
        let outcome = purchase(&mut s, CATALOG[2]);
        assert_eq!(outcome, PurchaseOutcome::InsufficientFunds);
        assert_eq!(s.coins, 50);
        assert_eq!(s.inventory.count(InventoryItem::ExtraLife), 0);
    }

    #[test]
    fn exact_funds_succeed() {
        let mut s = GameSession::new(1, Tuning::default());
        s.coins = 200;
        assert_eq!(purchase(&mut s, CATALOG[2]), PurchaseOutcome::Success);
        assert_eq!(s.coins, 0);
    }

    #[test]
    fn packages_scale_with_price() {
        for pair in COIN_PACKAGES.windows(2) {
            assert!(pair[1].price_cents > pair[0].price_cents);
            assert!(pair[1].coins > pair[0].coins);
        }
    }
}
