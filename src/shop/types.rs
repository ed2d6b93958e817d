use crate::character::EquipmentSlot;

/// One equipment line in the shop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopOffer {
    pub item: String,
    /// Discounted price actually charged.
    pub price: u64,
    pub part: EquipmentSlot,
    pub attack: u32,
    pub defense: u32,
    pub difficulty: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseReceipt {
    pub item: String,
    pub member: String,
    pub price: u64,
    pub team_gold_left: u64,
    /// Health restored, for consumables.
    pub healed: Option<u32>,
}
