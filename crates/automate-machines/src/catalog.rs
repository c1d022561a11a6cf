//! Item types the shipped machines recognise, keyed by the host game's object ids.

use automate_core::id::ItemTypeId;
use automate_core::item::{Item, ItemCategory};

// Fuel and ores
pub const COAL: ItemTypeId = ItemTypeId(382);
pub const COPPER_ORE: ItemTypeId = ItemTypeId(378);
pub const IRON_ORE: ItemTypeId = ItemTypeId(380);
pub const GOLD_ORE: ItemTypeId = ItemTypeId(384);
pub const IRIDIUM_ORE: ItemTypeId = ItemTypeId(386);
pub const QUARTZ: ItemTypeId = ItemTypeId(80);
pub const FIRE_QUARTZ: ItemTypeId = ItemTypeId(82);

// Bars
pub const COPPER_BAR: ItemTypeId = ItemTypeId(334);
pub const IRON_BAR: ItemTypeId = ItemTypeId(335);
pub const GOLD_BAR: ItemTypeId = ItemTypeId(336);
pub const IRIDIUM_BAR: ItemTypeId = ItemTypeId(337);
pub const REFINED_QUARTZ: ItemTypeId = ItemTypeId(338);

// Artisan goods and their inputs
pub const HONEY: ItemTypeId = ItemTypeId(340);
pub const PICKLES: ItemTypeId = ItemTypeId(342);
pub const JELLY: ItemTypeId = ItemTypeId(344);
pub const BEER: ItemTypeId = ItemTypeId(346);
pub const WINE: ItemTypeId = ItemTypeId(348);
pub const JUICE: ItemTypeId = ItemTypeId(350);
pub const MEAD: ItemTypeId = ItemTypeId(459);
pub const PALE_ALE: ItemTypeId = ItemTypeId(303);
pub const HOPS: ItemTypeId = ItemTypeId(304);
pub const WHEAT: ItemTypeId = ItemTypeId(262);
pub const COFFEE_BEAN: ItemTypeId = ItemTypeId(433);
pub const COFFEE: ItemTypeId = ItemTypeId(395);
pub const TEA_LEAVES: ItemTypeId = ItemTypeId(815);
pub const GREEN_TEA: ItemTypeId = ItemTypeId(614);

// Dairy
pub const MILK: ItemTypeId = ItemTypeId(184);
pub const LARGE_MILK: ItemTypeId = ItemTypeId(186);
pub const GOAT_MILK: ItemTypeId = ItemTypeId(436);
pub const LARGE_GOAT_MILK: ItemTypeId = ItemTypeId(438);
pub const CHEESE: ItemTypeId = ItemTypeId(424);
pub const GOAT_CHEESE: ItemTypeId = ItemTypeId(426);

// Farm
pub const HAY: ItemTypeId = ItemTypeId(178);

// Trash and what it recycles into
pub const TRASH: ItemTypeId = ItemTypeId(168);
pub const DRIFTWOOD: ItemTypeId = ItemTypeId(169);
pub const BROKEN_GLASSES: ItemTypeId = ItemTypeId(170);
pub const BROKEN_CD: ItemTypeId = ItemTypeId(171);
pub const SOGGY_NEWSPAPER: ItemTypeId = ItemTypeId(172);
pub const STONE: ItemTypeId = ItemTypeId(390);
pub const WOOD: ItemTypeId = ItemTypeId(388);
pub const CLOTH: ItemTypeId = ItemTypeId(428);
pub const TORCH: ItemTypeId = ItemTypeId(93);

// Gems
pub const EMERALD: ItemTypeId = ItemTypeId(60);
pub const AQUAMARINE: ItemTypeId = ItemTypeId(62);
pub const RUBY: ItemTypeId = ItemTypeId(64);
pub const AMETHYST: ItemTypeId = ItemTypeId(66);
pub const TOPAZ: ItemTypeId = ItemTypeId(68);
pub const JADE: ItemTypeId = ItemTypeId(70);
pub const DIAMOND: ItemTypeId = ItemTypeId(72);
pub const FROZEN_TEAR: ItemTypeId = ItemTypeId(84);
pub const EARTH_CRYSTAL: ItemTypeId = ItemTypeId(86);

/// `(id, name, category, price)` of every catalogued item.
const ITEMS: &[(ItemTypeId, &str, ItemCategory, u32)] = &[
    (COAL, "Coal", ItemCategory::BuildingResource, 15),
    (COPPER_ORE, "Copper Ore", ItemCategory::Metal, 5),
    (IRON_ORE, "Iron Ore", ItemCategory::Metal, 10),
    (GOLD_ORE, "Gold Ore", ItemCategory::Metal, 25),
    (IRIDIUM_ORE, "Iridium Ore", ItemCategory::Metal, 100),
    (QUARTZ, "Quartz", ItemCategory::Mineral, 25),
    (FIRE_QUARTZ, "Fire Quartz", ItemCategory::Mineral, 100),
    (COPPER_BAR, "Copper Bar", ItemCategory::Metal, 60),
    (IRON_BAR, "Iron Bar", ItemCategory::Metal, 120),
    (GOLD_BAR, "Gold Bar", ItemCategory::Metal, 250),
    (IRIDIUM_BAR, "Iridium Bar", ItemCategory::Metal, 1000),
    (REFINED_QUARTZ, "Refined Quartz", ItemCategory::Metal, 50),
    (HONEY, "Wild Honey", ItemCategory::ArtisanGoods, 100),
    (PICKLES, "Pickles", ItemCategory::ArtisanGoods, 100),
    (JELLY, "Jelly", ItemCategory::ArtisanGoods, 160),
    (BEER, "Beer", ItemCategory::ArtisanGoods, 200),
    (WINE, "Wine", ItemCategory::ArtisanGoods, 400),
    (JUICE, "Juice", ItemCategory::ArtisanGoods, 150),
    (MEAD, "Mead", ItemCategory::ArtisanGoods, 300),
    (PALE_ALE, "Pale Ale", ItemCategory::ArtisanGoods, 300),
    (HOPS, "Hops", ItemCategory::Vegetable, 25),
    (WHEAT, "Wheat", ItemCategory::Vegetable, 25),
    (COFFEE_BEAN, "Coffee Bean", ItemCategory::Seeds, 15),
    (COFFEE, "Coffee", ItemCategory::Crafting, 150),
    (TEA_LEAVES, "Tea Leaves", ItemCategory::Vegetable, 50),
    (GREEN_TEA, "Green Tea", ItemCategory::ArtisanGoods, 100),
    (MILK, "Milk", ItemCategory::Milk, 125),
    (LARGE_MILK, "Large Milk", ItemCategory::Milk, 190),
    (GOAT_MILK, "Goat Milk", ItemCategory::Milk, 225),
    (LARGE_GOAT_MILK, "L. Goat Milk", ItemCategory::Milk, 345),
    (CHEESE, "Cheese", ItemCategory::ArtisanGoods, 230),
    (GOAT_CHEESE, "Goat Cheese", ItemCategory::ArtisanGoods, 400),
    (HAY, "Hay", ItemCategory::None, 0),
    (TRASH, "Trash", ItemCategory::Junk, 0),
    (DRIFTWOOD, "Driftwood", ItemCategory::Junk, 0),
    (BROKEN_GLASSES, "Broken Glasses", ItemCategory::Junk, 0),
    (BROKEN_CD, "Broken CD", ItemCategory::Junk, 0),
    (SOGGY_NEWSPAPER, "Soggy Newspaper", ItemCategory::Junk, 0),
    (STONE, "Stone", ItemCategory::BuildingResource, 2),
    (WOOD, "Wood", ItemCategory::BuildingResource, 2),
    (CLOTH, "Cloth", ItemCategory::Crafting, 470),
    (TORCH, "Torch", ItemCategory::Crafting, 5),
    (EMERALD, "Emerald", ItemCategory::Gem, 250),
    (AQUAMARINE, "Aquamarine", ItemCategory::Gem, 180),
    (RUBY, "Ruby", ItemCategory::Gem, 250),
    (AMETHYST, "Amethyst", ItemCategory::Gem, 100),
    (TOPAZ, "Topaz", ItemCategory::Gem, 80),
    (JADE, "Jade", ItemCategory::Gem, 200),
    (DIAMOND, "Diamond", ItemCategory::Gem, 750),
    (FROZEN_TEAR, "Frozen Tear", ItemCategory::Mineral, 75),
    (EARTH_CRYSTAL, "Earth Crystal", ItemCategory::Mineral, 50),
];

/// The catalogued item with this id.
pub fn lookup(id: ItemTypeId) -> Option<Item> {
    ITEMS
        .iter()
        .find(|(item_type, ..)| *item_type == id)
        .map(|&(item_type, name, category, price)| Item::new(item_type, name, category, price))
}

/// The catalogued item with this id, or a placeholder for unknown ids.
pub fn item(id: ItemTypeId) -> Item {
    lookup(id).unwrap_or_else(|| Item::new(id, format!("Item {}", id.0), ItemCategory::None, 0))
}
