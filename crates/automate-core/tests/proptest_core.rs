//! Property-based tests for tracked stacks and storage negotiation.

use automate_core::container::{ChestOptions, Container};
use automate_core::item::{Inventory, SharedInventory};
use automate_core::storage::Storage;
use automate_core::test_utils::*;
use automate_core::tile::TilePosition;
use automate_core::tracked::{Tracked, TrackedStackCollection};
use proptest::prelude::*;
use std::cell::Cell;
use std::rc::Rc;

// ===========================================================================
// Generators
// ===========================================================================

/// Member sizes for a tracked stack collection.
fn arb_members() -> impl Strategy<Value = Vec<u32>> {
    proptest::collection::vec(1..50u32, 1..6)
}

/// A collection over `sizes`, each member backed by its own inventory.
fn collection(sizes: &[u32]) -> (TrackedStackCollection, Vec<SharedInventory>) {
    let mut collection = TrackedStackCollection::new();
    let mut inventories = Vec::new();
    for &size in sizes {
        let inventory = filled_inventory(1, &[(iron_ore(), size)]);
        let container = chest_container("Chest", TilePosition::new(0, 0), inventory.clone());
        for member in container.stacks().unwrap() {
            collection.add(member).unwrap();
        }
        inventories.push(inventory);
    }
    (collection, inventories)
}

// ===========================================================================
// Tracked stacks
// ===========================================================================

proptest! {
    #[test]
    fn emptied_fires_once_whatever_follows(
        size in 1..100u32,
        first in 0..200u32,
        later in proptest::collection::vec(1..20u32, 0..10),
    ) {
        let mut stack = detached(coal(), size);
        let emptied = Rc::new(Cell::new(0u32));
        let counter = emptied.clone();
        stack.on_emptied(Box::new(move |_| counter.set(counter.get() + 1)));

        stack.reduce(size.max(first)).unwrap();
        prop_assert_eq!(stack.count(), 0);
        for n in later {
            stack.reduce(n).unwrap();
        }
        prop_assert_eq!(emptied.get(), 1);
    }

    #[test]
    fn collection_take_is_flat_and_conserves(
        sizes in arb_members(),
        fraction in 0.0..=1.0f64,
    ) {
        let total: u32 = sizes.iter().sum();
        let k = ((f64::from(total) * fraction) as u32).clamp(1, total);
        let (mut collection, inventories) = collection(&sizes);

        let taken = collection.take(k).unwrap().unwrap();
        prop_assert_eq!(taken.quantity, k);
        prop_assert_eq!(collection.count(), total - k);

        // Writes went through to the backing inventories.
        let left: u32 = inventories.iter().map(|i| i.borrow().unwrap().total()).sum();
        prop_assert_eq!(left, total - k);
    }

    #[test]
    fn collection_drains_members_in_order(sizes in arb_members(), k in 1..100u32) {
        let (mut collection, _inventories) = collection(&sizes);
        collection.reduce(k).unwrap();

        // No member may hold items behind a member that was drained.
        let counts = collection.member_counts();
        let first_nonempty = counts.iter().position(|&c| c > 0).unwrap_or(counts.len());
        for (i, &count) in counts.iter().enumerate().skip(first_nonempty + 1) {
            prop_assert_eq!(count, sizes[i]);
        }
    }

    #[test]
    fn take_zero_changes_nothing(sizes in arb_members()) {
        let total: u32 = sizes.iter().sum();
        let (mut collection, _inventories) = collection(&sizes);
        prop_assert!(collection.take(0).unwrap().is_none());
        prop_assert_eq!(collection.count(), total);
    }
}

// ===========================================================================
// Storage
// ===========================================================================

proptest! {
    #[test]
    fn shared_inventory_enumerated_once(
        aliases in 2..6usize,
        ore in 1..500u32,
        coal_count in 1..500u32,
    ) {
        let shared = filled_inventory(4, &[(iron_ore(), ore), (coal(), coal_count)]);
        let containers = (0..aliases).map(|i| {
            chest_container("Linked Chest", TilePosition::new(i as i32 * 3, 0), shared.clone())
        });
        let storage = Storage::new(containers);

        let seen: u32 = storage.items().map(|s| s.unwrap().count()).sum();
        prop_assert_eq!(seen, ore + coal_count);
        prop_assert_eq!(storage.slot_capacity(), 4);
    }

    #[test]
    fn failed_reservation_leaves_storage_untouched(have in 0..20u32, want in 1..40u32) {
        prop_assume!(have < want);
        let items = if have > 0 { vec![(iron_ore(), have)] } else { Vec::new() };
        let inventory = filled_inventory(2, &items);
        let storage = Storage::new([chest_container("Chest", TilePosition::new(0, 0), inventory.clone())]);

        let result = storage.try_get_ingredient(|i| i.item_type == iron_ore().item_type, want).unwrap();
        prop_assert!(result.is_none());
        prop_assert_eq!(inventory.borrow().unwrap().total(), have);
    }

    #[test]
    fn push_conserves_items(max_stack in 1..20u32, slots in 1..4usize, amount in 1..100u32) {
        let inventory = SharedInventory::new(Inventory::with_max_stack(slots, max_stack));
        let storage = Storage::new([chest_container_with(
            "Chest",
            TilePosition::new(0, 0),
            inventory.clone(),
            ChestOptions::default(),
        )]);
        let mut output = detached(coal(), amount);

        let accepted = storage.try_push(&mut output).unwrap();
        prop_assert_eq!(accepted + output.count(), amount);
        prop_assert_eq!(inventory.borrow().unwrap().total(), accepted);
        prop_assert!(accepted <= max_stack * slots as u32);
    }
}
