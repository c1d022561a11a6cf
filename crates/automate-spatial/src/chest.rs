use crate::hooks::{Automatable, AutomationFactory, TileEntity};
use crate::location::{Location, WorldEntity};
use crate::world::World;
use automate_core::container::ChestContainer;

/// Exposes every placed chest as a container.
///
/// Linked chests produce containers over the same inventory, so a network
/// holding several of them still counts the shared contents once.
#[derive(Debug, Default)]
pub struct ChestFactory;

impl AutomationFactory for ChestFactory {
    fn name(&self) -> &str {
        "chests"
    }

    fn automatable_for(
        &self,
        _world: &World,
        location: &Location,
        entity: TileEntity<'_>,
    ) -> Option<Automatable> {
        let TileEntity::Object { object, .. } = entity else {
            return None;
        };
        let WorldEntity::Chest(chest) = &object.entity else {
            return None;
        };
        Some(Automatable::container(
            object.area,
            ChestContainer::new(
                object.name.clone(),
                location.id().clone(),
                object.area,
                chest.inventory.clone(),
                chest.options,
            ),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use automate_core::container::{ChestOptions, Container};
    use automate_core::id::LocationId;
    use automate_core::tile::{TileArea, TilePosition};
    use automate_core::world::ChestEntity;

    #[test]
    fn chests_become_containers() {
        let mut location = Location::new(LocationId::new("Farm"));
        let chest = ChestEntity::new(36).with_options(ChestOptions::output_only());
        location
            .place("Chest", TileArea::single(TilePosition::new(1, 1)), WorldEntity::Chest(chest))
            .unwrap();
        location
            .place("Fence", TileArea::single(TilePosition::new(2, 1)), WorldEntity::Decoration)
            .unwrap();
        let world = World::default();

        let (id, object) = location.object_at(TilePosition::new(1, 1)).unwrap();
        let found = ChestFactory
            .automatable_for(&world, &location, TileEntity::Object { id, object })
            .unwrap();
        let container = found.container.unwrap();
        assert_eq!(container.slot_capacity(), 36);
        assert!(!container.can_take());

        let (id, object) = location.object_at(TilePosition::new(2, 1)).unwrap();
        assert!(
            ChestFactory
                .automatable_for(&world, &location, TileEntity::Object { id, object })
                .is_none()
        );
    }
}
