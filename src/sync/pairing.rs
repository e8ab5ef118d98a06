//! Arena of body<->visual pairing records.
//!
//! A ball is two entities: a rigid body and a sprite. Instead of each side
//! holding an untyped reference to the other, both hold a generational
//! `PairId` into this table, and the table owns the link. Severing a pair is
//! a single `remove`, so neither side can observe a half-torn link.

use bevy::prelude::*;

/// Stable handle into the [`PairingTable`]. Survives slot reuse: a handle to
/// a removed record never resolves, even after its slot is recycled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PairId {
    index: u32,
    generation: u32,
}

/// One live body/visual link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairRecord {
    pub body: Entity,
    pub visual: Entity,
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    record: Option<PairRecord>,
}

/// Back-reference on the physics-body side of a pair.
#[derive(Component, Debug, Clone, Copy)]
pub struct PairedBody(pub PairId);

/// Back-reference on the visual side of a pair.
#[derive(Component, Debug, Clone, Copy)]
pub struct PairedVisual(pub PairId);

/// Pair most recently created by a spawn; the device steering target.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct LastSpawned(pub Option<PairId>);

#[derive(Resource, Debug, Default)]
pub struct PairingTable {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl PairingTable {
    pub fn insert(&mut self, body: Entity, visual: Entity) -> PairId {
        let record = PairRecord { body, visual };
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.record = Some(record);
            PairId {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                record: Some(record),
            });
            PairId {
                index,
                generation: 0,
            }
        }
    }

    pub fn get(&self, id: PairId) -> Option<PairRecord> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.record
    }

    /// Severs the link. Callers despawn the returned entities afterwards, so
    /// neither side is destroyed while the record still points at it.
    pub fn remove(&mut self, id: PairId) -> Option<PairRecord> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let record = slot.record.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.live -= 1;
        Some(record)
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (PairId, PairRecord)> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.record.map(|record| {
                (
                    PairId {
                        index: index as u32,
                        generation: slot.generation,
                    },
                    record,
                )
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(table: &mut PairingTable, n: u32) -> PairId {
        table.insert(Entity::from_raw(n * 2), Entity::from_raw(n * 2 + 1))
    }

    #[test]
    fn insert_then_lookup() {
        let mut table = PairingTable::default();
        let id = pair(&mut table, 1);
        let rec = table.get(id).expect("live record");
        assert_eq!(rec.body, Entity::from_raw(2));
        assert_eq!(rec.visual, Entity::from_raw(3));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn remove_severs_both_sides() {
        let mut table = PairingTable::default();
        let id = pair(&mut table, 1);
        assert!(table.remove(id).is_some());
        assert!(table.get(id).is_none());
        assert!(table.remove(id).is_none());
        assert!(table.is_empty());
    }

    #[test]
    fn stale_handle_never_resolves_after_slot_reuse() {
        let mut table = PairingTable::default();
        let stale = pair(&mut table, 1);
        table.remove(stale);
        let fresh = pair(&mut table, 2);
        // Same slot, different generation.
        assert!(table.get(stale).is_none());
        let rec = table.get(fresh).expect("fresh record");
        assert_eq!(rec.body, Entity::from_raw(4));
    }

    #[test]
    fn iter_skips_vacant_slots() {
        let mut table = PairingTable::default();
        let a = pair(&mut table, 1);
        let b = pair(&mut table, 2);
        let c = pair(&mut table, 3);
        table.remove(b);
        let ids: Vec<PairId> = table.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![a, c]);
    }
}
