//! Retained primitive collections. Records are stored by value in slab
//! slots; handles are generational so a handle vacated by `remove` or
//! `clear` can never alias a later insertion.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointRecord {
    pub position: [f32; 3],
    pub size: f32,
    pub color: u32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineRecord {
    pub from: [f32; 3],
    pub to: [f32; 3],
    pub color: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PrimitiveHandle {
    index: u32,
    generation: u32,
}

struct Slot<T> {
    generation: u32,
    record: Option<T>,
}

pub struct PrimitiveCollection<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    len: usize,
}

pub type PointCollection = PrimitiveCollection<PointRecord>;
pub type LineCollection = PrimitiveCollection<LineRecord>;

impl<T: Copy> PrimitiveCollection<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            len: 0,
        }
    }

    pub fn add(&mut self, record: T) -> PrimitiveHandle {
        self.len += 1;

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.record = Some(record);
            return PrimitiveHandle {
                index,
                generation: slot.generation,
            };
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            record: Some(record),
        });
        PrimitiveHandle {
            index,
            generation: 0,
        }
    }

    pub fn remove(&mut self, handle: PrimitiveHandle) -> Option<T> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }

        let record = slot.record.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.len -= 1;
        Some(record)
    }

    pub fn update(&mut self, handle: PrimitiveHandle, record: T) -> bool {
        match self.slots.get_mut(handle.index as usize) {
            Some(slot) if slot.generation == handle.generation && slot.record.is_some() => {
                slot.record = Some(record);
                true
            }
            _ => false,
        }
    }

    pub fn get(&self, handle: PrimitiveHandle) -> Option<&T> {
        let slot = self.slots.get(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.record.as_ref()
    }

    /// Vacates every slot. Outstanding handles are invalidated, not reused.
    pub fn clear(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.record.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(index as u32);
            }
        }
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().filter_map(|slot| slot.record.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: f32) -> PointRecord {
        PointRecord {
            position: [x, 0.0, 0.0],
            size: 4.0,
            color: 0xFFFFFFFF,
        }
    }

    #[test]
    fn add_get_remove() {
        let mut points = PointCollection::with_capacity(4);
        let handle = points.add(point(1.0));

        assert_eq!(points.len(), 1);
        assert_eq!(points.get(handle).unwrap().position[0], 1.0);

        let removed = points.remove(handle).unwrap();
        assert_eq!(removed.position[0], 1.0);
        assert!(points.is_empty());
        assert!(points.get(handle).is_none());
    }

    #[test]
    fn update_replaces_record_in_place() {
        let mut points = PointCollection::with_capacity(1);
        let handle = points.add(point(1.0));

        assert!(points.update(handle, point(9.0)));
        assert_eq!(points.get(handle).unwrap().position[0], 9.0);
        assert_eq!(points.len(), 1);
    }

    #[test]
    fn stale_handle_does_not_alias_reused_slot() {
        let mut points = PointCollection::with_capacity(1);
        let old = points.add(point(1.0));
        points.remove(old);

        let new = points.add(point(2.0));
        assert_ne!(old, new);
        assert!(points.get(old).is_none());
        assert!(!points.update(old, point(3.0)));
        assert!(points.remove(old).is_none());
        assert_eq!(points.get(new).unwrap().position[0], 2.0);
    }

    #[test]
    fn clear_is_idempotent() {
        let mut points = PointCollection::with_capacity(2);
        let handle = points.add(point(1.0));
        points.add(point(2.0));

        points.clear();
        points.clear();

        assert!(points.is_empty());
        assert_eq!(points.iter().count(), 0);
        assert!(points.get(handle).is_none());
    }

    #[test]
    fn iter_skips_vacated_slots() {
        let mut points = PointCollection::with_capacity(3);
        points.add(point(1.0));
        let middle = points.add(point(2.0));
        points.add(point(3.0));
        points.remove(middle);

        let xs = points.iter().map(|r| r.position[0]).collect::<Vec<_>>();
        assert_eq!(xs, vec![1.0, 3.0]);
    }
}
