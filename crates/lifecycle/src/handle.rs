use std::fmt;

/// Raw value reserved at the foreign boundary to mean "no canvas".
///
/// Shells that keep handles in a plain integer (`Long.MAX_VALUE` on the JVM side)
/// compare against this value. Inside the workspace it only appears when converting
/// to and from raw integers; everything else goes through [`CanvasHandle`].
pub const INVALID_RAW_HANDLE: i64 = i64::MAX;

/// Largest generation a slot may reach. Keeps every raw id positive and below
/// [`INVALID_RAW_HANDLE`].
const GENERATION_LIMIT: u32 = (i32::MAX as u32) - 1;

/// Opaque identifier for engine-owned canvas state.
///
/// Ids are issued by a [`HandleTable`]. A slot that is reused after destruction
/// carries a higher generation, so an id is never handed out twice for the life of
/// the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CanvasId {
    slot: u32,
    generation: u32,
}

impl CanvasId {
    pub fn slot(&self) -> u32 {
        self.slot
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Packs the id into the `i64` shape used across the C boundary.
    pub fn to_raw(self) -> i64 {
        (i64::from(self.generation) << 32) | i64::from(self.slot)
    }

    /// Unpacks a raw boundary value. The sentinel, zero and negative values are
    /// never ids.
    pub fn from_raw(raw: i64) -> Option<Self> {
        if raw <= 0 || raw == INVALID_RAW_HANDLE {
            return None;
        }
        let generation = (raw >> 32) as u32;
        if generation == 0 || generation > GENERATION_LIMIT {
            return None;
        }
        Some(Self {
            slot: raw as u32,
            generation,
        })
    }
}

impl fmt::Display for CanvasId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "canvas#{}v{}", self.slot, self.generation)
    }
}

/// Validity of the canvas bound to one view.
///
/// `Valid` holds the id returned by a successful creation. The transition back to
/// `Invalid` happens once, through [`CanvasHandle::invalidate`], when the surface is
/// torn down.
#[derive(Debug, Default, PartialEq, Eq)]
pub enum CanvasHandle {
    Valid(CanvasId),
    #[default]
    Invalid,
}

impl CanvasHandle {
    pub fn id(&self) -> Option<CanvasId> {
        match self {
            CanvasHandle::Valid(id) => Some(*id),
            CanvasHandle::Invalid => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, CanvasHandle::Valid(_))
    }

    /// Moves the handle to `Invalid`, returning the id it held.
    pub fn invalidate(&mut self) -> Option<CanvasId> {
        std::mem::take(self).id()
    }

    /// Raw boundary representation, using the sentinel for `Invalid`.
    pub fn to_raw(&self) -> i64 {
        self.id().map_or(INVALID_RAW_HANDLE, CanvasId::to_raw)
    }
}

impl From<Option<CanvasId>> for CanvasHandle {
    fn from(value: Option<CanvasId>) -> Self {
        match value {
            Some(id) => CanvasHandle::Valid(id),
            None => CanvasHandle::Invalid,
        }
    }
}

struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Arena mapping small integer ids to engine-owned state.
///
/// Lookups check both the slot and its generation, so stale ids resolve to
/// nothing and a second removal of the same id is a no-op.
pub struct HandleTable<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    len: usize,
}

impl<T> HandleTable<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn insert(&mut self, value: T) -> CanvasId {
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.generation += 1;
            slot.value = Some(value);
            return CanvasId {
                slot: index,
                generation: slot.generation,
            };
        }

        debug_assert!(self.slots.len() < u32::MAX as usize, "handle table exhausted");
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 1,
            value: Some(value),
        });
        CanvasId {
            slot: index,
            generation: 1,
        }
    }

    pub fn contains(&self, id: CanvasId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: CanvasId) -> Option<&T> {
        self.slots
            .get(id.slot as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.value.as_ref())
    }

    pub fn get_mut(&mut self, id: CanvasId) -> Option<&mut T> {
        self.slots
            .get_mut(id.slot as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.value.as_mut())
    }

    pub fn remove(&mut self, id: CanvasId) -> Option<T> {
        let slot = self
            .slots
            .get_mut(id.slot as usize)
            .filter(|slot| slot.generation == id.generation)?;
        let value = slot.value.take()?;
        self.len -= 1;
        // Slots at the generation limit are retired rather than recycled.
        if slot.generation < GENERATION_LIMIT {
            self.free.push(id.slot);
        }
        Some(value)
    }

    /// Ids of every live entry, in slot order.
    pub fn ids(&self) -> impl Iterator<Item = CanvasId> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.value.as_ref().map(|_| CanvasId {
                slot: index as u32,
                generation: slot.generation,
            })
        })
    }

    /// Removes and returns every live entry.
    pub fn drain(&mut self) -> Vec<(CanvasId, T)> {
        let ids: Vec<CanvasId> = self.ids().collect();
        ids.into_iter()
            .filter_map(|id| self.remove(id).map(|value| (id, value)))
            .collect()
    }
}

impl<T> Default for HandleTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for HandleTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandleTable")
            .field("len", &self.len)
            .field("slots", &self.slots.len())
            .field("free", &self.free.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removed_ids_no_longer_resolve() {
        let mut table = HandleTable::new();
        let id = table.insert("first");
        assert_eq!(table.get(id), Some(&"first"));
        assert_eq!(table.remove(id), Some("first"));
        assert_eq!(table.get(id), None);
        assert_eq!(table.remove(id), None, "second removal is a no-op");
        assert!(table.is_empty());
    }

    #[test]
    fn reused_slot_issues_a_new_id() {
        let mut table = HandleTable::new();
        let first = table.insert(1);
        table.remove(first);
        let second = table.insert(2);
        assert_eq!(first.slot(), second.slot());
        assert_ne!(first, second);
        assert_ne!(first.to_raw(), second.to_raw());
        assert_eq!(table.get(first), None);
        assert_eq!(table.get(second), Some(&2));
    }

    #[test]
    fn raw_values_survive_the_boundary() {
        let mut table = HandleTable::new();
        let _ = table.insert(());
        let id = table.insert(());
        let raw = id.to_raw();
        assert!(raw > 0);
        assert_ne!(raw, INVALID_RAW_HANDLE);
        assert_eq!(CanvasId::from_raw(raw), Some(id));
    }

    #[test]
    fn sentinel_and_garbage_are_not_ids() {
        assert_eq!(CanvasId::from_raw(INVALID_RAW_HANDLE), None);
        assert_eq!(CanvasId::from_raw(0), None);
        assert_eq!(CanvasId::from_raw(-1), None);
        assert_eq!(CanvasId::from_raw(42), None, "generation zero is never issued");
    }

    #[test]
    fn invalidate_is_terminal() {
        let mut table = HandleTable::new();
        let id = table.insert(());
        let mut handle = CanvasHandle::Valid(id);
        assert_eq!(handle.to_raw(), id.to_raw());
        assert_eq!(handle.invalidate(), Some(id));
        assert_eq!(handle, CanvasHandle::Invalid);
        assert_eq!(handle.invalidate(), None);
        assert_eq!(handle.to_raw(), INVALID_RAW_HANDLE);
    }

    #[test]
    fn drain_empties_the_table() {
        let mut table = HandleTable::new();
        let a = table.insert('a');
        let b = table.insert('b');
        table.remove(a);
        let c = table.insert('c');
        let drained = table.drain();
        assert_eq!(drained, vec![(c, 'c'), (b, 'b')]);
        assert!(table.is_empty());
        assert_eq!(table.ids().count(), 0);
    }
}
