//! Specialized collection types

pub use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Stable handle to an object owned by the [`World`](crate::world::World).
    ///
    /// Handles stay valid until the object is destroyed at the end of a
    /// frame; afterwards lookups simply return `None`.
    pub struct ObjectId;
}

/// Arena that owns every object of a world
pub type ObjectArena<T> = SlotMap<ObjectId, T>;
