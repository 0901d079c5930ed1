//! Named views over an [`EntityStore`].
//!
//! Each view returns a [`FilteredCursor`] positioned on its first match.
//! Every view has a read-only form and a `_mut` form, generated from the same
//! table entry so the two never disagree. Views that read refinement or
//! classification data exist only for stores of [`RefinableEntity`], so
//! `node_store.level(2)` is a compile error rather than an empty range.
//!
//! ```
//! use mesh_select::prelude::*;
//!
//! let mut elems: EntityStore<Elem> = EntityStore::new(ProcessorId::new(0));
//! let tri = Elem::new(CellType::Triangle, vec![EntityId::new(0), EntityId::new(1), EntityId::new(2)])
//!     .unwrap()
//!     .with_processor_id(ProcessorId::new(0));
//! elems.push(tri);
//! assert_eq!(elems.active_local().count(), 1);
//! assert!(elems.unpartitioned().is_end());
//! ```
//!
//! Nodes have no refinement level:
//!
//! ```compile_fail
//! use mesh_select::prelude::*;
//!
//! let nodes: EntityStore<Node> = EntityStore::new(ProcessorId::new(0));
//! let _ = nodes.level(1);
//! ```

use std::ops::Range;

use crate::data::storage::EntityStore;
use crate::entity::{MeshEntity, RefinableEntity};
use crate::mesh_error::MeshSelectError;
use crate::select::cursor::{Cursor, CursorMut, FilteredCursor};
use crate::select::predicate::{And, ElemAtom, EntityAtom, NotNull, Predicate};
use crate::topology::cell_type::CellType;
use crate::topology::ownership::{ProcessorId, SubdomainId};

/// Expands each `name / name_mut (args) -> PredicateType = predicate;` entry
/// into a read-only and a mutable view. `$me` is bound to the store's local
/// processor id inside `predicate`.
macro_rules! named_views {
    ([$me:ident] $(
        $(#[$doc:meta])*
        $name:ident / $name_mut:ident ($($arg:ident: $ty:ty),*) -> $pred_ty:ty = $pred:expr;
    )*) => {$(
        $(#[$doc])*
        #[allow(unused_variables)]
        pub fn $name(&self $(, $arg: $ty)*) -> Cursor<'_, E, $pred_ty> {
            let $me = self.processor_id();
            self.select($pred)
        }

        $(#[$doc])*
        #[allow(unused_variables)]
        pub fn $name_mut(&mut self $(, $arg: $ty)*) -> CursorMut<'_, E, $pred_ty> {
            let $me = self.processor_id();
            self.select_mut($pred)
        }
    )*};
}

impl<E: MeshEntity> EntityStore<E> {
    /// Cursor over every live entity satisfying `predicate`.
    pub fn select<P: Predicate<E>>(&self, predicate: P) -> Cursor<'_, E, P> {
        FilteredCursor::new(self.raw_slots().iter(), 0, predicate)
    }

    pub fn select_mut<P: Predicate<E>>(&mut self, predicate: P) -> CursorMut<'_, E, P> {
        FilteredCursor::new(self.raw_slots_mut().iter_mut(), 0, predicate)
    }

    /// Like [`select`](Self::select), restricted to raw slots in `range`.
    /// Positions reported by the cursor are still whole-store indices.
    pub fn select_range<P: Predicate<E>>(
        &self,
        range: Range<usize>,
        predicate: P,
    ) -> Result<Cursor<'_, E, P>, MeshSelectError> {
        let start = range.start;
        let slots = self.raw_range(range)?;
        Ok(FilteredCursor::new(slots.iter(), start, predicate))
    }

    pub fn select_range_mut<P: Predicate<E>>(
        &mut self,
        range: Range<usize>,
        predicate: P,
    ) -> Result<CursorMut<'_, E, P>, MeshSelectError> {
        let start = range.start;
        let slots = self.raw_range_mut(range)?;
        Ok(FilteredCursor::new(slots.iter_mut(), start, predicate))
    }

    named_views! { [me]
        /// Every live entity.
        all / all_mut () -> NotNull = NotNull;
        /// Active entities; every live node is active.
        active / active_mut () -> EntityAtom = EntityAtom::Active;
        /// Entities owned by this store's processor.
        local / local_mut () -> EntityAtom = EntityAtom::Local(me);
        /// Entities owned by `p`.
        pid / pid_mut (p: ProcessorId) -> EntityAtom = EntityAtom::Pid(p);
    }
}

impl<E: RefinableEntity> EntityStore<E> {
    named_views! { [me]
        not_active / not_active_mut () -> ElemAtom = ElemAtom::NotActive;
        ancestor / ancestor_mut () -> ElemAtom = ElemAtom::Ancestor;
        not_ancestor / not_ancestor_mut () -> ElemAtom = ElemAtom::NotAncestor;
        subactive / subactive_mut () -> ElemAtom = ElemAtom::SubActive;
        not_subactive / not_subactive_mut () -> ElemAtom = ElemAtom::NotSubActive;
        not_local / not_local_mut () -> EntityAtom = EntityAtom::NotLocal(me);
        active_local / active_local_mut () -> And<EntityAtom, EntityAtom> =
            EntityAtom::Active & EntityAtom::Local(me);
        active_not_local / active_not_local_mut () -> And<EntityAtom, EntityAtom> =
            EntityAtom::Active & EntityAtom::NotLocal(me);
        level / level_mut (level: u32) -> ElemAtom = ElemAtom::Level(level);
        not_level / not_level_mut (level: u32) -> ElemAtom = ElemAtom::NotLevel(level);
        local_level / local_level_mut (level: u32) -> And<EntityAtom, ElemAtom> =
            EntityAtom::Local(me) & ElemAtom::Level(level);
        local_not_level / local_not_level_mut (level: u32) -> And<EntityAtom, ElemAtom> =
            EntityAtom::Local(me) & ElemAtom::NotLevel(level);
        active_pid / active_pid_mut (p: ProcessorId) -> And<EntityAtom, EntityAtom> =
            EntityAtom::Active & EntityAtom::Pid(p);
        /// Elements of shape `cell_type`.
        of_type / of_type_mut (cell_type: CellType) -> ElemAtom = ElemAtom::Type(cell_type);
        active_type / active_type_mut (cell_type: CellType) -> And<EntityAtom, ElemAtom> =
            EntityAtom::Active & ElemAtom::Type(cell_type);
        subdomain / subdomain_mut (s: SubdomainId) -> ElemAtom = ElemAtom::Subdomain(s);
        active_subdomain / active_subdomain_mut (s: SubdomainId) -> And<EntityAtom, ElemAtom> =
            EntityAtom::Active & ElemAtom::Subdomain(s);
        local_subdomain / local_subdomain_mut (s: SubdomainId) -> And<EntityAtom, ElemAtom> =
            EntityAtom::Local(me) & ElemAtom::Subdomain(s);
        active_local_subdomain / active_local_subdomain_mut (s: SubdomainId)
            -> And<And<EntityAtom, EntityAtom>, ElemAtom> =
            EntityAtom::Active & EntityAtom::Local(me) & ElemAtom::Subdomain(s);
    }

    /// Elements not yet assigned to any partition.
    pub fn unpartitioned(&self) -> Cursor<'_, E, EntityAtom> {
        self.pid(ProcessorId::UNPARTITIONED)
    }

    pub fn unpartitioned_mut(&mut self) -> CursorMut<'_, E, EntityAtom> {
        self.pid_mut(ProcessorId::UNPARTITIONED)
    }
}
