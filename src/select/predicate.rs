//! Selection predicates over mesh entities.
//!
//! The vocabulary is closed and small: [`NotNull`], the entity-level atoms in
//! [`EntityAtom`] (valid for nodes and elements), and the element-only atoms in
//! [`ElemAtom`]. Compound criteria are conjunctions built with [`And`] (or the
//! `&` operator), never new types. A new criterion means one new atom variant.
//!
//! Predicates only ever see live entities: cursors skip tombstones before
//! testing, so every predicate is implicitly ANDed with "not null".
//!
//! ```
//! use mesh_select::select::predicate::{ElemAtom, EntityAtom, Predicate};
//! use mesh_select::topology::ownership::ProcessorId;
//! use mesh_select::entity::Elem;
//!
//! let me = ProcessorId::new(0);
//! let local_level_1 = EntityAtom::Local(me) & ElemAtom::Level(1);
//! # let _ = |e: &Elem| local_level_1.matches(e);
//! ```

use std::ops::BitAnd;

use crate::entity::{MeshEntity, RefinableEntity};
use crate::topology::cell_type::CellType;
use crate::topology::ownership::{ProcessorId, SubdomainId};
use crate::topology::refinement::RefinementState;

/// A side-effect-free boolean test over one live entity.
pub trait Predicate<E: ?Sized> {
    fn matches(&self, entity: &E) -> bool;
}

/// Accepts every live entity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NotNull;

impl<E: ?Sized> Predicate<E> for NotNull {
    #[inline]
    fn matches(&self, _entity: &E) -> bool {
        true
    }
}

/// Atoms every [`MeshEntity`] can answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityAtom {
    /// `is_active()`; always true for nodes.
    Active,
    /// Owned by the given (local) processor.
    Local(ProcessorId),
    /// Owned by any processor other than the given one.
    NotLocal(ProcessorId),
    /// Owned by exactly this processor id, including
    /// [`ProcessorId::UNPARTITIONED`].
    Pid(ProcessorId),
}

impl<E: MeshEntity + ?Sized> Predicate<E> for EntityAtom {
    #[inline]
    fn matches(&self, entity: &E) -> bool {
        match *self {
            EntityAtom::Active => entity.is_active(),
            EntityAtom::Local(p) | EntityAtom::Pid(p) => entity.processor_id() == p,
            EntityAtom::NotLocal(p) => entity.processor_id() != p,
        }
    }
}

/// Atoms that need refinement and classification data, i.e. elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElemAtom {
    NotActive,
    Ancestor,
    NotAncestor,
    SubActive,
    NotSubActive,
    Level(u32),
    NotLevel(u32),
    Type(CellType),
    Subdomain(SubdomainId),
}

impl<E: RefinableEntity + ?Sized> Predicate<E> for ElemAtom {
    #[inline]
    fn matches(&self, entity: &E) -> bool {
        let state = entity.refinement_state();
        match *self {
            ElemAtom::NotActive => state != RefinementState::Active,
            ElemAtom::Ancestor => state == RefinementState::Ancestor,
            ElemAtom::NotAncestor => state != RefinementState::Ancestor,
            ElemAtom::SubActive => state == RefinementState::SubActive,
            ElemAtom::NotSubActive => state != RefinementState::SubActive,
            ElemAtom::Level(l) => entity.level() == l,
            ElemAtom::NotLevel(l) => entity.level() != l,
            ElemAtom::Type(t) => entity.cell_type() == t,
            ElemAtom::Subdomain(s) => entity.subdomain_id() == s,
        }
    }
}

/// Conjunction of two predicates. Nest for three or more.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct And<A, B>(pub A, pub B);

impl<E: ?Sized, A, B> Predicate<E> for And<A, B>
where
    A: Predicate<E>,
    B: Predicate<E>,
{
    #[inline]
    fn matches(&self, entity: &E) -> bool {
        self.0.matches(entity) && self.1.matches(entity)
    }
}

macro_rules! impl_bitand {
    ($($ty:ident $(<$($g:ident),*>)?),* $(,)?) => {$(
        impl<Rhs $($(, $g)*)?> BitAnd<Rhs> for $ty $(<$($g),*>)? {
            type Output = And<Self, Rhs>;

            #[inline]
            fn bitand(self, rhs: Rhs) -> Self::Output {
                And(self, rhs)
            }
        }
    )*};
}

impl_bitand!(NotNull, EntityAtom, ElemAtom, And<A, B>);
