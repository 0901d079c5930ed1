//! Predicate-filtered cursor over raw entity slots.
//!
//! A [`FilteredCursor`] wraps a raw slot iterator (read-only or mutable) and a
//! [`Predicate`]. It is always *positioned*: either on a live slot satisfying
//! the predicate, or at the end. Construction and every advance scan forward,
//! skipping tombstones and non-matching entities. The raw position only ever
//! increases, so a traversal takes at most `len` steps.
//!
//! The cursor borrows the store it came from. Holding one prevents any
//! structural change to the store (insertion, compaction) until it is dropped.
//!
//! It is also an [`Iterator`]: `next()` yields the current entity and advances.

use std::fmt;
use std::iter::FusedIterator;
use std::ops::Deref;

use crate::data::storage::Slot;
use crate::debug_invariants::contract_assert;
use crate::select::predicate::Predicate;

/// Uniform access to one raw slot, whether borrowed shared or mutably.
pub trait SlotRef: Sized {
    type Entity;
    /// What the cursor hands out: `&E` or `&mut E`.
    type Target: Deref<Target = Self::Entity>;

    /// Peek at the entity without consuming the borrow; `None` for tombstones.
    fn entity(&self) -> Option<&Self::Entity>;

    fn into_target(self) -> Option<Self::Target>;
}

impl<'a, E> SlotRef for &'a Slot<E> {
    type Entity = E;
    type Target = &'a E;

    #[inline]
    fn entity(&self) -> Option<&E> {
        Option::as_ref(*self)
    }

    #[inline]
    fn into_target(self) -> Option<&'a E> {
        Option::as_ref(self)
    }
}

impl<'a, E> SlotRef for &'a mut Slot<E> {
    type Entity = E;
    type Target = &'a mut E;

    #[inline]
    fn entity(&self) -> Option<&E> {
        Option::as_ref(&**self)
    }

    #[inline]
    fn into_target(self) -> Option<&'a mut E> {
        Option::as_mut(self)
    }
}

/// Entity type behind a raw slot iterator.
pub type EntityOf<I> = <<I as Iterator>::Item as SlotRef>::Entity;
/// Item a cursor over `I` yields: `&E` or `&mut E`.
pub type TargetOf<I> = <<I as Iterator>::Item as SlotRef>::Target;

/// Read-only cursor over a store of `E`.
pub type Cursor<'a, E, P> = FilteredCursor<std::slice::Iter<'a, Slot<E>>, P>;
/// Mutable cursor over a store of `E`.
pub type CursorMut<'a, E, P> = FilteredCursor<std::slice::IterMut<'a, Slot<E>>, P>;

/// Cursor that visits only the live slots satisfying `P`.
pub struct FilteredCursor<I, P>
where
    I: Iterator,
    I::Item: SlotRef,
{
    raw: I,
    predicate: P,
    /// Raw index of `current`, or `end` once exhausted.
    position: usize,
    end: usize,
    current: Option<TargetOf<I>>,
}

impl<I, P> FilteredCursor<I, P>
where
    I: Iterator,
    I::Item: SlotRef,
    P: Predicate<EntityOf<I>>,
{
    /// Build a cursor over `raw`, whose first slot has raw index `start`, and
    /// position it on the first match.
    pub fn new(raw: I, start: usize, predicate: P) -> Self
    where
        I: ExactSizeIterator,
    {
        let end = start + raw.len();
        let mut cursor = Self {
            raw,
            predicate,
            position: start,
            end,
            current: None,
        };
        cursor.seek();
        cursor
    }

    /// Scan forward from the slot at `position` to the next match.
    fn seek(&mut self) {
        for slot in self.raw.by_ref() {
            if slot.entity().is_some_and(|e| self.predicate.matches(e)) {
                self.current = slot.into_target();
                return;
            }
            self.position += 1;
        }
        contract_assert!(
            self.position == self.end,
            "raw iterator yielded {} slots, expected {}",
            self.position,
            self.end
        );
    }

    /// Move to the next matching slot.
    ///
    /// Advancing an end-positioned cursor is a caller bug: it trips an
    /// assertion in debug builds. Release builds still check the position
    /// once and treat it as a no-op.
    pub fn advance(&mut self) {
        contract_assert!(!self.is_end(), "advanced a filtered cursor past its end");
        if self.is_end() {
            return;
        }
        self.current = None;
        self.position += 1;
        self.seek();
    }

    /// The entity under the cursor, or `None` at the end.
    #[inline]
    pub fn current(&self) -> Option<&EntityOf<I>> {
        self.current.as_deref()
    }

    /// The entity under the cursor.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at its end, in every build profile. [`current`](Self::current)
    /// is the non-panicking form.
    pub fn get(&self) -> &EntityOf<I> {
        contract_assert!(!self.is_end(), "dereferenced an end-positioned cursor");
        match self.current.as_deref() {
            Some(entity) => entity,
            None => panic!("dereferenced an end-positioned cursor"),
        }
    }

    /// Raw slot index the cursor points at.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Raw slot index one past the last slot this cursor may visit.
    #[inline]
    pub fn end_position(&self) -> usize {
        self.end
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.position == self.end
    }

    pub fn predicate(&self) -> &P {
        &self.predicate
    }
}

impl<'a, E: 'a, I, P> FilteredCursor<I, P>
where
    I: Iterator<Item = &'a mut Slot<E>>,
    P: Predicate<E>,
{
    /// Mutable access to the entity under the cursor, or `None` at the end.
    #[inline]
    pub fn current_mut<'s>(&'s mut self) -> Option<&'s mut E>
    where
        'a: 's,
    {
        self.current.as_deref_mut()
    }
}

impl<I, P> Iterator for FilteredCursor<I, P>
where
    I: Iterator,
    I::Item: SlotRef,
    P: Predicate<EntityOf<I>>,
{
    type Item = TargetOf<I>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.current.take()?;
        self.position += 1;
        self.seek();
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower = usize::from(self.current.is_some());
        (lower, Some(self.end - self.position))
    }
}

impl<I, P> FusedIterator for FilteredCursor<I, P>
where
    I: Iterator,
    I::Item: SlotRef,
    P: Predicate<EntityOf<I>>,
{
}

/// Cursors compare by raw position only; comparing cursors of different views
/// is meaningless.
impl<I, P, J, Q> PartialEq<FilteredCursor<J, Q>> for FilteredCursor<I, P>
where
    I: Iterator,
    I::Item: SlotRef,
    J: Iterator,
    J::Item: SlotRef,
{
    fn eq(&self, other: &FilteredCursor<J, Q>) -> bool {
        self.position == other.position
    }
}

impl<I, P> Clone for FilteredCursor<I, P>
where
    I: Iterator + Clone,
    I::Item: SlotRef,
    TargetOf<I>: Clone,
    P: Clone,
{
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
            predicate: self.predicate.clone(),
            position: self.position,
            end: self.end,
            current: self.current.clone(),
        }
    }
}

impl<I, P> fmt::Debug for FilteredCursor<I, P>
where
    I: Iterator,
    I::Item: SlotRef,
    P: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilteredCursor")
            .field("predicate", &self.predicate)
            .field("position", &self.position)
            .field("end", &self.end)
            .finish()
    }
}
