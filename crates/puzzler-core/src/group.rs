#![forbid(unsafe_code)]

//! Rigid clusters of linked pieces.
//!
//! A [`Group`] is a set of piece ids that move together. Pieces never point
//! back at their group; the [`GroupSet`] keeps a dense owner index instead,
//! so membership lookups are O(1) and merging never chases references.
//!
//! # Invariants
//!
//! 1. **Offset law**: for every member `m` of a group with origin `o`,
//!    `m.position == o.position + (m.grid - o.grid) * cell`. Every write path
//!    (`add_piece`, `merge_with`, `set_origin`) preserves it.
//! 2. The origin is the member with the smallest [`GridPos`] (row-major).
//! 3. `bounds` is the union of the members' cell rectangles.
//! 4. A piece belongs to at most one group, and `GroupSet::group_of(p)`
//!    names exactly the group whose member set contains `p`.
//! 5. Ungrouped pieces are not materialised as single-member groups.
//!
//! # Failure Modes
//!
//! - Merging a group into itself is a no-op.
//! - Absorbing a piece that is already owned by the target is a no-op; one
//!   owned by a different group is a programmer error (debug assertion).

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::geometry::{Point, Rect};
use crate::piece::GridPos;
use crate::view::{PieceId, PieceView};

/// Board-space offset between two grid slots.
#[inline]
pub(crate) fn grid_offset(from: GridPos, to: GridPos, cell: f64) -> Point {
    Point::new(
        f64::from(to.x - from.x) * cell,
        f64::from(to.y - from.y) * cell,
    )
}

// ---------------------------------------------------------------------------
// Group
// ---------------------------------------------------------------------------

/// A rigid cluster of pieces.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    members: BTreeSet<PieceId>,
    origin: Option<PieceId>,
    bounds: Rect,
    cell: f64,
}

impl Group {
    /// Single-member group whose origin is `origin`.
    pub fn new(origin: PieceId, views: &[PieceView], cell: f64) -> Self {
        let mut group = Self {
            members: BTreeSet::from([origin]),
            origin: Some(origin),
            bounds: Rect::EMPTY,
            cell,
        };
        group.compute_bounds(views);
        group
    }

    /// Group over pieces that are already laid out; nothing is repositioned.
    pub fn from_members(
        ids: impl IntoIterator<Item = PieceId>,
        views: &[PieceView],
        cell: f64,
    ) -> Self {
        let mut group = Self {
            members: ids.into_iter().collect(),
            origin: None,
            bounds: Rect::EMPTY,
            cell,
        };
        group.compute_bounds(views);
        group
    }

    /// Snap `id` into place relative to the origin and add it.
    ///
    /// Adding to an empty group makes `id` the origin without moving it.
    pub fn add_piece(&mut self, id: PieceId, views: &mut [PieceView]) {
        self.place(id, views);
        self.compute_bounds(views);
    }

    /// Add every member of `other`, each snapped relative to this origin.
    pub fn merge_with(&mut self, other: &Group, views: &mut [PieceView]) {
        for &id in &other.members {
            self.place(id, views);
        }
        self.compute_bounds(views);
    }

    fn place(&mut self, id: PieceId, views: &mut [PieceView]) {
        if let Some(origin) = self.origin {
            let anchor = &views[origin.index()];
            let target =
                anchor.position() + grid_offset(anchor.grid(), views[id.index()].grid(), self.cell);
            views[id.index()].set_position(target);
        } else {
            self.origin = Some(id);
        }
        self.members.insert(id);
    }

    /// Translate every member so the bounds' top-left lands on `(x, y)`.
    pub fn set_origin(&mut self, x: f64, y: f64, views: &mut [PieceView]) {
        let delta = Point::new(x - self.bounds.x, y - self.bounds.y);
        for &id in &self.members {
            views[id.index()].translate(delta);
        }
        self.compute_bounds(views);
    }

    /// Re-derive the origin and the bounds from the members' current state.
    pub fn compute_bounds(&mut self, views: &[PieceView]) {
        self.origin = self
            .members
            .iter()
            .copied()
            .min_by_key(|id| views[id.index()].grid());
        self.bounds = self
            .members
            .iter()
            .fold(Rect::EMPTY, |acc, id| acc.union(&views[id.index()].cell_rect(self.cell)));
    }

    #[inline]
    pub fn members(&self) -> &BTreeSet<PieceId> {
        &self.members
    }

    #[inline]
    pub fn contains(&self, id: PieceId) -> bool {
        self.members.contains(&id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The member with the smallest grid position.
    #[inline]
    pub fn origin(&self) -> Option<PieceId> {
        self.origin
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Whether every member satisfies the offset law (within `eps`).
    pub fn is_rigid(&self, views: &[PieceView], eps: f64) -> bool {
        let Some(origin) = self.origin else {
            return true;
        };
        let anchor = &views[origin.index()];
        self.members.iter().all(|id| {
            let view = &views[id.index()];
            let expected = anchor.position() + grid_offset(anchor.grid(), view.grid(), self.cell);
            (view.position().x - expected.x).abs() <= eps
                && (view.position().y - expected.y).abs() <= eps
        })
    }
}

// ---------------------------------------------------------------------------
// GroupSet
// ---------------------------------------------------------------------------

/// Stable handle of a group inside a [`GroupSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupId(u64);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// All groups on a board plus the piece → group owner index.
#[derive(Debug, Clone, Default)]
pub struct GroupSet {
    groups: BTreeMap<GroupId, Group>,
    owner: Vec<Option<GroupId>>,
    next_id: u64,
}

impl GroupSet {
    /// Empty set sized for `piece_count` pieces.
    pub fn new(piece_count: usize) -> Self {
        Self {
            groups: BTreeMap::new(),
            owner: vec![None; piece_count],
            next_id: 0,
        }
    }

    #[inline]
    pub fn group_of(&self, id: PieceId) -> Option<GroupId> {
        self.owner.get(id.index()).copied().flatten()
    }

    #[inline]
    pub fn get(&self, gid: GroupId) -> Option<&Group> {
        self.groups.get(&gid)
    }

    pub fn iter(&self) -> impl Iterator<Item = (GroupId, &Group)> {
        self.groups.iter().map(|(&gid, group)| (gid, group))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of pieces the owner index covers.
    #[inline]
    pub fn piece_count(&self) -> usize {
        self.owner.len()
    }

    /// Dissolve every group; every piece becomes ungrouped.
    pub fn clear(&mut self) {
        self.groups.clear();
        self.owner.iter_mut().for_each(|slot| *slot = None);
    }

    /// Members of the group owning `id`, or just `id` when it is ungrouped.
    pub fn unit_of(&self, id: PieceId) -> Vec<PieceId> {
        match self.group_of(id).and_then(|gid| self.groups.get(&gid)) {
            Some(group) => group.members().iter().copied().collect(),
            None => vec![id],
        }
    }

    fn allocate(&mut self) -> GroupId {
        let gid = GroupId(self.next_id);
        self.next_id += 1;
        gid
    }

    /// New group seeded with `stationary`; `moved` snaps onto it.
    pub fn create_pair(
        &mut self,
        stationary: PieceId,
        moved: PieceId,
        views: &mut [PieceView],
        cell: f64,
    ) -> GroupId {
        debug_assert!(self.group_of(stationary).is_none());
        debug_assert!(self.group_of(moved).is_none());
        let mut group = Group::new(stationary, views, cell);
        group.add_piece(moved, views);
        let gid = self.allocate();
        self.owner[stationary.index()] = Some(gid);
        self.owner[moved.index()] = Some(gid);
        self.groups.insert(gid, group);
        gid
    }

    /// Add the ungrouped piece `id` to `gid`.
    pub fn absorb(&mut self, gid: GroupId, id: PieceId, views: &mut [PieceView]) {
        if let Some(current) = self.group_of(id) {
            debug_assert_eq!(current, gid, "piece {id} is owned by another group");
            return;
        }
        if let Some(group) = self.groups.get_mut(&gid) {
            group.add_piece(id, views);
            self.owner[id.index()] = Some(gid);
        }
    }

    /// Fold `absorbed` into `into` and drop `absorbed` from the set.
    ///
    /// Merging a group with itself does nothing.
    pub fn merge(&mut self, absorbed: GroupId, into: GroupId, views: &mut [PieceView]) {
        if absorbed == into || !self.groups.contains_key(&into) {
            return;
        }
        let Some(source) = self.groups.remove(&absorbed) else {
            return;
        };
        if let Some(target) = self.groups.get_mut(&into) {
            target.merge_with(&source, views);
        }
        for &id in source.members() {
            self.owner[id.index()] = Some(into);
        }
    }

    /// Replace every group with `group`.
    pub fn replace_with_single(&mut self, group: Group) -> GroupId {
        self.clear();
        let gid = self.allocate();
        for &id in group.members() {
            self.owner[id.index()] = Some(gid);
        }
        self.groups.insert(gid, group);
        gid
    }

    pub(crate) fn get_mut(&mut self, gid: GroupId) -> Option<&mut Group> {
        self.groups.get_mut(&gid)
    }

    /// Check the owner index against the member sets.
    pub fn is_consistent(&self) -> bool {
        let indexed = self.owner.iter().enumerate().all(|(i, slot)| match slot {
            Some(gid) => self
                .groups
                .get(gid)
                .is_some_and(|g| g.contains(PieceId::new(i))),
            None => true,
        });
        let covered = self.groups.iter().all(|(gid, group)| {
            !group.is_empty()
                && group
                    .members()
                    .iter()
                    .all(|id| self.group_of(*id) == Some(*gid))
        });
        indexed && covered
    }
}
