//! Relation engine shared by every paired relation.
//!
//! # Responsibility
//! - Describe each side of a relation pair once (`ManyRelation`,
//!   `OneRelation`) and run add/remove/replace/set for all of them with the
//!   same code.
//! - Mirror every real membership change into the paired side.
//!
//! # Invariants
//! - A member is stored before its mirror runs; re-entering the first
//!   side then finds it present, so each cascade stops after one round trip.
//! - Public entry points validate every requested member before mutating
//!   anything; mirrors run unchecked on already validated ids.
//! - Mirroring a removal into a partner that is no longer registered is a
//!   no-op (dangling partners are tolerated).

use crate::collection::LinkedSet;
use crate::graph::ancestry::{rejected, tolerate_missing, Ancestry};
use crate::graph::GraphResult;
use log::trace;
use std::fmt::Display;

/// Multi-valued side of a relation pair.
pub trait ManyRelation {
    type Owner: Clone + PartialEq + Display;
    type Member: Clone + PartialEq + Display;

    /// Relation name used in logs and errors.
    const NAME: &'static str;

    fn members<'a>(
        graph: &'a Ancestry,
        owner: &Self::Owner,
    ) -> GraphResult<&'a LinkedSet<Self::Member>>;

    fn members_mut<'a>(
        graph: &'a mut Ancestry,
        owner: &Self::Owner,
    ) -> GraphResult<&'a mut LinkedSet<Self::Member>>;

    /// Validates one member before any mutation happens.
    fn check(graph: &Ancestry, owner: &Self::Owner, member: &Self::Member) -> GraphResult<()>;

    /// Mirrors a real insertion into the paired side.
    fn on_added(graph: &mut Ancestry, owner: &Self::Owner, member: &Self::Member)
        -> GraphResult<()>;

    /// Mirrors a real removal into the paired side.
    fn on_removed(
        graph: &mut Ancestry,
        owner: &Self::Owner,
        member: &Self::Member,
    ) -> GraphResult<()>;
}

/// Single-valued side of a one-to-many relation pair.
pub trait OneRelation {
    type Owner: Clone + PartialEq + Display;
    type Target: Clone + PartialEq + Display;
    type Inverse: ManyRelation<Owner = Self::Target, Member = Self::Owner>;

    const NAME: &'static str;

    fn slot<'a>(
        graph: &'a Ancestry,
        owner: &Self::Owner,
    ) -> GraphResult<&'a Option<Self::Target>>;

    fn slot_mut<'a>(
        graph: &'a mut Ancestry,
        owner: &Self::Owner,
    ) -> GraphResult<&'a mut Option<Self::Target>>;

    /// Validates a new target before assignment.
    fn check(graph: &Ancestry, _owner: &Self::Owner, target: &Self::Target) -> GraphResult<()> {
        Self::Inverse::members(graph, target).map(|_| ())
    }

    /// Runs after a non-empty slot was cleared.
    fn on_cleared(
        _graph: &mut Ancestry,
        _owner: &Self::Owner,
        _previous: &Self::Target,
    ) -> GraphResult<()> {
        Ok(())
    }
}

impl Ancestry {
    /// Current members of `owner` on relation `R`.
    pub fn related<R: ManyRelation>(
        &self,
        owner: &R::Owner,
    ) -> GraphResult<&LinkedSet<R::Member>> {
        R::members(self, owner)
    }

    /// Adds `members` to `owner` on relation `R` and mirrors each real
    /// insertion into the paired side.
    ///
    /// # Errors
    /// - `UnknownEntity` when the owner or a member is not registered.
    /// - `InvalidRelationMember` when a member's kind is not allowed.
    /// - `CyclicContainment` when a containment edge would close a loop.
    pub fn add_related<R, I>(&mut self, owner: &R::Owner, members: I) -> GraphResult<()>
    where
        R: ManyRelation,
        I: IntoIterator<Item = R::Member>,
    {
        let members: Vec<R::Member> = members.into_iter().collect();
        R::members(self, owner).map_err(rejected)?;
        for member in &members {
            R::check(self, owner, member).map_err(rejected)?;
        }
        for member in members {
            self.link_member::<R>(owner, member)?;
        }
        Ok(())
    }

    /// Removes `member` from `owner` on relation `R`. Absent members are
    /// ignored.
    pub fn remove_related<R: ManyRelation>(
        &mut self,
        owner: &R::Owner,
        member: &R::Member,
    ) -> GraphResult<()> {
        R::members(self, owner).map_err(rejected)?;
        self.unlink_member::<R>(owner, member)
    }

    /// Makes `owner`'s members on relation `R` exactly the deduplicated
    /// `members`; only entries whose membership changes are mirrored.
    pub fn replace_related<R, I>(&mut self, owner: &R::Owner, members: I) -> GraphResult<()>
    where
        R: ManyRelation,
        I: IntoIterator<Item = R::Member>,
    {
        let (stale, wanted) = R::members(self, owner)
            .map_err(rejected)?
            .replace_plan(members);
        for member in &wanted {
            R::check(self, owner, member).map_err(rejected)?;
        }
        for member in &stale {
            self.unlink_member::<R>(owner, member)?;
        }
        for member in wanted {
            self.link_member::<R>(owner, member)?;
        }
        Ok(())
    }

    /// Current target of `owner` on single-valued relation `R`.
    pub fn linked<R: OneRelation>(&self, owner: &R::Owner) -> GraphResult<Option<&R::Target>> {
        R::slot(self, owner).map(Option::as_ref)
    }

    /// Points `owner` at `target` on single-valued relation `R`, moving it
    /// out of the previous target's inverse collection.
    ///
    /// Reassigning the current target still removes and re-adds the owner on
    /// the inverse side, so it moves to the end of an ordered inverse.
    pub fn set_linked<R: OneRelation>(
        &mut self,
        owner: &R::Owner,
        target: Option<R::Target>,
    ) -> GraphResult<()> {
        R::slot(self, owner).map_err(rejected)?;
        if let Some(target) = &target {
            R::check(self, owner, target).map_err(rejected)?;
        }
        self.assign_linked::<R>(owner, target)
    }

    pub(crate) fn link_member<R: ManyRelation>(
        &mut self,
        owner: &R::Owner,
        member: R::Member,
    ) -> GraphResult<()> {
        if !R::members_mut(self, owner)?.insert(member.clone()) {
            return Ok(());
        }
        trace!(
            "event=relation_link module=graph status=ok relation={} owner={} member={}",
            R::NAME,
            owner,
            member
        );
        R::on_added(self, owner, &member)
    }

    pub(crate) fn unlink_member<R: ManyRelation>(
        &mut self,
        owner: &R::Owner,
        member: &R::Member,
    ) -> GraphResult<()> {
        if !R::members_mut(self, owner)?.discard(member) {
            return Ok(());
        }
        trace!(
            "event=relation_unlink module=graph status=ok relation={} owner={} member={}",
            R::NAME,
            owner,
            member
        );
        R::on_removed(self, owner, member)
    }

    pub(crate) fn assign_linked<R: OneRelation>(
        &mut self,
        owner: &R::Owner,
        target: Option<R::Target>,
    ) -> GraphResult<()> {
        let previous = std::mem::replace(R::slot_mut(self, owner)?, target.clone());
        trace!(
            "event=relation_set module=graph status=ok relation={} owner={} target={}",
            R::NAME,
            owner,
            target
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| "none".to_string())
        );
        if let Some(previous) = &previous {
            tolerate_missing(
                R::Inverse::members_mut(self, previous).map(|members| {
                    members.discard(owner);
                }),
            )?;
        }
        match target {
            Some(target) => {
                R::Inverse::members_mut(self, &target)?.insert(owner.clone());
            }
            None => {
                if let Some(previous) = &previous {
                    R::on_cleared(self, owner, previous)?;
                }
            }
        }
        Ok(())
    }
}

/// Mirrors an insertion into a multi-valued paired side.
pub(crate) fn mirror_add<R: ManyRelation>(
    graph: &mut Ancestry,
    owner: &R::Owner,
    member: &R::Member,
) -> GraphResult<()> {
    graph.link_member::<R>(owner, member.clone())
}

/// Mirrors a removal into a multi-valued paired side.
pub(crate) fn mirror_remove<R: ManyRelation>(
    graph: &mut Ancestry,
    owner: &R::Owner,
    member: &R::Member,
) -> GraphResult<()> {
    tolerate_missing(graph.unlink_member::<R>(owner, member))
}

/// Mirrors an insertion on the many side into the single-valued slot.
///
/// The slot already pointing at `target` ends the cascade.
pub(crate) fn mirror_assign<R: OneRelation>(
    graph: &mut Ancestry,
    owner: &R::Owner,
    target: &R::Target,
) -> GraphResult<()> {
    if R::slot(graph, owner)?.as_ref() == Some(target) {
        return Ok(());
    }
    graph.assign_linked::<R>(owner, Some(target.clone()))
}

/// Mirrors a removal on the many side by clearing the slot, when it still
/// points at `target`.
pub(crate) fn mirror_clear<R: OneRelation>(
    graph: &mut Ancestry,
    owner: &R::Owner,
    target: &R::Target,
) -> GraphResult<()> {
    let points_at_target = match R::slot(graph, owner) {
        Ok(slot) => slot.as_ref() == Some(target),
        Err(err) => return tolerate_missing(Err(err)),
    };
    if !points_at_target {
        return Ok(());
    }
    graph.assign_linked::<R>(owner, None)
}
