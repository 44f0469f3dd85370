// SPDX-FileCopyrightText: 2026 Vouch Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ordering engine for testimonial positions.
//!
//! Every operation works in two steps. A pure planner turns a sorted snapshot
//! into a list of [`PositionChange`] writes, then the engine hands the whole
//! plan to [`TestimonialRepository::apply_positions`] as one atomic batch.
//! Planners only emit rows whose position actually changes.
//!
//! Planners work on display *ranks* rather than stored values, so a gapped
//! or duplicated sequence is repaired as a side effect of any reorder.

use std::cmp::Ordering;
use std::sync::Arc;

use tracing::debug;
use vouch_core::types::{Direction, PositionChange, Testimonial, TestimonialFilter};
use vouch_core::{TestimonialRepository, VouchError};

/// The ordering-relevant part of a testimonial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSlot {
    pub id: String,
    pub position: i64,
}

impl From<&Testimonial> for OrderSlot {
    fn from(t: &Testimonial) -> Self {
        Self {
            id: t.id.clone(),
            position: t.position,
        }
    }
}

/// Display order: position, then creation time, then id.
pub fn display_order(a: &Testimonial, b: &Testimonial) -> Ordering {
    a.position
        .cmp(&b.position)
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| a.id.cmp(&b.id))
}

/// Writes that renumber `order` to `1..=N` in its current sequence.
pub fn plan_renumber(order: &[OrderSlot]) -> Vec<PositionChange> {
    order
        .iter()
        .zip(1_i64..)
        .filter(|(slot, rank)| slot.position != *rank)
        .map(|(slot, rank)| PositionChange {
            id: slot.id.clone(),
            position: rank,
        })
        .collect()
}

/// Plan a normalization pass. An already contiguous sequence yields nothing.
pub fn plan_normalize(sorted: &[OrderSlot]) -> Vec<PositionChange> {
    plan_renumber(sorted)
}

/// Plan moving `id` to rank `target`.
///
/// `target` may be `N + 1`, which means "last". The plan is empty only when
/// every stored position is already correct.
pub fn plan_insert(
    sorted: &[OrderSlot],
    id: &str,
    target: i64,
) -> Result<Vec<PositionChange>, VouchError> {
    let from = index_of(sorted, id)?;
    check_target(sorted.len(), target)?;

    let to = (target.min(sorted.len() as i64) - 1) as usize;
    let mut order = sorted.to_vec();
    let moved = order.remove(from);
    order.insert(to, moved);
    Ok(plan_renumber(&order))
}

/// Plan swapping `id` with its neighbor in `direction`.
///
/// At the boundary the plan is empty. Distinct positions are exchanged
/// directly (two writes); duplicated positions fall back to a rank swap and
/// a full renumber.
pub fn plan_swap(
    sorted: &[OrderSlot],
    id: &str,
    direction: Direction,
) -> Result<Vec<PositionChange>, VouchError> {
    let from = index_of(sorted, id)?;
    let neighbor = match direction {
        Direction::Up => from.checked_sub(1),
        Direction::Down => Some(from + 1).filter(|&i| i < sorted.len()),
    };
    let Some(neighbor) = neighbor else {
        return Ok(Vec::new());
    };

    if has_duplicates(sorted) {
        let mut order = sorted.to_vec();
        order.swap(from, neighbor);
        return Ok(plan_renumber(&order));
    }

    let (a, b) = (&sorted[from], &sorted[neighbor]);
    Ok(vec![
        PositionChange {
            id: a.id.clone(),
            position: b.position,
        },
        PositionChange {
            id: b.id.clone(),
            position: a.position,
        },
    ])
}

/// Reject a move target outside `1..=count + 1`.
pub fn check_target(count: usize, target: i64) -> Result<(), VouchError> {
    let max = count as i64 + 1;
    if target < 1 || target > max {
        return Err(VouchError::OutOfRange {
            position: target,
            max,
        });
    }
    Ok(())
}

fn index_of(sorted: &[OrderSlot], id: &str) -> Result<usize, VouchError> {
    sorted
        .iter()
        .position(|s| s.id == id)
        .ok_or_else(|| VouchError::not_found("testimonial", id))
}

fn has_duplicates(sorted: &[OrderSlot]) -> bool {
    sorted.windows(2).any(|w| w[0].position == w[1].position)
}

/// Applies ordering plans against a repository.
#[derive(Clone)]
pub struct OrderingEngine {
    repo: Arc<dyn TestimonialRepository>,
}

impl OrderingEngine {
    pub fn new(repo: Arc<dyn TestimonialRepository>) -> Self {
        Self { repo }
    }

    /// Every testimonial, active or not, in display order.
    pub async fn snapshot(&self) -> Result<Vec<Testimonial>, VouchError> {
        let mut rows = self.repo.list_testimonials(TestimonialFilter::all()).await?;
        rows.sort_by(display_order);
        Ok(rows)
    }

    /// Move `id` to rank `target`, shifting the records in between.
    ///
    /// Returns the number of rows written.
    pub async fn insert_at_position(&self, id: &str, target: i64) -> Result<usize, VouchError> {
        let slots = self.slots().await?;
        let plan = plan_insert(&slots, id, target)?;
        debug!(id, target, writes = plan.len(), "position plan: insert");
        self.apply(plan).await
    }

    /// Fail with `OutOfRange` unless `target` is a valid rank for a move.
    pub async fn validate_target(&self, target: i64) -> Result<(), VouchError> {
        let count = self.repo.list_testimonials(TestimonialFilter::all()).await?.len();
        check_target(count, target)
    }

    /// Exchange `id` with its neighbor. A no-op at either end.
    pub async fn swap_neighbors(&self, id: &str, direction: Direction) -> Result<usize, VouchError> {
        let slots = self.slots().await?;
        let plan = plan_swap(&slots, id, direction)?;
        debug!(id, %direction, writes = plan.len(), "position plan: swap");
        self.apply(plan).await
    }

    /// Renumber every record to `1..=N`.
    pub async fn normalize(&self) -> Result<usize, VouchError> {
        let slots = self.slots().await?;
        let plan = plan_normalize(&slots);
        debug!(records = slots.len(), writes = plan.len(), "position plan: normalize");
        self.apply(plan).await
    }

    async fn slots(&self) -> Result<Vec<OrderSlot>, VouchError> {
        Ok(self.snapshot().await?.iter().map(OrderSlot::from).collect())
    }

    async fn apply(&self, plan: Vec<PositionChange>) -> Result<usize, VouchError> {
        if plan.is_empty() {
            return Ok(0);
        }
        self.repo.apply_positions(&plan).await?;
        Ok(plan.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tracing_test::traced_test;
    use vouch_test_utils::MemoryRepository;

    fn slots(positions: &[i64]) -> Vec<OrderSlot> {
        let mut v: Vec<OrderSlot> = positions
            .iter()
            .enumerate()
            .map(|(i, &p)| OrderSlot {
                id: format!("t{i:03}"),
                position: p,
            })
            .collect();
        // Ids are zero-padded in creation order, so sorting by (position, id)
        // matches the repository's (position, created_at, id) order.
        v.sort_by(|a, b| a.position.cmp(&b.position).then_with(|| a.id.cmp(&b.id)));
        v
    }

    fn apply(sorted: &[OrderSlot], plan: &[PositionChange]) -> Vec<OrderSlot> {
        let mut next = sorted.to_vec();
        for change in plan {
            if let Some(slot) = next.iter_mut().find(|s| s.id == change.id) {
                slot.position = change.position;
            }
        }
        next.sort_by(|a, b| a.position.cmp(&b.position).then_with(|| a.id.cmp(&b.id)));
        next
    }

    fn ids(order: &[OrderSlot]) -> Vec<&str> {
        order.iter().map(|s| s.id.as_str()).collect()
    }

    fn is_contiguous(order: &[OrderSlot]) -> bool {
        order.iter().zip(1_i64..).all(|(s, r)| s.position == r)
    }

    #[test]
    fn normalize_contiguous_is_empty() {
        assert!(plan_normalize(&slots(&[1, 2, 3])).is_empty());
    }

    #[test]
    fn normalize_repairs_gaps_and_duplicates() {
        let sorted = slots(&[2, 2, 7]);
        let plan = plan_normalize(&sorted);
        let after = apply(&sorted, &plan);
        assert!(is_contiguous(&after));
        assert_eq!(ids(&after), ids(&sorted));
        // t000 at 2 -> 1, t001 at 2 -> 2 (unchanged), t002 at 7 -> 3
        assert_eq!(plan.len(), 2);
    }

    #[test]
    fn insert_moving_up_shifts_between_down() {
        let sorted = slots(&[1, 2, 3, 4, 5]);
        let plan = plan_insert(&sorted, "t003", 2).unwrap();
        let after = apply(&sorted, &plan);
        assert_eq!(ids(&after), vec!["t000", "t003", "t001", "t002", "t004"]);
        assert!(is_contiguous(&after));
        assert_eq!(plan.len(), 3);
    }

    #[test]
    fn insert_moving_down_shifts_between_up() {
        let sorted = slots(&[1, 2, 3, 4, 5]);
        let plan = plan_insert(&sorted, "t001", 4).unwrap();
        let after = apply(&sorted, &plan);
        assert_eq!(ids(&after), vec!["t000", "t002", "t003", "t001", "t004"]);
        assert_eq!(plan.len(), 3);
    }

    #[test]
    fn insert_to_current_rank_is_noop() {
        let sorted = slots(&[1, 2, 3]);
        assert!(plan_insert(&sorted, "t001", 2).unwrap().is_empty());
    }

    #[test]
    fn insert_accepts_n_plus_one_as_last() {
        let sorted = slots(&[1, 2, 3]);
        let plan = plan_insert(&sorted, "t000", 4).unwrap();
        let after = apply(&sorted, &plan);
        assert_eq!(ids(&after), vec!["t001", "t002", "t000"]);
        // Already last: N + 1 is a no-op.
        assert!(plan_insert(&sorted, "t002", 4).unwrap().is_empty());
    }

    #[test]
    fn insert_rejects_out_of_range_targets() {
        let sorted = slots(&[1, 2, 3]);
        for target in [0, -1, 5] {
            let err = plan_insert(&sorted, "t000", target).unwrap_err();
            assert!(
                matches!(err, VouchError::OutOfRange { position, max: 4 } if position == target),
                "target {target}: {err}"
            );
        }
    }

    #[test]
    fn insert_unknown_id_is_not_found() {
        let err = plan_insert(&slots(&[1]), "ghost", 1).unwrap_err();
        assert!(matches!(err, VouchError::NotFound { .. }));
    }

    #[test]
    fn insert_from_gapped_start_moves_and_repairs() {
        // Gapped start: positions {1, 2, 4}; move the third record to 2.
        let sorted = slots(&[1, 2, 4]);
        let plan = plan_insert(&sorted, "t002", 2).unwrap();
        let after = apply(&sorted, &plan);
        assert_eq!(ids(&after), vec!["t000", "t002", "t001"]);
        assert!(is_contiguous(&after));
    }

    #[test]
    fn insert_to_held_rank_in_gapped_sequence_writes_target() {
        // t002 is third in display order but stored at 4.
        let sorted = slots(&[1, 2, 4]);
        let plan = plan_insert(&sorted, "t002", 3).unwrap();
        assert_eq!(
            plan,
            vec![PositionChange {
                id: "t002".into(),
                position: 3
            }]
        );
        let after = apply(&sorted, &plan);
        assert_eq!(ids(&after), ids(&sorted));
        assert!(is_contiguous(&after));
    }

    #[test]
    fn check_target_bounds() {
        assert!(check_target(3, 1).is_ok());
        assert!(check_target(3, 4).is_ok());
        assert!(matches!(
            check_target(3, 5).unwrap_err(),
            VouchError::OutOfRange { position: 5, max: 4 }
        ));
        assert!(check_target(0, 1).is_ok());
        assert!(check_target(0, 0).is_err());
    }

    #[test]
    fn swap_exchanges_two_positions() {
        let sorted = slots(&[1, 2, 3]);
        let plan = plan_swap(&sorted, "t001", Direction::Up).unwrap();
        assert_eq!(plan.len(), 2);
        let after = apply(&sorted, &plan);
        assert_eq!(ids(&after), vec!["t001", "t000", "t002"]);
    }

    #[test]
    fn swap_at_boundary_is_noop() {
        let sorted = slots(&[1, 2, 3]);
        assert!(plan_swap(&sorted, "t000", Direction::Up).unwrap().is_empty());
        assert!(plan_swap(&sorted, "t002", Direction::Down).unwrap().is_empty());
    }

    #[test]
    fn swap_with_duplicate_positions_swaps_ranks() {
        let sorted = slots(&[1, 1, 2]);
        let plan = plan_swap(&sorted, "t000", Direction::Down).unwrap();
        let after = apply(&sorted, &plan);
        assert_eq!(ids(&after), vec!["t001", "t000", "t002"]);
        assert!(is_contiguous(&after));
    }

    #[test]
    fn swap_keeps_gaps_when_values_are_distinct() {
        let sorted = slots(&[1, 5, 9]);
        let plan = plan_swap(&sorted, "t002", Direction::Up).unwrap();
        let after = apply(&sorted, &plan);
        assert_eq!(ids(&after), vec!["t000", "t002", "t001"]);
        assert_eq!(after[1].position, 5);
    }

    proptest! {
        #[test]
        fn normalize_is_contiguous_and_idempotent(positions in prop::collection::vec(-5_i64..20, 0..12)) {
            let sorted = slots(&positions);
            let after = apply(&sorted, &plan_normalize(&sorted));
            prop_assert!(is_contiguous(&after));
            prop_assert_eq!(ids(&after), ids(&sorted));
            prop_assert!(plan_normalize(&after).is_empty());
        }

        #[test]
        fn insert_on_contiguous_writes_exactly_the_span(
            (n, from, target) in (1_usize..12).prop_flat_map(|n| (Just(n), 0..n, 1..=(n as i64)))
        ) {
            let positions: Vec<i64> = (1..=n as i64).collect();
            let sorted = slots(&positions);
            let id = sorted[from].id.clone();
            let plan = plan_insert(&sorted, &id, target).unwrap();
            let old = from as i64 + 1;
            let expected = if old == target { 0 } else { (target - old).unsigned_abs() as usize + 1 };
            prop_assert_eq!(plan.len(), expected);

            let after = apply(&sorted, &plan);
            prop_assert!(is_contiguous(&after));
            prop_assert_eq!(after[(target - 1) as usize].id.as_str(), id.as_str());

            // Relative order of everyone else is preserved.
            let others_before: Vec<&str> = ids(&sorted).into_iter().filter(|i| *i != id).collect();
            let others_after: Vec<&str> = ids(&after).into_iter().filter(|i| *i != id).collect();
            prop_assert_eq!(others_before, others_after);
        }

        #[test]
        fn insert_on_any_start_lands_at_target_rank(
            positions in prop::collection::vec(1_i64..30, 1..10),
            pick in any::<prop::sample::Index>(),
            rank in any::<prop::sample::Index>(),
        ) {
            let sorted = slots(&positions);
            let id = sorted[pick.index(sorted.len())].id.clone();
            let target = rank.index(sorted.len()) as i64 + 1;
            let plan = plan_insert(&sorted, &id, target).unwrap();
            let after = apply(&sorted, &plan);
            prop_assert_eq!(after[(target - 1) as usize].id.as_str(), id.as_str());
            prop_assert!(is_contiguous(&after));
        }

        #[test]
        fn swap_on_contiguous_keeps_contiguity(
            (n, from) in (1_usize..12).prop_flat_map(|n| (Just(n), 0..n)),
            up in any::<bool>(),
        ) {
            let positions: Vec<i64> = (1..=n as i64).collect();
            let sorted = slots(&positions);
            let direction = if up { Direction::Up } else { Direction::Down };
            let plan = plan_swap(&sorted, &sorted[from].id, direction).unwrap();
            let at_edge = (up && from == 0) || (!up && from == n - 1);
            prop_assert_eq!(plan.len(), if at_edge { 0 } else { 2 });
            prop_assert!(is_contiguous(&apply(&sorted, &plan)));
        }
    }

    #[tokio::test]
    #[traced_test]
    async fn engine_applies_plan_atomically_and_counts_writes() {
        let repo = MemoryRepository::new();
        for (i, id) in ["a", "b", "c", "d"].iter().enumerate() {
            repo.seed(id, i as i64 + 1).await;
        }
        let engine = OrderingEngine::new(Arc::new(repo.clone()));

        assert_eq!(engine.insert_at_position("d", 1).await.unwrap(), 4);
        let order: Vec<String> = repo.positions().await.into_iter().map(|p| p.0).collect();
        assert_eq!(order, vec!["d", "a", "b", "c"]);
        assert_eq!(repo.apply_calls(), 1);
        assert!(logs_contain("position plan: insert"));
    }

    #[tokio::test]
    async fn engine_noops_do_not_touch_repository() {
        let repo = MemoryRepository::new();
        repo.seed("a", 1).await;
        repo.seed("b", 2).await;
        let engine = OrderingEngine::new(Arc::new(repo.clone()));

        assert_eq!(engine.normalize().await.unwrap(), 0);
        assert_eq!(engine.swap_neighbors("a", Direction::Up).await.unwrap(), 0);
        assert_eq!(engine.insert_at_position("b", 2).await.unwrap(), 0);
        assert_eq!(repo.apply_calls(), 0);
    }

    #[tokio::test]
    async fn engine_moves_record_to_held_rank_in_gapped_sequence() {
        let repo = MemoryRepository::new();
        repo.seed("a", 1).await;
        repo.seed("b", 2).await;
        repo.seed("c", 4).await;
        let engine = OrderingEngine::new(Arc::new(repo.clone()));

        assert_eq!(engine.insert_at_position("c", 3).await.unwrap(), 1);
        assert_eq!(
            repo.positions().await,
            vec![("a".to_string(), 1), ("b".to_string(), 2), ("c".to_string(), 3)]
        );
        assert_eq!(engine.insert_at_position("c", 3).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn engine_normalize_twice_writes_once() {
        let repo = MemoryRepository::new();
        repo.seed("a", 3).await;
        repo.seed("b", 3).await;
        repo.seed("c", 10).await;
        let engine = OrderingEngine::new(Arc::new(repo.clone()));

        assert_eq!(engine.normalize().await.unwrap(), 3);
        assert_eq!(engine.normalize().await.unwrap(), 0);
        assert_eq!(
            repo.positions().await,
            vec![("a".to_string(), 1), ("b".to_string(), 2), ("c".to_string(), 3)]
        );
    }

    #[tokio::test]
    async fn engine_propagates_repository_failure() {
        let repo = MemoryRepository::new();
        repo.seed("a", 1).await;
        repo.set_failing(true);
        let engine = OrderingEngine::new(Arc::new(repo));
        let err = engine.normalize().await.unwrap_err();
        assert!(matches!(err, VouchError::Repository { .. }));
    }
}
