//! Obstacle bookkeeping and collision detection
//!
//! Falling debris registers its bounding box in the [`ObstacleRegistry`] for
//! as long as it lives. The ship and projectiles test themselves against the
//! registry; projectiles report what they hit through the
//! [`CollisionChannel`] so the debris behavior itself can blow up.
//!
//! Overlap is plain axis-aligned rectangle intersection on rounded cell
//! coordinates. There is no tolerance margin.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Cell-aligned rectangle (top-left corner plus size)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub row: i32,
    pub column: i32,
    pub rows: i32,
    pub columns: i32,
}

impl Rect {
    /// Rectangle whose corner is the rounded (row, column)
    pub fn at(row: f32, column: f32, rows: i32, columns: i32) -> Self {
        Self {
            row: row.round() as i32,
            column: column.round() as i32,
            rows,
            columns,
        }
    }

    /// Single cell at the rounded (row, column)
    pub fn cell(row: f32, column: f32) -> Self {
        Self::at(row, column, 1, 1)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows <= 0 || self.columns <= 0
    }

    /// True when the two rectangles share at least one cell
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.row < other.row + other.rows
            && other.row < self.row + self.rows
            && self.column < other.column + other.columns
            && other.column < self.column + self.columns
    }
}

/// Identity of a registered obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObstacleId(pub u32);

impl std::fmt::Display for ObstacleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "obstacle#{}", self.0)
    }
}

/// Bounding box of a piece of debris. Row may be fractional while falling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub row: f32,
    pub column: f32,
    pub rows: i32,
    pub columns: i32,
}

impl Obstacle {
    pub fn new(row: f32, column: f32, rows: i32, columns: i32) -> Self {
        Self {
            row,
            column,
            rows,
            columns,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::at(self.row, self.column, self.rows, self.columns)
    }

    /// Center point as (row, column)
    pub fn center(&self) -> (f32, f32) {
        (
            self.row + self.rows as f32 / 2.0,
            self.column + self.columns as f32 / 2.0,
        )
    }
}

#[derive(Debug, Default)]
struct Slots {
    next_id: u32,
    entries: BTreeMap<ObstacleId, Obstacle>,
}

/// Shared registry of live obstacles.
///
/// Cloning yields another handle to the same registry. Entries are only
/// added through [`ObstacleRegistry::register`], and removed when the
/// returned [`ObstacleLease`] is released or dropped.
#[derive(Debug, Clone, Default)]
pub struct ObstacleRegistry {
    slots: Rc<RefCell<Slots>>,
}

impl ObstacleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an obstacle; it stays registered while the lease lives
    pub fn register(&self, obstacle: Obstacle) -> ObstacleLease {
        let mut slots = self.slots.borrow_mut();
        slots.next_id += 1;
        let id = ObstacleId(slots.next_id);
        slots.entries.insert(id, obstacle);
        ObstacleLease {
            id,
            slots: Rc::clone(&self.slots),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.borrow().entries.is_empty()
    }

    pub fn get(&self, id: ObstacleId) -> Option<Obstacle> {
        self.slots.borrow().entries.get(&id).copied()
    }

    pub fn contains(&self, id: ObstacleId) -> bool {
        self.slots.borrow().entries.contains_key(&id)
    }

    /// All live obstacles in registration order
    pub fn snapshot(&self) -> Vec<(ObstacleId, Obstacle)> {
        self.slots
            .borrow()
            .entries
            .iter()
            .map(|(id, obstacle)| (*id, *obstacle))
            .collect()
    }

    /// Oldest obstacle overlapping `rect`
    pub fn first_overlap(&self, rect: &Rect) -> Option<ObstacleId> {
        self.slots
            .borrow()
            .entries
            .iter()
            .find(|(_, obstacle)| obstacle.rect().intersects(rect))
            .map(|(id, _)| *id)
    }

    pub fn any_overlap(&self, rect: &Rect) -> bool {
        self.first_overlap(rect).is_some()
    }
}

/// Registration handle held by the debris behavior.
///
/// Dropping it deregisters the obstacle, so a behavior discarded mid-flight
/// never leaves a phantom box behind.
#[derive(Debug)]
pub struct ObstacleLease {
    id: ObstacleId,
    slots: Rc<RefCell<Slots>>,
}

impl ObstacleLease {
    pub fn id(&self) -> ObstacleId {
        self.id
    }

    /// Current record
    pub fn obstacle(&self) -> Option<Obstacle> {
        self.slots.borrow().entries.get(&self.id).copied()
    }

    /// Move the obstacle to a new row
    pub fn set_row(&self, row: f32) {
        if let Some(obstacle) = self.slots.borrow_mut().entries.get_mut(&self.id) {
            obstacle.row = row;
        }
    }
}

impl Drop for ObstacleLease {
    fn drop(&mut self) {
        self.slots.borrow_mut().entries.remove(&self.id);
    }
}

/// Obstacles hit by a projectile and not yet handled by their own behavior
#[derive(Debug, Clone, Default)]
pub struct CollisionChannel {
    hits: BTreeSet<ObstacleId>,
}

impl CollisionChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report a hit. Returns false if the obstacle was already reported.
    pub fn signal(&mut self, id: ObstacleId) -> bool {
        self.hits.insert(id)
    }

    /// Consume the hit for `id`, if any
    pub fn take(&mut self, id: ObstacleId) -> bool {
        self.hits.remove(&id)
    }

    pub fn contains(&self, id: ObstacleId) -> bool {
        self.hits.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn clear(&mut self) {
        self.hits.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_intersection() {
        let a = Rect::at(2.0, 2.0, 3, 4);
        assert!(a.intersects(&Rect::cell(2.0, 2.0)));
        assert!(a.intersects(&Rect::cell(4.0, 5.0)));
        // Edges are exclusive
        assert!(!a.intersects(&Rect::cell(5.0, 2.0)));
        assert!(!a.intersects(&Rect::cell(2.0, 6.0)));
        // Partial overlap from outside the corner
        assert!(a.intersects(&Rect::at(0.0, 0.0, 3, 3)));
        assert!(!a.intersects(&Rect::at(0.0, 0.0, 2, 3)));
    }

    #[test]
    fn test_rect_rounds_fractional_rows() {
        let falling = Rect::at(3.5, 1.0, 1, 1);
        assert_eq!(falling.row, 4);
        assert!(!falling.intersects(&Rect::cell(3.0, 1.0)));
    }

    #[test]
    fn test_empty_rect_never_intersects() {
        let empty = Rect::at(0.0, 0.0, 0, 0);
        assert!(empty.is_empty());
        assert!(!empty.intersects(&Rect::at(0.0, 0.0, 10, 10)));
        assert!(!Rect::at(0.0, 0.0, 10, 10).intersects(&empty));
    }

    #[test]
    fn test_lease_drop_deregisters() {
        let registry = ObstacleRegistry::new();
        let a = registry.register(Obstacle::new(0.0, 0.0, 2, 2));
        let b = registry.register(Obstacle::new(5.0, 5.0, 2, 2));
        assert_eq!(registry.len(), 2);
        assert_ne!(a.id(), b.id());

        drop(a);
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(b.id()));

        drop(b);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_first_overlap_prefers_oldest() {
        let registry = ObstacleRegistry::new();
        let older = registry.register(Obstacle::new(0.0, 0.0, 3, 3));
        let _newer = registry.register(Obstacle::new(1.0, 1.0, 3, 3));

        assert_eq!(registry.first_overlap(&Rect::cell(1.0, 1.0)), Some(older.id()));
        assert_eq!(registry.first_overlap(&Rect::cell(9.0, 9.0)), None);
    }

    #[test]
    fn test_set_row_moves_box() {
        let registry = ObstacleRegistry::new();
        let lease = registry.register(Obstacle::new(0.0, 4.0, 1, 1));
        assert!(!registry.any_overlap(&Rect::cell(6.0, 4.0)));

        lease.set_row(6.0);
        assert!(registry.any_overlap(&Rect::cell(6.0, 4.0)));
        assert_eq!(lease.obstacle().map(|o| o.row), Some(6.0));
    }

    #[test]
    fn test_channel_consumes_once() {
        let mut channel = CollisionChannel::new();
        let id = ObstacleId(7);
        assert!(channel.signal(id));
        assert!(!channel.signal(id));
        assert_eq!(channel.len(), 1);

        assert!(channel.take(id));
        assert!(!channel.take(id));
        assert!(channel.is_empty());
    }

    #[test]
    fn test_center() {
        let obstacle = Obstacle::new(2.0, 10.0, 4, 6);
        assert_eq!(obstacle.center(), (4.0, 13.0));
    }
}
