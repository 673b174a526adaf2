//! Order Board
//!
//! The board is one operator's working copy of the order list. It is filled by a single read
//! from the document store and afterwards only changes to mirror remote mutations that have
//! already been confirmed, so it never shows a state the store does not have.
//!
//! Mutations go through a two-step protocol: [`OrderBoard::begin_change`] marks the order as
//! in flight and hands out a [`PendingChange`], and exactly one of
//! [`OrderBoard::commit_status`], [`OrderBoard::commit_delete`] or [`OrderBoard::abandon`]
//! consumes it once the remote call has answered. While a change is pending, a second change to
//! the same order is refused instead of racing it at the store.

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::{
    filter::StatusFilter,
    orders::{Order, OrderId, OrderStatus},
};

/// Errors raised by board operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    /// The order is not part of the loaded list.
    #[error("order {0} is not on the board")]
    NotFound(OrderId),

    /// Another change to the order has not answered yet.
    #[error("order {0} already has a change in flight")]
    Busy(OrderId),
}

/// Outcome of toggling an order's detail panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expansion {
    /// The order's panel is now open; any other panel was closed.
    Expanded,

    /// The order's panel was open and is now closed.
    Collapsed,
}

/// Ticket for a remote change that has been started but not answered.
#[derive(Debug)]
#[must_use = "a pending change must be committed or abandoned"]
pub struct PendingChange {
    order: OrderId,
}

impl PendingChange {
    /// Order the change targets.
    pub fn order(&self) -> &OrderId {
        &self.order
    }
}

/// In-memory order list owned by one operator session.
#[derive(Debug, Default)]
pub struct OrderBoard {
    orders: Vec<Order>,
    loaded: bool,
    expanded: Option<OrderId>,
    in_flight: FxHashSet<OrderId>,
}

impl OrderBoard {
    /// Empty board that has not been loaded yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a load has been attempted, successful or not.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Replace the list with a fresh read, keeping the store's order.
    ///
    /// The open panel survives when its order is still present.
    pub fn load(&mut self, orders: Vec<Order>) {
        if let Some(expanded) = &self.expanded
            && !orders.iter().any(|order| order.id == *expanded)
        {
            self.expanded = None;
        }

        self.orders = orders;
        self.loaded = true;
    }

    /// Record a failed read; the current list, possibly empty, stays as it is.
    pub fn mark_load_failed(&mut self) {
        self.loaded = true;
    }

    /// Every order on the board.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Number of orders on the board.
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Whether the board holds no orders.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Look up one order.
    pub fn get(&self, id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|order| order.id == *id)
    }

    /// Orders visible under `filter`.
    pub fn visible(&self, filter: StatusFilter) -> impl Iterator<Item = &Order> {
        filter.apply(&self.orders)
    }

    /// The order whose panel is open.
    pub fn expanded(&self) -> Option<&Order> {
        self.expanded.as_ref().and_then(|id| self.get(id))
    }

    /// Id of the order whose panel is open.
    pub fn expanded_id(&self) -> Option<&OrderId> {
        self.expanded.as_ref()
    }

    /// Open `id`'s panel, or close it when it is already open.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotFound`] when the order is not on the board.
    pub fn toggle(&mut self, id: &OrderId) -> Result<Expansion, BoardError> {
        if self.get(id).is_none() {
            return Err(BoardError::NotFound(id.clone()));
        }

        if self.expanded.as_ref() == Some(id) {
            self.expanded = None;

            return Ok(Expansion::Collapsed);
        }

        self.expanded = Some(id.clone());

        Ok(Expansion::Expanded)
    }

    /// Whether a change to `id` is waiting for the store.
    pub fn is_in_flight(&self, id: &OrderId) -> bool {
        self.in_flight.contains(id)
    }

    /// Start a remote change to `id`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotFound`] for unknown orders and [`BoardError::Busy`] when
    /// another change to the same order has not answered yet.
    pub fn begin_change(&mut self, id: &OrderId) -> Result<PendingChange, BoardError> {
        if self.get(id).is_none() {
            return Err(BoardError::NotFound(id.clone()));
        }

        if !self.in_flight.insert(id.clone()) {
            return Err(BoardError::Busy(id.clone()));
        }

        Ok(PendingChange { order: id.clone() })
    }

    /// Mirror a confirmed status change.
    ///
    /// Returns `false` when the order left the board while the change was in flight.
    pub fn commit_status(&mut self, change: PendingChange, status: OrderStatus) -> bool {
        self.in_flight.remove(&change.order);

        let Some(order) = self.orders.iter_mut().find(|order| order.id == change.order) else {
            return false;
        };

        order.status = Some(status);

        true
    }

    /// Mirror a confirmed deletion, returning the removed order.
    pub fn commit_delete(&mut self, change: PendingChange) -> Option<Order> {
        self.in_flight.remove(&change.order);

        if self.expanded.as_ref() == Some(&change.order) {
            self.expanded = None;
        }

        let position = self
            .orders
            .iter()
            .position(|order| order.id == change.order)?;

        Some(self.orders.remove(position))
    }

    /// Drop a change the store rejected; the list is left untouched.
    pub fn abandon(&mut self, change: PendingChange) {
        self.in_flight.remove(&change.order);
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn order(id: &str, status: OrderStatus) -> Order {
        Order {
            id: id.into(),
            status: Some(status),
            ..Order::default()
        }
    }

    fn board() -> OrderBoard {
        let mut board = OrderBoard::new();

        board.load(vec![
            order("a", OrderStatus::Pending),
            order("b", OrderStatus::Dispatch),
        ]);

        board
    }

    #[test]
    fn new_board_is_not_loaded() {
        let board = OrderBoard::new();

        assert!(!board.is_loaded());
        assert!(board.is_empty());
    }

    #[test]
    fn failed_load_keeps_stale_list() {
        let mut board = board();

        board.mark_load_failed();

        assert!(board.is_loaded());
        assert_eq!(board.len(), 2);
    }

    #[test]
    fn toggle_switches_and_closes() -> TestResult {
        let mut board = board();
        let a = OrderId::new("a");
        let b = OrderId::new("b");

        assert_eq!(board.toggle(&a)?, Expansion::Expanded);
        assert_eq!(board.expanded_id(), Some(&a));

        assert_eq!(board.toggle(&b)?, Expansion::Expanded);
        assert_eq!(board.expanded_id(), Some(&b));

        assert_eq!(board.toggle(&b)?, Expansion::Collapsed);
        assert_eq!(board.expanded_id(), None);

        Ok(())
    }

    #[test]
    fn toggle_unknown_order_is_rejected() {
        let mut board = board();

        assert_eq!(
            board.toggle(&OrderId::new("zzz")),
            Err(BoardError::NotFound(OrderId::new("zzz")))
        );
        assert!(board.expanded().is_none());
    }

    #[test]
    fn second_change_to_same_order_is_busy() -> TestResult {
        let mut board = board();
        let a = OrderId::new("a");

        let change = board.begin_change(&a)?;

        assert!(board.is_in_flight(&a));
        assert_eq!(board.begin_change(&a).err(), Some(BoardError::Busy(a.clone())));

        let other = board.begin_change(&OrderId::new("b"))?;

        board.abandon(other);

        assert!(board.commit_status(change, OrderStatus::Success));
        assert!(!board.is_in_flight(&a));

        Ok(())
    }

    #[test]
    fn abandoned_change_leaves_list_identical() -> TestResult {
        let mut board = board();
        let before = board.orders().to_vec();

        let change = board.begin_change(&OrderId::new("a"))?;

        board.abandon(change);

        assert_eq!(board.orders(), before.as_slice());

        Ok(())
    }

    #[test]
    fn commit_delete_closes_open_panel() -> TestResult {
        let mut board = board();
        let a = OrderId::new("a");

        board.toggle(&a)?;

        let change = board.begin_change(&a)?;
        let removed = board.commit_delete(change);

        assert_eq!(removed.map(|order| order.id), Some(a));
        assert!(board.expanded().is_none());
        assert_eq!(board.len(), 1);

        Ok(())
    }

    #[test]
    fn reload_drops_panel_of_vanished_order() -> TestResult {
        let mut board = board();

        board.toggle(&OrderId::new("a"))?;
        board.load(vec![order("b", OrderStatus::Dispatch)]);

        assert!(board.expanded_id().is_none());

        Ok(())
    }

    #[test]
    fn commit_after_reload_without_order_reports_false() -> TestResult {
        let mut board = board();
        let change = board.begin_change(&OrderId::new("a"))?;

        board.load(vec![order("b", OrderStatus::Dispatch)]);

        assert!(!board.commit_status(change, OrderStatus::Success));
        assert!(!board.is_in_flight(&OrderId::new("a")));

        Ok(())
    }
}
