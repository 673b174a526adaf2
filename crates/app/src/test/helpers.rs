//! Test Helpers

use orderdesk::orders::{Order, OrderStatus};

use crate::store::MockDocumentStore;

pub(crate) fn order(id: &str, status: OrderStatus) -> Order {
    Order {
        id: id.into(),
        status: Some(status),
        ..Order::default()
    }
}

/// Store whose single read returns `A` (pending) and `B` (dispatch).
pub(crate) fn seeded_store() -> MockDocumentStore {
    let mut store = MockDocumentStore::new();

    store.expect_fetch_orders().times(1).returning(|| {
        Ok(vec![
            order("A", OrderStatus::Pending),
            order("B", OrderStatus::Dispatch),
        ])
    });

    store
}
