//! Orders service.
//!
//! Each operator session owns an [`OrderBoard`]. The board is loaded lazily on first use and
//! afterwards mirrors remote mutations only once the document store has accepted them.
//!
//! A board's lock is held across its one-time initial load, so concurrent first requests share a
//! single read, but never across a mutation: the order is marked in flight, the lock released,
//! and the store called. The remote call and the local commit run on their own task so an
//! abandoned request cannot strand the in-flight marker.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use orderdesk::{
    board::{Expansion, OrderBoard},
    filter::StatusFilter,
    orders::{Order, OrderId, OrderStatus},
};
use rustc_hash::FxHashMap;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use tracing::{error, info};

use crate::{
    auth::SessionId,
    orders::{
        OrdersServiceError,
        models::{
            DeleteConfirmation, DeleteOutcome, OrderDetails, OrderItemView, OrdersView,
            StatusChange,
        },
    },
    store::DocumentStore,
};

type SharedBoard = Arc<Mutex<OrderBoard>>;

pub struct BoardOrdersService {
    store: Arc<dyn DocumentStore>,
    boards: RwLock<FxHashMap<SessionId, SharedBoard>>,
}

impl std::fmt::Debug for BoardOrdersService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoardOrdersService").finish_non_exhaustive()
    }
}

impl BoardOrdersService {
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            boards: RwLock::new(FxHashMap::default()),
        }
    }

    async fn board(&self, session: SessionId) -> SharedBoard {
        if let Some(board) = self.boards.read().await.get(&session) {
            return Arc::clone(board);
        }

        Arc::clone(self.boards.write().await.entry(session).or_default())
    }

    /// Lock the session's board, reading the store first if this is its first use.
    async fn loaded_board(&self, session: SessionId) -> OwnedMutexGuard<OrderBoard> {
        let mut board = self.board(session).await.lock_owned().await;

        if !board.is_loaded() {
            self.load_into(&mut board).await;
        }

        board
    }

    async fn load_into(&self, board: &mut OrderBoard) {
        match self.store.fetch_orders().await {
            Ok(orders) => {
                info!(count = orders.len(), "loaded orders");

                board.load(orders);
            }
            Err(error) => {
                error!(%error, "failed to load orders");

                board.mark_load_failed();
            }
        }
    }

    fn details(&self, order: &Order) -> OrderDetails {
        OrderDetails {
            items: order
                .cart_items
                .iter()
                .map(|item| OrderItemView {
                    product_name: item.product_name.clone(),
                    image_url: item
                        .image
                        .as_ref()
                        .and_then(|image| self.store.image_url(image)),
                })
                .collect(),
            order: order.clone(),
        }
    }
}

fn view(board: &OrderBoard, filter: StatusFilter) -> OrdersView {
    OrdersView {
        filter,
        orders: board.visible(filter).cloned().collect(),
        total: board.len(),
        expanded: board.expanded_id().cloned(),
    }
}

#[async_trait]
impl OrdersService for BoardOrdersService {
    async fn list_orders(
        &self,
        session: SessionId,
        filter: StatusFilter,
    ) -> Result<OrdersView, OrdersServiceError> {
        let board = self.loaded_board(session).await;

        Ok(view(&board, filter))
    }

    async fn refresh_orders(&self, session: SessionId) -> Result<OrdersView, OrdersServiceError> {
        let mut board = self.board(session).await.lock_owned().await;

        self.load_into(&mut board).await;

        Ok(view(&board, StatusFilter::All))
    }

    async fn get_order(
        &self,
        session: SessionId,
        order: &OrderId,
    ) -> Result<OrderDetails, OrdersServiceError> {
        let board = self.loaded_board(session).await;

        let found = board.get(order).ok_or(OrdersServiceError::NotFound)?;

        Ok(self.details(found))
    }

    async fn toggle_order(
        &self,
        session: SessionId,
        order: &OrderId,
    ) -> Result<Option<OrderDetails>, OrdersServiceError> {
        let mut board = self.loaded_board(session).await;

        match board.toggle(order)? {
            Expansion::Expanded => Ok(board.get(order).map(|found| self.details(found))),
            Expansion::Collapsed => Ok(None),
        }
    }

    async fn change_status(
        &self,
        session: SessionId,
        order: &OrderId,
        status: OrderStatus,
    ) -> Result<StatusChange, OrdersServiceError> {
        let shared = self.board(session).await;

        let change = {
            let mut board = self.loaded_board(session).await;

            board.begin_change(order)?
        };

        let store = Arc::clone(&self.store);
        let target = order.clone();

        let task = tokio::spawn(async move {
            let result = store.set_order_status(&target, status).await;
            let mut board = shared.lock().await;

            match result {
                Ok(()) => {
                    board.commit_status(change, status);

                    info!(order = %target, %status, "order status changed");

                    Ok(())
                }
                Err(error) => {
                    board.abandon(change);

                    error!(order = %target, %error, "failed to update order status");

                    Err(OrdersServiceError::from(error))
                }
            }
        });

        task.await
            .map_err(|_err| OrdersServiceError::Interrupted)??;

        Ok(StatusChange {
            order: order.clone(),
            status,
            confirmation: status.confirmation(),
        })
    }

    async fn delete_order(
        &self,
        session: SessionId,
        order: &OrderId,
        confirmation: DeleteConfirmation,
    ) -> Result<DeleteOutcome, OrdersServiceError> {
        if confirmation == DeleteConfirmation::Declined {
            return Ok(DeleteOutcome::Declined);
        }

        let shared = self.board(session).await;

        let change = {
            let mut board = self.loaded_board(session).await;

            board.begin_change(order)?
        };

        let store = Arc::clone(&self.store);
        let target = order.clone();

        let task = tokio::spawn(async move {
            let result = store.delete_order(&target).await;
            let mut board = shared.lock().await;

            match result {
                Ok(()) => {
                    board.commit_delete(change);

                    info!(order = %target, "order deleted");

                    Ok(())
                }
                Err(error) => {
                    board.abandon(change);

                    error!(order = %target, %error, "failed to delete order");

                    Err(OrdersServiceError::from(error))
                }
            }
        });

        task.await
            .map_err(|_err| OrdersServiceError::Interrupted)??;

        Ok(DeleteOutcome::Deleted)
    }

    async fn forget_session(&self, session: SessionId) {
        self.boards.write().await.remove(&session);
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Orders visible under `filter`, loading the board on first use.
    async fn list_orders(
        &self,
        session: SessionId,
        filter: StatusFilter,
    ) -> Result<OrdersView, OrdersServiceError>;

    /// Re-read every order from the store.
    async fn refresh_orders(&self, session: SessionId) -> Result<OrdersView, OrdersServiceError>;

    /// One order with its resolved cart items.
    async fn get_order(
        &self,
        session: SessionId,
        order: &OrderId,
    ) -> Result<OrderDetails, OrdersServiceError>;

    /// Open or close an order's detail panel; returns the details when it opens.
    async fn toggle_order(
        &self,
        session: SessionId,
        order: &OrderId,
    ) -> Result<Option<OrderDetails>, OrdersServiceError>;

    /// Change an order's status remotely, then mirror it on the board.
    async fn change_status(
        &self,
        session: SessionId,
        order: &OrderId,
        status: OrderStatus,
    ) -> Result<StatusChange, OrdersServiceError>;

    /// Delete an order remotely once confirmed, then drop it from the board.
    async fn delete_order(
        &self,
        session: SessionId,
        order: &OrderId,
        confirmation: DeleteConfirmation,
    ) -> Result<DeleteOutcome, OrdersServiceError>;

    /// Discard the session's board.
    async fn forget_session(&self, session: SessionId);
}

#[cfg(test)]
mod tests {
    use orderdesk::orders::{CartItem, ImageRef};
    use smallvec::smallvec;
    use testresult::TestResult;

    use crate::{
        store::{DocumentStoreError, MockDocumentStore},
        test::{order, seeded_store},
    };

    use super::*;

    fn ids(view: &OrdersView) -> Vec<&str> {
        view.orders.iter().map(|order| order.id.as_str()).collect()
    }

    #[tokio::test]
    async fn first_list_loads_once() -> TestResult {
        let service = BoardOrdersService::new(Arc::new(seeded_store()));
        let session = SessionId::new();

        let all = service.list_orders(session, StatusFilter::All).await?;
        let dispatch = service
            .list_orders(session, OrderStatus::Dispatch.into())
            .await?;

        assert_eq!(ids(&all), ["A", "B"]);
        assert_eq!(ids(&dispatch), ["B"]);
        assert_eq!(dispatch.total, 2);

        Ok(())
    }

    #[tokio::test]
    async fn failed_load_is_an_empty_list() -> TestResult {
        let mut store = MockDocumentStore::new();

        store
            .expect_fetch_orders()
            .times(1)
            .returning(|| Err(DocumentStoreError::UnexpectedResponse("down".to_string())));

        let service = BoardOrdersService::new(Arc::new(store));
        let session = SessionId::new();

        assert!(
            service
                .list_orders(session, StatusFilter::All)
                .await?
                .orders
                .is_empty()
        );
        assert!(
            service
                .list_orders(session, StatusFilter::All)
                .await?
                .orders
                .is_empty()
        );

        Ok(())
    }

    #[tokio::test]
    async fn sessions_have_separate_boards() -> TestResult {
        let mut store = MockDocumentStore::new();

        store
            .expect_fetch_orders()
            .times(2)
            .returning(|| Ok(vec![order("A", OrderStatus::Pending)]));

        let service = BoardOrdersService::new(Arc::new(store));
        let first = SessionId::new();
        let second = SessionId::new();

        service.toggle_order(first, &OrderId::new("A")).await?;

        let seen_by_second = service.list_orders(second, StatusFilter::All).await?;

        assert_eq!(seen_by_second.expanded, None);

        Ok(())
    }

    #[tokio::test]
    async fn confirmed_status_change_updates_one_order() -> TestResult {
        let mut store = seeded_store();

        store
            .expect_set_order_status()
            .withf(|order, status| order.as_str() == "A" && *status == OrderStatus::Success)
            .times(1)
            .returning(|_, _| Ok(()));

        let service = BoardOrdersService::new(Arc::new(store));
        let session = SessionId::new();

        let change = service
            .change_status(session, &OrderId::new("A"), OrderStatus::Success)
            .await?;

        assert_eq!(
            change.confirmation.map(|c| c.text),
            Some("The order has been completed.")
        );

        let view = service.list_orders(session, StatusFilter::All).await?;

        assert_eq!(
            view.orders,
            [
                order("A", OrderStatus::Success),
                order("B", OrderStatus::Dispatch)
            ]
        );
        assert_eq!(
            ids(&service
                .list_orders(session, OrderStatus::Dispatch.into())
                .await?),
            ["B"]
        );

        Ok(())
    }

    #[tokio::test]
    async fn failed_status_change_leaves_list_identical() -> TestResult {
        let mut store = seeded_store();

        store
            .expect_set_order_status()
            .times(1)
            .returning(|_, _| Err(DocumentStoreError::UnexpectedResponse("500".to_string())));

        let service = BoardOrdersService::new(Arc::new(store));
        let session = SessionId::new();
        let before = service.list_orders(session, StatusFilter::All).await?;

        let result = service
            .change_status(session, &OrderId::new("A"), OrderStatus::Dispatch)
            .await;

        assert!(matches!(result, Err(OrdersServiceError::Store(_))));
        assert_eq!(
            service.list_orders(session, StatusFilter::All).await?,
            before
        );

        Ok(())
    }

    #[tokio::test]
    async fn unknown_order_is_not_sent_to_the_store() {
        let service = BoardOrdersService::new(Arc::new(seeded_store()));

        let result = service
            .change_status(SessionId::new(), &OrderId::new("Z"), OrderStatus::Dispatch)
            .await;

        assert!(matches!(result, Err(OrdersServiceError::NotFound)));
    }

    #[tokio::test]
    async fn declined_delete_makes_no_calls() -> TestResult {
        let service = BoardOrdersService::new(Arc::new(MockDocumentStore::new()));

        let outcome = service
            .delete_order(
                SessionId::new(),
                &OrderId::new("A"),
                DeleteConfirmation::Declined,
            )
            .await?;

        assert_eq!(outcome, DeleteOutcome::Declined);

        Ok(())
    }

    #[tokio::test]
    async fn confirmed_delete_removes_only_target() -> TestResult {
        let mut store = seeded_store();

        store
            .expect_delete_order()
            .withf(|order| order.as_str() == "A")
            .times(1)
            .returning(|_| Ok(()));

        let service = BoardOrdersService::new(Arc::new(store));
        let session = SessionId::new();

        service.toggle_order(session, &OrderId::new("A")).await?;

        let outcome = service
            .delete_order(session, &OrderId::new("A"), DeleteConfirmation::Confirmed)
            .await?;

        let view = service.list_orders(session, StatusFilter::All).await?;

        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert_eq!(ids(&view), ["B"]);
        assert_eq!(view.expanded, None);

        Ok(())
    }

    #[tokio::test]
    async fn failed_delete_keeps_order() -> TestResult {
        let mut store = seeded_store();

        store
            .expect_delete_order()
            .times(1)
            .returning(|_| Err(DocumentStoreError::UnexpectedResponse("500".to_string())));

        let service = BoardOrdersService::new(Arc::new(store));
        let session = SessionId::new();

        let result = service
            .delete_order(session, &OrderId::new("A"), DeleteConfirmation::Confirmed)
            .await;

        assert!(matches!(result, Err(OrdersServiceError::Store(_))));
        assert_eq!(
            ids(&service.list_orders(session, StatusFilter::All).await?),
            ["A", "B"]
        );

        Ok(())
    }

    #[tokio::test]
    async fn toggle_returns_details_only_when_opening() -> TestResult {
        let mut store = MockDocumentStore::new();

        store.expect_fetch_orders().times(1).returning(|| {
            Ok(vec![Order {
                id: "A".into(),
                cart_items: smallvec![CartItem {
                    product_name: "Lamp".to_string(),
                    image: Some(ImageRef::new("image-abc-1x1-png")),
                }],
                ..Order::default()
            }])
        });
        store
            .expect_image_url()
            .returning(|image| Some(format!("https://img.test/{}", image.as_str())));

        let service = BoardOrdersService::new(Arc::new(store));
        let session = SessionId::new();
        let a = OrderId::new("A");

        let opened = service.toggle_order(session, &a).await?;

        assert_eq!(
            opened
                .and_then(|details| details.items.first().cloned())
                .and_then(|item| item.image_url)
                .as_deref(),
            Some("https://img.test/image-abc-1x1-png")
        );
        assert_eq!(service.toggle_order(session, &a).await?, None);

        Ok(())
    }

    #[tokio::test]
    async fn refresh_rereads_the_store() -> TestResult {
        let mut store = MockDocumentStore::new();
        let mut reads = 0;

        store.expect_fetch_orders().times(2).returning(move || {
            reads += 1;

            Ok((0..reads)
                .map(|n| order(&n.to_string(), OrderStatus::Pending))
                .collect())
        });

        let service = BoardOrdersService::new(Arc::new(store));
        let session = SessionId::new();

        assert_eq!(
            service.list_orders(session, StatusFilter::All).await?.total,
            1
        );
        assert_eq!(service.refresh_orders(session).await?.total, 2);

        Ok(())
    }

    #[tokio::test]
    async fn forgotten_session_loads_again() -> TestResult {
        let mut store = MockDocumentStore::new();

        store
            .expect_fetch_orders()
            .times(2)
            .returning(|| Ok(Vec::new()));

        let service = BoardOrdersService::new(Arc::new(store));
        let session = SessionId::new();

        service.list_orders(session, StatusFilter::All).await?;
        service.forget_session(session).await;

        assert!(service.boards.read().await.is_empty());

        service.list_orders(session, StatusFilter::All).await?;

        Ok(())
    }
}
