//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use orderdesk::orders::{Order, OrderStatus};
use orderdesk_app::{
    auth::{MockAuthService, OperatorClaims, SessionId},
    context::AppContext,
    orders::MockOrdersService,
};
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, state::State};

pub(crate) const TEST_SESSION: SessionId = SessionId::from_uuid(Uuid::nil());

pub(crate) fn make_claims() -> OperatorClaims {
    OperatorClaims {
        session: TEST_SESSION,
        operator: "admin@example.com".to_string(),
        issued_at: Timestamp::UNIX_EPOCH,
        expires_at: Timestamp::MAX,
    }
}

pub(crate) fn make_order(id: &str, status: OrderStatus) -> Order {
    Order {
        id: id.into(),
        status: Some(status),
        ..Order::default()
    }
}

#[salvo::handler]
pub(crate) async fn inject_claims(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_claims(make_claims());
    ctrl.call_next(req, depot, res).await;
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_login().never();
    auth.expect_authenticate_bearer().never();
    auth.expect_logout().never();

    auth
}

fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_list_orders().never();
    orders.expect_refresh_orders().never();
    orders.expect_get_order().never();
    orders.expect_toggle_order().never();
    orders.expect_change_status().never();
    orders.expect_delete_order().never();
    orders.expect_forget_session().never();

    orders
}

pub(crate) fn state_with(auth: MockAuthService, orders: MockOrdersService) -> Arc<State> {
    State::from_app_context(AppContext {
        auth: Arc::new(auth),
        orders: Arc::new(orders),
    })
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    state_with(auth, strict_orders_mock())
}

/// Route served without a session.
pub(crate) fn public_service(auth: MockAuthService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_auth(auth)))
            .push(route),
    )
}

/// Route served as the operator behind [`TEST_SESSION`].
pub(crate) fn session_service(
    auth: MockAuthService,
    orders: MockOrdersService,
    route: Router,
) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with(auth, orders)))
            .hoop(inject_claims)
            .push(route),
    )
}

pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    session_service(strict_auth_mock(), orders, route)
}
