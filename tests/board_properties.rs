//! Integration tests for the order board

use testresult::TestResult;

use orderdesk::prelude::*;

fn order(id: &str, status: Option<OrderStatus>) -> Order {
    Order {
        id: id.into(),
        status,
        ..Order::default()
    }
}

fn ids<'a>(orders: impl Iterator<Item = &'a Order>) -> Vec<String> {
    orders.map(|order| order.id.to_string()).collect()
}

#[test]
fn status_change_is_visible_through_filters() -> TestResult {
    let mut board = OrderBoard::new();

    board.load(vec![
        order("A", Some(OrderStatus::Pending)),
        order("B", Some(OrderStatus::Dispatch)),
    ]);

    let dispatch = StatusFilter::Only(OrderStatus::Dispatch);

    assert_eq!(ids(board.visible(dispatch)), ["B"]);

    let change = board.begin_change(&OrderId::new("A"))?;

    assert!(board.commit_status(change, OrderStatus::Success));

    assert_eq!(
        board.orders(),
        [
            order("A", Some(OrderStatus::Success)),
            order("B", Some(OrderStatus::Dispatch)),
        ]
    );
    assert_eq!(ids(board.visible(dispatch)), ["B"]);
    assert_eq!(
        ids(board.visible(StatusFilter::Only(OrderStatus::Success))),
        ["A"]
    );

    Ok(())
}

#[test]
fn every_filter_is_an_ordered_subset() {
    let mut board = OrderBoard::new();

    board.load(vec![
        order("1", Some(OrderStatus::Success)),
        order("2", None),
        order("3", Some(OrderStatus::Pending)),
        order("4", Some(OrderStatus::Success)),
        order("5", Some(OrderStatus::Dispatch)),
    ]);

    for filter in StatusFilter::CHOICES {
        let expected: Vec<String> = board
            .orders()
            .iter()
            .filter(|order| match filter {
                StatusFilter::All => true,
                StatusFilter::Only(status) => order.status == Some(status),
            })
            .map(|order| order.id.to_string())
            .collect();

        assert_eq!(ids(board.visible(filter)), expected, "filter {filter}");
    }
}

#[test]
fn repeated_toggles_alternate_and_keep_one_panel() -> TestResult {
    let mut board = OrderBoard::new();
    let a = OrderId::new("A");
    let b = OrderId::new("B");

    board.load(vec![
        order("A", Some(OrderStatus::Pending)),
        order("B", Some(OrderStatus::Dispatch)),
    ]);

    for round in 0..4 {
        let expected = if round % 2 == 0 {
            Expansion::Expanded
        } else {
            Expansion::Collapsed
        };

        assert_eq!(board.toggle(&a)?, expected, "round {round}");
    }

    board.toggle(&a)?;
    board.toggle(&b)?;

    assert_eq!(board.expanded_id(), Some(&b));
    assert_eq!(board.expanded().map(|order| order.id.clone()), Some(b));

    Ok(())
}

#[test]
fn deletion_removes_only_the_target() -> TestResult {
    let mut board = OrderBoard::new();

    board.load(vec![
        order("A", Some(OrderStatus::Pending)),
        order("B", Some(OrderStatus::Dispatch)),
        order("C", None),
    ]);

    let change = board.begin_change(&OrderId::new("B"))?;
    let removed = board.commit_delete(change);

    assert_eq!(removed, Some(order("B", Some(OrderStatus::Dispatch))));
    assert_eq!(ids(board.visible(StatusFilter::All)), ["A", "C"]);

    Ok(())
}

#[test]
fn rejected_change_leaves_board_identical() -> TestResult {
    let mut board = OrderBoard::new();

    board.load(vec![
        order("A", Some(OrderStatus::Pending)),
        order("B", Some(OrderStatus::Dispatch)),
    ]);

    let before = board.orders().to_vec();
    let change = board.begin_change(&OrderId::new("A"))?;

    board.abandon(change);

    assert_eq!(board.orders(), before.as_slice());
    assert!(!board.is_in_flight(&OrderId::new("A")));

    Ok(())
}
