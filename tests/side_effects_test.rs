//! One-shot side effects: dialog mutations, reports, the filter dialog gate
//! and navigation.

mod common;

use common::*;
use curator::models::{DetailsOption, Item, ItemMode};
use curator::traits::FilterRequest;
use curator::view_state::InfoMessage;
use curator::{CuratorError, DetailsIntent, ViewState};
use std::time::Duration;

fn sample_item() -> Item {
    Item::new("item-1", LIST_ID, ItemMode::List).with_title("Dune")
}

// =============================================================================
// Dialog mutations
// =============================================================================

#[tokio::test]
async fn test_change_item_type_shows_loading_dialog() {
    let mut screen = TestScreenBuilder::new().with_list_items(3).build();
    screen.init().await;

    screen.editor.gate().close();
    screen.send(DetailsIntent::ChangeItemType(sample_item()));

    assert_eq!(screen.next().await, ViewState::LoadingDialog);
    eventually("editor called", || !screen.editor.calls().is_empty()).await;
    assert_eq!(screen.editor.calls(), vec![EditorCall::ChangeType("item-1".to_string())]);

    screen.editor.gate().open();
    screen.assert_quiet(Duration::from_millis(30)).await;
}

#[tokio::test]
async fn test_each_dialog_mutation_gets_its_own_dialog() {
    let mut screen = TestScreenBuilder::new().with_list_items(3).build();
    screen.init().await;

    screen.editor.gate().close();
    screen.send(DetailsIntent::ChangeItemType(sample_item()));
    screen.send(DetailsIntent::DeleteItem(sample_item()));

    assert_eq!(screen.next().await, ViewState::LoadingDialog);
    assert_eq!(screen.next().await, ViewState::LoadingDialog);
    eventually("both calls issued", || screen.editor.calls().len() == 2).await;
    screen.editor.gate().open();
}

#[tokio::test]
async fn test_delete_failure_surfaces_error_then_recovers() {
    let mut screen = TestScreenBuilder::new().with_list_items(3).build();
    screen.init().await;

    screen.editor.set_should_fail(true);
    screen.send(DetailsIntent::DeleteItem(sample_item()));

    let states = screen.collect_until(ViewState::is_error).await;
    assert_eq!(states[0], ViewState::LoadingDialog);
    match states.last().unwrap() {
        ViewState::Error { cause } => {
            assert!(matches!(cause.inner(), CuratorError::Action { action: "delete_item", .. }))
        }
        other => panic!("expected Error, got {:?}", other),
    }

    let recovery = screen.collect_until(is_detailed).await;
    assert!(matches!(recovery[0], ViewState::Default { .. }));
}

// =============================================================================
// Report
// =============================================================================

#[tokio::test]
async fn test_report_emits_info() {
    let mut screen = TestScreenBuilder::new().with_list_items(3).build();
    screen.init().await;

    screen.send(DetailsIntent::ReportList {
        complaint: "spam".to_string(),
    });

    assert_eq!(screen.next().await, ViewState::Info(InfoMessage::Reported));
    assert_eq!(
        screen.lists.reports(),
        vec![(LIST_ID.to_string(), "spam".to_string())]
    );
}

#[tokio::test]
async fn test_report_failure_surfaces_error() {
    let mut screen = TestScreenBuilder::new().with_list_items(3).build();
    screen.init().await;

    screen.lists.set_report_should_fail(true);
    screen.send(DetailsIntent::ReportList {
        complaint: "offensive".to_string(),
    });

    let states = screen.collect_until(ViewState::is_error).await;
    assert!(!states.iter().any(|s| matches!(s, ViewState::Info(_))));
    match states.last().unwrap() {
        ViewState::Error { cause } => {
            assert!(matches!(cause.inner(), CuratorError::Action { action: "report_list", .. }));
            assert_eq!(cause.error_code(), "E_ACTION");
        }
        other => panic!("expected Error, got {:?}", other),
    }
    assert!(screen.lists.reports().is_empty());
}

// =============================================================================
// Filter dialog
// =============================================================================

#[tokio::test]
async fn test_open_filter_is_gated_until_disabled() {
    let mut screen = TestScreenBuilder::new().with_list_items(3).build();
    screen.init().await;
    screen.send(DetailsIntent::ChangeDetailsOption(DetailsOption::Queue));
    screen.collect_until(is_detailed).await;

    screen.send(DetailsIntent::OpenFilter);
    screen.send(DetailsIntent::OpenFilter);

    let expected = NavigationEvent::OpenFilter(FilterRequest {
        tags: vec!["classics".to_string(), "sci-fi".to_string()],
        setup: screen.controller.setup(),
    });
    assert_eq!(screen.navigator.events(), vec![expected.clone()]);

    screen.bus.publish_disable_filter_button();
    eventually("filter button re-armed", || {
        screen.send(DetailsIntent::OpenFilter);
        screen.navigator.events().len() == 2
    })
    .await;
    tokio::time::sleep(Duration::from_millis(10)).await;
    screen.send(DetailsIntent::OpenFilter);
    assert_eq!(screen.navigator.events(), vec![expected.clone(), expected]);
}

// =============================================================================
// Navigation
// =============================================================================

#[tokio::test]
async fn test_navigation_intents_reach_navigator() {
    let mut screen = TestScreenBuilder::new().build();

    screen.send(DetailsIntent::EditList);
    screen.send(DetailsIntent::ShareList);
    screen.send(DetailsIntent::StartComment(sample_item()));
    screen.send(DetailsIntent::EditItem(sample_item()));
    screen.send(DetailsIntent::Close);

    assert_eq!(
        screen.navigator.events(),
        vec![
            NavigationEvent::EditList {
                list_id: LIST_ID.to_string(),
                mode: ItemMode::List,
            },
            NavigationEvent::Share("Reading list".to_string()),
            NavigationEvent::OpenComments("item-1".to_string()),
            NavigationEvent::EditItem("item-1".to_string()),
            NavigationEvent::GoBack,
        ]
    );
    // Navigation never produces snapshots.
    screen.assert_quiet(Duration::from_millis(20)).await;
}

#[tokio::test]
async fn test_share_signal_shares_item_text() {
    let mut screen = TestScreenBuilder::new().with_list_items(3).build();
    screen.init().await;

    let mut item = sample_item();
    item.url = Some("https://example.com/dune".to_string());
    assert_eq!(screen.bus.publish_share(item), 1);

    eventually("share forwarded", || {
        screen.navigator.events()
            == vec![NavigationEvent::Share("Dune\nhttps://example.com/dune".to_string())]
    })
    .await;
    screen.assert_quiet(Duration::from_millis(20)).await;
}
