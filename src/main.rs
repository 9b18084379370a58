use curator::adapters::{
    InMemoryItemStore, MockItemEditor, MockListProvider, MockRemoteSource, RecordingNavigator,
};
use curator::models::{DetailsOption, Item, ItemMode, ListEntity};
use curator::{
    Collaborators, ControllerConfig, DetailsController, DetailsIntent, SignalBus, ViewState,
    ViewStateReceiver,
};

use color_eyre::eyre::eyre;
use color_eyre::Result;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const LIST_ID: &str = "demo-list";
const SNAPSHOT_TIMEOUT: Duration = Duration::from_secs(2);

/// Logs go to stderr so stdout carries only snapshot lines.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("curator=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn demo_items(mode: ItemMode, count: usize) -> Vec<Item> {
    (1..=count)
        .map(|n| {
            Item::new(format!("{}-{}", mode.as_str(), n), LIST_ID, mode)
                .with_title(format!("{} item {}", mode.as_str(), n))
        })
        .collect()
}

/// One JSON line per snapshot.
fn print_snapshot(state: &ViewState) -> Result<()> {
    let line = match state {
        ViewState::Default { list, setup } => json!({
            "state": state.kind(),
            "list": list.title,
            "option": setup.option,
        }),
        ViewState::Loading { setup } => json!({
            "state": state.kind(),
            "option": setup.option,
        }),
        ViewState::Detailed {
            setup,
            items,
            is_completed,
            ..
        } => json!({
            "state": state.kind(),
            "option": setup.option,
            "items": items
                .iter()
                .map(|item| json!({ "position": item.position, "id": item.id, "reactions": item.reactions }))
                .collect::<Vec<_>>(),
            "is_completed": is_completed,
        }),
        ViewState::Error { cause } => json!({
            "state": state.kind(),
            "code": cause.error_code(),
            "category": cause.category().as_str(),
            "message": cause.user_message(),
            "hint": cause.recovery_hint(),
        }),
        ViewState::LoadingDialog | ViewState::Info(_) => json!({ "state": state.kind() }),
    };
    println!("{}", serde_json::to_string(&line)?);
    Ok(())
}

/// Print snapshots until one matches `done`.
async fn print_until<F>(receiver: &mut ViewStateReceiver, done: F) -> Result<()>
where
    F: Fn(&ViewState) -> bool,
{
    loop {
        let state = tokio::time::timeout(SNAPSHOT_TIMEOUT, receiver.recv())
            .await
            .map_err(|_| eyre!("timed out waiting for a snapshot"))?
            .ok_or_else(|| eyre!("controller stopped"))?;
        print_snapshot(&state)?;
        if done(&state) {
            return Ok(());
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_logging();

    let config = ControllerConfig::from_env()?;
    let page_size = config.page_size;

    let remote = Arc::new(MockRemoteSource::new());
    remote.set_items(ItemMode::List, demo_items(ItemMode::List, page_size + 3));
    remote.set_items(ItemMode::Queue, demo_items(ItemMode::Queue, 2));

    let list = ListEntity::new(LIST_ID, ItemMode::List)
        .with_title("Demo list")
        .with_tags(vec!["books".to_string(), "music".to_string()]);

    let collaborators = Collaborators {
        remote,
        store: Arc::new(InMemoryItemStore::new()),
        lists: Arc::new(MockListProvider::new(list.clone())),
        editor: Arc::new(MockItemEditor::new()),
        navigator: Arc::new(RecordingNavigator::new()),
    };
    let bus = SignalBus::new();
    let (controller, mut receiver) = DetailsController::bind(list, collaborators, &bus, config)?;

    controller.send(DetailsIntent::Init);
    print_until(&mut receiver, |s| matches!(s, ViewState::Detailed { .. })).await?;

    controller.send(DetailsIntent::LoadMore);
    print_until(&mut receiver, |s| s.is_completed() == Some(true)).await?;

    let first = Item::new(format!("{}-1", ItemMode::List.as_str()), LIST_ID, ItemMode::List);
    controller.send(DetailsIntent::ToggleReaction {
        item: first,
        alias: "heart".to_string(),
    });
    print_until(&mut receiver, |s| {
        s.items()
            .and_then(|items| items.first())
            .is_some_and(|item| item.reaction_count("heart") == 1)
    })
    .await?;

    controller.send(DetailsIntent::ChangeDetailsOption(DetailsOption::Queue));
    print_until(&mut receiver, |s| {
        matches!(s, ViewState::Detailed { setup, .. } if setup.option == DetailsOption::Queue)
    })
    .await?;

    controller.send(DetailsIntent::ReportList {
        complaint: "spam".to_string(),
    });
    print_until(&mut receiver, |s| matches!(s, ViewState::Info(_))).await?;

    controller.shutdown();
    Ok(())
}
