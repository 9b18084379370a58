use crate::models::{DetailsOption, Item};

/// Everything the details screen can ask its controller to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailsIntent {
    /// The screen is ready to render
    Init,
    /// Switch tab, keeping search, sort and filters
    ChangeDetailsOption(DetailsOption),
    /// Scrolled to the end; fetch the next page
    LoadMore,
    /// Reload the list entity
    ForceRefresh,
    /// Move an item between the list and the queue
    ChangeItemType(Item),
    DeleteItem(Item),
    ToggleUpvote(Item),
    ToggleReaction { item: Item, alias: String },
    /// Open the filter dialog unless it is already open
    OpenFilter,
    ReportList { complaint: String },
    EditList,
    Close,
    ShareList,
    StartComment(Item),
    EditItem(Item),
}

impl DetailsIntent {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            DetailsIntent::Init => "init",
            DetailsIntent::ChangeDetailsOption(_) => "change_details_option",
            DetailsIntent::LoadMore => "load_more",
            DetailsIntent::ForceRefresh => "force_refresh",
            DetailsIntent::ChangeItemType(_) => "change_item_type",
            DetailsIntent::DeleteItem(_) => "delete_item",
            DetailsIntent::ToggleUpvote(_) => "toggle_upvote",
            DetailsIntent::ToggleReaction { .. } => "toggle_reaction",
            DetailsIntent::OpenFilter => "open_filter",
            DetailsIntent::ReportList { .. } => "report_list",
            DetailsIntent::EditList => "edit_list",
            DetailsIntent::Close => "close",
            DetailsIntent::ShareList => "share_list",
            DetailsIntent::StartComment(_) => "start_comment",
            DetailsIntent::EditItem(_) => "edit_item",
        }
    }
}
