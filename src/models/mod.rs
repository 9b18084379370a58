//! Value types shared by the controller and its collaborators.

mod item;
mod list;
mod page;
mod setup;

pub use item::{Item, ItemImages, ItemMode};
pub use list::ListEntity;
pub use page::{is_last_page, Page, PageRequest};
pub use setup::{DetailsOption, Setup};
