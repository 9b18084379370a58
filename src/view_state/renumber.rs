use crate::models::Item;

/// Copy `items` and assign positions 1..=n in their current order.
///
/// The input is left untouched, so cached items never carry a position.
pub fn renumber(items: &[Item]) -> Vec<Item> {
    items
        .iter()
        .zip(1u64..)
        .map(|(item, position)| Item {
            position: Some(position),
            ..item.clone()
        })
        .collect()
}
