use mealplanner_shared::{Entity, EntityId, GroceryList};

/// How the grocery-list switcher picks its initial list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DefaultListPolicy {
    /// First list with items, else the first list.
    #[default]
    FirstPopulated,
    /// First populated list whose name matches, in priority order.
    Preferred(Vec<String>),
    /// The list flagged as default by the backend.
    Flagged,
    None,
}

/// `lists` is expected in pipeline order.
pub fn pick_default<'a>(
    lists: &[&'a GroceryList],
    policy: &DefaultListPolicy,
) -> Option<&'a EntityId> {
    let populated = || lists.iter().copied().find(|list| list.is_populated());

    let picked = match policy {
        DefaultListPolicy::None => return None,
        DefaultListPolicy::FirstPopulated => None,
        DefaultListPolicy::Preferred(names) => names.iter().find_map(|name| {
            let name = fold(name);
            lists
                .iter()
                .copied()
                .find(|list| list.is_populated() && fold(list.name()) == name)
        }),
        DefaultListPolicy::Flagged => lists.iter().copied().find(|list| list.is_default),
    };

    picked
        .or_else(populated)
        .or_else(|| lists.first().copied())
        .map(|list| list.id())
}

/// Same case folding as the search filter.
fn fold(name: &str) -> String {
    name.trim().to_lowercase()
}
