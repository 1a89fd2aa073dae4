use std::cmp::Ordering;

use icu_collator::options::CollatorOptions;
use icu_collator::{Collator, CollatorBorrowed};
use mealplanner_shared::{Entity, FilterState, SortBy, sanitize};

/// Filtered and ordered view of `items`. Pure: the source is never touched.
pub fn filter<'a, E: Entity>(items: &'a [E], state: &FilterState) -> Vec<&'a E> {
    filter_indices(items, state)
        .into_iter()
        .map(|idx| &items[idx])
        .collect()
}

/// Same as [`filter`] but yields positions into `items`.
pub fn filter_indices<E: Entity>(items: &[E], state: &FilterState) -> Vec<usize> {
    let search = state.normalized_search();

    let mut order = items
        .iter()
        .enumerate()
        .filter(|(_, item)| matches(*item, state, search.as_deref()))
        .map(|(idx, _)| idx)
        .collect::<Vec<_>>();

    let names = NameOrder::new();
    order.sort_by(|a, b| compare(&items[*a], &items[*b], state.sort_by, &names));

    order
}

fn matches<E: Entity>(item: &E, state: &FilterState, search: Option<&str>) -> bool {
    if let Some(term) = search
        && !item.name().to_lowercase().contains(term)
    {
        return false;
    }

    if let Some(meal_type) = state.meal_type
        && !item.meal_types().contains(&meal_type)
    {
        return false;
    }

    if let Some(tag) = state.dietary_tag
        && !item.dietary_tags().contains(&tag)
    {
        return false;
    }

    state
        .ranges
        .iter()
        .all(|(field, range)| range.contains(sanitize(item.numeric(*field))))
}

fn compare<E: Entity>(a: &E, b: &E, sort_by: SortBy, names: &NameOrder) -> Ordering {
    let by_metric = || b.metric().total_cmp(&a.metric());
    let by_name = || names.compare(a.name(), b.name());

    match sort_by {
        SortBy::ItemCount => by_metric().then_with(by_name),
        SortBy::Name => by_name().then_with(by_metric),
    }
    .then_with(|| a.id().cmp(b.id()))
}

/// Locale-aware name order (root collation), raw string as final tie-break.
pub struct NameOrder(Option<CollatorBorrowed<'static>>);

impl NameOrder {
    pub fn new() -> Self {
        match Collator::try_new(Default::default(), CollatorOptions::default()) {
            Ok(collator) => Self(Some(collator)),
            Err(error) => {
                tracing::warn!(%error, "collation data unavailable, ordering names case-folded");
                Self(None)
            }
        }
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.0 {
            Some(collator) => collator.compare(a, b),
            None => a.to_lowercase().cmp(&b.to_lowercase()),
        }
        .then_with(|| a.cmp(b))
    }
}

impl Default for NameOrder {
    fn default() -> Self {
        Self::new()
    }
}
