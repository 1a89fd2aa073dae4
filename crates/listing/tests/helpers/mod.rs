use mealplanner_shared::{GroceryList, Recipe};

#[allow(dead_code)]
pub fn recipes(count: usize) -> Vec<Recipe> {
    (1..=count)
        .map(|n| Recipe {
            id: format!("recipe-{n:02}").into(),
            name: format!("Recipe {n:02}"),
            ingredient_count: Some(n as f64),
            ..Default::default()
        })
        .collect()
}

#[allow(dead_code)]
pub fn named_recipe(id: &str, name: &str, ingredients: f64) -> Recipe {
    Recipe {
        id: id.into(),
        name: name.to_owned(),
        ingredient_count: Some(ingredients),
        ..Default::default()
    }
}

#[allow(dead_code)]
pub fn grocery_list(id: &str, name: &str, items: Option<f64>) -> GroceryList {
    GroceryList {
        id: id.into(),
        name: name.to_owned(),
        item_count: items,
        is_default: false,
    }
}
