use crate::model::{MealPeriod, MenuItem};

fn heading(meal: MealPeriod) -> &'static str {
    match meal {
        MealPeriod::Breakfast => "### Breakfast\n\n",
        MealPeriod::Lunch => "### Lunch\n\n",
        MealPeriod::Dinner => "### Dinner\n\n",
    }
}

pub fn format_item(item: &MenuItem) -> String {
    format!("## {} ({:.2})\n{}\n\n", item.name, item.price, item.description)
}

/// Render items as lunch and dinner sections, keeping source order within
/// each. Both sections are always present. A breakfast section is rendered
/// ahead of them only when breakfast items exist.
pub fn format_menu(items: &[MenuItem]) -> String {
    let mut periods = Vec::with_capacity(3);
    if items.iter().any(|item| item.meal == MealPeriod::Breakfast) {
        periods.push(MealPeriod::Breakfast);
    }
    periods.extend([MealPeriod::Lunch, MealPeriod::Dinner]);

    let mut contents = String::new();
    for meal in periods {
        contents.push_str(heading(meal));
        for item in items.iter().filter(|item| item.meal == meal) {
            contents.push_str(&format_item(item));
        }
    }
    contents
}
