//! Grouping of the flat category table into the two-level taxonomy
//! served to clients.

use std::collections::HashMap;

use serde::Serialize;
use uuid::Uuid;

use crate::models::ComplaintCategory;

/// One `main_category` bucket with its sub-categories.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryGroup {
    pub main_category: String,
    pub sub_categories: Vec<SubCategory>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubCategory {
    pub id: Uuid,
    pub name: String,
}

/// Group flat category rows by `main_category`.
///
/// Stable grouping, not a sorted one: groups appear in the order their
/// main category is first seen, and members keep their input order.
pub fn group_categories(categories: &[ComplaintCategory]) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for category in categories {
        let slot = match index.get(category.main_category.as_str()) {
            Some(&slot) => slot,
            None => {
                groups.push(CategoryGroup {
                    main_category: category.main_category.clone(),
                    sub_categories: Vec::new(),
                });
                index.insert(category.main_category.as_str(), groups.len() - 1);
                groups.len() - 1
            }
        };
        groups[slot].sub_categories.push(SubCategory {
            id: category.id,
            name: category.sub_category.clone(),
        });
    }

    groups
}
