// Category filtering for catalog rows and products
use crate::flatten::FlattenedFeatureRow;
use crate::product::ProductRecord;

pub trait Filter<T> {
    fn matches(&self, item: &T) -> bool;
}

/// Case-insensitive substring filter on `main_category`.
///
/// An empty category or "all" keeps everything. The category is used as
/// given, surrounding whitespace included. A row without a category never
/// matches a non-empty needle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Contains(String),
}

impl CategoryFilter {
    pub fn new(category: &str) -> Self {
        if category.is_empty() || category.eq_ignore_ascii_case("all") {
            CategoryFilter::All
        } else {
            CategoryFilter::Contains(category.to_lowercase())
        }
    }

    /// Same as `new`, treating a missing category as "all"
    pub fn from_option(category: Option<&str>) -> Self {
        category.map(Self::new).unwrap_or(CategoryFilter::All)
    }

    pub fn matches_category(&self, main_category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Contains(needle) => {
                !main_category.is_empty() && main_category.to_lowercase().contains(needle.as_str())
            }
        }
    }

    /// Keep the items this filter matches, preserving order
    pub fn apply<'a, T>(&self, items: &'a [T]) -> Vec<&'a T>
    where
        Self: Filter<T>,
    {
        items
            .iter()
            .filter(|item| <Self as Filter<T>>::matches(self, item))
            .collect()
    }
}

impl Filter<FlattenedFeatureRow> for CategoryFilter {
    fn matches(&self, row: &FlattenedFeatureRow) -> bool {
        self.matches_category(&row.main_category)
    }
}

impl Filter<ProductRecord> for CategoryFilter {
    fn matches(&self, product: &ProductRecord) -> bool {
        self.matches_category(&product.main_category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_substring() {
        let filter = CategoryFilter::new("crm");
        assert!(filter.matches_category("CRM Software"));
        assert!(filter.matches_category("Sales, CRM Software"));
        assert!(!filter.matches_category("Marketing Automation"));
        assert!(!filter.matches_category(""));
    }

    #[test]
    fn test_all_keeps_everything() {
        assert_eq!(CategoryFilter::new("ALL"), CategoryFilter::All);
        assert_eq!(CategoryFilter::new(""), CategoryFilter::All);
        assert_eq!(CategoryFilter::from_option(None), CategoryFilter::All);
        assert!(CategoryFilter::All.matches_category(""));
    }

    #[test]
    fn test_whitespace_is_part_of_the_needle() {
        assert!(!CategoryFilter::new(" CRM").matches_category("CRM Software"));
        assert!(!CategoryFilter::new("CRM ").matches_category("Sales CRM"));
        assert!(CategoryFilter::new("CRM ").matches_category("CRM Software"));
        assert_ne!(CategoryFilter::new(" all "), CategoryFilter::All);
        assert!(!CategoryFilter::new(" all ").matches_category("Small Business"));
        assert_ne!(CategoryFilter::new("  "), CategoryFilter::All);
    }

    #[test]
    fn test_apply_preserves_order() {
        let rows: Vec<FlattenedFeatureRow> = ["CRM Software", "ERP", "crm suite"]
            .iter()
            .map(|c| FlattenedFeatureRow {
                main_category: c.to_string(),
                ..Default::default()
            })
            .collect();

        let kept = CategoryFilter::new("CRM").apply(&rows);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].main_category, "CRM Software");
        assert_eq!(kept[1].main_category, "crm suite");
    }
}
