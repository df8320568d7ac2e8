/// Category filtering for the card grid
///
/// Filtering is a pure function of the catalog and the selected filter.
/// It never mutates the catalog and never triggers a reload.
use super::catalog::Catalog;

/// Tag of the catch-all filter button
pub const ALL_TAG: &str = "all";

/// The active category filter. Exactly one is active at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

/// Build a filter from a button tag; "all" selects everything
impl From<&str> for CategoryFilter {
    fn from(tag: &str) -> Self {
        if tag == ALL_TAG {
            CategoryFilter::All
        } else {
            CategoryFilter::Category(tag.to_string())
        }
    }
}

impl CategoryFilter {
    pub fn tag(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_TAG,
            CategoryFilter::Category(category) => category.as_str(),
        }
    }

    /// Exact, case-sensitive category match
    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(selected) => selected == category,
        }
    }
}

/// Keys of the items visible under `filter`, in catalog order
pub fn visible_keys<'a>(catalog: &'a Catalog, filter: &CategoryFilter) -> Vec<&'a str> {
    catalog
        .iter()
        .filter(|(_, item)| filter.matches(&item.category))
        .map(|(key, _)| key)
        .collect()
}

/// One filter button per known category, preceded by "all"
pub fn filter_options(catalog: &Catalog) -> Vec<CategoryFilter> {
    std::iter::once(CategoryFilter::All)
        .chain(
            catalog
                .categories()
                .into_iter()
                .map(|category| CategoryFilter::Category(category.to_string())),
        )
        .collect()
}
