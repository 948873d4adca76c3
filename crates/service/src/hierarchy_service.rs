//! Keyword-filtered tree queries over the flat organization and category
//! lists.

use aegis_core::assessment::AssessmentCategory;
use aegis_core::hierarchy::{self, Forest, HierarchyNode};
use aegis_core::org::Organization;

use crate::error::ServiceResult;
use crate::store::OrganizationStore;

/// Serves reconstructed trees for the tree-backed record kinds.
pub struct HierarchyService<S> {
    store: S,
}

impl<S: OrganizationStore> HierarchyService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The organization forest, optionally restricted to the keyword
    /// closure.
    pub async fn organization_tree(
        &self,
        keyword: Option<&str>,
    ) -> ServiceResult<Forest<Organization>> {
        let flat = self.store.list_organizations().await?;
        let forest = filtered(&flat, keyword);
        tracing::debug!(keyword = ?keyword, count = forest.count, "Organization tree rebuilt");
        Ok(forest)
    }

    /// The assessment-category forest, optionally restricted to the
    /// keyword closure.
    pub async fn category_tree(
        &self,
        keyword: Option<&str>,
    ) -> ServiceResult<Forest<AssessmentCategory>> {
        let flat = self.store.list_categories().await?;
        let forest = filtered(&flat, keyword);
        tracing::debug!(keyword = ?keyword, count = forest.count, "Category tree rebuilt");
        Ok(forest)
    }
}

fn filtered<T: HierarchyNode + Clone>(flat: &[T], keyword: Option<&str>) -> Forest<T> {
    match keyword {
        Some(keyword) => hierarchy::build_filtered_forest(flat, keyword),
        None => hierarchy::build_forest(flat),
    }
}
