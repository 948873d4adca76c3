//! Integration tests for the keyword-filtered hierarchy queries.

mod common;

use aegis_core::org::OrgType;
use aegis_service::HierarchyService;
use common::{category, org, MemoryStore};

/// District -> two schools, one with a campus; plus an unrelated company.
fn seeded_orgs() -> MemoryStore {
    MemoryStore::with_organizations(vec![
        org(1, None, 1, "North District", OrgType::Group, 1),
        org(2, Some(1), 2, "Riverside Primary", OrgType::School, 2),
        org(3, Some(1), 2, "Hillcrest Secondary", OrgType::School, 3),
        org(4, Some(3), 3, "Hillcrest East Campus", OrgType::School, 4),
        org(5, None, 1, "Shield Security Co.", OrgType::Company, 5),
    ])
}

#[tokio::test]
async fn full_tree_nests_all_organizations() {
    let service = HierarchyService::new(seeded_orgs());
    let forest = service.organization_tree(None).await.unwrap();

    assert_eq!(forest.count, 5);
    assert_eq!(forest.list.len(), 2);
    assert_eq!(forest.list[0].record.name, "North District");
    assert_eq!(forest.list[0].children.len(), 2);
    assert_eq!(
        forest.list[0].children[1].children[0].record.name,
        "Hillcrest East Campus"
    );
    assert!(forest.list[1].children.is_empty());
}

#[tokio::test]
async fn keyword_query_returns_match_closure_only() {
    let service = HierarchyService::new(seeded_orgs());
    let forest = service.organization_tree(Some("Hillcrest")).await.unwrap();

    // Both Hillcrest records match; the district survives as their
    // ancestor, Riverside and the company are excluded entirely.
    assert_eq!(forest.count, 3);
    assert_eq!(forest.list.len(), 1);
    assert_eq!(forest.list[0].record.name, "North District");
    assert_eq!(forest.list[0].children.len(), 1);
    assert_eq!(
        forest.list[0].children[0].record.name,
        "Hillcrest Secondary"
    );
}

#[tokio::test]
async fn keyword_without_match_yields_empty_forest() {
    let service = HierarchyService::new(seeded_orgs());
    let forest = service.organization_tree(Some("Lakeside")).await.unwrap();
    assert_eq!(forest.count, 0);
    assert!(forest.list.is_empty());
}

#[tokio::test]
async fn category_tree_filters_by_title() {
    let store = MemoryStore::with_categories(vec![
        category(1, None, 1, "Campus safety", 1),
        category(2, Some(1), 2, "Fire drills", 2),
        category(3, Some(1), 2, "Gate management", 3),
        category(4, None, 1, "Personnel files", 4),
    ]);
    let service = HierarchyService::new(store);

    let forest = service.category_tree(Some("Fire")).await.unwrap();
    assert_eq!(forest.count, 2);
    assert_eq!(forest.list[0].record.title, "Campus safety");
    assert_eq!(forest.list[0].children[0].record.title, "Fire drills");
}
