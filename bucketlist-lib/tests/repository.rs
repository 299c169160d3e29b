//! Repository behaviour against the in-memory store.

use std::collections::HashSet;

use bucketlist_lib::auth::StaticAuth;
use bucketlist_lib::error::Error;
use bucketlist_lib::model::{Budget, Fields, ItemDraft, ItemId, ItemPatch, List, ListId, Timestamp, UserId};
use bucketlist_lib::path::Layout;
use bucketlist_lib::store::InMemoryStore;
use bucketlist_lib::{DocumentRepository, ItemRepository};

const USER: &str = "user-1";

fn seeded() -> (DocumentRepository<InMemoryStore, StaticAuth>, ListId) {
    let store = InMemoryStore::new();
    let list = List {
        id: ListId::new("travel"),
        name: "Travel".into(),
    };
    let path = Layout::default()
        .list(&UserId::new(USER), &list.id)
        .unwrap();
    store.insert(&path, list.to_fields());
    (
        DocumentRepository::new(store, StaticAuth::signed_in(USER)),
        list.id,
    )
}

#[tokio::test]
async fn fetch_list_reads_name() {
    let (repo, list) = seeded();
    let fetched = repo.fetch_list(&list).await.unwrap();
    assert_eq!(fetched.id, list);
    assert_eq!(fetched.name, "Travel");
}

#[tokio::test]
async fn fetch_missing_list_is_not_found() {
    let (repo, _) = seeded();
    let err = repo.fetch_list(&ListId::new("nope")).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn fetch_items_of_empty_list_is_empty() {
    let (repo, list) = seeded();
    assert!(repo.fetch_items(&list).await.unwrap().is_empty());
}

#[tokio::test]
async fn create_item_assigns_id_and_date() {
    let (repo, list) = seeded();
    let before = Timestamp::now();
    let id = repo
        .create_item(
            &list,
            ItemDraft::named("Tickets").budget(Budget::from_int(200)),
        )
        .await
        .unwrap();
    let after = Timestamp::now();

    assert!(!id.as_str().is_empty());

    let items = repo.fetch_items(&list).await.unwrap();
    assert_eq!(items.len(), 1);
    let item = &items[0];
    assert_eq!(item.id, id);
    assert_eq!(item.name, "Tickets");
    assert_eq!(item.note, "");
    assert!(!item.status);
    assert_eq!(item.budget, Budget::from_int(200));
    assert!(item.date >= before && item.date <= after);
}

#[tokio::test]
async fn update_changes_only_patched_fields() {
    let (repo, list) = seeded();
    let id = repo
        .create_item(&list, ItemDraft::named("Tickets").note("row A"))
        .await
        .unwrap();
    let original = repo.fetch_items(&list).await.unwrap().remove(0);

    repo.update_item(&list, &id, ItemPatch::new().status(true))
        .await
        .unwrap();

    let updated = repo.fetch_items(&list).await.unwrap().remove(0);
    assert!(updated.status);
    assert_eq!(updated.name, original.name);
    assert_eq!(updated.note, original.note);
    assert_eq!(updated.budget, original.budget);
    assert_eq!(updated.date, original.date);
}

#[tokio::test]
async fn update_missing_item_is_not_found() {
    let (repo, list) = seeded();
    let err = repo
        .update_item(&list, &ItemId::new("ghost"), ItemPatch::new().name("x"))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn delete_removes_only_that_item() {
    let (repo, list) = seeded();
    let keep = repo
        .create_item(&list, ItemDraft::named("Keep"))
        .await
        .unwrap();
    let gone = repo
        .create_item(&list, ItemDraft::named("Drop"))
        .await
        .unwrap();
    let kept_before = repo
        .fetch_items(&list)
        .await
        .unwrap()
        .into_iter()
        .find(|i| i.id == keep)
        .unwrap();

    repo.delete_item(&list, &gone).await.unwrap();
    repo.delete_item(&list, &gone).await.unwrap();

    let items = repo.fetch_items(&list).await.unwrap();
    assert_eq!(items, vec![kept_before]);
}

#[tokio::test]
async fn items_are_scoped_to_their_list() {
    let (repo, list) = seeded();
    let other = ListId::new("food");
    repo.create_item(&list, ItemDraft::named("Paris"))
        .await
        .unwrap();
    repo.create_item(&other, ItemDraft::named("Ramen"))
        .await
        .unwrap();

    let names: HashSet<_> = repo
        .fetch_items(&list)
        .await
        .unwrap()
        .into_iter()
        .map(|i| i.name)
        .collect();
    assert_eq!(names, HashSet::from(["Paris".to_string()]));
}

#[tokio::test]
async fn signed_out_calls_never_reach_the_store() {
    let (repo, list) = seeded();
    repo.auth().sign_out();
    let stored = repo.store().len();

    let err = repo
        .create_item(&list, ItemDraft::named("Tickets"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::AuthMissing));
    assert!(repo.fetch_items(&list).await.unwrap_err().is_auth_missing());
    assert!(repo.fetch_list(&list).await.unwrap_err().is_auth_missing());
    assert_eq!(repo.store().len(), stored);
}

#[tokio::test]
async fn custom_root_collection() {
    let store = InMemoryStore::new();
    let layout = Layout::with_root("owners");
    let list = ListId::new("l1");
    store.insert(
        &layout.list(&UserId::new(USER), &list).unwrap(),
        Fields::new(),
    );
    let repo = DocumentRepository::new(store, StaticAuth::signed_in(USER)).with_layout(layout);

    let fetched = repo.fetch_list(&list).await.unwrap();
    assert_eq!(fetched.name, "");
}
