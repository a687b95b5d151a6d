use quiz_core::model::{Flashcard, SetId, UserId};
use storage::repository::{FlashcardRepository, StorageError};
use storage::sqlite::SqliteRepository;

fn cards(n: usize) -> Vec<Flashcard> {
    (1..=n)
        .map(|i| Flashcard::new(format!("Q{i}"), format!("A{i}")))
        .collect()
}

async fn connect(name: &str) -> SqliteRepository {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let repo = SqliteRepository::connect(&url).await.expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

#[tokio::test]
async fn sqlite_roundtrip_preserves_card_order() {
    let repo = connect("memdb_roundtrip").await;
    let user = UserId::new("user_1").unwrap();
    let set = SetId::new("capitals").unwrap();

    let mut stored = cards(5);
    stored.reverse();
    repo.upsert_set(&user, &set, &stored).await.unwrap();

    let fetched = repo.list_flashcards(&user, &set).await.expect("fetch");
    assert_eq!(fetched, stored);
}

#[tokio::test]
async fn sqlite_upsert_replaces_existing_cards() {
    let repo = connect("memdb_replace").await;
    let user = UserId::new("user_1").unwrap();
    let set = SetId::new("verbs").unwrap();

    repo.upsert_set(&user, &set, &cards(4)).await.unwrap();
    repo.upsert_set(&user, &set, &cards(2)).await.unwrap();

    let fetched = repo.list_flashcards(&user, &set).await.unwrap();
    assert_eq!(fetched, cards(2));
}

#[tokio::test]
async fn sqlite_distinguishes_missing_and_empty_sets() {
    let repo = connect("memdb_missing").await;
    let user = UserId::new("user_1").unwrap();

    let err = repo
        .list_flashcards(&user, &SetId::new("missing").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound));

    repo.upsert_set(&user, &SetId::new("empty").unwrap(), &[]).await.unwrap();
    let fetched = repo.list_flashcards(&user, &SetId::new("empty").unwrap()).await.unwrap();
    assert!(fetched.is_empty());
}

#[tokio::test]
async fn sqlite_lists_sets_per_user() {
    let repo = connect("memdb_sets").await;
    let alice = UserId::new("alice").unwrap();
    let bob = UserId::new("bob").unwrap();

    repo.upsert_set(&alice, &SetId::new("zoology").unwrap(), &cards(1)).await.unwrap();
    repo.upsert_set(&alice, &SetId::new("algebra").unwrap(), &cards(1)).await.unwrap();
    repo.upsert_set(&bob, &SetId::new("history").unwrap(), &cards(1)).await.unwrap();

    let sets = repo.list_sets(&alice).await.unwrap();
    assert_eq!(sets, vec![SetId::new("algebra").unwrap(), SetId::new("zoology").unwrap()]);
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let repo = connect("memdb_migrate_twice").await;
    repo.migrate().await.expect("second migrate");
}

#[tokio::test]
async fn sqlite_keeps_set_names_verbatim() {
    let repo = connect("memdb_verbatim").await;
    let user = UserId::new("user_1").unwrap();
    let padded = SetId::new(" padded ").unwrap();
    let plain = SetId::new("padded").unwrap();

    repo.upsert_set(&user, &padded, &cards(2)).await.unwrap();
    repo.upsert_set(&user, &plain, &cards(1)).await.unwrap();

    let sets = repo.list_sets(&user).await.unwrap();
    assert_eq!(sets, vec![padded.clone(), plain.clone()]);
    assert_eq!(sets[0].as_str(), " padded ");
    assert_eq!(repo.list_flashcards(&user, &padded).await.unwrap().len(), 2);
    assert_eq!(repo.list_flashcards(&user, &plain).await.unwrap().len(), 1);
}
