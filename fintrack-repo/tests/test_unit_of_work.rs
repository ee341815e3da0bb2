mod utils;

use fintrack_repo::transaction_repo::{PageOptions, TransactionFilter};

#[actix_rt::test]
async fn test_dropping_without_commit_rolls_back() {
    let store = utils::create_store();
    let user = utils::create_user(&store).await;

    {
        let mut uow = store.begin().await.unwrap();
        uow.create_transaction(user.id, utils::generate_new_transaction())
            .await
            .unwrap();
        uow.update_balance(user.id, -1000).await.unwrap();
        // dropped here, never committed
    }

    let mut uow = store.begin().await.unwrap();
    let listed = uow
        .get_transactions(
            user.id,
            &TransactionFilter::default(),
            &PageOptions {
                offset: 0,
                limit: 100,
            },
        )
        .await
        .unwrap();
    assert!(listed.is_empty());
    let (balance, _) = uow.get_balance(user.id).await.unwrap().unwrap();
    assert_eq!(balance, 0);
}

#[actix_rt::test]
async fn test_commit_publishes_every_write_together() {
    let store = utils::create_store();
    let user = utils::create_user(&store).await;

    let mut uow = store.begin().await.unwrap();
    let entry = uow
        .create_transaction(user.id, utils::generate_new_transaction())
        .await
        .unwrap();
    uow.update_balance(user.id, -1000).await.unwrap();
    uow.commit().await.unwrap();

    let mut uow = store.begin().await.unwrap();
    assert!(uow.get_transaction(user.id, entry.id).await.unwrap().is_some());
    let (balance, _) = uow.get_balance(user.id).await.unwrap().unwrap();
    assert_eq!(balance, -1000);
}

#[actix_rt::test]
async fn test_uncommitted_writes_are_visible_inside_the_unit() {
    let store = utils::create_store();
    let user = utils::create_user(&store).await;

    let mut uow = store.begin().await.unwrap();
    let entry = uow
        .create_transaction(user.id, utils::generate_new_transaction())
        .await
        .unwrap();

    // own writes read back before commit
    assert!(uow.get_transaction(user.id, entry.id).await.unwrap().is_some());

    // but a second unit started now does not see them
    let mut other = store.begin().await.unwrap();
    assert!(other
        .get_transaction(user.id, entry.id)
        .await
        .unwrap()
        .is_none());
}
