use std::sync::Arc;

use rstest::{fixture, rstest};
use uuid::Uuid;

use budget_repo::transaction_repo::TransactionRepo;
use budget_repo::user_repo::{User, UserRepo, UserRepoError};

#[fixture]
fn repos() -> (Arc<dyn TransactionRepo>, Arc<dyn UserRepo>) {
    budget_repo::mem_repo::create_repos()
}

fn generate_user() -> User {
    let user_id = "test-user-".to_owned() + &Uuid::new_v4().to_string();
    User::new(
        user_id.clone(),
        "Test User".to_owned(),
        format!("{}@example.com", user_id),
        "not a real hash".to_owned(),
    )
}

#[rstest]
#[actix_rt::test]
async fn test_create_and_get_user(repos: (Arc<dyn TransactionRepo>, Arc<dyn UserRepo>)) {
    let (_transaction_repo, user_repo) = repos;

    let user = generate_user();
    user_repo.create_user(user.clone()).await.unwrap();

    let stored = user_repo.get_user(&user.id).await.unwrap();
    assert_eq!(user.id, stored.id);
    assert_eq!(user.name, stored.name);
    assert_eq!(user.email, stored.email);

    user_repo.delete_user(&user.id).await.unwrap();
}

#[rstest]
#[actix_rt::test]
async fn test_create_duplicate_user(repos: (Arc<dyn TransactionRepo>, Arc<dyn UserRepo>)) {
    let (_transaction_repo, user_repo) = repos;

    let user = generate_user();
    user_repo.create_user(user.clone()).await.unwrap();

    let result = user_repo.create_user(user.clone()).await;
    assert!(matches!(
        result.unwrap_err(),
        UserRepoError::UserAlreadyExists(_)
    ));

    user_repo.delete_user(&user.id).await.unwrap();
}

#[rstest]
#[actix_rt::test]
async fn test_get_unknown_user(repos: (Arc<dyn TransactionRepo>, Arc<dyn UserRepo>)) {
    let (_transaction_repo, user_repo) = repos;

    let result = user_repo.get_user("no-such-user").await;
    assert!(matches!(result.unwrap_err(), UserRepoError::UserNotFound(_)));
}

#[rstest]
#[actix_rt::test]
async fn test_delete_unknown_user(repos: (Arc<dyn TransactionRepo>, Arc<dyn UserRepo>)) {
    let (_transaction_repo, user_repo) = repos;

    let result = user_repo.delete_user("no-such-user").await;
    assert!(matches!(result.unwrap_err(), UserRepoError::UserNotFound(_)));
}

#[rstest]
#[actix_rt::test]
async fn test_user_view_omits_password_hash(repos: (Arc<dyn TransactionRepo>, Arc<dyn UserRepo>)) {
    let (_transaction_repo, user_repo) = repos;

    let user = generate_user();
    user_repo.create_user(user.clone()).await.unwrap();

    let view = user_repo.get_user(&user.id).await.unwrap().view();
    let value = serde_json::to_value(&view).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(3, object.len());
    assert!(object.contains_key("id"));
    assert!(object.contains_key("name"));
    assert!(object.contains_key("email"));

    user_repo.delete_user(&user.id).await.unwrap();
}
