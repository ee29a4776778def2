//! QuestionRepository 統合テスト
//!
//! sqlx::test マクロがテストごとに使い捨てのデータベースを作成し、
//! `migrations/` を適用する。
//!
//! 実行方法:
//! ```bash
//! DATABASE_URL=postgres://localhost/toiboard cargo test -p toiboard-infra --test question_repository_test
//! ```

mod common;

use common::{begin, insert_answer, insert_question, test_now};
use pretty_assertions::assert_eq;
use sqlx::PgPool;
use toiboard_domain::question::{QuestionContent, QuestionId, QuestionSearch};
use toiboard_infra::repository::{
    AnswerRepository,
    PostgresAnswerRepository,
    PostgresQuestionRepository,
    QuestionRepository,
};

fn search(title: Option<&str>, category: Option<&str>) -> QuestionSearch {
    QuestionSearch::new(title.map(String::from), category.map(String::from))
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_insert_作成した質問をfind_by_idで取得できる(pool: PgPool) {
    // Arrange
    let sut = PostgresQuestionRepository::new(pool.clone());

    // Act
    let created = insert_question(&pool, "所有権とは", "rust").await;
    let found = sut.find_by_id(created.id()).await.unwrap();

    // Assert
    assert_eq!(found, Some(created.clone()));
    assert_eq!(created.title(), "所有権とは");
    assert_eq!(created.created_at(), test_now());
    assert_eq!(created.created_at(), created.updated_at());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_find_by_id_存在しないidはnone(pool: PgPool) {
    let sut = PostgresQuestionRepository::new(pool);

    let found = sut.find_by_id(QuestionId::from_i64(999)).await.unwrap();

    assert_eq!(found, None);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_find_all_作成順で全件返す(pool: PgPool) {
    let first = insert_question(&pool, "first", "a").await;
    let second = insert_question(&pool, "second", "b").await;
    let sut = PostgresQuestionRepository::new(pool);

    let all = sut.find_all().await.unwrap();

    assert_eq!(all, vec![first, second]);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_search_タイトルとカテゴリのどちらかに一致すれば返す(pool: PgPool) {
    let by_title = insert_question(&pool, "OpenAPI の書き方", "web").await;
    let by_category = insert_question(&pool, "所有権", "rust").await;
    let _neither = insert_question(&pool, "SQL", "database").await;
    let sut = PostgresQuestionRepository::new(pool);

    let found = sut
        .search(&search(Some("OpenAPI"), Some("rust")))
        .await
        .unwrap();

    assert_eq!(found, vec![by_title, by_category]);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_search_大文字小文字を区別する(pool: PgPool) {
    insert_question(&pool, "OpenAPI", "web").await;
    let sut = PostgresQuestionRepository::new(pool);

    let found = sut.search(&search(Some("openapi"), None)).await.unwrap();

    assert!(found.is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_search_条件を両方省略すると何にも一致しない(pool: PgPool) {
    insert_question(&pool, "OpenAPI", "web").await;
    let sut = PostgresQuestionRepository::new(pool);

    let found = sut.search(&search(None, None)).await.unwrap();

    assert!(found.is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_search_空文字列はすべてに一致する(pool: PgPool) {
    insert_question(&pool, "a", "x").await;
    insert_question(&pool, "b", "y").await;
    let sut = PostgresQuestionRepository::new(pool);

    let found = sut.search(&search(Some(""), None)).await.unwrap();

    assert_eq!(found.len(), 2);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_update_内容とupdated_atだけが変わる(pool: PgPool) {
    // Arrange
    let created = insert_question(&pool, "old", "old").await;
    let sut = PostgresQuestionRepository::new(pool.clone());
    let content = QuestionContent::new("new", "new description", "new").unwrap();
    let later = test_now() + chrono::Duration::hours(1);

    // Act
    let mut tx = begin(&pool).await;
    sut.update(&mut tx, created.id(), &content, later)
        .await
        .unwrap();
    tx.commit().await.unwrap();

    // Assert
    let updated = sut.find_by_id(created.id()).await.unwrap().unwrap();
    assert_eq!(updated.title(), "new");
    assert_eq!(updated.description(), "new description");
    assert_eq!(updated.category(), "new");
    assert_eq!(updated.created_at(), created.created_at());
    assert_eq!(updated.updated_at(), later);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_lock_by_id_存在する行を返す(pool: PgPool) {
    let created = insert_question(&pool, "lock", "x").await;
    let sut = PostgresQuestionRepository::new(pool.clone());
    let mut tx = begin(&pool).await;

    let locked = sut.lock_by_id(&mut tx, created.id()).await.unwrap();
    let missing = sut
        .lock_by_id(&mut tx, QuestionId::from_i64(999))
        .await
        .unwrap();

    assert_eq!(locked, Some(created));
    assert_eq!(missing, None);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_delete_with_answers_回答もまとめて削除される(pool: PgPool) {
    // Arrange
    let target = insert_question(&pool, "target", "x").await;
    let other = insert_question(&pool, "other", "x").await;
    insert_answer(&pool, target.id(), "a1").await;
    insert_answer(&pool, target.id(), "a2").await;
    let kept = insert_answer(&pool, other.id(), "kept").await;
    let sut = PostgresQuestionRepository::new(pool.clone());
    let answers = PostgresAnswerRepository::new(pool.clone());

    // Act
    let mut tx = begin(&pool).await;
    sut.delete_with_answers(&mut tx, target.id()).await.unwrap();
    tx.commit().await.unwrap();

    // Assert
    assert_eq!(sut.find_by_id(target.id()).await.unwrap(), None);
    assert!(answers.find_by_question(target.id()).await.unwrap().is_empty());
    assert_eq!(
        answers.find_by_question(other.id()).await.unwrap(),
        vec![kept]
    );
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_delete_with_answers_回答が0件でも質問は削除される(pool: PgPool) {
    let target = insert_question(&pool, "lonely", "x").await;
    let sut = PostgresQuestionRepository::new(pool.clone());

    let mut tx = begin(&pool).await;
    sut.delete_with_answers(&mut tx, target.id()).await.unwrap();
    tx.commit().await.unwrap();

    assert_eq!(sut.find_by_id(target.id()).await.unwrap(), None);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_コミットせずにドロップするとロールバックされる(pool: PgPool) {
    let target = insert_question(&pool, "kept", "x").await;
    let sut = PostgresQuestionRepository::new(pool.clone());

    {
        let mut tx = begin(&pool).await;
        sut.delete_with_answers(&mut tx, target.id()).await.unwrap();
    }

    assert_eq!(sut.find_by_id(target.id()).await.unwrap(), Some(target));
}
