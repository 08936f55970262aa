//! In-memory integration tests for authored messages.

use super::helpers::{TestSession, load, session, signup_all};
use rstest::rstest;
use warbler::account::domain::{AccountDomainError, AccountId, MAX_MESSAGE_LENGTH};
use warbler::account::services::AccountSessionError;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn messages_are_listed_newest_first(mut session: TestSession) {
    let ids = signup_all(&mut session, &[1]).await;
    session.post_message(ids[0], "first").expect("valid text");
    session.commit().await.expect("commit should succeed");
    session.post_message(ids[0], "second").expect("valid text");
    session.commit().await.expect("commit should succeed");

    let u1 = load(&session, ids[0]).await;
    let texts: Vec<&str> = u1
        .messages()
        .iter()
        .map(|message| message.text().as_str())
        .collect();

    assert_eq!(texts, vec!["second", "first"]);
    assert!(u1.messages().iter().all(|message| message.author() == ids[0]));
}

#[rstest]
fn overlong_message_is_rejected_when_staged(mut session: TestSession) {
    let author = AccountId::new(1).expect("positive");

    let err = session
        .post_message(author, "x".repeat(MAX_MESSAGE_LENGTH + 1))
        .expect_err("text should be too long");

    assert!(matches!(
        err,
        AccountSessionError::Domain(AccountDomainError::MessageTextTooLong { .. })
    ));
    assert!(session.pending().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn message_for_unknown_author_fails_at_commit(mut session: TestSession) {
    let author = AccountId::new(42).expect("positive");
    session.post_message(author, "hello").expect("valid text");

    let err = session.commit().await.expect_err("author does not exist");

    assert!(err.constraint_violation().is_some());
}
