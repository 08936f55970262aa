//! `PostgreSQL` integration tests for follow edges and messages.

use super::helpers::{BoxError, signup_request, test_database};
use rstest::rstest;
use warbler::account::{domain::AccountId, ports::ConstraintViolation};

#[rstest]
#[ignore = "requires TEST_DATABASE_URL"]
fn follow_queries_are_directional() -> Result<(), BoxError> {
    let mut db = test_database()?;
    let session = &mut db.session;

    db.runtime.block_on(async {
        let u1_id = AccountId::new(1234)?;
        let u2_id = AccountId::new(5678)?;
        session.signup(signup_request(1).with_id(u1_id))?;
        session.signup(signup_request(2).with_id(u2_id))?;
        session.commit().await?;

        session.follow(u1_id, u2_id)?;
        session.commit().await?;

        let u1 = session.find_by_id(u1_id).await?.ok_or("u1 missing")?;
        let u2 = session.find_by_id(u2_id).await?.ok_or("u2 missing")?;
        assert!(u1.is_following(&u2));
        assert!(!u2.is_following(&u1));
        assert!(u2.is_followed_by(&u1));
        assert!(!u1.is_followed_by(&u2));
        assert!(session.is_following(u1_id, u2_id).await?);
        assert!(!session.is_following(u2_id, u1_id).await?);
        Ok::<(), BoxError>(())
    })
}

#[rstest]
#[ignore = "requires TEST_DATABASE_URL"]
fn duplicate_follow_is_a_constraint_violation() -> Result<(), BoxError> {
    let mut db = test_database()?;
    let session = &mut db.session;

    db.runtime.block_on(async {
        let staged = [
            session.signup(signup_request(1))?,
            session.signup(signup_request(2))?,
        ];
        let receipt = session.commit().await?;
        let u1 = receipt.account_id(staged[0]).ok_or("u1 missing")?;
        let u2 = receipt.account_id(staged[1]).ok_or("u2 missing")?;

        session.follow(u1, u2)?;
        session.commit().await?;
        session.follow(u1, u2)?;
        let err = session.commit().await.expect_err("edge already exists");

        assert!(matches!(
            err.constraint_violation(),
            Some(ConstraintViolation::DuplicateFollow(_))
        ));
        Ok::<(), BoxError>(())
    })
}

#[rstest]
#[ignore = "requires TEST_DATABASE_URL"]
fn unfollow_and_messages_round_trip() -> Result<(), BoxError> {
    let mut db = test_database()?;
    let session = &mut db.session;

    db.runtime.block_on(async {
        let staged = [
            session.signup(signup_request(1))?,
            session.signup(signup_request(2))?,
        ];
        let receipt = session.commit().await?;
        let u1 = receipt.account_id(staged[0]).ok_or("u1 missing")?;
        let u2 = receipt.account_id(staged[1]).ok_or("u2 missing")?;

        session.follow(u1, u2)?;
        session.post_message(u1, "first")?;
        session.commit().await?;
        session.unfollow(u1, u2)?;
        session.post_message(u1, "second")?;
        session.commit().await?;

        let author = session.find_by_id(u1).await?.ok_or("u1 missing")?;
        let texts: Vec<&str> = author
            .messages()
            .iter()
            .map(|message| message.text().as_str())
            .collect();
        assert_eq!(texts, vec!["second", "first"]);
        assert!(!session.is_following(u1, u2).await?);
        Ok::<(), BoxError>(())
    })
}
