//! `PostgreSQL` integration tests for signup, uniqueness, and authentication.

use super::helpers::{BoxError, signup_request, test_config, test_database};
use rstest::rstest;
use warbler::account::{
    domain::{AccountId, Email, Username},
    ports::ConstraintViolation,
    services::SignupRequest,
};

#[rstest]
#[ignore = "requires TEST_DATABASE_URL"]
fn signup_commit_and_lookup() -> Result<(), BoxError> {
    let mut db = test_database()?;
    let session = &mut db.session;

    db.runtime.block_on(async {
        let staged = session.signup(signup_request(1))?;
        let receipt = session.commit().await?;
        let id = receipt.account_id(staged).ok_or("staged account missing")?;

        let account = session
            .find_by_username("testuser1")
            .await?
            .ok_or("account missing")?;
        assert_eq!(account.id(), id);
        assert_eq!(account.email().as_str(), "test1@test.com");
        assert_ne!(account.password_hash().as_str(), "password");
        assert!(account.messages().is_empty());
        assert!(account.followers().is_empty());
        Ok::<(), BoxError>(())
    })
}

#[rstest]
#[ignore = "requires TEST_DATABASE_URL"]
fn explicit_identifiers_are_kept() -> Result<(), BoxError> {
    let mut db = test_database()?;
    let session = &mut db.session;

    db.runtime.block_on(async {
        let requested = AccountId::new(1234)?;
        session.signup(signup_request(1).with_id(requested))?;
        session.commit().await?;

        let found = session.find_by_id(requested).await?;
        assert_eq!(
            found.map(|account| account.username().clone()),
            Some(Username::new("testuser1"))
        );
        Ok::<(), BoxError>(())
    })
}

#[rstest]
#[ignore = "requires TEST_DATABASE_URL"]
#[case::duplicate_username(
    SignupRequest::new("testuser1", "other@test.com", "password"),
    ConstraintViolation::DuplicateUsername(Username::new("testuser1"))
)]
#[ignore = "requires TEST_DATABASE_URL"]
#[case::duplicate_email(
    SignupRequest::new("other", "test1@test.com", "password"),
    ConstraintViolation::DuplicateEmail(Email::new("test1@test.com"))
)]
#[ignore = "requires TEST_DATABASE_URL"]
#[case::missing_username(
    SignupRequest::from_parts(None, Some("new@test.com".to_owned()), Some("password".to_owned())),
    ConstraintViolation::MissingUsername
)]
#[ignore = "requires TEST_DATABASE_URL"]
#[case::missing_email(
    SignupRequest::from_parts(Some("new".to_owned()), None, Some("password".to_owned())),
    ConstraintViolation::MissingEmail
)]
fn invalid_signup_fails_at_commit(
    #[case] request: SignupRequest,
    #[case] expected: ConstraintViolation,
) -> Result<(), BoxError> {
    let mut db = test_database()?;
    let session = &mut db.session;

    db.runtime.block_on(async {
        session.signup(signup_request(1))?;
        session.commit().await?;

        session.signup(request)?;
        let err = session
            .commit()
            .await
            .expect_err("commit should violate a constraint");
        assert_eq!(err.constraint_violation(), Some(&expected));
        Ok::<(), BoxError>(())
    })
}

#[rstest]
#[ignore = "requires TEST_DATABASE_URL"]
fn failed_commit_rolls_back_every_write() -> Result<(), BoxError> {
    let mut db = test_database()?;
    let session = &mut db.session;

    db.runtime.block_on(async {
        session.signup(signup_request(1))?;
        session.commit().await?;

        session.signup(signup_request(2))?;
        session.signup(SignupRequest::new("testuser1", "x@test.com", "password"))?;
        session
            .commit()
            .await
            .expect_err("duplicate username should fail");
        session.rollback();

        assert!(session.find_by_username("testuser2").await?.is_none());
        Ok::<(), BoxError>(())
    })
}

#[rstest]
#[ignore = "requires TEST_DATABASE_URL"]
fn authenticate_against_stored_hash() -> Result<(), BoxError> {
    let mut db = test_database()?;
    let session = &mut db.session;

    db.runtime.block_on(async {
        session.signup(signup_request(1))?;
        session.commit().await?;

        assert!(session.authenticate("testuser1", "password").await?.is_some());
        assert!(session.authenticate("testuser1", "wrong").await?.is_none());
        assert!(session.authenticate("nobody", "password").await?.is_none());
        Ok::<(), BoxError>(())
    })
}

#[rstest]
fn missing_database_url_is_reported() {
    let err = test_config(|_| None).expect_err("configuration should be missing");

    assert!(err.to_string().contains("TEST_DATABASE_URL"));
}

#[rstest]
#[ignore = "requires TEST_DATABASE_URL"]
fn generated_identifiers_skip_explicit_ones() -> Result<(), BoxError> {
    let mut db = test_database()?;
    let session = &mut db.session;

    db.runtime.block_on(async {
        let explicit = AccountId::new(1)?;
        let staged = [
            session.signup(signup_request(1).with_id(explicit))?,
            session.signup(signup_request(2))?,
        ];
        let receipt = session.commit().await?;

        assert_eq!(receipt.account_id(staged[0]), Some(explicit));
        assert_eq!(receipt.account_id(staged[1]), Some(AccountId::new(2)?));
        Ok::<(), BoxError>(())
    })
}

#[rstest]
#[ignore = "requires TEST_DATABASE_URL"]
fn signup_after_explicit_identifier_commit_succeeds() -> Result<(), BoxError> {
    let mut db = test_database()?;
    let session = &mut db.session;

    db.runtime.block_on(async {
        let explicit = AccountId::new(1)?;
        session.signup(signup_request(1).with_id(explicit))?;
        session.commit().await?;

        let staged = session.signup(signup_request(2))?;
        let receipt = session.commit().await?;
        let generated = receipt.account_id(staged).ok_or("staged account missing")?;

        assert_ne!(generated, explicit);
        assert!(session.find_by_username("testuser2").await?.is_some());
        Ok::<(), BoxError>(())
    })
}
