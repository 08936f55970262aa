//! `PostgreSQL` repository implementation for account storage.

use super::{
    models::{AccountRow, FollowRow, MessageRow, NewAccountRow, NewMessageRow},
    schema::{accounts, follows, messages},
};
use crate::account::{
    domain::{
        Account, AccountId, ChangeSet, CommitReceipt, Email, FollowEdge, Message, MessageId,
        MessageText, NewAccount, NewMessage, PasswordHash, PersistedAccountData,
        PersistedMessageData, Username,
    },
    ports::{
        AccountRepository, AccountRepositoryError, AccountRepositoryResult, ConstraintViolation,
    },
};
use crate::config::StoreConfig;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by account adapters.
pub type AccountPgPool = Pool<ConnectionManager<PgConnection>>;

const ACCOUNTS_PKEY: &str = "accounts_pkey";
const ACCOUNTS_USERNAME_KEY: &str = "accounts_username_key";
const ACCOUNTS_EMAIL_KEY: &str = "accounts_email_key";
const FOLLOWS_PKEY: &str = "follows_pkey";
const FOLLOWS_FOLLOWER_FKEY: &str = "follows_follower_id_fkey";
const FOLLOWS_FOLLOWED_FKEY: &str = "follows_followed_id_fkey";

/// Moves the identity sequence past every stored id, so generated ids never
/// collide with explicitly requested ones. The sequence never moves backwards.
const RESEED_ACCOUNT_IDS_SQL: &str = "SELECT setval(\
    pg_get_serial_sequence('accounts', 'id'), \
    GREATEST((SELECT MAX(id) FROM accounts), \
             nextval(pg_get_serial_sequence('accounts', 'id'))))";

/// Builds a connection pool for the database selected by `config`.
///
/// # Errors
///
/// Returns [`PoolError`] when the pool cannot establish its initial
/// connections.
pub fn build_pool(config: &StoreConfig) -> Result<AccountPgPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(config.database_url());
    Pool::builder()
        .max_size(config.max_pool_size())
        .build(manager)
}

/// `PostgreSQL`-backed account repository.
#[derive(Debug, Clone)]
pub struct PostgresAccountRepository {
    pool: AccountPgPool,
}

impl PostgresAccountRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: AccountPgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    #[must_use]
    pub const fn pool(&self) -> &AccountPgPool {
        &self.pool
    }

    async fn run_blocking<F, T>(&self, f: F) -> AccountRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> AccountRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(AccountRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(AccountRepositoryError::persistence)?
    }
}

impl From<DieselError> for AccountRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn apply(&self, changes: &ChangeSet) -> AccountRepositoryResult<CommitReceipt> {
        let changes = changes.clone();
        self.run_blocking(move |connection| {
            connection.transaction::<_, AccountRepositoryError, _>(|tx| apply_changes(tx, &changes))
        })
        .await
    }

    async fn find_by_id(&self, id: AccountId) -> AccountRepositoryResult<Option<Account>> {
        self.run_blocking(move |connection| {
            read_snapshot(connection, |tx| {
                accounts::table
                    .filter(accounts::id.eq(id.value()))
                    .select(AccountRow::as_select())
                    .first::<AccountRow>(tx)
                    .optional()
            })
        })
        .await
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> AccountRepositoryResult<Option<Account>> {
        let lookup = username.as_str().to_owned();
        self.run_blocking(move |connection| {
            read_snapshot(connection, |tx| {
                accounts::table
                    .filter(accounts::username.eq(&lookup))
                    .select(AccountRow::as_select())
                    .first::<AccountRow>(tx)
                    .optional()
            })
        })
        .await
    }

    async fn is_following(
        &self,
        follower: AccountId,
        followed: AccountId,
    ) -> AccountRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            diesel::select(diesel::dsl::exists(
                follows::table
                    .filter(follows::follower_id.eq(follower.value()))
                    .filter(follows::followed_id.eq(followed.value())),
            ))
            .get_result::<bool>(connection)
            .map_err(AccountRepositoryError::persistence)
        })
        .await
    }
}

fn apply_changes(
    connection: &mut PgConnection,
    changes: &ChangeSet,
) -> AccountRepositoryResult<CommitReceipt> {
    let account_ids = changes
        .accounts()
        .iter()
        .map(|account| insert_account(connection, account))
        .collect::<AccountRepositoryResult<Vec<_>>>()?;
    let message_ids = changes
        .messages()
        .iter()
        .map(|message| insert_message(connection, message))
        .collect::<AccountRepositoryResult<Vec<_>>>()?;
    for edge in changes.follows() {
        insert_follow(connection, *edge)?;
    }
    for edge in changes.unfollows() {
        diesel::delete(
            follows::table
                .filter(follows::follower_id.eq(edge.follower().value()))
                .filter(follows::followed_id.eq(edge.followed().value())),
        )
        .execute(connection)?;
    }
    Ok(CommitReceipt::new(account_ids, message_ids))
}

fn insert_account(
    connection: &mut PgConnection,
    account: &NewAccount,
) -> AccountRepositoryResult<AccountId> {
    let row = NewAccountRow {
        id: account.id().map(AccountId::value),
        username: account.username().map(|name| name.as_str().to_owned()),
        email: account.email().map(|email| email.as_str().to_owned()),
        password_hash: account.password_hash().as_str().to_owned(),
        image_url: account.profile_image_url().map(str::to_owned),
    };

    let raw_id = diesel::insert_into(accounts::table)
        .values(&row)
        .returning(accounts::id)
        .get_result::<i64>(connection)
        .map_err(|err| {
            account_violation(&err, account).map_or_else(
                || AccountRepositoryError::persistence(err),
                AccountRepositoryError::Constraint,
            )
        })?;
    if account.id().is_some() {
        diesel::sql_query(RESEED_ACCOUNT_IDS_SQL).execute(connection)?;
    }
    AccountId::new(raw_id).map_err(AccountRepositoryError::invalid_persisted_data)
}

fn insert_message(
    connection: &mut PgConnection,
    message: &NewMessage,
) -> AccountRepositoryResult<MessageId> {
    let row = NewMessageRow {
        text: message.text().as_str().to_owned(),
        created_at: message.created_at(),
        author_id: message.author().value(),
    };

    let raw_id = diesel::insert_into(messages::table)
        .values(&row)
        .returning(messages::id)
        .get_result::<i64>(connection)
        .map_err(|err| match err {
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                ConstraintViolation::UnknownAccount(message.author()).into()
            }
            _ => AccountRepositoryError::persistence(err),
        })?;
    MessageId::new(raw_id).map_err(AccountRepositoryError::invalid_persisted_data)
}

fn insert_follow(connection: &mut PgConnection, edge: FollowEdge) -> AccountRepositoryResult<()> {
    let row = FollowRow {
        follower_id: edge.follower().value(),
        followed_id: edge.followed().value(),
    };

    diesel::insert_into(follows::table)
        .values(&row)
        .execute(connection)
        .map_err(|err| {
            follow_violation(&err, edge).map_or_else(
                || AccountRepositoryError::persistence(err),
                AccountRepositoryError::Constraint,
            )
        })?;
    Ok(())
}

fn account_violation(err: &DieselError, account: &NewAccount) -> Option<ConstraintViolation> {
    let DieselError::DatabaseError(kind, info) = err else {
        return None;
    };
    match kind {
        DatabaseErrorKind::UniqueViolation => match info.constraint_name()? {
            ACCOUNTS_USERNAME_KEY => account
                .username()
                .cloned()
                .map(ConstraintViolation::DuplicateUsername),
            ACCOUNTS_EMAIL_KEY => account
                .email()
                .cloned()
                .map(ConstraintViolation::DuplicateEmail),
            ACCOUNTS_PKEY => account.id().map(ConstraintViolation::DuplicateAccountId),
            _ => None,
        },
        DatabaseErrorKind::NotNullViolation => match info.column_name()? {
            "username" => Some(ConstraintViolation::MissingUsername),
            "email" => Some(ConstraintViolation::MissingEmail),
            _ => None,
        },
        _ => None,
    }
}

fn follow_violation(err: &DieselError, edge: FollowEdge) -> Option<ConstraintViolation> {
    let DieselError::DatabaseError(kind, info) = err else {
        return None;
    };
    match (kind, info.constraint_name()?) {
        (DatabaseErrorKind::UniqueViolation, FOLLOWS_PKEY) => {
            Some(ConstraintViolation::DuplicateFollow(edge))
        }
        (DatabaseErrorKind::ForeignKeyViolation, FOLLOWS_FOLLOWER_FKEY) => {
            Some(ConstraintViolation::UnknownAccount(edge.follower()))
        }
        (DatabaseErrorKind::ForeignKeyViolation, FOLLOWS_FOLLOWED_FKEY) => {
            Some(ConstraintViolation::UnknownAccount(edge.followed()))
        }
        _ => None,
    }
}

/// Loads an account and its relationships from one consistent snapshot.
fn read_snapshot<F>(
    connection: &mut PgConnection,
    find_row: F,
) -> AccountRepositoryResult<Option<Account>>
where
    F: FnOnce(&mut PgConnection) -> QueryResult<Option<AccountRow>>,
{
    connection
        .build_transaction()
        .read_only()
        .repeatable_read()
        .run::<_, AccountRepositoryError, _>(|tx| {
            let row = find_row(tx)?;
            row.map(|found| load_account(tx, found)).transpose()
        })
}

fn load_account(connection: &mut PgConnection, row: AccountRow) -> AccountRepositoryResult<Account> {
    let AccountRow {
        id,
        username,
        email,
        password_hash,
        image_url,
    } = row;

    let following = follows::table
        .filter(follows::follower_id.eq(id))
        .select(follows::followed_id)
        .load::<i64>(connection)?
        .into_iter()
        .map(|raw| AccountId::new(raw).map_err(AccountRepositoryError::invalid_persisted_data))
        .collect::<AccountRepositoryResult<_>>()?;
    let followers = follows::table
        .filter(follows::followed_id.eq(id))
        .select(follows::follower_id)
        .load::<i64>(connection)?
        .into_iter()
        .map(|raw| AccountId::new(raw).map_err(AccountRepositoryError::invalid_persisted_data))
        .collect::<AccountRepositoryResult<_>>()?;
    let messages = messages::table
        .filter(messages::author_id.eq(id))
        .order((messages::created_at.desc(), messages::id.desc()))
        .select(MessageRow::as_select())
        .load::<MessageRow>(connection)?
        .into_iter()
        .map(row_to_message)
        .collect::<AccountRepositoryResult<_>>()?;

    let data = PersistedAccountData {
        id: AccountId::new(id).map_err(AccountRepositoryError::invalid_persisted_data)?,
        username: Username::new(username),
        email: Email::new(email),
        password_hash: PasswordHash::from_phc(password_hash),
        profile_image_url: image_url,
        following,
        followers,
        messages,
    };
    Ok(Account::from_persisted(data))
}

fn row_to_message(row: MessageRow) -> AccountRepositoryResult<Message> {
    let MessageRow {
        id,
        text,
        created_at,
        author_id,
    } = row;

    let data = PersistedMessageData {
        id: MessageId::new(id).map_err(AccountRepositoryError::invalid_persisted_data)?,
        author: AccountId::new(author_id).map_err(AccountRepositoryError::invalid_persisted_data)?,
        text: MessageText::new(text).map_err(AccountRepositoryError::invalid_persisted_data)?,
        created_at,
    };
    Ok(Message::from_persisted(data))
}
