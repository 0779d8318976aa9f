//! In-memory port doubles for integration tests.
//!
//! Compiled for unit tests and behind the `test-support` feature so suites in
//! `backend/tests/` can drive the real services and HTTP handlers without
//! PostgreSQL or the identity provider.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::ports::{
    FixtureOrgHierarchyQuery, IdentityDirectory, IdentityDirectoryError, IdentityRecord,
    RelationshipRepository, RelationshipRepositoryError, UserRepository, UserRepositoryError,
};
use crate::domain::{
    AccountService, Bio, FollowEdge, FollowRemoval, IdentitySessionAuthenticator,
    NewNotification, NewUser, NotificationKind, ProgramId, RelationshipService,
    ReservedUsernames, SessionToken, User, UserId, Username, UsernameService,
};
use crate::inbound::http::state::HttpState;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

#[derive(Debug, Default)]
struct RelationshipTables {
    /// `(follower, followee)` in insertion order.
    followers: Vec<(UserId, UserId)>,
    /// Mirror rows stored as `(target, actor)`.
    followees: Vec<(UserId, UserId)>,
    notifications: Vec<NewNotification>,
}

/// Relationship repository keeping both indexes and notifications in memory.
///
/// Writes happen under a single lock, matching the transactional adapter.
#[derive(Debug, Default)]
pub struct InMemoryRelationshipRepository {
    tables: Mutex<RelationshipTables>,
    unavailable: AtomicBool,
}

impl InMemoryRelationshipRepository {
    /// Simulate a lost database connection.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Snapshot of the followers index as `(follower, followee)`.
    pub fn followers_rows(&self) -> Vec<(UserId, UserId)> {
        lock(&self.tables).followers.clone()
    }

    /// Snapshot of the mirror index as stored: `(target, actor)`.
    pub fn followees_rows(&self) -> Vec<(UserId, UserId)> {
        lock(&self.tables).followees.clone()
    }

    /// Snapshot of stored notifications.
    pub fn notifications(&self) -> Vec<NewNotification> {
        lock(&self.tables).notifications.clone()
    }

    fn check_available(&self) -> Result<(), RelationshipRepositoryError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RelationshipRepositoryError::connection("database offline"));
        }
        Ok(())
    }
}

#[async_trait]
impl RelationshipRepository for InMemoryRelationshipRepository {
    async fn edge_exists(&self, edge: &FollowEdge) -> Result<bool, RelationshipRepositoryError> {
        self.check_available()?;
        Ok(lock(&self.tables)
            .followers
            .iter()
            .any(|(follower, followee)| *follower == edge.follower && *followee == edge.followee))
    }

    async fn insert_follow(
        &self,
        edge: &FollowEdge,
        notification: Option<NewNotification>,
    ) -> Result<(), RelationshipRepositoryError> {
        self.check_available()?;
        let mut tables = lock(&self.tables);
        let duplicate = tables
            .followers
            .iter()
            .any(|(follower, followee)| *follower == edge.follower && *followee == edge.followee);
        if duplicate {
            return Err(RelationshipRepositoryError::duplicate_edge());
        }
        tables
            .followers
            .push((edge.follower.clone(), edge.followee.clone()));
        tables
            .followees
            .push((edge.followee.clone(), edge.follower.clone()));
        tables.notifications.extend(notification);
        Ok(())
    }

    async fn delete_follow(
        &self,
        edge: &FollowEdge,
        notification_kind: Option<NotificationKind>,
    ) -> Result<FollowRemoval, RelationshipRepositoryError> {
        self.check_available()?;
        let mut tables = lock(&self.tables);

        let before = tables.followers.len();
        tables
            .followers
            .retain(|(follower, followee)| !(*follower == edge.follower && *followee == edge.followee));
        let followers_rows = before - tables.followers.len();

        let before = tables.followees.len();
        tables
            .followees
            .retain(|(target, actor)| !(*target == edge.followee && *actor == edge.follower));
        let followees_rows = before - tables.followees.len();

        let notifications = match notification_kind {
            Some(kind) => {
                let before = tables.notifications.len();
                tables.notifications.retain(|note| {
                    !(note.to == edge.followee && note.from == edge.follower && note.kind == kind)
                });
                before - tables.notifications.len()
            }
            None => 0,
        };

        Ok(FollowRemoval {
            followers_rows,
            followees_rows,
            notifications,
        })
    }

    async fn list_followers(
        &self,
        user: &UserId,
    ) -> Result<Vec<UserId>, RelationshipRepositoryError> {
        self.check_available()?;
        Ok(lock(&self.tables)
            .followers
            .iter()
            .filter(|(_, followee)| followee == user)
            .map(|(follower, _)| follower.clone())
            .collect())
    }

    async fn list_followees(
        &self,
        user: &UserId,
    ) -> Result<Vec<UserId>, RelationshipRepositoryError> {
        self.check_available()?;
        Ok(lock(&self.tables)
            .followees
            .iter()
            .filter(|(_, actor)| actor == user)
            .map(|(target, _)| target.clone())
            .collect())
    }
}

#[derive(Debug)]
struct UserTable {
    rows: BTreeMap<UserId, User>,
    programs: HashSet<ProgramId>,
    next_number: i64,
}

/// User repository with a sequence-like ordinal and a known program set.
#[derive(Debug)]
pub struct InMemoryUserRepository {
    table: Mutex<UserTable>,
}

impl InMemoryUserRepository {
    /// Repository accepting sign-ups for the given programs only.
    pub fn new(programs: impl IntoIterator<Item = ProgramId>) -> Self {
        Self {
            table: Mutex::new(UserTable {
                rows: BTreeMap::new(),
                programs: programs.into_iter().collect(),
                next_number: 1,
            }),
        }
    }

    /// Stored account, if any.
    pub fn get(&self, id: &UserId) -> Option<User> {
        lock(&self.table).rows.get(id).cloned()
    }

    /// Number of stored accounts.
    pub fn len(&self) -> usize {
        lock(&self.table).rows.len()
    }

    /// True when no account is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new([ProgramId::from_uuid(FixtureOrgHierarchyQuery::PROGRAM_ID)])
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &NewUser) -> Result<User, UserRepositoryError> {
        let mut table = lock(&self.table);
        if !table.programs.contains(&user.program_id) {
            return Err(UserRepositoryError::unknown_program());
        }
        if table.rows.contains_key(&user.id) {
            return Err(UserRepositoryError::duplicate_user());
        }
        let stored = User {
            id: user.id.clone(),
            program_id: user.program_id,
            account_type: user.account_type,
            bio: None,
            user_number: table.next_number,
            created_at: Utc::now(),
        };
        table.next_number += 1;
        table.rows.insert(stored.id.clone(), stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(self.get(id))
    }

    async fn update_bio(&self, id: &UserId, bio: &Bio) -> Result<bool, UserRepositoryError> {
        let mut table = lock(&self.table);
        let Some(user) = table.rows.get_mut(id) else {
            return Ok(false);
        };
        user.bio = Some(bio.clone());
        Ok(true)
    }
}

#[derive(Debug, Default)]
struct IdentityTable {
    users: HashMap<UserId, Option<Username>>,
    sessions: HashMap<String, UserId>,
}

/// Identity provider double with registered users and session tokens.
#[derive(Debug, Default)]
pub struct InMemoryIdentityDirectory {
    table: Mutex<IdentityTable>,
    unavailable: AtomicBool,
}

impl InMemoryIdentityDirectory {
    /// Register an identity, optionally with a username.
    pub fn add_user(&self, id: UserId, username: Option<Username>) {
        lock(&self.table).users.insert(id, username);
    }

    /// Make `token` verify as `user`.
    pub fn add_session(&self, token: impl Into<String>, user: UserId) {
        lock(&self.table).sessions.insert(token.into(), user);
    }

    /// Simulate a provider outage.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), IdentityDirectoryError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(IdentityDirectoryError::transport("identity provider offline"));
        }
        Ok(())
    }
}

#[async_trait]
impl IdentityDirectory for InMemoryIdentityDirectory {
    async fn find_user(
        &self,
        id: &UserId,
    ) -> Result<Option<IdentityRecord>, IdentityDirectoryError> {
        self.check_available()?;
        Ok(lock(&self.table)
            .users
            .get(id)
            .map(|username| IdentityRecord {
                id: id.clone(),
                username: username.clone(),
            }))
    }

    async fn username_registered(
        &self,
        username: &Username,
    ) -> Result<bool, IdentityDirectoryError> {
        self.check_available()?;
        Ok(lock(&self.table)
            .users
            .values()
            .flatten()
            .any(|registered| registered == username))
    }

    async fn verify_session(
        &self,
        token: &SessionToken,
    ) -> Result<Option<UserId>, IdentityDirectoryError> {
        self.check_available()?;
        Ok(lock(&self.table).sessions.get(token.expose()).cloned())
    }
}

/// Real services wired over the in-memory doubles.
///
/// # Examples
/// ```
/// use backend::test_support::InMemoryBackend;
///
/// let backend = InMemoryBackend::default();
/// let _state = backend.http_state();
/// assert!(backend.relationships.followers_rows().is_empty());
/// ```
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    /// Follow graph tables and notifications.
    pub relationships: Arc<InMemoryRelationshipRepository>,
    /// Signed-up accounts.
    pub users: Arc<InMemoryUserRepository>,
    /// Identity provider users and session tokens.
    pub identities: Arc<InMemoryIdentityDirectory>,
}

impl InMemoryBackend {
    /// Relationship service over the in-memory repository and directory.
    pub fn relationship_service(
        &self,
    ) -> RelationshipService<InMemoryRelationshipRepository, InMemoryIdentityDirectory> {
        RelationshipService::new(self.relationships.clone(), self.identities.clone())
    }

    /// HTTP state with every port backed by the doubles.
    pub fn http_state(&self) -> HttpState {
        let relationships = Arc::new(self.relationship_service());
        let accounts = Arc::new(AccountService::new(self.users.clone()));
        HttpState {
            relationships: relationships.clone(),
            relationships_query: relationships,
            accounts: accounts.clone(),
            profiles: accounts,
            usernames: Arc::new(UsernameService::new(
                self.identities.clone(),
                ReservedUsernames::default(),
            )),
            org: Arc::new(FixtureOrgHierarchyQuery),
            sessions: Arc::new(IdentitySessionAuthenticator::new(self.identities.clone())),
        }
    }
}
