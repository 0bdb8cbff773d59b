//! Player session - the single owner of the live [`PlayerRecord`].
//!
//! Every mutation applies a pure progression transition, replaces the
//! in-memory record, and then saves the whole record through the
//! [`PersistenceGateway`]. A failed save never rolls the record back; the
//! session stays dirty and the next mutation (or [`PlayerSession::flush`])
//! writes the current record again. Until storage has been read once, no
//! save is attempted at all.

use std::sync::Arc;

use levelup_domain::{
    self as domain, DomainError, PlayerRecord, QuestId, Skill, SkillUnlockTable,
    DEFAULT_QUEST_REWARD, DEFAULT_SKILL_TABLE,
};
use tokio::sync::Mutex;

use crate::infrastructure::ports::QuestIdGenerator;
use crate::persistence::{LoadOutcome, PersistenceError, PersistenceGateway};

/// What happened to persistence after a session call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The record at `revision` is durable.
    Saved { revision: u64 },
    /// Nothing changed and nothing was waiting to be written.
    Unchanged,
    /// The write failed, or was held because storage has not been read yet.
    /// The in-memory record stays authoritative and the write is retried on
    /// the next call.
    Deferred(PersistenceError),
}

impl SaveOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }
}

/// Result of a single [`RecordWriter::write`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStatus {
    Written,
    /// A newer revision was already written; this one was dropped.
    Superseded,
}

/// Serializes saves so an older revision can never overwrite a newer one.
///
/// At most one write is in flight at a time. Cloning shares the same lock and
/// high-water mark, so hosts that hand snapshots to background tasks keep the
/// same ordering guarantee as the session itself.
#[derive(Clone)]
pub struct RecordWriter {
    gateway: PersistenceGateway,
    last_written: Arc<Mutex<Option<u64>>>,
}

impl RecordWriter {
    pub fn new(gateway: PersistenceGateway) -> Self {
        Self {
            gateway,
            last_written: Arc::new(Mutex::new(None)),
        }
    }

    pub fn gateway(&self) -> &PersistenceGateway {
        &self.gateway
    }

    /// Writes `record` as `revision` unless a newer revision already landed.
    pub async fn write(
        &self,
        revision: u64,
        record: &PlayerRecord,
    ) -> Result<WriteStatus, PersistenceError> {
        let mut last = self.last_written.lock().await;
        if matches!(*last, Some(written) if written >= revision) {
            tracing::debug!(revision, "Skipping save, newer revision already written");
            return Ok(WriteStatus::Superseded);
        }
        self.gateway.save(record).await?;
        *last = Some(revision);
        tracing::debug!(revision, key = %self.gateway.key(), "Player record saved");
        Ok(WriteStatus::Written)
    }
}

/// Owns the player record for the lifetime of the app.
pub struct PlayerSession {
    record: PlayerRecord,
    revision: u64,
    pending_save: bool,
    /// Set while storage has not been read successfully; saves are held so
    /// the stand-in record cannot overwrite what is stored.
    load_error: Option<PersistenceError>,
    writer: RecordWriter,
    quest_ids: Arc<dyn QuestIdGenerator>,
    skill_table: SkillUnlockTable,
}

impl PlayerSession {
    /// Loads the record (falling back to the starter record) using the
    /// default skill table.
    pub async fn open(gateway: PersistenceGateway, quest_ids: Arc<dyn QuestIdGenerator>) -> Self {
        Self::open_with_table(gateway, quest_ids, (*DEFAULT_SKILL_TABLE).clone()).await
    }

    /// Loads the record and normalizes it: excess experience is rolled into
    /// levels and skills the level qualifies for are unlocked. Anything not
    /// yet in storage is marked for the next save.
    ///
    /// If storage cannot be read, the session runs on the starter record in
    /// memory and retries the load on every call until it succeeds.
    pub async fn open_with_table(
        gateway: PersistenceGateway,
        quest_ids: Arc<dyn QuestIdGenerator>,
        skill_table: SkillUnlockTable,
    ) -> Self {
        let outcome = gateway.load_or_default().await;
        let (seeded, load_error) = match &outcome {
            LoadOutcome::Stored(_) => (false, None),
            LoadOutcome::Seeded(_) | LoadOutcome::Replaced { .. } => (true, None),
            LoadOutcome::Unavailable { error, .. } => (false, Some(error.clone())),
        };
        let loaded = outcome.into_record();
        let record = normalize(&loaded, &skill_table);
        let pending_save = load_error.is_none() && (seeded || record != loaded);

        tracing::info!(
            level = %record.level(),
            experience = record.experience(),
            quests = record.quests().len(),
            pending_save,
            storage_readable = load_error.is_none(),
            "Player session opened"
        );

        Self {
            record,
            revision: 0,
            pending_save,
            load_error,
            writer: RecordWriter::new(gateway),
            quest_ids,
            skill_table,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn record(&self) -> &PlayerRecord {
        &self.record
    }

    /// Incremented on every change to the record; 0 right after opening.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether the current record still has to reach storage.
    pub fn has_pending_save(&self) -> bool {
        self.pending_save
    }

    /// Why storage has not been read yet, if it has not.
    pub fn load_error(&self) -> Option<&PersistenceError> {
        self.load_error.as_ref()
    }

    pub fn writer(&self) -> &RecordWriter {
        &self.writer
    }

    pub fn skill_table(&self) -> &SkillUnlockTable {
        &self.skill_table
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Grants experience, then unlocks any skills the new level reaches.
    pub async fn grant_experience(&mut self, amount: u64) -> SaveOutcome {
        self.retry_load().await;
        let leveled = domain::grant_experience(&self.record, amount);
        let next = domain::unlock_eligible_skills(&leveled, &self.skill_table);
        self.commit(next).await
    }

    /// # Errors
    ///
    /// `InvalidStat` or `InsufficientPoints`; the record is left unchanged
    /// and nothing is saved.
    pub async fn allocate_stat(&mut self, stat_name: &str) -> Result<SaveOutcome, DomainError> {
        self.retry_load().await;
        let next = domain::allocate_stat(&self.record, stat_name)?;
        Ok(self.commit(next).await)
    }

    /// Completes a quest. Unknown or already-done quests change nothing.
    pub async fn complete_quest(&mut self, quest_id: &QuestId) -> SaveOutcome {
        self.retry_load().await;
        let next = domain::complete_quest(&self.record, quest_id, &self.skill_table);
        if next == self.record {
            tracing::debug!(quest_id = %quest_id, "Quest unknown or already done, ignoring");
        }
        self.commit(next).await
    }

    /// Adds a one-time quest worth `experience_reward`, or
    /// [`DEFAULT_QUEST_REWARD`] when none is given.
    ///
    /// # Errors
    ///
    /// `InvalidQuestTitle` for blank titles; nothing is saved.
    pub async fn add_quest(
        &mut self,
        title: &str,
        experience_reward: Option<u64>,
    ) -> Result<SaveOutcome, DomainError> {
        self.retry_load().await;
        let reward = experience_reward.unwrap_or(DEFAULT_QUEST_REWARD);
        let next = domain::add_quest(&self.record, title, reward, || {
            self.quest_ids.next_quest_id()
        })?;
        Ok(self.commit(next).await)
    }

    pub async fn reset_daily_quests(&mut self) -> SaveOutcome {
        self.retry_load().await;
        let next = domain::reset_daily_quests(&self.record);
        self.commit(next).await
    }

    /// Grants a skill outside the unlock table.
    pub async fn grant_skill(&mut self, skill: Skill) -> SaveOutcome {
        self.retry_load().await;
        let next = domain::grant_skill(&self.record, skill);
        self.commit(next).await
    }

    /// Retries a deferred save, if there is one.
    pub async fn flush(&mut self) -> SaveOutcome {
        self.retry_load().await;
        self.save_pending().await
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Retries the initial load while storage has not been read.
    ///
    /// A stored record read now replaces the stand-in, along with any changes
    /// made to it. If storage turns out to be empty or unreadable, the
    /// stand-in is kept and queued for saving.
    async fn retry_load(&mut self) {
        if self.load_error.is_none() {
            return;
        }
        let outcome = self.writer.gateway().load_or_default().await;
        match outcome {
            LoadOutcome::Unavailable { error, .. } => {
                self.load_error = Some(error);
            }
            LoadOutcome::Stored(stored) => {
                if self.revision > 0 {
                    tracing::warn!(
                        discarded_revisions = self.revision,
                        "Stored player record became readable, dropping changes made without it"
                    );
                }
                let normalized = normalize(&stored, &self.skill_table);
                self.pending_save = normalized != stored;
                if normalized != self.record {
                    self.record = normalized;
                    self.revision += 1;
                }
                self.load_error = None;
                tracing::info!(level = %self.record.level(), "Stored player record loaded");
            }
            LoadOutcome::Seeded(_) | LoadOutcome::Replaced { .. } => {
                self.pending_save = true;
                self.load_error = None;
            }
        }
    }

    async fn commit(&mut self, next: PlayerRecord) -> SaveOutcome {
        if next == self.record {
            return self.save_pending().await;
        }

        log_transition(&self.record, &next);
        self.record = next;
        self.revision += 1;
        self.pending_save = true;
        self.persist().await
    }

    async fn save_pending(&mut self) -> SaveOutcome {
        if self.load_error.is_none() && !self.pending_save {
            return SaveOutcome::Unchanged;
        }
        self.persist().await
    }

    async fn persist(&mut self) -> SaveOutcome {
        if let Some(error) = &self.load_error {
            tracing::debug!(revision = self.revision, "Storage not read yet, holding save");
            return SaveOutcome::Deferred(error.clone());
        }
        match self.writer.write(self.revision, &self.record).await {
            Ok(_) => {
                self.pending_save = false;
                SaveOutcome::Saved {
                    revision: self.revision,
                }
            }
            Err(e) => {
                tracing::warn!(
                    revision = self.revision,
                    error = %e,
                    "Save failed, keeping in-memory record and retrying on next change"
                );
                self.pending_save = true;
                SaveOutcome::Deferred(e)
            }
        }
    }
}

/// Rolls excess experience into levels and unlocks what the level reaches.
fn normalize(record: &PlayerRecord, table: &SkillUnlockTable) -> PlayerRecord {
    domain::unlock_eligible_skills(&domain::grant_experience(record, 0), table)
}

fn log_transition(before: &PlayerRecord, after: &PlayerRecord) {
    if after.level() > before.level() {
        tracing::info!(
            from = %before.level(),
            to = %after.level(),
            allocatable_points = after.allocatable_points(),
            "Level up"
        );
    }
    for skill in after.skills().iter().filter(|s| !before.has_skill(&s.id)) {
        tracing::info!(skill_id = %skill.id, name = %skill.name, "Skill unlocked");
    }
    for quest in after
        .quests()
        .iter()
        .filter(|q| q.is_done && before.quest(&q.id).is_some_and(|prev| !prev.is_done))
    {
        tracing::info!(quest_id = %quest.id, reward = quest.experience_reward, "Quest completed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{
        KeyValueStore, MockKeyValueStore, MockQuestIdGenerator, StorageError,
    };
    use crate::infrastructure::storage::InMemoryKeyValueStore;
    use crate::infrastructure::system::{FixedClock, FixedQuestIds};
    use chrono::{DateTime, TimeZone, Utc};
    use levelup_domain::{starter_record, Level, SkillId, Stat};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn created() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()
    }

    fn gateway_over(store: Arc<dyn KeyValueStore>) -> PersistenceGateway {
        PersistenceGateway::new(store, Arc::new(FixedClock(created())))
    }

    async fn open(store: Arc<dyn KeyValueStore>) -> PlayerSession {
        PlayerSession::open(gateway_over(store), Arc::new(FixedQuestIds("q-new"))).await
    }

    async fn stored(store: &InMemoryKeyValueStore) -> Option<PlayerRecord> {
        store
            .get("@player")
            .await
            .unwrap()
            .map(|raw| serde_json::from_str(&raw).unwrap())
    }

    fn store_with(record: &PlayerRecord) -> Arc<InMemoryKeyValueStore> {
        Arc::new(InMemoryKeyValueStore::with_entry(
            "@player",
            serde_json::to_string(record).unwrap(),
        ))
    }

    // -------------------------------------------------------------------------
    // Opening
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn empty_storage_opens_starter_record_pending_save() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let mut session = open(store.clone()).await;

        assert_eq!(session.record(), &starter_record(created()));
        assert!(session.has_pending_save());

        assert_eq!(session.flush().await, SaveOutcome::Saved { revision: 0 });
        assert!(!session.has_pending_save());
        assert_eq!(stored(&store).await, Some(starter_record(created())));
    }

    #[tokio::test]
    async fn stored_record_opens_clean() {
        let record = domain::grant_experience(&starter_record(created()), 40);
        let mut session = open(store_with(&record)).await;

        assert_eq!(session.record(), &record);
        assert!(!session.has_pending_save());
        assert_eq!(session.flush().await, SaveOutcome::Unchanged);
    }

    #[tokio::test]
    async fn open_normalizes_excess_experience_and_skills() {
        let raw = r#"{"level":1,"xp":250,"allocPoints":0,
            "stats":{"STR":5,"AGI":5,"END":5,"INT":5,"LUCK":1},
            "skills":[],"quests":[],"createdAt":1709280000000}"#;
        let store = Arc::new(InMemoryKeyValueStore::with_entry("@player", raw));
        let session = open(store).await;

        assert_eq!(session.record().level(), Level::new(2).unwrap());
        assert_eq!(session.record().experience(), 150);
        assert_eq!(session.record().allocatable_points(), 3);
        assert!(session.record().has_skill(&SkillId::new("s1")));
        assert!(session.has_pending_save());
    }

    #[tokio::test]
    async fn corrupt_storage_falls_back_and_is_overwritten() {
        let store = Arc::new(InMemoryKeyValueStore::with_entry("@player", "{broken"));
        let mut session = open(store.clone()).await;

        assert_eq!(session.record(), &starter_record(created()));
        assert!(session.flush().await.is_saved());
        assert_eq!(stored(&store).await, Some(starter_record(created())));
    }

    #[tokio::test]
    async fn unreadable_storage_is_never_overwritten_by_the_stand_in() {
        let mut stored_record = domain::grant_experience(&starter_record(created()), 5_000);
        stored_record = domain::unlock_eligible_skills(&stored_record, &DEFAULT_SKILL_TABLE);
        let payload = serde_json::to_string(&stored_record).unwrap();

        let reads = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&reads);
        let mut store = MockKeyValueStore::new();
        store.expect_get().returning(move |_| {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                return Err(StorageError::io("read", "device busy"));
            }
            Ok(Some(payload.clone()))
        });
        store.expect_set().times(0);

        let mut session = open(Arc::new(store)).await;
        assert!(session.load_error().is_some());
        assert!(!session.has_pending_save());
        assert_eq!(session.record(), &starter_record(created()));

        assert_eq!(session.flush().await, SaveOutcome::Unchanged);
        assert_eq!(session.record(), &stored_record);
        assert!(session.load_error().is_none());
        assert_eq!(reads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn saves_are_held_while_storage_stays_unreadable() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_get()
            .returning(|_| Err(StorageError::io("read", "device busy")));
        store.expect_set().times(0);

        let mut session = open(Arc::new(store)).await;

        assert!(session.flush().await.is_deferred());
        let outcome = session.complete_quest(&QuestId::new("q1")).await;
        assert!(outcome.is_deferred());
        assert_eq!(session.record().experience(), 40);
        assert!(session.load_error().is_some());
    }

    #[tokio::test]
    async fn stored_record_read_late_replaces_offline_changes() {
        let stored_record = domain::grant_experience(&starter_record(created()), 60);
        let payload = serde_json::to_string(&stored_record).unwrap();
        let reads = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&reads);
        let mut store = MockKeyValueStore::new();
        store.expect_get().returning(move |_| {
            if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                return Err(StorageError::io("read", "device busy"));
            }
            Ok(Some(payload.clone()))
        });
        store
            .expect_set()
            .withf(|_, value| {
                serde_json::from_str::<PlayerRecord>(value)
                    .map(|r| r.level().get() == 1 && r.experience() == 60 + 30)
                    .unwrap_or(false)
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let mut session = open(Arc::new(store)).await;
        // Read fails again: applied to the stand-in only.
        assert!(session.grant_experience(10).await.is_deferred());

        // Read succeeds: the stored record wins, then the completion applies.
        assert!(session.complete_quest(&QuestId::new("q3")).await.is_saved());
        assert_eq!(session.record().experience(), 90);
    }

    #[tokio::test]
    async fn empty_storage_found_late_saves_the_stand_in() {
        let reads = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&reads);
        let mut store = MockKeyValueStore::new();
        store.expect_get().returning(move |_| {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                return Err(StorageError::io("read", "device busy"));
            }
            Ok(None)
        });
        store.expect_set().times(1).returning(|_, _| Ok(()));

        let mut session = open(Arc::new(store)).await;

        assert!(session.flush().await.is_saved());
        assert!(!session.has_pending_save());
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn grant_experience_levels_unlocks_and_saves() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let mut session = open(store.clone()).await;

        let outcome = session.grant_experience(250).await;

        assert_eq!(outcome, SaveOutcome::Saved { revision: 1 });
        assert_eq!(session.record().level(), Level::new(2).unwrap());
        assert_eq!(session.record().experience(), 150);
        assert!(session.record().has_skill(&SkillId::new("s1")));
        assert_eq!(stored(&store).await.as_ref(), Some(session.record()));
    }

    #[tokio::test]
    async fn allocate_without_points_is_rejected_without_saving() {
        let payload = serde_json::to_string(&starter_record(created())).unwrap();
        let mut store = MockKeyValueStore::new();
        store
            .expect_get()
            .returning(move |_| Ok(Some(payload.clone())));
        store.expect_set().times(0);

        let mut session = open(Arc::new(store)).await;
        let before = session.record().clone();

        assert_eq!(
            session.allocate_stat("STR").await,
            Err(DomainError::InsufficientPoints)
        );
        assert_eq!(session.record(), &before);
        assert_eq!(session.revision(), 0);
    }

    #[tokio::test]
    async fn allocate_spends_point_and_saves() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let mut session = open(store.clone()).await;
        session.grant_experience(100).await;

        let outcome = session.allocate_stat("int").await.unwrap();

        assert!(outcome.is_saved());
        assert_eq!(session.record().stat(Stat::Intelligence), 6);
        assert_eq!(session.record().allocatable_points(), 2);
        assert_eq!(
            session.allocate_stat("CHA").await,
            Err(DomainError::InvalidStat("CHA".to_string()))
        );
    }

    #[tokio::test]
    async fn complete_quest_grants_reward_once() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let mut session = open(store.clone()).await;
        let push_workout = QuestId::new("q2");

        assert!(session.complete_quest(&push_workout).await.is_saved());
        assert_eq!(session.record().experience(), 70);
        assert!(session.record().quest(&push_workout).unwrap().is_done);
        assert!(session.record().skills().is_empty());

        let revision = session.revision();
        assert_eq!(session.complete_quest(&push_workout).await, SaveOutcome::Unchanged);
        assert_eq!(session.record().experience(), 70);
        assert_eq!(session.revision(), revision);
    }

    #[tokio::test]
    async fn unknown_quest_is_ignored() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let mut session = open(store).await;
        session.flush().await;

        assert_eq!(
            session.complete_quest(&QuestId::new("missing")).await,
            SaveOutcome::Unchanged
        );
        assert_eq!(session.revision(), 0);
    }

    #[tokio::test]
    async fn add_quest_generates_unique_ids() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let mut session = open(store.clone()).await;

        session.add_quest("Stretch", Some(20)).await.unwrap();
        session.add_quest("Stretch again", None).await.unwrap();

        let quests = session.record().quests();
        assert_eq!(quests.len(), 5);
        assert_eq!(quests[3].id, QuestId::new("q-new"));
        assert_eq!(quests[3].experience_reward, 20);
        assert_eq!(quests[4].id, QuestId::new("q-new-1"));
        assert_eq!(quests[4].experience_reward, DEFAULT_QUEST_REWARD);
        assert!(!quests[4].is_daily);
        assert_eq!(stored(&store).await.as_ref(), Some(session.record()));
    }

    #[tokio::test]
    async fn add_quest_with_blank_title_is_rejected() {
        let mut ids = MockQuestIdGenerator::new();
        ids.expect_next_quest_id().times(0);
        let store: Arc<dyn KeyValueStore> = Arc::new(InMemoryKeyValueStore::new());
        let mut session = PlayerSession::open(gateway_over(store), Arc::new(ids)).await;

        assert_eq!(
            session.add_quest("   ", None).await,
            Err(DomainError::InvalidQuestTitle)
        );
        assert_eq!(session.record().quests().len(), 3);
        assert_eq!(session.revision(), 0);
    }

    #[tokio::test]
    async fn reset_daily_quests_clears_completion() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let mut session = open(store.clone()).await;
        session.add_quest("One-off", Some(10)).await.unwrap();
        let one_off = session.record().quests()[3].id.clone();
        session.complete_quest(&QuestId::new("q1")).await;
        session.complete_quest(&one_off).await;

        assert!(session.reset_daily_quests().await.is_saved());

        assert!(!session.record().quest(&QuestId::new("q1")).unwrap().is_done);
        assert!(session.record().quest(&one_off).unwrap().is_done);
        assert_eq!(stored(&store).await.as_ref(), Some(session.record()));
    }

    #[tokio::test]
    async fn grant_skill_is_saved_once() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let mut session = open(store).await;
        let skill = Skill::new("bonus", "Second Wind");

        assert!(session.grant_skill(skill.clone()).await.is_saved());
        assert_eq!(session.grant_skill(skill).await, SaveOutcome::Unchanged);
        assert_eq!(session.record().skills().len(), 1);
    }

    // -------------------------------------------------------------------------
    // Save failures and ordering
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn failed_save_is_deferred_and_retried_on_next_change() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let writes = Arc::clone(&attempts);
        let mut store = MockKeyValueStore::new();
        store.expect_get().returning(|_| Ok(None));
        store.expect_set().times(2).returning(move |_, value| {
            if writes.fetch_add(1, Ordering::SeqCst) == 0 {
                return Err(StorageError::io("write", "storage offline"));
            }
            let record: PlayerRecord = serde_json::from_str(value).unwrap();
            assert_eq!(record.experience(), 50);
            Ok(())
        });

        let mut session = open(Arc::new(store)).await;

        let outcome = session.grant_experience(50).await;
        assert!(outcome.is_deferred());
        assert_eq!(session.record().experience(), 50);
        assert!(session.has_pending_save());

        // No change to the record, but the pending write goes out.
        let outcome = session.reset_daily_quests().await;
        assert_eq!(outcome, SaveOutcome::Saved { revision: 1 });
        assert!(!session.has_pending_save());
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn writer_never_lets_older_revision_win() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let writer = RecordWriter::new(gateway_over(store.clone()));
        let older = starter_record(created());
        let newer = domain::grant_experience(&older, 60);

        assert_eq!(writer.write(2, &newer).await, Ok(WriteStatus::Written));
        assert_eq!(writer.write(1, &older).await, Ok(WriteStatus::Superseded));
        assert_eq!(stored(&store).await, Some(newer));
    }

    #[tokio::test]
    async fn concurrent_writes_keep_newest_revision() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let writer = RecordWriter::new(gateway_over(store.clone()));
        let base = starter_record(created());

        let mut handles = Vec::new();
        for revision in (1..=8u64).rev() {
            let writer = writer.clone();
            let record = domain::grant_experience(&base, revision);
            handles.push(tokio::spawn(async move {
                writer.write(revision, &record).await
            }));
        }
        for handle in handles {
            assert!(handle.await.unwrap().is_ok());
        }

        assert_eq!(stored(&store).await.map(|r| r.experience()), Some(8));
    }
}
