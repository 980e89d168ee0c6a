//! PostgreSQL implementation of SpeakerRepository.

use crate::schema::{activities, speakers};
use crate::{PgPool, SpeakerColumns, SpeakerRow};
use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use podium_core::{Speaker, SpeakerDraft};
use podium_error::{
    DatabaseError, DatabaseErrorKind, PodiumResult, SpeakerError, SpeakerErrorKind,
};
use podium_interface::{SpeakerFilter, SpeakerRepository};

/// PostgreSQL speaker repository using Diesel over an r2d2 pool.
///
/// Diesel is blocking, so every call checks out a connection inside
/// `tokio::task::spawn_blocking`. Multi-row and update writes run in a
/// transaction.
///
/// # Example
/// ```no_run
/// use podium_database::{establish_pool, run_migrations, PostgresSpeakerRepository};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = establish_pool()?;
/// run_migrations(&pool)?;
/// let repo = PostgresSpeakerRepository::new(pool);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct PostgresSpeakerRepository {
    pool: PgPool,
}

impl PostgresSpeakerRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run<T, F>(&self, f: F) -> PodiumResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> PodiumResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();

        tokio::task::spawn_blocking(move || {
            let mut conn = pool
                .get()
                .map_err(|e| DatabaseError::new(DatabaseErrorKind::Connection(e.to_string())))?;
            f(&mut conn)
        })
        .await
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Query(e.to_string())))?
    }
}

fn into_speakers(rows: Vec<SpeakerRow>) -> PodiumResult<Vec<Speaker>> {
    rows.into_iter().map(SpeakerRow::into_speaker).collect()
}

#[async_trait]
impl SpeakerRepository for PostgresSpeakerRepository {
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: i32) -> PodiumResult<Option<Speaker>> {
        self.run(move |conn| {
            let row = speakers::table
                .find(id)
                .select(SpeakerRow::as_select())
                .first::<SpeakerRow>(conn)
                .optional()
                .map_err(DatabaseError::from)?;
            row.map(SpeakerRow::into_speaker).transpose()
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self, filter: SpeakerFilter) -> PodiumResult<Vec<Speaker>> {
        self.run(move |conn| {
            let mut query = speakers::table.select(SpeakerRow::as_select()).into_boxed();
            if let Some(activity_id) = filter.activity_id {
                query = query.filter(speakers::activity_id.eq(activity_id));
            }
            let rows = query
                .order((speakers::sort_order.asc(), speakers::name.asc()))
                .load::<SpeakerRow>(conn)
                .map_err(DatabaseError::from)?;
            into_speakers(rows)
        })
        .await
    }

    #[tracing::instrument(skip(self, draft))]
    async fn insert(&self, draft: &SpeakerDraft) -> PodiumResult<Speaker> {
        let columns = SpeakerColumns::from(draft);
        let speaker = self
            .run(move |conn| {
                diesel::insert_into(speakers::table)
                    .values(&columns)
                    .returning(SpeakerRow::as_returning())
                    .get_result::<SpeakerRow>(conn)
                    .map_err(DatabaseError::from)?
                    .into_speaker()
            })
            .await?;

        tracing::info!(speaker_id = speaker.id(), "Inserted speaker row");
        Ok(speaker)
    }

    #[tracing::instrument(skip(self, drafts), fields(count = drafts.len()))]
    async fn insert_many(&self, drafts: &[SpeakerDraft]) -> PodiumResult<Vec<Speaker>> {
        let columns: Vec<SpeakerColumns> = drafts.iter().map(SpeakerColumns::from).collect();
        self.run(move |conn| {
            let rows = conn
                .transaction::<_, diesel::result::Error, _>(|conn| {
                    diesel::insert_into(speakers::table)
                        .values(&columns)
                        .returning(SpeakerRow::as_returning())
                        .get_results::<SpeakerRow>(conn)
                })
                .map_err(DatabaseError::from)?;
            into_speakers(rows)
        })
        .await
    }

    #[tracing::instrument(skip(self, speaker), fields(speaker_id = speaker.id()))]
    async fn update(&self, speaker: &Speaker) -> PodiumResult<Speaker> {
        let id = *speaker.id();
        let columns = SpeakerColumns::from(speaker);
        self.run(move |conn| {
            let row = conn
                .transaction::<_, diesel::result::Error, _>(|conn| {
                    diesel::update(speakers::table.find(id))
                        .set(&columns)
                        .returning(SpeakerRow::as_returning())
                        .get_result::<SpeakerRow>(conn)
                        .optional()
                })
                .map_err(DatabaseError::from)?;
            match row {
                Some(row) => row.into_speaker(),
                None => Err(SpeakerError::new(SpeakerErrorKind::NotFound(id)).into()),
            }
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: i32) -> PodiumResult<Speaker> {
        self.run(move |conn| {
            let row = diesel::delete(speakers::table.find(id))
                .returning(SpeakerRow::as_returning())
                .get_result::<SpeakerRow>(conn)
                .optional()
                .map_err(DatabaseError::from)?;
            match row {
                Some(row) => row.into_speaker(),
                None => Err(SpeakerError::new(SpeakerErrorKind::NotFound(id)).into()),
            }
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn activity_exists(&self, activity_id: i32) -> PodiumResult<bool> {
        self.run(move |conn| {
            diesel::select(exists(activities::table.find(activity_id)))
                .get_result::<bool>(conn)
                .map_err(|e| DatabaseError::from(e).into())
        })
        .await
    }
}
