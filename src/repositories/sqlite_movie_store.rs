// src/repositories/sqlite_movie_store.rs
//
// SQLite-backed Local Store
//
// Writes run in BEGIN IMMEDIATE transactions so competing writers on the
// same rows queue behind SQLite's write lock; readers in WAL mode keep
// seeing the last committed state while a write is in flight.

use std::sync::Arc;

use chrono::Utc;
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row, TransactionBehavior};
use tokio::sync::broadcast;

use crate::db::{get_connection, ConnectionPool};
use crate::domain::Category;
use crate::error::{AppError, AppResult};
use crate::repositories::movie_store::{
    CategoryBuilder, DetailsBuilder, FavouriteLookup, FavouriteUpdate, MovieStore, StoreChange,
};
use crate::repositories::records::{MovieDetailsEntity, MovieEntity};

/// Buffered change notifications per subscriber before it lags.
const CHANGE_CHANNEL_CAPACITY: usize = 64;

const MOVIE_COLUMNS: &str =
    "id, title, poster_url, release_year, average_rating, category, is_favourite";

const DETAILS_COLUMNS: &str = "id, title, poster_url, backdrop_url, tagline, release_year, \
     average_rating, vote_count, overview, genres, is_favourite";

pub struct SqliteMovieStore {
    pool: Arc<ConnectionPool>,
    changes: broadcast::Sender<StoreChange>,
}

impl SqliteMovieStore {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self { pool, changes }
    }

    fn notify(&self, change: StoreChange) {
        // No receivers just means nobody is watching right now
        let _ = self.changes.send(change);
    }

    /// Map database row to MovieEntity - returns rusqlite::Error for query_map compatibility
    fn row_to_movie(row: &Row) -> Result<MovieEntity, rusqlite::Error> {
        let category: String = row.get("category")?;
        let category = category
            .parse::<Category>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?;

        Ok(MovieEntity {
            id: row.get("id")?,
            title: row.get("title")?,
            poster_url: row.get("poster_url")?,
            release_year: row.get("release_year")?,
            average_rating: row.get("average_rating")?,
            category,
            is_favourite: row.get("is_favourite")?,
        })
    }

    fn row_to_details(row: &Row) -> Result<MovieDetailsEntity, rusqlite::Error> {
        Ok(MovieDetailsEntity {
            id: row.get("id")?,
            title: row.get("title")?,
            poster_url: row.get("poster_url")?,
            backdrop_url: row.get("backdrop_url")?,
            tagline: row.get("tagline")?,
            release_year: row.get("release_year")?,
            average_rating: row.get("average_rating")?,
            vote_count: row.get("vote_count")?,
            overview: row.get("overview")?,
            genres: row.get("genres")?,
            is_favourite: row.get("is_favourite")?,
        })
    }

    fn query_movies(&self, sql: &str, args: &[&dyn rusqlite::ToSql]) -> AppResult<Vec<MovieEntity>> {
        let conn = get_connection(&self.pool)?;
        let mut stmt = conn.prepare(sql)?;

        let movies: Vec<MovieEntity> = stmt
            .query_map(args, Self::row_to_movie)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(movies)
    }
}

/// Favourite flag for `id` across both tables, read on the given connection.
fn favourite_of(conn: &Connection, id: i64) -> rusqlite::Result<Option<bool>> {
    conn.query_row(
        "SELECT MAX(is_favourite) FROM (
             SELECT is_favourite FROM movies WHERE id = ?1
             UNION ALL
             SELECT is_favourite FROM movie_details WHERE id = ?1
         )",
        params![id],
        |row| row.get::<_, Option<bool>>(0),
    )
}

fn update_movie_favourite(conn: &Connection, id: i64, is_favourite: bool) -> rusqlite::Result<usize> {
    conn.execute(
        "UPDATE movies SET is_favourite = ?2 WHERE id = ?1",
        params![id, is_favourite],
    )
}

fn update_details_favourite(
    conn: &Connection,
    id: i64,
    is_favourite: bool,
) -> rusqlite::Result<usize> {
    conn.execute(
        "UPDATE movie_details SET is_favourite = ?2 WHERE id = ?1",
        params![id, is_favourite],
    )
}

struct TxFavourites<'c> {
    conn: &'c Connection,
}

impl FavouriteLookup for TxFavourites<'_> {
    fn favourite_of(&self, id: i64) -> AppResult<Option<bool>> {
        Ok(favourite_of(self.conn, id)?)
    }
}

impl MovieStore for SqliteMovieStore {
    fn replace_category(
        &self,
        category: Category,
        build: &mut CategoryBuilder<'_>,
    ) -> AppResult<usize> {
        let mut conn = get_connection(&self.pool)?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        // Read-before-write happens under the same write lock as the replace
        let movies = build(&TxFavourites { conn: &tx })?;
        let fetched_at = Utc::now().to_rfc3339();

        tx.execute(
            "DELETE FROM movies WHERE category = ?1",
            params![category.as_str()],
        )?;

        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO movies (
                    id, category, position, title, poster_url, release_year,
                    average_rating, is_favourite, fetched_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )?;

            for (position, movie) in movies.iter().enumerate() {
                stmt.execute(params![
                    movie.id,
                    category.as_str(),
                    position as i64,
                    movie.title,
                    movie.poster_url,
                    movie.release_year,
                    movie.average_rating,
                    movie.is_favourite,
                    fetched_at,
                ])?;
            }
        }

        tx.commit()?;
        self.notify(StoreChange::Movies);

        Ok(movies.len())
    }

    fn upsert_details(&self, build: &mut DetailsBuilder<'_>) -> AppResult<MovieDetailsEntity> {
        let mut conn = get_connection(&self.pool)?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let details = build(&TxFavourites { conn: &tx })?;

        tx.execute(
            "INSERT OR REPLACE INTO movie_details (
                id, title, poster_url, backdrop_url, tagline, release_year,
                average_rating, vote_count, overview, genres, is_favourite, fetched_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                details.id,
                details.title,
                details.poster_url,
                details.backdrop_url,
                details.tagline,
                details.release_year,
                details.average_rating,
                details.vote_count,
                details.overview,
                details.genres,
                details.is_favourite,
                Utc::now().to_rfc3339(),
            ],
        )?;

        tx.commit()?;
        self.notify(StoreChange::MovieDetails);

        Ok(details)
    }

    fn find_movie(&self, id: i64) -> AppResult<Option<MovieEntity>> {
        let conn = get_connection(&self.pool)?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM movies WHERE id = ?1 ORDER BY rowid LIMIT 1",
            MOVIE_COLUMNS
        ))?;

        match stmt.query_row(params![id], Self::row_to_movie) {
            Ok(movie) => Ok(Some(movie)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::from(e)),
        }
    }

    fn find_details(&self, id: i64) -> AppResult<Option<MovieDetailsEntity>> {
        let conn = get_connection(&self.pool)?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM movie_details WHERE id = ?1",
            DETAILS_COLUMNS
        ))?;

        match stmt.query_row(params![id], Self::row_to_details) {
            Ok(details) => Ok(Some(details)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::from(e)),
        }
    }

    fn list_by_category(&self, category: Category) -> AppResult<Vec<MovieEntity>> {
        self.query_movies(
            &format!(
                "SELECT {} FROM movies WHERE category = ?1 ORDER BY position",
                MOVIE_COLUMNS
            ),
            &[&category.as_str()],
        )
    }

    fn list_favourites(&self) -> AppResult<Vec<MovieEntity>> {
        self.query_movies(
            &format!(
                "SELECT {} FROM movies
                 WHERE rowid IN (SELECT MIN(rowid) FROM movies WHERE is_favourite = 1 GROUP BY id)
                 ORDER BY title COLLATE NOCASE, id",
                MOVIE_COLUMNS
            ),
            &[],
        )
    }

    fn search_titles(&self, needle: &str) -> AppResult<Vec<MovieEntity>> {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }

        // SQLite's LIKE only folds ASCII, so matching happens here
        let candidates = self.query_movies(
            &format!(
                "SELECT {} FROM movies
                 WHERE rowid IN (SELECT MIN(rowid) FROM movies GROUP BY id)
                 ORDER BY title COLLATE NOCASE, id",
                MOVIE_COLUMNS
            ),
            &[],
        )?;

        Ok(candidates
            .into_iter()
            .filter(|movie| movie.title.to_lowercase().contains(&needle))
            .collect())
    }

    fn set_movie_favourite(&self, id: i64, is_favourite: bool) -> AppResult<usize> {
        let conn = get_connection(&self.pool)?;
        let updated = update_movie_favourite(&conn, id, is_favourite)?;

        if updated > 0 {
            self.notify(StoreChange::Movies);
        }
        Ok(updated)
    }

    fn set_details_favourite(&self, id: i64, is_favourite: bool) -> AppResult<usize> {
        let conn = get_connection(&self.pool)?;
        let updated = update_details_favourite(&conn, id, is_favourite)?;

        if updated > 0 {
            self.notify(StoreChange::MovieDetails);
        }
        Ok(updated)
    }

    fn set_favourite(&self, id: i64, is_favourite: bool) -> AppResult<FavouriteUpdate> {
        let mut conn = get_connection(&self.pool)?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let update = FavouriteUpdate {
            summaries: update_movie_favourite(&tx, id, is_favourite)?,
            details: update_details_favourite(&tx, id, is_favourite)?,
        };

        tx.commit()?;

        if update.summaries > 0 {
            self.notify(StoreChange::Movies);
        }
        if update.details > 0 {
            self.notify(StoreChange::MovieDetails);
        }

        Ok(update)
    }

    fn changes(&self) -> broadcast::Receiver<StoreChange> {
        self.changes.subscribe()
    }
}
