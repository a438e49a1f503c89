use crate::database::connection::{DatabaseError, SqlitePooledConnection};
use crate::database::models::{Instrument, NewInstrument};
use crate::database::schema::stocks;
use diesel::prelude::*;
use std::sync::Arc;

/// Instrument repository trait - defines interface for catalog operations
pub trait InstrumentRepository: Send + Sync {
    /// All FIGIs currently stored, in insertion-independent catalog order
    fn figis(&self) -> Result<Vec<String>, DatabaseError>;

    /// Get all instruments
    fn get_all(&self) -> Result<Vec<Instrument>, DatabaseError>;

    /// Insert a new instrument row
    ///
    /// The catalog is insert-only; the sync job skips FIGIs that already
    /// exist instead of updating them.
    fn insert(&self, new_instrument: NewInstrument) -> Result<usize, DatabaseError>;
}

/// Concrete implementation of InstrumentRepository
///
/// Holds a connection provider rather than a pool so the storage wiring
/// stays swappable.
pub struct InstrumentRepositoryImpl {
    get_conn: Arc<dyn Fn() -> Result<SqlitePooledConnection, DatabaseError> + Send + Sync>,
}

impl InstrumentRepositoryImpl {
    /// Create new instrument repository with connection provider
    pub fn new<F>(get_conn: F) -> Self
    where
        F: Fn() -> Result<SqlitePooledConnection, DatabaseError> + Send + Sync + 'static,
    {
        Self {
            get_conn: Arc::new(get_conn),
        }
    }
}

impl InstrumentRepository for InstrumentRepositoryImpl {
    fn figis(&self) -> Result<Vec<String>, DatabaseError> {
        let mut conn = (self.get_conn)()?;

        stocks::table
            .select(stocks::figi)
            .order(stocks::figi.asc())
            .load::<String>(&mut conn)
            .map_err(DatabaseError::from)
    }

    fn get_all(&self) -> Result<Vec<Instrument>, DatabaseError> {
        let mut conn = (self.get_conn)()?;

        stocks::table
            .order(stocks::ticker.asc())
            .load::<Instrument>(&mut conn)
            .map_err(DatabaseError::from)
    }

    fn insert(&self, new_instrument: NewInstrument) -> Result<usize, DatabaseError> {
        let mut conn = (self.get_conn)()?;

        diesel::insert_into(stocks::table)
            .values(&new_instrument)
            .execute(&mut conn)
            .map_err(DatabaseError::from)
    }
}
