/// Repository pattern implementations over the SQLite store
///
/// Each repository handles one entity type and is defined as a trait so the
/// jobs can be exercised against lightweight test doubles.

pub mod candle_repository;
pub mod instrument_repository;

pub use candle_repository::{CandleRepository, CandleRepositoryImpl};
pub use instrument_repository::{InstrumentRepository, InstrumentRepositoryImpl};
