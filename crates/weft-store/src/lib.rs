pub mod cut_db;
pub mod error;
pub mod header_db;
pub mod payload_store;

pub use cut_db::CutDb;
pub use error::StoreError;
pub use header_db::{ChainHeaderDb, WebHeaderDb};
pub use payload_store::PayloadStore;
