pub mod mirror;
pub mod postgres;

pub use mirror::{MirrorStore, PgMirrorStore};
pub use postgres::create_pool;
