#![forbid(unsafe_code)]

pub mod repository;
pub mod supabase;

pub use repository::{
    Identity, IdentityProvider, InMemoryScoreRepository, NewScoreRecord, ScoreRecord,
    ScoreRepository, StaticIdentityProvider, Storage, StorageError,
};
pub use supabase::{SupabaseConfig, SupabaseIdentityProvider, SupabaseScoreRepository};
