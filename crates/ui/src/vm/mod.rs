mod score_vm;

pub use score_vm::{ScoreRowVm, map_score_rows};
