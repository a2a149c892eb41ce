// Single source of truth for all default values.

// --- Paths ---
pub const DEFAULT_ROOT_PATH: &str = ".";
pub const DEFAULT_DATA_DIRECTORY: &str = "data";
pub const DEFAULT_FEATURES_FILE: &str = "features.bin";
pub const DEFAULT_CHECKPOINT_DIRECTORY: &str = "checkpoints";
pub const DEFAULT_CHECKPOINT_FILE: &str = "codebook.json";
pub const DEFAULT_POOL_FILE: &str = "pool.json";

// --- Query ---
pub const DEFAULT_BUDGET: usize = 5_000;
pub const DEFAULT_BATCH_SIZE: usize = 128;
pub const DEFAULT_PARALLEL_SCORING: bool = true;
pub const DEFAULT_RESTORE_CHECKPOINT: bool = true;
pub const DEFAULT_ROUNDS: u32 = 1;

// --- Model ---
pub const DEFAULT_NUM_HIDDENS: usize = 128;
pub const DEFAULT_NUM_RESIDUAL_LAYERS: usize = 2;
pub const DEFAULT_NUM_RESIDUAL_HIDDENS: usize = 32;
pub const DEFAULT_NUM_EMBEDDINGS: usize = 512;
pub const DEFAULT_EMBEDDING_DIM: usize = 64;
pub const DEFAULT_COMMITMENT_COST: f64 = 0.25;
pub const DEFAULT_DECAY: f64 = 0.99;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
