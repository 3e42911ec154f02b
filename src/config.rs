// Dataset
pub const TOTAL_WORDS: usize = 30000; // rows read from the feature array
pub const TRAIN_FRACTION: f64 = 0.7; // prefix of the rows used for training
pub const DEFAULT_DATA_PATH: &str = "resources/frequencies.npy";

// Feature encoding: one past the last CJK unified ideograph (U+9FA5)
pub const FEATURE_SCALE: f32 = 0x9fa6 as f32;
pub const CJK_FIRST: u32 = 0x4e00;
pub const CJK_LAST: u32 = 0x9fa5;

// Training
pub const BATCH_SIZE: usize = 50;
pub const LEARNING_RATE: f64 = 1e-3;
pub const ADAM_BETA_1: f32 = 0.9;
pub const ADAM_BETA_2: f32 = 0.999;
pub const ADAM_EPSILON: f32 = 1e-8;

// Synthetic source
pub const SYNTHETIC_WORD_SIZE: usize = 30;
pub const SYNTHETIC_SEED: u64 = 42;
