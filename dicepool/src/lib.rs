pub mod error;
pub mod pools;
pub mod random;
pub mod roll;
pub mod spec;

pub use error::{DiceError, ParseSpecError};
pub use num_bigint::BigUint;
pub use random::{MaxRandom, RandomSource, SeededRandom, SequentialRandom, ThreadRandom};
pub use roll::Results;
pub use spec::DiceSpec;
