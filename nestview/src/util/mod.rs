/// Set of functions used throughout to assure the correctness of the library.
pub mod assertions;

pub mod units;
