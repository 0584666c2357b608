pub mod errors;
pub mod inheritance;
pub mod multicast;
pub mod ordering;
pub mod scenarios;
pub mod test_utils;
