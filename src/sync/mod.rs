pub mod pairing;
pub mod synchronizer;
