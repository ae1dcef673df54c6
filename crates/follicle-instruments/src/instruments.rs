pub mod lifestyle;
pub mod pss10;
