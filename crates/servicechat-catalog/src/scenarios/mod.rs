pub mod business_registration;
pub mod change_address;
pub mod new_arrival;
pub mod new_baby;
pub mod storm_damage;
