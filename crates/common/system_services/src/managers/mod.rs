mod general_manager;

pub use self::general_manager::*;
