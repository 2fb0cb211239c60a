pub mod aggregate;
pub mod attendance;
pub mod context;
pub mod hours;
pub mod roster;
pub mod scanner;
pub mod submit;
pub mod take;
pub mod writer;
