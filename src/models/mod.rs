pub mod hours;
pub mod identity;
pub mod record;
pub mod response;
pub mod session;
pub mod status;
