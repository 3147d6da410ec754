pub mod compare;
pub mod loan;
pub mod modes;
pub mod session;
