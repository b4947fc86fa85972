pub mod application;
pub mod employer;
pub mod professional;
pub mod report;
pub mod service;
pub mod vacancy;
