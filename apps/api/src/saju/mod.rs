pub mod chart;
pub mod ganji;
pub mod handlers;
pub mod input;
pub mod pillars;
