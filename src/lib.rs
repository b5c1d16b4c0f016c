pub mod audit;
pub mod formula;
pub mod input;
pub mod report;
