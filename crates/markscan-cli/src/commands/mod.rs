pub mod regions;
pub mod scan;
