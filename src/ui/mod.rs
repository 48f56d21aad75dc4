pub mod chart;
pub mod filters;
pub mod overview;
pub mod panels;
pub mod story;
