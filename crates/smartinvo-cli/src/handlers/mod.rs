pub mod config;
pub mod dashboard;
pub mod health;
pub mod model;
pub mod recommend;
pub mod shelf_life;
pub mod stats;
pub mod steps;
pub mod weather;
