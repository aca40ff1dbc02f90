pub mod claim;
pub mod export;
pub mod finder;
pub mod health;
pub mod item;
