pub mod claim;
pub mod email;
pub mod finder;
pub mod item;
pub mod notifier;
