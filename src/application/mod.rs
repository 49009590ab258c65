pub mod calculator;

pub use calculator::{AsyncCalculator, Calculator};
