//! Client for Banco Central do Brasil's "Calculadora do Cidadão": adjusts an
//! amount in Brazilian Reais for inflation between two dates by submitting
//! the public correction form and parsing the returned result table.

mod application;
mod domain;
mod infrastructure;

pub use application::calculator::{AsyncCalculator, Calculator};
pub use domain::error::{AppError, Result};
pub use domain::index::Index;
pub use domain::value::{Adjustment, Value};
