use chrono::{Datelike, NaiveDate};

use crate::domain::index::Index;

pub const FORM_URL: &str =
    "https://www3.bcb.gov.br/CALCIDADAO/publico/corrigirPorIndice.do?method=corrigirPorIndice";

/// Renders a date the way the form's period fields expect it: zero-padded
/// month, slash, four-digit year. The day is dropped here.
pub fn format_period(date: NaiveDate) -> String {
    format!("{:02}/{}", date.month(), date.year())
}

/// Renders an amount with two decimal digits and the comma separator the
/// form expects.
pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount).replace('.', ",")
}

/// Builds the complete field set for one correction request. The payload is
/// fresh per call; `aba` is the form-mode flag and `idIndice` /
/// `nomeIndicePeriodo` are transmitted empty, as the form itself does.
pub fn build_form(
    index: Index,
    amount: f64,
    original_date: NaiveDate,
    final_date: NaiveDate,
) -> Vec<(&'static str, String)> {
    vec![
        ("aba", "1".to_string()),
        ("selIndice", index.code().to_string()),
        ("idIndice", String::new()),
        ("nomeIndicePeriodo", String::new()),
        ("dataInicial", format_period(original_date)),
        ("dataFinal", format_period(final_date)),
        ("valorCorrecao", format_amount(amount)),
    ]
}
