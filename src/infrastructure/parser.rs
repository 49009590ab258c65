use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

use crate::domain::value::{Adjustment, Value};

static WHITESPACE_RUN_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

static VALUE_NOISE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\d,/%]").unwrap());

/// Collapses whitespace runs (including newlines) into single spaces and
/// trims the result. Idempotent on already-clean labels.
pub fn clean_label(text: &str) -> String {
    WHITESPACE_RUN_PATTERN
        .replace_all(text, " ")
        .trim()
        .to_string()
}

/// Classifies a raw value cell. Everything but digits, comma, slash and
/// percent is stripped first; percent rows carry no usable value and rows
/// that reduce to nothing are dropped. A remnant that fails number or period
/// parsing is kept as cleaned text rather than rejected.
pub fn clean_value(text: &str) -> Option<Value> {
    let cleaned = VALUE_NOISE_PATTERN.replace_all(text, "").to_string();

    if cleaned.contains('%') {
        return None;
    }

    if cleaned.contains(',') {
        return match cleaned.replace(',', ".").parse::<f64>() {
            Ok(number) => Some(Value::Number(number)),
            Err(_) => Some(Value::Text(cleaned)),
        };
    }

    if cleaned.contains('/') {
        return match parse_period(&cleaned) {
            Some(date) => Some(Value::Date(date)),
            None => Some(Value::Text(cleaned)),
        };
    }

    if cleaned.is_empty() {
        None
    } else {
        Some(Value::Text(cleaned))
    }
}

// Periods come back as MM/YYYY; the table never shows a day.
fn parse_period(text: &str) -> Option<NaiveDate> {
    let mut parts = text.split('/');
    let month = parts.next()?.parse::<u32>().ok()?;
    let year = parts.next()?.parse::<i32>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Extracts the label/value table from a correction response. The site marks
/// both columns with the same cell class, so cells are taken in document
/// order and paired consecutively: even index = label, next cell = value. An
/// unpaired trailing cell is ignored, and rows without a usable value are
/// dropped.
pub fn parse(html: &str) -> Adjustment {
    let document = Html::parse_document(html);
    let marker_cells = Selector::parse("td.fundoPadraoAClaro3").unwrap();

    let texts: Vec<String> = document
        .select(&marker_cells)
        .map(|cell| cell.text().collect::<String>())
        .collect();

    let mut adjustment = Adjustment::new();
    for pair in texts.chunks(2) {
        if pair.len() < 2 {
            break;
        }
        if let Some(value) = clean_value(&pair[1]) {
            adjustment.insert(clean_label(&pair[0]), value);
        }
    }

    adjustment
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_label_collapses_whitespace() {
        assert_eq!(clean_label("  Valor   Corrigido\n "), "Valor Corrigido");
    }

    #[test]
    fn test_clean_label_is_idempotent() {
        assert_eq!(clean_label("Valor Corrigido"), "Valor Corrigido");
    }

    #[test]
    fn test_clean_value_percent_is_unusable() {
        assert_eq!(clean_value("5,23%"), None);
        assert_eq!(clean_value("Percentual: 12,34 %"), None);
    }

    #[test]
    fn test_clean_value_parses_comma_number() {
        assert_eq!(clean_value("1.234,56"), Some(Value::Number(1234.56)));
        assert_eq!(clean_value("R$ 1.000,00"), Some(Value::Number(1000.0)));
    }

    #[test]
    fn test_clean_value_zero_is_retained() {
        assert_eq!(clean_value("0,00"), Some(Value::Number(0.0)));
        assert_eq!(clean_value("0"), Some(Value::Text("0".to_string())));
    }

    #[test]
    fn test_clean_value_parses_period() {
        assert_eq!(
            clean_value("03/1990"),
            Some(Value::Date(NaiveDate::from_ymd_opt(1990, 3, 1).unwrap()))
        );
    }

    #[test]
    fn test_clean_value_empty_is_absent() {
        assert_eq!(clean_value(""), None);
        assert_eq!(clean_value("  \n "), None);
    }

    #[test]
    fn test_clean_value_plain_digits_stay_text() {
        assert_eq!(clean_value("nº 12345"), Some(Value::Text("12345".to_string())));
    }

    #[test]
    fn test_clean_value_unparseable_remnants_stay_text() {
        assert_eq!(clean_value("1,2,3"), Some(Value::Text("1,2,3".to_string())));
        assert_eq!(clean_value("1/2/3"), Some(Value::Text("1/2/3".to_string())));
        assert_eq!(clean_value("13/1990"), Some(Value::Text("13/1990".to_string())));
    }

    #[test]
    fn test_parse_without_marker_cells_is_empty() {
        let html = "<html><body><table><td>Data</td><td>01/1990</td></table></body></html>";
        assert!(parse(html).is_empty());
    }

    #[test]
    fn test_parse_pairs_marker_cells() {
        let html = r#"<html><body><table>
            <tr>
                <td class="fundoPadraoAClaro3">Data</td>
                <td class="fundoPadraoAClaro3">01/1990</td>
            </tr>
            <tr>
                <td class="fundoPadraoAClaro3">Valor   Corrigido</td>
                <td class="fundoPadraoAClaro3">1.000,00</td>
            </tr>
        </table></body></html>"#;

        let adjustment = parse(html);
        assert_eq!(adjustment.len(), 2);
        assert_eq!(
            adjustment.get("Data"),
            Some(&Value::Date(NaiveDate::from_ymd_opt(1990, 1, 1).unwrap()))
        );
        assert_eq!(
            adjustment.get("Valor Corrigido"),
            Some(&Value::Number(1000.0))
        );
    }

    #[test]
    fn test_parse_drops_percent_rows() {
        let html = r#"<table>
            <td class="fundoPadraoAClaro3">Percentual</td>
            <td class="fundoPadraoAClaro3">12,34%</td>
            <td class="fundoPadraoAClaro3">Valor corrigido</td>
            <td class="fundoPadraoAClaro3">1.123,40</td>
        </table>"#;

        let adjustment = parse(html);
        assert_eq!(adjustment.get("Percentual"), None);
        assert_eq!(
            adjustment.get("Valor corrigido"),
            Some(&Value::Number(1123.4))
        );
    }

    #[test]
    fn test_parse_ignores_cells_without_marker_class() {
        let html = r#"<table>
            <td class="tituloPagina">Resultado</td>
            <td class="fundoPadraoAClaro3">Data</td>
            <td class="fundoPadraoAClaro3">02/1995</td>
        </table>"#;

        let adjustment = parse(html);
        assert_eq!(adjustment.len(), 1);
        assert_eq!(
            adjustment.get("Data"),
            Some(&Value::Date(NaiveDate::from_ymd_opt(1995, 2, 1).unwrap()))
        );
    }

    #[test]
    fn test_parse_ignores_unpaired_trailing_cell() {
        let html = r#"<table>
            <td class="fundoPadraoAClaro3">Data</td>
            <td class="fundoPadraoAClaro3">01/1990</td>
            <td class="fundoPadraoAClaro3">Sobra</td>
        </table>"#;

        let adjustment = parse(html);
        assert_eq!(adjustment.len(), 1);
        assert_eq!(adjustment.get("Sobra"), None);
    }

    #[test]
    fn test_parse_collapses_newlines_inside_cells() {
        let html = "<table><td class=\"fundoPadraoAClaro3\">Valor\n  corrigido</td>\
                    <td class=\"fundoPadraoAClaro3\">\n  2,50\n</td></table>";

        let adjustment = parse(html);
        assert_eq!(adjustment.get("Valor corrigido"), Some(&Value::Number(2.5)));
    }

    #[test]
    fn test_parse_repeated_label_keeps_last_value() {
        let html = r#"<table>
            <td class="fundoPadraoAClaro3">Valor</td>
            <td class="fundoPadraoAClaro3">1,00</td>
            <td class="fundoPadraoAClaro3">Valor</td>
            <td class="fundoPadraoAClaro3">2,00</td>
        </table>"#;

        let adjustment = parse(html);
        assert_eq!(adjustment.len(), 1);
        assert_eq!(adjustment.get("Valor"), Some(&Value::Number(2.0)));
    }
}
