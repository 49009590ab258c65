use chrono::{Local, NaiveDate};

use crate::domain::error::Result;
use crate::domain::index::Index;
use crate::domain::value::Adjustment;
use crate::infrastructure::form::{build_form, format_period, FORM_URL};
use crate::infrastructure::parser;

/// Blocking client for the Calculadora do Cidadão correction form.
///
/// The index is validated once here, so a misconfigured calculator fails
/// before any network activity. Pass `verify_ssl = false` only when the
/// site's certificate chain cannot be verified locally.
pub struct Calculator {
    index: Index,
    client: reqwest::blocking::Client,
    url: String,
}

impl Calculator {
    pub fn new(index: Option<&str>, verify_ssl: bool) -> Result<Calculator> {
        let index = Index::validate(index)?;
        let client = reqwest::blocking::Client::builder()
            .danger_accept_invalid_certs(!verify_ssl)
            .build()?;

        Ok(Calculator {
            index,
            client,
            url: FORM_URL.to_string(),
        })
    }

    pub fn index(&self) -> Index {
        self.index
    }

    /// Adjusts `amount` from `original_date` to `final_date` (today when
    /// absent) and returns the parsed result table.
    pub fn adjust(
        &self,
        amount: f64,
        original_date: NaiveDate,
        final_date: Option<NaiveDate>,
    ) -> Result<Adjustment> {
        let final_date = final_date.unwrap_or_else(|| Local::now().date_naive());
        let form = build_form(self.index, amount, original_date, final_date);

        tracing::debug!(
            "Submitting correction form: index={}, period={}..{}",
            self.index.code(),
            format_period(original_date),
            format_period(final_date)
        );

        let response = self
            .client
            .post(&self.url)
            .form(&form)
            .send()?
            .error_for_status()?;
        let body = response.text()?;

        let adjustment = parser::parse(&body);
        tracing::debug!("Parsed {} result rows", adjustment.len());

        Ok(adjustment)
    }
}

/// Async variant of [`Calculator`]. Both run the same encode and parse
/// routines; this one only suspends at the network boundary, keeps all
/// per-call state local, and is safe to share across concurrent calls.
#[derive(Debug)]
pub struct AsyncCalculator {
    index: Index,
    client: reqwest::Client,
    url: String,
}

impl AsyncCalculator {
    pub fn new(index: Option<&str>, verify_ssl: bool) -> Result<AsyncCalculator> {
        let index = Index::validate(index)?;
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(!verify_ssl)
            .build()?;

        Ok(AsyncCalculator {
            index,
            client,
            url: FORM_URL.to_string(),
        })
    }

    pub fn index(&self) -> Index {
        self.index
    }

    pub async fn adjust(
        &self,
        amount: f64,
        original_date: NaiveDate,
        final_date: Option<NaiveDate>,
    ) -> Result<Adjustment> {
        let final_date = final_date.unwrap_or_else(|| Local::now().date_naive());
        let form = build_form(self.index, amount, original_date, final_date);

        tracing::debug!(
            "Submitting correction form: index={}, period={}..{}",
            self.index.code(),
            format_period(original_date),
            format_period(final_date)
        );

        let response = self
            .client
            .post(&self.url)
            .form(&form)
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;

        let adjustment = parser::parse(&body);
        tracing::debug!("Parsed {} result rows", adjustment.len());

        Ok(adjustment)
    }
}
