use chrono::NaiveDate;
use url::form_urlencoded;

use crate::domain::{DateRange, RecordLimit};
use crate::errors::ServerError;

/// Filter controls carried in the query string:
/// `start` / `end` as `YYYY-MM-DD`, `limit` as `all` or a positive count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportQuery {
    pub range: DateRange,
    pub limit: RecordLimit,
}

impl ReportQuery {
    pub fn parse(query: Option<&str>) -> Result<Self, ServerError> {
        let Some(query) = query else {
            return Ok(Self::default());
        };

        let (mut start, mut end, mut limit) = (None, None, RecordLimit::All);
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "start" => start = parse_date("start", &value)?,
                "end" => end = parse_date("end", &value)?,
                "limit" => limit = value.parse().map_err(ServerError::BadRequest)?,
                // htmx and browsers may add their own parameters.
                _ => {}
            }
        }

        Ok(Self {
            range: DateRange::new(start, end),
            limit,
        })
    }

    /// Encodes the controls back into a query string (without `?`).
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if let Some(start) = self.range.start {
            serializer.append_pair("start", &start.to_string());
        }
        if let Some(end) = self.range.end {
            serializer.append_pair("end", &end.to_string());
        }
        serializer.append_pair("limit", &self.limit.to_string());
        serializer.finish()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{path}?{}", self.to_query_string())
    }
}

fn parse_date(name: &str, value: &str) -> Result<Option<NaiveDate>, ServerError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ServerError::BadRequest(format!("{name} must be a YYYY-MM-DD date")))
}
