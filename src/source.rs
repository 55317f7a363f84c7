use anyhow::Context;
use tracing::debug;

use crate::model::attendance::RawAttendanceRecord;

/// HTTP client for the upstream attendance API. The caller's bearer token is
/// an explicit parameter on every call; nothing here reads ambient state.
#[derive(Clone)]
pub struct HttpRecordSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpRecordSource {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Fetches every attendance record the upstream holds.
    pub async fn fetch_all(&self, bearer: &str) -> anyhow::Result<Vec<RawAttendanceRecord>> {
        let url = format!("{}/api/attendance/all", self.base_url);
        debug!(%url, "Fetching attendance records");

        let records = self
            .client
            .get(&url)
            .bearer_auth(bearer)
            .send()
            .await
            .context("upstream attendance request failed")?
            .error_for_status()
            .context("upstream attendance request rejected")?
            .json::<Vec<RawAttendanceRecord>>()
            .await
            .context("upstream attendance response was not a record list")?;

        Ok(records)
    }

    /// Fetches the records of one calendar month.
    pub async fn fetch_month(
        &self,
        bearer: &str,
        year: i32,
        month: u32,
    ) -> anyhow::Result<Vec<RawAttendanceRecord>> {
        let url = format!("{}/api/attendance/all/month", self.base_url);
        debug!(%url, year, month, "Fetching monthly attendance records");

        let records = self
            .client
            .get(&url)
            .bearer_auth(bearer)
            .query(&[("year", year.to_string()), ("month", month.to_string())])
            .send()
            .await
            .context("upstream monthly attendance request failed")?
            .error_for_status()
            .context("upstream monthly attendance request rejected")?
            .json::<Vec<RawAttendanceRecord>>()
            .await
            .context("upstream monthly attendance response was not a record list")?;

        Ok(records)
    }
}
