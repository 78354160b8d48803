use log::{debug, warn};
use reqwest::StatusCode;
use serde::Serialize;
use url::Url;

use crate::parser::parse_csv;
use crate::sheet::SheetData;

/// Primary error type for the [`SheetClient`]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("endpoint URL error: {0}")]
    Url(#[from] url::ParseError),

    #[error("sheet read failed with status {code}")]
    FetchStatus { code: StatusCode },

    #[error("failed to send the sheet read request: {0}")]
    FetchTransport(#[source] reqwest::Error),

    #[error("failed to read the sheet response body: {0}")]
    FetchBody(#[source] reqwest::Error),

    #[error("failed to dispatch the row update request: {0}")]
    WriteDispatch(#[source] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Outcome of a row write
///
/// The write channel is opaque: the webhook's response cannot be read, so
/// the only positive statement the client can make is that the request
/// left this process. A write the server silently rejected still reports
/// `Dispatched`. Callers must treat this as a hint, never as confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Dispatched,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RowUpdate<'a> {
    row_index: u32,
    data: &'a [String],
}

/// Client for one remote sheet: a CSV export endpoint for reads and a
/// webhook endpoint for writes
#[derive(Debug, Clone)]
pub struct SheetClient {
    http_client: reqwest::Client,
    csv_url: Url,
    webhook_url: Url,
}

impl SheetClient {
    /// Create a client from explicit read and write endpoints
    pub fn new(csv_url: impl AsRef<str>, webhook_url: impl AsRef<str>) -> Result<Self> {
        Ok(SheetClient {
            http_client: reqwest::Client::new(),
            csv_url: Url::parse(csv_url.as_ref())?,
            webhook_url: Url::parse(webhook_url.as_ref())?,
        })
    }

    /// Create a client for a hosted sheet document
    ///
    /// Builds the CSV export URL from the document id and the sheet tab
    /// id, the same address the browser front-end reads from.
    ///
    /// # Examples
    /// ```no_run
    /// use sheetsync::client::SheetClient;
    ///
    /// let client = SheetClient::for_document(
    ///     "1bR2dlX_sHTaxMMlmeze3sHYWryRyVsKDKE_tJUxJS70",
    ///     0,
    ///     "https://script.example.com/exec",
    /// ).expect("valid endpoints");
    /// ```
    pub fn for_document(doc_id: &str, gid: u32, webhook_url: &str) -> Result<Self> {
        let csv_url =
            format!("https://docs.google.com/spreadsheets/d/{doc_id}/export?format=csv&gid={gid}");
        Self::new(csv_url, webhook_url)
    }

    /// Fetch the whole sheet and build a fresh snapshot
    ///
    /// A non-2xx status or a transport failure is an error; the caller is
    /// expected to keep whatever snapshot it already has and let the user
    /// retry.
    pub async fn fetch_all(&self) -> Result<SheetData> {
        debug!("fetching sheet from {}", self.csv_url);
        let resp = self
            .http_client
            .get(self.csv_url.clone())
            .send()
            .await
            .map_err(Error::FetchTransport)?;

        let status = resp.status();
        if !status.is_success() {
            warn!("sheet read returned {status}");
            return Err(Error::FetchStatus { code: status });
        }

        let text = resp.text().await.map_err(Error::FetchBody)?;
        let data = SheetData::from_lines(parse_csv(&text));
        debug!("fetched {} data rows", data.rows.len());
        Ok(data)
    }

    /// Send one row's new contents to the write webhook
    ///
    /// The request body is `{"rowIndex": n, "data": [..]}`. The response
    /// is deliberately ignored: the webhook answers in a mode the caller
    /// cannot read, so status and body carry no information. Only a local
    /// transport failure (network unreachable, connection refused) turns
    /// into [`Error::WriteDispatch`].
    pub async fn save_row(&self, row_index: u32, data: &[String]) -> Result<WriteOutcome> {
        let payload = RowUpdate { row_index, data };
        self.http_client
            .post(self.webhook_url.clone())
            .json(&payload)
            .send()
            .await
            .map_err(Error::WriteDispatch)?;

        debug!("update for row {row_index} dispatched");
        Ok(WriteOutcome::Dispatched)
    }
}
