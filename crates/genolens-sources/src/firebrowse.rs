//! TCGA Firebrowse mRNASeq expression client.
//!
//! Endpoint: http://firebrowse.org/api/v1/Samples/mRNASeq
//!
//! Firebrowse serves RSEM log2 expression values for TCGA tumor samples
//! as paginated TSV: the first page carries a column header, later pages
//! do not. This client pages through the full result set for one gene,
//! then hands the (cohort, expression) pairs to genolens-stats to call
//! high and low expression cancer types.

use genolens_common::sandbox::SandboxClient as Client;
use genolens_common::GenolensError;
use genolens_stats::{aggregate, classify, ExpressionClassification};
use tracing::{debug, instrument, warn};

use crate::table::{end_of_records, ExpressionTable};

pub const FIREBROWSE_API_URL: &str = "http://firebrowse.org/api/v1/Samples/mRNASeq";

/// Tumor sample type codes: metastatic, primary, recurrent.
const SAMPLE_TYPES: &str = "TM,TP,TR";
const PROTOCOL: &str = "RSEM";
const SORT_BY: &str = "cohort";

const COHORT_COLUMN: &str = "cohort";
const EXPRESSION_COLUMN: &str = "expression_log2";

/// Rows requested per page.
pub const DEFAULT_PAGE_SIZE: usize = 2000;

/// Bound on the pagination loop for an endpoint that never signals
/// termination. Firebrowse holds well under 20M mRNASeq rows, so at
/// 2000 rows per page this is never reached in normal operation.
pub const DEFAULT_MAX_PAGES: u32 = 10_000;

pub struct FirebrowseClient {
    client: Client,
    base_url: String,
    page_size: usize,
    max_pages: u32,
}

impl FirebrowseClient {
    pub fn new() -> Self {
        Self {
            client: Client::new().unwrap(),
            base_url: FIREBROWSE_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    /// Point the client at a different endpoint, e.g. a local test server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Fetch every page of expression rows for a gene into one table.
    ///
    /// Pages are requested strictly sequentially starting at page 1.
    /// Pagination ends on the first non-2xx response (the rows fetched so
    /// far are returned, not an error), on an empty or "No records" body,
    /// or at the `max_pages` bound.
    #[instrument(skip(self))]
    pub async fn fetch_expression_table(&self, gene: &str) -> anyhow::Result<ExpressionTable> {
        let mut table = ExpressionTable::default();
        let page_size = self.page_size.to_string();

        for page in 1..=self.max_pages {
            let page_param = page.to_string();
            let params = [
                ("format", "tsv"),
                ("gene", gene),
                ("sample_type", SAMPLE_TYPES),
                ("protocol", PROTOCOL),
                ("page_size", page_size.as_str()),
                ("page", page_param.as_str()),
                ("sort_by", SORT_BY),
            ];

            debug!(page, "Fetching Firebrowse page");
            let resp = self
                .client
                .get(&self.base_url)?
                .query(&params)
                .send()
                .await?;

            if !resp.status().is_success() {
                warn!(
                    page,
                    status = %resp.status(),
                    "Firebrowse page fetch failed; returning rows accumulated so far"
                );
                return Ok(table);
            }

            let body = resp.text().await?;
            if end_of_records(&body) {
                break;
            }

            table.append_page(&body, page)?;

            if page == self.max_pages {
                warn!(
                    max_pages = self.max_pages,
                    "Page bound reached before the endpoint signalled termination"
                );
            }
        }

        debug!(rows = table.row_count(), "Firebrowse fetch complete");
        Ok(table)
    }

    /// Analyze the tissue-specific expression pattern of a gene across
    /// cancer types.
    ///
    /// Fetches the full result set, groups rows by cohort, and partitions
    /// cohorts into high (z > 1) and low (z < −1) expression by z-score
    /// over the distribution of cohort means. Fails with `EmptyDataset`
    /// when no rows could be fetched at all.
    #[instrument(skip(self))]
    pub async fn gene_expression_by_cancer_type(
        &self,
        gene: &str,
    ) -> anyhow::Result<ExpressionClassification> {
        let table = self.fetch_expression_table(gene).await?;
        if table.is_empty() {
            return Err(GenolensError::EmptyDataset.into());
        }

        let samples = table.pair_columns(COHORT_COLUMN, EXPRESSION_COLUMN)?;
        let stats = aggregate(&samples)?;
        let classification = classify(&stats);

        debug!(
            cohorts = stats.len(),
            high = classification.high_expression_cancers.len(),
            low = classification.low_expression_cancers.len(),
            "Expression classification complete"
        );
        Ok(classification)
    }
}

impl Default for FirebrowseClient {
    fn default() -> Self {
        Self::new()
    }
}
