//! Gene expression analysis tool backed by the Firebrowse client.

use anyhow::Result;
use async_trait::async_trait;
use genolens_sources::FirebrowseClient;
use serde_json::Value;

use super::GenolensTool;

pub struct GeneExpressionTool {
    firebrowse: FirebrowseClient,
}

impl GeneExpressionTool {
    pub fn new(firebrowse: FirebrowseClient) -> Self {
        Self { firebrowse }
    }
}

#[async_trait]
impl GenolensTool for GeneExpressionTool {
    fn name(&self) -> &str {
        "get_gene_specific_expression_in_cancer_type"
    }

    fn description(&self) -> &str {
        "Analyze the tissue-specific expression pattern of a gene across \
         cancer types using TCGA mRNASeq data (Firebrowse). Computes mean \
         expression per cancer cohort, derives a z-score over the cohort \
         means, and returns the cancer types where the gene is highly \
         (z > 1) or lowly (z < -1) expressed."
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "gene": { "type": "string", "description": "Gene symbol, e.g. TP53, BRCA1, EGFR" }
            },
            "required": ["gene"]
        })
    }

    async fn invoke(&self, params: Value) -> Result<Value> {
        let gene = params["gene"].as_str().unwrap_or("TP53");

        tracing::info!(gene, "Analyzing expression across cancer types");

        let summary = self.firebrowse.gene_expression_by_cancer_type(gene).await?;
        Ok(serde_json::to_value(summary)?)
    }
}
