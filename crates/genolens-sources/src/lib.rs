//! genolens-sources — REST clients for the external data sources.
//!
//! Each client wraps one public API behind the shared sandboxed HTTP
//! client: Firebrowse (TCGA mRNASeq expression), KEGG (pathway and
//! compound databases), and Tavily (web search).

pub mod firebrowse;
pub mod kegg;
pub mod table;
pub mod tavily;

pub use firebrowse::FirebrowseClient;
pub use kegg::KeggClient;
pub use table::ExpressionTable;
pub use tavily::TavilyClient;
