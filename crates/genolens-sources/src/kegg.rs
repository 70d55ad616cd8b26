//! KEGG REST API client.
//!
//! See: https://www.kegg.jp/kegg/rest/keggapi.html
//!
//! KEGG addresses everything through the URL path, with flat text
//! responses and errors signalled by HTTP status:
//!   https://rest.kegg.jp/<op>/<arg>[/<arg2>[/<arg3>]]
//!
//! The path builders below enforce the documented argument rules (entry
//! count limits, valid options, database pairings) before any request
//! leaves the process.

use genolens_common::sandbox::SandboxClient as Client;
use genolens_common::GenolensError;
use tracing::{debug, instrument};

pub const KEGG_API_URL: &str = "https://rest.kegg.jp";

/// Databases whose /list form accepts an organism restriction.
const ORG_RESTRICTED_DBS: [&str; 2] = ["pathway", "module"];

/// Field-search options, valid for the compound and drug databases only.
const FIND_FIELD_OPTIONS: [&str; 3] = ["formula", "exact_mass", "mol_weight"];
const FIND_FIELD_DBS: [&str; 2] = ["compound", "drug"];

const GET_OPTIONS: [&str; 7] = ["aaseq", "ntseq", "mol", "kcf", "image", "kgml", "json"];

const RDF_OPTIONS: [&str; 2] = ["turtle", "n-triple"];

/// Outside databases for gene identifier conversion.
const GENE_OUTSIDE_DBS: [&str; 3] = ["ncbi-gi", "ncbi-geneid", "uniprot"];

/// KEGG chemical substance databases and their outside counterparts.
const CHEM_KEGG_DBS: [&str; 3] = ["drug", "compound", "glycan"];
const CHEM_OUTSIDE_DBS: [&str; 2] = ["pubchem", "chebi"];

/// Maximum database entries per /list request.
const MAX_LIST_ENTRIES: usize = 100;
/// Maximum database entries per /get request.
const MAX_GET_ENTRIES: usize = 10;

pub struct KeggClient {
    client: Client,
}

impl KeggClient {
    pub fn new() -> Self {
        Self {
            client: Client::new().unwrap(),
        }
    }

    #[instrument(skip(self))]
    async fn query(&self, path: &str) -> anyhow::Result<String> {
        let url = format!("{}/{}", KEGG_API_URL, path);
        debug!(%url, "KEGG request");

        let resp = self.client.get(&url)?.send().await?;
        if !resp.status().is_success() {
            anyhow::bail!("KEGG request failed: HTTP {} for {}", resp.status(), url);
        }

        Ok(resp.text().await?)
    }

    /// KEGG info: current statistics of a database or organism.
    pub async fn info(&self, database: &str) -> anyhow::Result<String> {
        self.query(&format!("info/{database}")).await
    }

    /// KEGG list: entry list for a database, optionally restricted to an
    /// organism (pathway and module only).
    pub async fn list(&self, database: &str, org: Option<&str>) -> anyhow::Result<String> {
        let path = list_path(database, org)?;
        self.query(&path).await
    }

    /// KEGG list over explicit database entries (up to 100).
    pub async fn list_entries(&self, entries: &[&str]) -> anyhow::Result<String> {
        let path = list_entries_path(entries)?;
        self.query(&path).await
    }

    /// KEGG find: keyword search, or field search on compound/drug when an
    /// option (formula, exact_mass, mol_weight) is given.
    pub async fn find(
        &self,
        database: &str,
        keywords: &[&str],
        option: Option<&str>,
    ) -> anyhow::Result<String> {
        let path = find_path(database, keywords, option)?;
        self.query(&path).await
    }

    /// KEGG get: retrieve up to 10 entries, optionally in an alternate
    /// representation (aaseq, ntseq, mol, kcf, image, kgml, json).
    pub async fn get(&self, entries: &[&str], option: Option<&str>) -> anyhow::Result<String> {
        let path = get_path(entries, option)?;
        self.query(&path).await
    }

    /// KEGG conv: convert identifiers between KEGG and outside databases.
    pub async fn conv(
        &self,
        target_db: &str,
        source: &[&str],
        option: Option<&str>,
    ) -> anyhow::Result<String> {
        let path = conv_path(target_db, source, option)?;
        self.query(&path).await
    }

    /// KEGG link: related entries via database cross-references.
    pub async fn link(
        &self,
        target_db: &str,
        source_db: &str,
        option: Option<&str>,
    ) -> anyhow::Result<String> {
        let path = link_path(target_db, source_db, option)?;
        self.query(&path).await
    }
}

impl Default for KeggClient {
    fn default() -> Self {
        Self::new()
    }
}

// ── Path builders ──────────────────────────────────────────────────────────

fn list_path(database: &str, org: Option<&str>) -> Result<String, GenolensError> {
    match org {
        Some(org) if ORG_RESTRICTED_DBS.contains(&database) => Ok(format!("list/{database}/{org}")),
        Some(_) => Err(GenolensError::InvalidArgument(format!(
            "Organism restriction is only valid for {:?}, not {database}",
            ORG_RESTRICTED_DBS
        ))),
        None => Ok(format!("list/{database}")),
    }
}

fn list_entries_path(entries: &[&str]) -> Result<String, GenolensError> {
    if entries.len() > MAX_LIST_ENTRIES {
        return Err(GenolensError::InvalidArgument(format!(
            "Maximum number of entries is {MAX_LIST_ENTRIES} for a list query, got {}",
            entries.len()
        )));
    }
    Ok(format!("list/{}", entries.join("+")))
}

fn find_path(
    database: &str,
    keywords: &[&str],
    option: Option<&str>,
) -> Result<String, GenolensError> {
    let query = keywords.join("+");
    match option {
        Some(opt) if FIND_FIELD_DBS.contains(&database) && FIND_FIELD_OPTIONS.contains(&opt) => {
            Ok(format!("find/{database}/{query}/{opt}"))
        }
        Some(opt) => Err(GenolensError::InvalidArgument(format!(
            "Invalid find option {opt:?} for database {database}"
        ))),
        None => Ok(format!("find/{database}/{query}")),
    }
}

fn get_path(entries: &[&str], option: Option<&str>) -> Result<String, GenolensError> {
    if entries.len() > MAX_GET_ENTRIES {
        return Err(GenolensError::InvalidArgument(format!(
            "Maximum number of entries is {MAX_GET_ENTRIES} for a get query, got {}",
            entries.len()
        )));
    }
    let joined = entries.join("+");
    match option {
        Some(opt) if GET_OPTIONS.contains(&opt) => Ok(format!("get/{joined}/{opt}")),
        Some(opt) => Err(GenolensError::InvalidArgument(format!(
            "Invalid get option: {opt:?}"
        ))),
        None => Ok(format!("get/{joined}")),
    }
}

fn conv_path(
    target_db: &str,
    source: &[&str],
    option: Option<&str>,
) -> Result<String, GenolensError> {
    if let Some(opt) = option {
        if !RDF_OPTIONS.contains(&opt) {
            return Err(GenolensError::InvalidArgument(format!(
                "Invalid conv option: {opt:?}"
            )));
        }
    }

    let source = source.join("+");
    let valid_pairing = GENE_OUTSIDE_DBS.contains(&target_db)
        || GENE_OUTSIDE_DBS.contains(&source.as_str())
        || (CHEM_KEGG_DBS.contains(&target_db) && CHEM_OUTSIDE_DBS.contains(&source.as_str()))
        || (CHEM_OUTSIDE_DBS.contains(&target_db) && CHEM_KEGG_DBS.contains(&source.as_str()));
    if !valid_pairing {
        return Err(GenolensError::InvalidArgument(format!(
            "Bad target_db or source for conv request: {target_db} / {source}"
        )));
    }

    Ok(match option {
        Some(opt) => format!("conv/{target_db}/{source}/{opt}"),
        None => format!("conv/{target_db}/{source}"),
    })
}

fn link_path(
    target_db: &str,
    source_db: &str,
    option: Option<&str>,
) -> Result<String, GenolensError> {
    match option {
        Some(opt) if RDF_OPTIONS.contains(&opt) => Ok(format!("link/{target_db}/{source_db}/{opt}")),
        Some(opt) => Err(GenolensError::InvalidArgument(format!(
            "Invalid link option: {opt:?}"
        ))),
        None => Ok(format!("link/{target_db}/{source_db}")),
    }
}
