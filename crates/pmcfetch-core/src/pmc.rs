use lazy_static::lazy_static;
use regex::Regex;

/// Base URL template for PMC article PDFs
const PDF_URL_TEMPLATE: &str = "https://pmc.ncbi.nlm.nih.gov/articles/{id}/pdf/";

lazy_static! {
    // Matches lines like "PMC - PMC11609744" from a PubMed text export.
    static ref PMC_LINE_PATTERN: Regex = Regex::new(r"(?i)PMC\s*-\s*(PMC\d+)").unwrap();
}

/// A PMC article identifier as it appears in a PubMed export (e.g. `PMC11609744`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PmcId(String);

impl PmcId {
    /// Extract the first PMC identifier from a single export line
    ///
    /// Only the first match per line is considered; a line carrying two
    /// identifiers yields one.
    pub fn from_line(line: &str) -> Option<Self> {
        PMC_LINE_PATTERN
            .captures(line)
            .map(|caps| Self(caps[1].to_string()))
    }

    /// The identifier token itself
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Build the PDF retrieval URL for this identifier
    pub fn pdf_url(&self) -> String {
        PDF_URL_TEMPLATE.replace("{id}", &self.0)
    }
}

impl std::fmt::Display for PmcId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
